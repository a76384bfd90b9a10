use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use linkedin_scraping::{
    config::{Config, FetchConfig},
    cookie_store::CookieStore,
    export::DEFAULT_FILENAME,
    fetcher::{FetchOutcome, Fetcher},
    parser::Extractor,
};
use linkedin_scraping_utils::fs_json_util::{read_toml_or_default, write_json};
use log::{info, warn};
use scraper::Html;
use url::Url;

#[derive(Parser)]
struct Opts {
    /// TOML file with `[fetch]` and `[selectors]` tables.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    sub: Sub,
}

#[derive(Subcommand)]
enum Sub {
    /// Save the rendered HTML of a profile page.
    Fetch(FetchArgs),
    /// Read a saved profile page into a spreadsheet.
    Extract(ExtractArgs),
    /// Fetch, then extract from the saved page.
    Run(RunArgs),
}

#[derive(Args)]
struct FetchArgs {
    /// JSON array of cookies exported from a logged-in browser.
    cookies_json: PathBuf,
    url: Url,
    #[arg(short, long, default_value = "profile.html")]
    output: PathBuf,
    /// Show the browser window.
    #[arg(long)]
    headed: bool,
}

#[derive(Args)]
struct ExtractArgs {
    html: PathBuf,
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    output: PathBuf,
    /// Also write the records as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    cookies_json: PathBuf,
    url: Url,
    #[arg(long, default_value = "profile.html")]
    html: PathBuf,
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    output: PathBuf,
    #[arg(long)]
    json: Option<PathBuf>,
    #[arg(long)]
    headed: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
    let opts = Opts::parse();
    let config: Config = read_toml_or_default(opts.config.as_deref())?;

    match opts.sub {
        Sub::Fetch(args) => {
            fetch(
                &config.fetch,
                &args.cookies_json,
                &args.url,
                &args.output,
                args.headed,
            )?;
        }
        Sub::Extract(args) => {
            extract(&config, &args.html, &args.output, args.json.as_deref())?;
        }
        Sub::Run(args) => {
            let outcome = fetch(
                &config.fetch,
                &args.cookies_json,
                &args.url,
                &args.html,
                args.headed,
            )?;
            if !outcome.saved {
                warn!(
                    "The page was not saved; extracting whatever is at {}",
                    args.html.display()
                );
            }
            extract(&config, &args.html, &args.output, args.json.as_deref())?;
        }
    }

    Ok(())
}

fn fetch(
    config: &FetchConfig,
    cookies_json: &Path,
    url: &Url,
    output: &Path,
    headed: bool,
) -> anyhow::Result<FetchOutcome> {
    let cookies = CookieStore::load(cookies_json)
        .with_context(|| format!("While loading cookies from {cookies_json:?}"))?;
    info!("Loaded {} cookies", cookies.len());
    let config = FetchConfig {
        headless: config.headless && !headed,
        ..config.clone()
    };
    Fetcher::chrome(config).scrape(cookies.cookies(), url, output)
}

fn extract(
    config: &Config,
    html: &Path,
    output: &Path,
    json: Option<&Path>,
) -> anyhow::Result<()> {
    let extractor = Extractor::new(&config.selectors)?;
    let html = Html::parse_document(&fs_err::read_to_string(html)?);
    let data = extractor.extract(&html);
    info!(
        "Extracted {:?} with {} experiences and {} educations",
        data.profile.name,
        data.experiences.len(),
        data.educations.len()
    );
    data.save_to_excel(output)?;
    if let Some(json) = json {
        write_json(json, &data)?;
        info!("Records written to {}", json.display());
    }
    Ok(())
}
