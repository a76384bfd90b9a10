use std::path::PathBuf;

use clap::Parser;
use linkedin_scraping::{config::Config, parser::Extractor};
use linkedin_scraping_utils::fs_json_util::read_toml_or_default;
use scraper::Html;

#[derive(Parser)]
struct Opts {
    input_file: PathBuf,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let config: Config = read_toml_or_default(opts.config.as_deref())?;
    let extractor = Extractor::new(&config.selectors)?;
    let html = Html::parse_document(&fs_err::read_to_string(opts.input_file)?);
    let data = extractor.extract(&html);
    println!("{:?}", data.profile);
    println!("experiences ({}):", data.experiences.len());
    for entry in data.experiences {
        println!("  {entry:?}");
    }
    println!("educations ({}):", data.educations.len());
    for entry in data.educations {
        println!("  {entry:?}");
    }
    Ok(())
}
