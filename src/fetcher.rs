//! Saves the rendered HTML of a page that requires a logged-in session.
//!
//! Only launching the browser can fail the whole fetch. Problems after that are
//! logged and reported in [`FetchOutcome`], and the browser is closed no matter
//! which step went wrong.

use std::{path::Path, thread::sleep, time::Instant};

use anyhow::Context;
use log::{debug, error, info, warn};
use url::Url;

use crate::{
    browser::{BrowserDriver, BrowserSession, ChromeDriver},
    config::{FetchConfig, RenderWait},
    cookie_store::SessionCookie,
};

/// Which steps of a fetch succeeded.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FetchOutcome {
    pub cookies_set: bool,
    pub navigated: bool,
    pub saved: bool,
}

pub struct Fetcher<D = ChromeDriver> {
    driver: D,
    config: FetchConfig,
}

impl Fetcher {
    pub fn chrome(config: FetchConfig) -> Self {
        Self::new(ChromeDriver, config)
    }
}

impl<D: BrowserDriver> Fetcher<D> {
    pub fn new(driver: D, config: FetchConfig) -> Self {
        Self { driver, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Opens `url` with `cookies` set and writes the rendered HTML to `output`,
    /// overwriting it.
    pub fn scrape(
        &self,
        cookies: &[SessionCookie],
        url: &Url,
        output: &Path,
    ) -> anyhow::Result<FetchOutcome> {
        let session = self
            .driver
            .launch(&self.config)
            .context("Failed to launch the browser")?;
        let outcome = self.drive(&session, cookies, url, output);
        match session.close() {
            Ok(()) => debug!("Browser closed"),
            Err(e) => error!("Failed to close the browser cleanly: {e:#}"),
        }
        Ok(outcome)
    }

    fn drive(
        &self,
        session: &D::Session,
        cookies: &[SessionCookie],
        url: &Url,
        output: &Path,
    ) -> FetchOutcome {
        let mut outcome = FetchOutcome {
            cookies_set: set_cookies(session, cookies),
            ..Default::default()
        };
        outcome.navigated = self.navigate(session, url);
        if !outcome.navigated {
            return outcome;
        }
        self.wait_for_render(session);
        outcome.saved = save_html(session, output);
        outcome
    }

    fn navigate(&self, session: &D::Session, url: &Url) -> bool {
        let attempts = self.config.navigation_retries.saturating_add(1);
        for attempt in 1..=attempts {
            match session.navigate(url) {
                Ok(()) => {
                    info!("Navigated to {url}");
                    return true;
                }
                Err(e) => {
                    error!("Failed to navigate to {url} (attempt {attempt}/{attempts}): {e:#}");
                    if attempt < attempts {
                        sleep(self.config.retry_delay);
                    }
                }
            }
        }
        false
    }

    fn wait_for_render(&self, session: &D::Session) {
        match &self.config.render_wait {
            RenderWait::Fixed { duration } => {
                info!("Waiting {duration:?} for the page to render");
                sleep(*duration);
            }
            RenderWait::Selectors { selectors, timeout } => {
                let deadline = Instant::now() + *timeout;
                for selector in selectors {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    match session.wait_for_selector(selector, remaining) {
                        Ok(()) => debug!("{selector:?} has been rendered"),
                        Err(e) => warn!(
                            "{selector:?} did not appear within {timeout:?}; saving the page as is: {e:#}"
                        ),
                    }
                }
            }
        }
    }
}

fn set_cookies(session: &impl BrowserSession, cookies: &[SessionCookie]) -> bool {
    match session.set_cookies(cookies) {
        Ok(()) => {
            info!("Cookies have been set successfully.");
            true
        }
        Err(e) => {
            error!("Failed to set cookies: {e:#}");
            false
        }
    }
}

fn save_html(session: &impl BrowserSession, output: &Path) -> bool {
    let result = session
        .content()
        .and_then(|html| Ok(fs_err::write(output, html)?));
    match result {
        Ok(()) => {
            info!("HTML content saved to {}", output.display());
            true
        }
        Err(e) => {
            error!("Failed to save HTML content: {e:#}");
            false
        }
    }
}
