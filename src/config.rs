use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use typed_builder::TypedBuilder;

use crate::selector_table::SelectorTable;

/// Contents of the optional TOML config file. Every key may be omitted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub selectors: SelectorTable,
}

#[serde_as]
#[derive(Clone, Debug, TypedBuilder, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    #[builder(default = true)]
    pub headless: bool,
    #[builder(default, setter(strip_option))]
    pub window_size: Option<(u32, u32)>,
    /// Browser executable. Auto-detected when absent.
    #[builder(default, setter(strip_option))]
    pub browser_path: Option<PathBuf>,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[builder(default = Duration::from_secs(30))]
    pub navigation_timeout: Duration,
    /// Extra navigation attempts after the first one fails.
    #[builder(default)]
    pub navigation_retries: u32,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[builder(default = Duration::from_secs(5))]
    pub retry_delay: Duration,
    #[builder(default)]
    pub render_wait: RenderWait,
}
impl Default for FetchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// How long to let client-side scripts render before the page is saved.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderWait {
    /// Sleep unconditionally.
    Fixed {
        #[serde_as(as = "DurationSeconds<u64>")]
        duration: Duration,
    },
    /// Wait until each of `selectors` matches, in order. `timeout` bounds the
    /// whole wait, not each selector.
    Selectors {
        selectors: Vec<String>,
        #[serde_as(as = "DurationSeconds<u64>")]
        timeout: Duration,
    },
}
impl Default for RenderWait {
    /// The list sections load after the top card, so the anchors of both are
    /// awaited.
    fn default() -> Self {
        Self::Selectors {
            selectors: vec!["div#experience".to_owned(), "div#education".to_owned()],
            timeout: Duration::from_secs(10),
        }
    }
}
impl RenderWait {
    /// Longest time this wait may block.
    pub fn bound(&self) -> Duration {
        match *self {
            Self::Fixed { duration } => duration,
            Self::Selectors { timeout, .. } => timeout,
        }
    }
}
