use anyhow::anyhow;
use scraper::{ElementRef, Selector};

/// Parses a CSS selector known only at runtime, e.g. one loaded from a config file.
pub fn parse_selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector {css:?}: {e}"))
}

/// Text content of `element` with every text node trimmed and the pieces
/// concatenated without a separator.
///
/// Markup inside the element is discarded, so `<h1> Jane <b>Doe</b> </h1>`
/// becomes `"JaneDoe"`.
pub fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
