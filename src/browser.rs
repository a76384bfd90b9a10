use std::{sync::Arc, time::Duration};

use headless_chrome::{protocol::cdp::Network::CookieParam, Browser, LaunchOptions, Tab};
use log::debug;
use url::Url;

use crate::{config::FetchConfig, cookie_store::SessionCookie};

/// Starts browser sessions.
pub trait BrowserDriver {
    type Session: BrowserSession;

    fn launch(&self, config: &FetchConfig) -> anyhow::Result<Self::Session>;
}

/// A running browser with a single open page.
pub trait BrowserSession {
    fn set_cookies(&self, cookies: &[SessionCookie]) -> anyhow::Result<()>;

    /// Loads `url` and returns once the document has been navigated to.
    fn navigate(&self, url: &Url) -> anyhow::Result<()>;

    /// Returns once `selector` matches, or fails after `timeout`.
    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> anyhow::Result<()>;

    /// Serialized HTML of the current DOM.
    fn content(&self) -> anyhow::Result<String>;

    /// Shuts the browser down.
    fn close(self) -> anyhow::Result<()>;
}

const IDLE_MARGIN: Duration = Duration::from_secs(30);

/// How long the DevTools connection may stay silent before it is dropped.
///
/// It must outlast every pause the fetch takes between browser calls.
fn idle_timeout(config: &FetchConfig) -> Duration {
    let longest = config
        .navigation_timeout
        .max(config.retry_delay)
        .max(config.render_wait.bound());
    longest + IDLE_MARGIN
}

/// Chrome or Chromium over the DevTools protocol.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChromeDriver;

pub struct ChromeSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserDriver for ChromeDriver {
    type Session = ChromeSession;

    fn launch(&self, config: &FetchConfig) -> anyhow::Result<ChromeSession> {
        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(config.window_size)
            .path(config.browser_path.clone())
            .idle_browser_timeout(idle_timeout(config))
            .build()?;
        debug!("Launching browser (headless: {})", config.headless);
        let browser = Browser::new(options)?;
        let tab = browser.new_tab()?;
        tab.set_default_timeout(config.navigation_timeout);
        Ok(ChromeSession { browser, tab })
    }
}

impl BrowserSession for ChromeSession {
    fn set_cookies(&self, cookies: &[SessionCookie]) -> anyhow::Result<()> {
        let params = cookies
            .iter()
            .map(cookie_param)
            .collect::<Result<Vec<_>, _>>()?;
        self.tab.set_cookies(params)?;
        Ok(())
    }

    fn navigate(&self, url: &Url) -> anyhow::Result<()> {
        self.tab.navigate_to(url.as_str())?.wait_until_navigated()?;
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> anyhow::Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)?;
        Ok(())
    }

    fn content(&self) -> anyhow::Result<String> {
        self.tab.get_content()
    }

    fn close(self) -> anyhow::Result<()> {
        let Self { browser, tab } = self;
        let closed = tab.close(false).map(drop);
        // Dropping the last handle kills the browser process.
        drop(browser);
        closed
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CookieConversionError {
    #[error("Cookie {0:?} has neither `domain` nor `url`, so the browser cannot scope it")]
    NoScope(String),
    #[error("Cookie {name:?} is not accepted by the browser: {source}")]
    Rejected {
        name: String,
        source: serde_json::Error,
    },
}

/// Converts to the DevTools cookie type.
///
/// Both use the same camelCase field names, so the conversion goes through JSON.
/// Session cookies are sent without `expires`.
pub fn cookie_param(cookie: &SessionCookie) -> Result<CookieParam, CookieConversionError> {
    if cookie.domain.is_none() && cookie.url.is_none() {
        return Err(CookieConversionError::NoScope(cookie.name.clone()));
    }
    let cookie = SessionCookie {
        expires: cookie.expires.filter(|_| cookie.is_persistent()),
        ..cookie.clone()
    };
    serde_json::to_value(&cookie)
        .and_then(serde_json::from_value)
        .map_err(|source| CookieConversionError::Rejected {
            name: cookie.name.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        config::{FetchConfig, RenderWait},
        cookie_store::{SameSite, SessionCookie},
    };

    use super::{cookie_param, idle_timeout, CookieConversionError, IDLE_MARGIN};

    #[test]
    fn idle_timeout_outlasts_every_pause() {
        let config = FetchConfig::builder()
            .navigation_timeout(Duration::from_secs(30))
            .retry_delay(Duration::from_secs(90))
            .render_wait(RenderWait::Fixed {
                duration: Duration::from_secs(45),
            })
            .build();
        assert_eq!(idle_timeout(&config), Duration::from_secs(90) + IDLE_MARGIN);

        let config = FetchConfig::builder()
            .render_wait(RenderWait::Fixed {
                duration: Duration::from_secs(120),
            })
            .build();
        assert_eq!(idle_timeout(&config), Duration::from_secs(120) + IDLE_MARGIN);
    }

    #[test]
    fn converts_exported_cookie() {
        let cookie = SessionCookie::builder()
            .name("li_at")
            .value("secret")
            .domain(".linkedin.com")
            .path("/")
            .expires(1767225600.)
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .build();
        let param = cookie_param(&cookie).unwrap();
        assert_eq!(param.name, "li_at");
        assert_eq!(param.value, "secret");
        assert_eq!(param.domain.as_deref(), Some(".linkedin.com"));
        assert_eq!(param.path.as_deref(), Some("/"));
        assert_eq!(param.http_only, Some(true));
        assert_eq!(param.secure, Some(true));
        assert_eq!(param.expires, Some(1767225600.));
        assert!(param.same_site.is_some());
    }

    #[test]
    fn session_cookie_has_no_expiry() {
        let cookie = SessionCookie::builder()
            .name("lang")
            .value("v=2&lang=en-us")
            .domain(".linkedin.com")
            .expires(-1.)
            .build();
        assert_eq!(cookie_param(&cookie).unwrap().expires, None);
    }

    #[test]
    fn unscoped_cookie_is_rejected() {
        let cookie = SessionCookie::builder().name("li_at").value("secret").build();
        assert!(matches!(
            cookie_param(&cookie),
            Err(CookieConversionError::NoScope(name)) if name == "li_at"
        ));
    }
}
