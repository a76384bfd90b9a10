use std::{
    fmt::Debug,
    io::{self, BufReader},
    path::PathBuf,
};

use fs_err::File;
use serde::{de, Deserialize, Deserializer, Serialize};
use typed_builder::TypedBuilder;

/// Cookies exported from a logged-in browser, in the order they were exported.
#[derive(Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieStore {
    cookies: Vec<SessionCookie>,
}
impl Debug for CookieStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.cookies.iter().map(|c| &c.name))
            .finish()
    }
}

/// A single cookie required by the site to recognize an authenticated session.
///
/// Field names follow the format browser extensions and Playwright use when
/// exporting cookies (`httpOnly`, `sameSite`, ...), so an exported file can be
/// loaded as-is.
#[derive(Clone, PartialEq, TypedBuilder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    #[builder(setter(into))]
    pub name: String,
    #[builder(setter(into))]
    pub value: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Seconds since the Unix epoch. Zero or negative marks a session cookie.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    /// `unspecified`, as some extensions export it, reads as absent.
    #[builder(default, setter(strip_option))]
    #[serde(
        default,
        deserialize_with = "deserialize_same_site",
        skip_serializing_if = "Option::is_none"
    )]
    pub same_site: Option<SameSite>,
}
impl Debug for SessionCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SameSite {
    #[serde(alias = "strict")]
    Strict,
    #[serde(alias = "lax")]
    Lax,
    #[serde(alias = "none", alias = "no_restriction")]
    None,
}

fn deserialize_same_site<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SameSite>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Exported {
        Known(SameSite),
        Other(String),
    }
    match Option::<Exported>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Exported::Known(same_site)) => Ok(Some(same_site)),
        Some(Exported::Other(s)) if s.eq_ignore_ascii_case("unspecified") => Ok(None),
        Some(Exported::Other(s)) => Err(de::Error::invalid_value(
            de::Unexpected::Str(&s),
            &"one of Strict, Lax, None, no_restriction or unspecified",
        )),
    }
}

impl SessionCookie {
    /// Whether the cookie has a positive expiry, i.e. is not a session cookie.
    pub fn is_persistent(&self) -> bool {
        self.expires.is_some_and(|e| e > 0.)
    }
}

impl CookieStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CookieStoreLoadError> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn cookies(&self) -> &[SessionCookie] {
        &self.cookies
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}
impl From<Vec<SessionCookie>> for CookieStore {
    fn from(cookies: Vec<SessionCookie>) -> Self {
        Self { cookies }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CookieStoreLoadError {
    #[error("Cookie file was not found.")]
    NotFound,
    #[error("An I/O error occurred when loading the cookie file: {0:?}")]
    IOError(io::Error),
    #[error("The cookie file is not a JSON array of cookies: {0:?}")]
    JsonError(#[from] serde_json::Error),
}
impl From<io::Error> for CookieStoreLoadError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::IOError(e),
        }
    }
}
