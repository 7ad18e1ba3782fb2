//! Page configuration.
//!
//! The endpoint comes from, in order of precedence: a
//! `<meta name="epg-backend-url">` tag in the host page, the
//! `EPG_BACKEND_URL` variable at build time, and the same-origin default.

use chrono::{NaiveDate, Utc};

pub const DEFAULT_API_URL: &str = "/api/epg/programs";

/// Days either side of today the date picker may select.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

const API_URL_META: &str = "epg-backend-url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideConfig {
    pub api_url: String,
    pub window_days: i64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            api_url: build_api_url().to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl GuideConfig {
    /// Defaults with the host page's meta override applied.
    pub fn from_document() -> Self {
        Self::default().with_api_url(meta_content(API_URL_META))
    }

    /// Replace the endpoint when `url` is present and non-blank.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
        self
    }
}

fn build_api_url() -> &'static str {
    option_env!("EPG_BACKEND_URL")
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()??;
    meta.get_attribute("content")
}

/// Today's date as used for the default filter and the picker window.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
