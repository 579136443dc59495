use log::LevelFilter;

use crate::menu::{HIDE_DELAY_MS, MENU_LIFT_PX};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Runtime settings for one page load.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub api_url: String,
    pub hide_delay_ms: u32,
    pub tick_ms: u32,
    pub menu_lift_px: f64,
    /// Where to go after the score is posted.
    pub home_url: String,
    pub log_level: LevelFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            hide_delay_ms: HIDE_DELAY_MS,
            tick_ms: 1000,
            menu_lift_px: MENU_LIFT_PX,
            home_url: "/".to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl GameConfig {
    /// Build from the page's query string and the host page's optional API
    /// base. `?api=` wins over the page value, which wins over the default.
    pub fn from_sources(search: &str, page_api_url: Option<&str>) -> Self {
        let mut cfg = GameConfig::default();
        let non_blank = |s: &String| !s.trim().is_empty();
        let api = get_query_param(search, "api")
            .filter(non_blank)
            .or_else(|| page_api_url.map(str::to_string).filter(non_blank));
        if let Some(api) = api {
            cfg.api_url = api.trim().to_string();
        }
        if let Some(level) = get_query_param(search, "log").and_then(|l| l.parse().ok()) {
            cfg.log_level = level;
        }
        cfg
    }

    /// Absolute URL for an API path, with exactly one slash at the seam.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}
