//! Query limits: defaults and hard caps applied at the service boundary.
//!
//! Read from environment variables with [`QueryLimits::from_env`]; any
//! missing or unparsable variable falls back to its default.

use std::time::Duration;

/// Default walk length when the caller gives none.
const DEFAULT_MAX_DEPTH: usize = 5;
/// Longest walk a caller may ask for.
const DEFAULT_MAX_DEPTH_CAP: usize = 10;
/// Default number of suggestions.
const DEFAULT_SUGGEST_LIMIT: usize = 10;
/// Most suggestions a caller may ask for.
const DEFAULT_SUGGEST_LIMIT_CAP: usize = 50;
/// Wall-clock limit for one path search.
const DEFAULT_PATH_TIMEOUT: Duration = Duration::from_secs(10);

/// Limits enforced by [`crate::Graph`] before calling into the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLimits {
    pub default_max_depth: usize,
    pub max_depth_cap: usize,
    pub default_suggest_limit: usize,
    pub suggest_limit_cap: usize,
    /// `None` disables the timeout.
    pub path_timeout: Option<Duration>,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_max_depth: DEFAULT_MAX_DEPTH,
            max_depth_cap: DEFAULT_MAX_DEPTH_CAP,
            default_suggest_limit: DEFAULT_SUGGEST_LIMIT,
            suggest_limit_cap: DEFAULT_SUGGEST_LIMIT_CAP,
            path_timeout: Some(DEFAULT_PATH_TIMEOUT),
        }
    }
}

impl QueryLimits {
    /// Read limits from the process environment.
    ///
    /// - `CHEMPATH_DEFAULT_MAX_DEPTH` (default: 5)
    /// - `CHEMPATH_MAX_DEPTH_CAP` (default: 10)
    /// - `CHEMPATH_DEFAULT_SUGGEST_LIMIT` (default: 10)
    /// - `CHEMPATH_SUGGEST_LIMIT_CAP` (default: 50)
    /// - `CHEMPATH_PATH_TIMEOUT_MS` (default: 10000, `0` disables)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let defaults = Self::default();

        let max_depth_cap = read("CHEMPATH_MAX_DEPTH_CAP")
            .filter(|&v| v > 0)
            .map_or(defaults.max_depth_cap, |v| v as usize);
        let default_max_depth = read("CHEMPATH_DEFAULT_MAX_DEPTH")
            .filter(|&v| v > 0)
            .map_or(defaults.default_max_depth, |v| v as usize)
            .min(max_depth_cap);

        let suggest_limit_cap = read("CHEMPATH_SUGGEST_LIMIT_CAP")
            .filter(|&v| v > 0)
            .map_or(defaults.suggest_limit_cap, |v| v as usize);
        let default_suggest_limit = read("CHEMPATH_DEFAULT_SUGGEST_LIMIT")
            .filter(|&v| v > 0)
            .map_or(defaults.default_suggest_limit, |v| v as usize)
            .min(suggest_limit_cap);

        let path_timeout = match read("CHEMPATH_PATH_TIMEOUT_MS") {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.path_timeout,
        };

        Self {
            default_max_depth,
            max_depth_cap,
            default_suggest_limit,
            suggest_limit_cap,
            path_timeout,
        }
    }
}
