//! Environment-driven configuration.
//!
//! # Environment Variables
//!
//! - `CODEERR_APP_CODE=<n>` - Application code; business codes are offset by `n * 10000`
//! - `CODEERR_STACK_DEPTH=<n>` - Maximum frames kept per stack capture (default 32)
//!
//! # Usage
//!
//! ```
//! use codeerr::{CodeCenter, Config};
//!
//! let center = CodeCenter::new();
//! Config::default().app_code(7).stack_depth(16).apply(&center);
//! assert_eq!(center.service_code(), 70000);
//! ```

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::CodeCenter;

/// Environment variable holding the application code.
pub const ENV_APP_CODE: &str = "CODEERR_APP_CODE";

/// Environment variable holding the maximum captured stack depth.
pub const ENV_STACK_DEPTH: &str = "CODEERR_STACK_DEPTH";

/// Default maximum number of frames kept per capture.
pub const DEFAULT_STACK_DEPTH: usize = 32;

const UNSET: usize = usize::MAX;

static STACK_DEPTH: AtomicUsize = AtomicUsize::new(UNSET);

/// Maximum number of frames a new capture keeps.
///
/// Until [`set_stack_depth`] is called, the first read takes
/// `CODEERR_STACK_DEPTH` (or [`DEFAULT_STACK_DEPTH`]) and keeps it.
#[inline]
pub fn stack_depth() -> usize {
    match STACK_DEPTH.load(Ordering::Relaxed) {
        UNSET => {
            let depth = env_get(ENV_STACK_DEPTH, DEFAULT_STACK_DEPTH);
            // A concurrent set_stack_depth wins over the environment.
            match STACK_DEPTH.compare_exchange(UNSET, depth, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => depth,
                Err(current) => current,
            }
        }
        depth => depth,
    }
}

/// Change the maximum number of frames kept by captures made from now on.
pub fn set_stack_depth(depth: usize) {
    STACK_DEPTH.store(depth.min(UNSET - 1), Ordering::Relaxed);
}

/// Get environment variable parsed as type T, or return default
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    parse_or(std::env::var(key).ok(), default)
}

/// Trimmed `value` parsed as `T`; `default` when missing or malformed.
fn parse_or<T>(value: Option<String>, default: T) -> T
where
    T: FromStr,
{
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Library configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Application code; `0` leaves business codes unprefixed.
    pub app_code: i64,
    /// Frames kept per capture.
    pub stack_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_code: 0,
            stack_depth: DEFAULT_STACK_DEPTH,
        }
    }
}

impl Config {
    /// Read `CODEERR_*` variables; unset or malformed values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            app_code: parse_or(lookup(ENV_APP_CODE), defaults.app_code),
            stack_depth: parse_or(lookup(ENV_STACK_DEPTH), defaults.stack_depth),
        }
    }

    pub fn app_code(mut self, code: i64) -> Self {
        self.app_code = code;
        self
    }

    pub fn stack_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    /// Install the stack depth process-wide and the app code on `center`.
    ///
    /// [`crate::global`] does not call this, so an explicit
    /// [`set_stack_depth`] survives its first use.
    pub fn apply(&self, center: &CodeCenter) {
        set_stack_depth(self.stack_depth);
        center.set_app_code(self.app_code);
    }
}
