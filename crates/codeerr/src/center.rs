//! Code registry and service-code algebra.
//!
//! A [`CodeCenter`] owns everything code-related that is shared between
//! threads:
//!
//! ```text
//! set_app_code(101) ──► service_code = 1010000 (AtomicI64)
//!
//! new_ok(21, "..")  ──► compose(21) = 1010021 ──► codes.entry(1010021).or_insert(..)
//!                                                 (DashMap, first wins)
//!
//! with_code(err, 21) ─► compose(21) ──► resolve ──► hit: registered ErrCode
//!                                                └► miss: default ErrCode,
//!                                                         business_code = 1010021
//! ```
//!
//! The offset is read when a code is composed and baked into the key. Changing
//! it later does not renumber existing entries, and codes composed before the
//! change no longer compare equal under [`CodeCenter::is_code`].

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

use dashmap::DashMap;

use crate::code::{CodeError, CodeOption, ErrCode};
use crate::codes::*;
use crate::config::Config;
use crate::public::{attach_stack, code_needs_stack};
use crate::stack::Stack;
use crate::{Error, Kind};

/// Width reserved below the app code for module + module error code.
pub const SERVICE_CODE_MULTIPLIER: i64 = 10_000;

/// HTTP status of the built-in default code.
pub const DEFAULT_HTTP_CODE: u16 = STATUS_OK;

/// Registry of [`ErrCode`]s, the default code, and the service offset.
#[derive(Debug)]
pub struct CodeCenter {
    codes: DashMap<i64, ErrCode>,
    default_code: RwLock<ErrCode>,
    service_code: AtomicI64,
}

impl Default for CodeCenter {
    fn default() -> Self {
        Self::new()
    }
}

// ── Registry ──────────────────────────────────────────────────────

impl CodeCenter {
    pub fn new() -> Self {
        Self {
            codes: DashMap::new(),
            default_code: RwLock::new(ErrCode::new(DEFAULT_HTTP_CODE, 0, "")),
            service_code: AtomicI64::new(0),
        }
    }

    /// Build a center and apply `config` to it.
    pub fn with_config(config: &Config) -> Self {
        let center = Self::new();
        config.apply(&center);
        center
    }

    /// Store `code` under its business code unless that key is taken.
    pub fn register(&self, code: ErrCode) {
        let key = code.business_code;
        let mut inserted = false;
        self.codes.entry(key).or_insert_with(|| {
            inserted = true;
            code
        });
        if !inserted {
            tracing::debug!(business_code = key, "code already registered, keeping first");
        }
    }

    /// Registered entry for `business_code`, or the default entry carrying
    /// `business_code`.
    pub fn resolve(&self, business_code: i64) -> ErrCode {
        if let Some(code) = self.codes.get(&business_code) {
            return code.value().clone();
        }
        let mut code = self.default_code();
        code.business_code = business_code;
        code
    }

    /// `true` if something is registered under `business_code`.
    pub fn is_registered(&self, business_code: i64) -> bool {
        self.codes.contains_key(&business_code)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Snapshot of the fallback entry.
    pub fn default_code(&self) -> ErrCode {
        self.default_code
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the fallback entry. `business_code` is offset by the current
    /// service code.
    pub fn set_default(&self, http_code: u16, business_code: i64, message: impl Into<String>) {
        let code = ErrCode::new(http_code, self.compose(business_code), message);
        tracing::debug!(
            http_code = code.http_code,
            business_code = code.business_code,
            "default code replaced"
        );
        *self
            .default_code
            .write()
            .unwrap_or_else(PoisonError::into_inner) = code;
    }
}

// ── Code algebra ──────────────────────────────────────────────────

impl CodeCenter {
    /// Set the application code. Business codes composed from now on are
    /// offset by `code * 10000`.
    ///
    /// ```
    /// use codeerr::CodeCenter;
    /// let center = CodeCenter::new();
    /// center.set_app_code(101);
    /// assert_eq!(center.compose(121), 1010121);
    /// ```
    pub fn set_app_code(&self, code: impl Into<i64>) {
        let offset = code.into().wrapping_mul(SERVICE_CODE_MULTIPLIER);
        let previous = self.service_code.swap(offset, Ordering::SeqCst);
        if previous == offset {
            return;
        }
        if !self.codes.is_empty() {
            tracing::warn!(
                previous,
                offset,
                registered = self.codes.len(),
                "service code changed after codes were registered; existing codes keep the old offset"
            );
        } else {
            tracing::info!(offset, "service code set");
        }
    }

    /// Current offset (`app_code * 10000`).
    #[inline]
    pub fn service_code(&self) -> i64 {
        self.service_code.load(Ordering::SeqCst)
    }

    /// `service_code() + raw`, wrapping on overflow.
    #[inline]
    pub fn compose(&self, raw: i64) -> i64 {
        self.service_code().wrapping_add(raw)
    }

    /// Compose `business_code`, register the entry, and return it.
    pub fn new_code(&self, http_code: u16, business_code: i64, message: impl Into<String>) -> ErrCode {
        let code = ErrCode::new(http_code, self.compose(business_code), message);
        self.register(code.clone());
        code
    }
}

macro_rules! status_shortcuts {
    ($( $(#[$meta:meta])* $name:ident => $status:expr ),* $(,)?) => {
        impl CodeCenter {
            $(
                $(#[$meta])*
                pub fn $name(&self, business_code: i64, message: impl Into<String>) -> ErrCode {
                    self.new_code($status, business_code, message)
                }
            )*
        }
    };
}

status_shortcuts! {
    new_ok => STATUS_OK,
    new_not_found => STATUS_NOT_FOUND,
    new_already_exists => STATUS_CONFLICT,
    new_generate_name_conflict => STATUS_CONFLICT,
    new_unauthorized => STATUS_UNAUTHORIZED,
    new_forbidden => STATUS_FORBIDDEN,
    new_conflict => STATUS_CONFLICT,
    new_gone => STATUS_GONE,
    new_bad_request => STATUS_BAD_REQUEST,
    new_too_many_requests => STATUS_TOO_MANY_REQUESTS,
    new_service_unavailable => STATUS_SERVICE_UNAVAILABLE,
    /// Registers with 405 Method Not Allowed.
    new_method_not_supported => STATUS_METHOD_NOT_ALLOWED,
    new_internal_error => STATUS_INTERNAL_SERVER_ERROR,
    /// Registers with 504 Gateway Timeout.
    new_timeout_error => STATUS_GATEWAY_TIMEOUT,
    new_too_many_requests_error => STATUS_TOO_MANY_REQUESTS,
    new_request_entity_too_large_error => STATUS_REQUEST_ENTITY_TOO_LARGE,
}

// ── Code errors ───────────────────────────────────────────────────

impl CodeCenter {
    /// Attach the code `compose(business_code)` to `err`.
    ///
    /// A foreign `err` gets a stack first. With no `err` the code node has
    /// no cause and is wrapped in a stack of its own. Either stack starts at
    /// the caller of this method.
    #[inline(never)]
    pub fn with_code(&self, err: impl Into<Option<Error>>, business_code: impl Into<i64>) -> Error {
        let err = err.into();
        let stack = if code_needs_stack(err.as_ref()) {
            Some(Stack::capture(1))
        } else {
            None
        };
        self.build_code(err, business_code.into(), std::iter::empty(), stack)
    }

    /// [`CodeCenter::with_code`], then apply `options` in order.
    #[inline(never)]
    pub fn with_code_options<I>(
        &self,
        err: impl Into<Option<Error>>,
        business_code: impl Into<i64>,
        options: I,
    ) -> Error
    where
        I: IntoIterator<Item = CodeOption>,
    {
        let err = err.into();
        let stack = if code_needs_stack(err.as_ref()) {
            Some(Stack::capture(1))
        } else {
            None
        };
        self.build_code(err, business_code.into(), options, stack)
    }

    /// Assemble a code node. `stack` is captured by the public entry point
    /// when `code_needs_stack` says so; it is never captured here.
    pub(crate) fn build_code<I>(
        &self,
        err: Option<Error>,
        business_code: i64,
        options: I,
        stack: Option<Stack>,
    ) -> Error
    where
        I: IntoIterator<Item = CodeOption>,
    {
        let resolved = self.resolve(self.compose(business_code));
        match err {
            Some(err) => {
                let mut code = CodeError::from_code(Some(attach_stack(err, stack)), resolved);
                for option in options {
                    option.apply(&mut code);
                }
                Error::coded(code)
            }
            None => {
                let mut code = CodeError::from_code(None, resolved);
                for option in options {
                    option.apply(&mut code);
                }
                Error::stacked(Error::coded(code), stack.unwrap_or_default())
            }
        }
    }

    /// Code view of `err` carrying its outermost message.
    ///
    /// Without a code node in the chain, the message is `err`'s text, the HTTP
    /// status is the default's, and the business code is the bare offset.
    pub fn parse_code(&self, err: &Error) -> CodeError {
        match err.find(Kind::WithCode).and_then(Error::code) {
            Some(found) => CodeError {
                cause: found.cause.clone(),
                message: err.outer_message(),
                http_code: found.http_code,
                business_code: found.business_code,
            },
            None => CodeError {
                cause: None,
                message: err.to_string(),
                http_code: self.default_code().http_code,
                business_code: self.service_code(),
            },
        }
    }

    /// `true` if the outermost code in `err` equals `compose(business_code)`
    /// under the current offset.
    pub fn is_code(&self, err: &Error, business_code: impl Into<i64>) -> bool {
        match err.find(Kind::WithCode).and_then(Error::code) {
            Some(found) => found.business_code == self.compose(business_code.into()),
            None => false,
        }
    }
}

static GLOBAL: OnceLock<CodeCenter> = OnceLock::new();

/// Process-wide center used by the free functions.
///
/// The app code is read from `CODEERR_APP_CODE` on first use. The stack
/// depth is left alone; it has its own lazy default, see
/// [`crate::config::stack_depth`].
pub fn global() -> &'static CodeCenter {
    GLOBAL.get_or_init(|| {
        let center = CodeCenter::new();
        center.set_app_code(Config::from_env().app_code);
        center
    })
}
