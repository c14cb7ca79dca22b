//! # codeerr: stack-capturing errors with registered codes
//!
//! Build errors that carry a captured call stack, a chain of messages, and
//! optionally a structured code (HTTP status + business code + message)
//! resolved through a [`CodeCenter`].
//!
//! ## Design
//!
//! An [`Error`] is a handle to one node of a chain. The node kinds are:
//!
//! - **Fundamental**: a root message with its stack ([`new`]).
//! - **WithStack**: a cause plus a stack ([`with_stack`]).
//! - **WithMessage**: a cause plus a newer message ([`wrap`]).
//! - **WithCode**: an optional cause plus code metadata ([`with_code`]).
//! - **Foreign**: any other `std::error::Error`.
//!
//! Exactly one stack is captured per creation point: wrapping an error of
//! the first four kinds adds no stack, wrapping a foreign error adds one.
//! Stacks hold raw instruction pointers and are only symbolized when
//! printed with `{:#}`.
//!
//! ## Quick Start
//!
//! ```rust
//! use codeerr::{CodeCenter, Kind};
//!
//! let center = CodeCenter::new();
//! center.set_app_code(1);
//! center.new_internal_error(1, "basic error");
//!
//! let err = center.with_code(None, 1);
//! let code = center.parse_code(&err);
//! assert_eq!(code.message, "basic error");
//! assert_eq!(code.http_code, 500);
//! assert_eq!(code.business_code, 10001);
//!
//! let root = codeerr::new("e1");
//! let wrapped = codeerr::wrap(root.clone(), "e2").unwrap();
//! assert!(codeerr::is(&wrapped, &root));
//! assert_eq!(wrapped.to_string(), "e2");
//! assert_eq!(codeerr::unwrap_cause(&wrapped), Some(root));
//! assert_eq!(wrapped.kind(), Kind::WithMessage);
//! ```
//!
//! ## Feature Flags
//!
//! | Flag    | Effect |
//! |---------|--------|
//! | `stack` | (default) Unwinds with the `backtrace` crate. Off: every stack is empty |

mod center;
mod code;
pub mod codes;
pub mod config;
mod convert;
mod error;
#[macro_use]
mod macros;
mod public;
pub mod stack;

// ── Public API ────────────────────────────────────────────────────

pub use center::{global, CodeCenter, DEFAULT_HTTP_CODE, SERVICE_CODE_MULTIPLIER};
pub use code::{with_message, CodeError, CodeOption, ErrCode};
pub use config::Config;
pub use convert::ResultExt;
pub use error::{Chain, Error, Kind, Verb};
#[allow(deprecated)]
pub use public::transfer_from_error;
pub use public::{
    as_kind, is, is_code, new, new_already_exists, new_bad_request, new_code, new_conflict,
    new_forbidden, new_gone, new_generate_name_conflict, new_internal_error,
    new_method_not_supported, new_not_found, new_ok, new_request_entity_too_large_error,
    new_service_unavailable, new_timeout_error, new_too_many_requests,
    new_too_many_requests_error, new_unauthorized, parse_code, set_app_code, set_default,
    unwrap_cause, with_code, with_code_options, with_stack, wrap,
};
pub use stack::{Frame, Stack};

/// Convenience Result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
