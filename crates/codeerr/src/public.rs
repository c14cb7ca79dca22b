//! Construction and inspection functions.
//!
//! Code-related functions delegate to [`crate::global`]. Use a
//! [`CodeCenter`](crate::CodeCenter) directly to keep codes out of
//! process-wide state.

use crate::center::global;
use crate::code::{CodeError, CodeOption, ErrCode};
use crate::stack::Stack;
use crate::{Error, Kind};

/// Create a root error with a fresh stack.
///
/// ```
/// let err = codeerr::new("connection refused");
/// assert_eq!(err.to_string(), "connection refused");
/// ```
#[inline(never)]
pub fn new(message: impl Into<String>) -> Error {
    Error::fundamental(message.into(), Stack::capture(1))
}

/// Annotate `err` with `message`.
///
/// `None` stays `None`. A blank message returns `err` itself. A foreign
/// `err` gets a stack before the message is layered on top.
///
/// ```
/// let root = codeerr::new("e1");
/// let wrapped = codeerr::wrap(root.clone(), "e2").unwrap();
/// assert_eq!(wrapped.to_string(), "e2");
/// assert!(codeerr::is(&wrapped, &root));
/// ```
#[inline(never)]
pub fn wrap(err: impl Into<Option<Error>>, message: impl Into<String>) -> Option<Error> {
    let err = err.into()?;
    let message = message.into();
    if message.trim().is_empty() {
        return Some(err);
    }
    let stack = if err.is_chain() {
        None
    } else {
        Some(Stack::capture(1))
    };
    Some(Error::annotated(attach_stack(err, stack), message))
}

/// Wrap `err` in a fresh stack, even if it already has one.
#[inline(never)]
pub fn with_stack(err: Error) -> Error {
    Error::stacked(err, Stack::capture(1))
}

#[deprecated(note = "use `new`, `wrap`, `with_code` or `with_stack`")]
#[inline(never)]
pub fn transfer_from_error(err: Error) -> Error {
    Error::stacked(err, Stack::capture(1))
}

/// Attach a registered code, see [`CodeCenter::with_code`](crate::CodeCenter::with_code).
#[inline(never)]
pub fn with_code(err: impl Into<Option<Error>>, business_code: impl Into<i64>) -> Error {
    let err = err.into();
    let stack = if code_needs_stack(err.as_ref()) {
        Some(Stack::capture(1))
    } else {
        None
    };
    global().build_code(err, business_code.into(), std::iter::empty(), stack)
}

/// [`with_code`] with options applied in order.
///
/// ```
/// use codeerr::{with_code_options, with_message};
/// let err = with_code_options(None, 9, [with_message("cover message")]);
/// assert_eq!(err.to_string(), "cover message");
/// ```
#[inline(never)]
pub fn with_code_options<I>(
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
    global().build_code(err, business_code.into(), options, stack)
}

/// Root of the chain: the first node that is not a wrapper, or `None` if
/// the chain ends in a code attached to nothing.
pub fn unwrap_cause(err: &Error) -> Option<Error> {
    err.root_cause().cloned()
}

/// `true` if `target` is `err` or one of its causes.
pub fn is(err: &Error, target: &Error) -> bool {
    err.chain().any(|e| e.ptr_eq(target))
}

/// Outermost node of `kind` in the chain.
pub fn as_kind(err: &Error, kind: Kind) -> Option<Error> {
    err.find(kind).cloned()
}

pub fn parse_code(err: &Error) -> CodeError {
    global().parse_code(err)
}

pub fn is_code(err: &Error, business_code: impl Into<i64>) -> bool {
    global().is_code(err, business_code)
}

/// Set the application code of the global center.
///
/// The module code and module error code share the low four digits: app
/// code 101, module 1, module error 21 gives business code 1010121.
pub fn set_app_code(code: impl Into<i64>) {
    global().set_app_code(code)
}

pub fn set_default(http_code: u16, business_code: i64, message: impl Into<String>) {
    global().set_default(http_code, business_code, message)
}

pub fn new_code(http_code: u16, business_code: i64, message: impl Into<String>) -> ErrCode {
    global().new_code(http_code, business_code, message)
}

macro_rules! global_shortcuts {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("[`CodeCenter::", stringify!($name), "`](crate::CodeCenter::", stringify!($name), ") on the global center.")]
            pub fn $name(business_code: i64, message: impl Into<String>) -> ErrCode {
                global().$name(business_code, message)
            }
        )*
    };
}

global_shortcuts! {
    new_ok,
    new_not_found,
    new_already_exists,
    new_generate_name_conflict,
    new_unauthorized,
    new_forbidden,
    new_conflict,
    new_gone,
    new_bad_request,
    new_too_many_requests,
    new_service_unavailable,
    new_method_not_supported,
    new_internal_error,
    new_timeout_error,
    new_too_many_requests_error,
    new_request_entity_too_large_error,
}

/// Chain-typed errors pass through; foreign ones get `stack`.
///
/// Callers capture `stack` themselves so that its first frame is their own
/// caller, whatever gets inlined in between.
pub(crate) fn attach_stack(err: Error, stack: Option<Stack>) -> Error {
    match stack {
        Some(stack) if !err.is_chain() => Error::stacked(err, stack),
        _ => err,
    }
}

/// A code attached to nothing, or to a foreign error, needs a capture.
#[inline]
pub(crate) fn code_needs_stack(err: Option<&Error>) -> bool {
    err.map_or(true, |e| !e.is_chain())
}
