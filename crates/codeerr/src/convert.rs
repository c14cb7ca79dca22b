use std::io;

use crate::center::global;
use crate::public::{attach_stack, code_needs_stack};
use crate::stack::Stack;
use crate::{Error, Result};

// ── From<io::Error> ───────────────────────────────────────────────

impl From<io::Error> for Error {
    /// Hold an `io::Error` as a foreign root. No stack is captured until
    /// the error is wrapped or coded.
    fn from(err: io::Error) -> Self {
        Error::foreign(err)
    }
}

// ── From<Box<dyn Error>> ──────────────────────────────────────────

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    /// A boxed `Error` is unboxed; anything else becomes a foreign root.
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::from_boxed(err)
    }
}

// ── ResultExt ─────────────────────────────────────────────────────

/// Extension trait for annotating any `Result` during propagation.
///
/// ```
/// use codeerr::ResultExt;
///
/// fn read() -> std::io::Result<Vec<u8>> {
///     Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
/// }
///
/// let err = read().wrap_err("reading config").unwrap_err();
/// assert_eq!(err.to_string(), "reading config");
/// assert_eq!(codeerr::unwrap_cause(&err).unwrap().to_string(), "missing");
/// ```
pub trait ResultExt<T> {
    /// [`crate::wrap`] the error with `message`.
    fn wrap_err(self, message: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::wrap_err`], building the message only on error.
    fn wrap_err_with<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;

    /// [`crate::with_code`] on the global center.
    fn with_code(self, business_code: impl Into<i64>) -> Result<T>;

    /// [`crate::with_stack`] the error.
    fn with_stack(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[inline(never)]
    fn wrap_err(self, message: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => {
                let err = Error::foreign(e);
                let message: String = message.into();
                if message.trim().is_empty() {
                    return Err(err);
                }
                let stack = if err.is_chain() {
                    None
                } else {
                    Some(Stack::capture(1))
                };
                Err(Error::annotated(attach_stack(err, stack), message))
            }
        }
    }

    #[inline(never)]
    fn wrap_err_with<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(e) => {
                let err = Error::foreign(e);
                let message: String = f().into();
                if message.trim().is_empty() {
                    return Err(err);
                }
                let stack = if err.is_chain() {
                    None
                } else {
                    Some(Stack::capture(1))
                };
                Err(Error::annotated(attach_stack(err, stack), message))
            }
        }
    }

    #[inline(never)]
    fn with_code(self, business_code: impl Into<i64>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => {
                let err = Some(Error::foreign(e));
                let stack = if code_needs_stack(err.as_ref()) {
                    Some(Stack::capture(1))
                } else {
                    None
                };
                Err(global().build_code(err, business_code.into(), std::iter::empty(), stack))
            }
        }
    }

    #[inline(never)]
    fn with_stack(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(Error::stacked(Error::foreign(e), Stack::capture(1))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    fn failing() -> std::result::Result<(), io::Error> {
        Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
    }

    #[test]
    fn from_io_error() {
        let err = Error::from(io::Error::new(io::ErrorKind::AddrInUse, "port taken"));
        assert_eq!(err.kind(), Kind::Foreign);
        assert_eq!(err.to_string(), "port taken");
    }

    #[test]
    fn from_boxed_chain_error_unboxes() {
        let chain = crate::new("chain");
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(chain.clone());
        assert!(Error::from(boxed).ptr_eq(&chain));
    }

    #[test]
    fn question_mark_conversion() {
        fn outer() -> Result<()> {
            failing()?;
            Ok(())
        }
        let e = outer().unwrap_err();
        assert_eq!(
            e.downcast_ref::<io::Error>().map(io::Error::kind),
            Some(io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn wrap_err_adds_one_stack() {
        let e = failing().wrap_err("reading config").unwrap_err();
        assert_eq!(e.kind(), Kind::WithMessage);
        assert_eq!(e.to_string(), "reading config");
        assert_eq!(e.cause().map(Error::kind), Some(Kind::WithStack));
        assert_eq!(e.stacks().count(), 1);
    }

    #[test]
    fn wrap_err_blank_keeps_foreign() {
        let e = failing().wrap_err("  ").unwrap_err();
        assert_eq!(e.kind(), Kind::Foreign);
    }

    #[test]
    fn wrap_err_with_is_lazy() {
        let ok: std::result::Result<u8, io::Error> = Ok(1);
        let value = ok.wrap_err_with(|| -> String { panic!("must not run") }).unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn with_stack_on_result() {
        let e = failing().with_stack().unwrap_err();
        assert_eq!(e.kind(), Kind::WithStack);
        assert_eq!(e.to_string(), "missing");
    }
}
