/// Create a root error from a format string.
///
/// ```
/// let err = codeerr::format_err!("new {}", "error");
/// assert_eq!(err.to_string(), "new error");
/// ```
#[macro_export]
macro_rules! format_err {
    ($($arg:tt)+) => {
        $crate::new(::std::format!($($arg)+))
    };
}

/// Annotate an error with a formatted message. Same rules as [`wrap`](crate::wrap).
///
/// ```
/// let root = codeerr::new("origin");
/// let err = codeerr::wrap!(root, "wrap {}", "error").unwrap();
/// assert_eq!(err.to_string(), "wrap error");
/// ```
#[macro_export]
macro_rules! wrap {
    ($err:expr, $($arg:tt)+) => {
        $crate::wrap($err, ::std::format!($($arg)+))
    };
}

/// Return early with a formatted root error.
///
/// ```ignore
/// bail!("user {} not found", id);
/// ```
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return ::std::result::Result::Err($crate::format_err!($($arg)+).into())
    };
}

/// Return early with a formatted root error if a condition is false.
///
/// ```ignore
/// ensure!(user_id > 0, "bad user id {}", user_id);
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($($arg)+);
        }
    };
}
