use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

fn is_zero_u16(v: &u16) -> bool {
    *v == 0
}

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

/// Registered code metadata: suggested HTTP status, business code, message.
///
/// Serializes as `{"httpCode", "businessCode", "message"}` with zero-valued
/// fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrCode {
    /// Suggested HTTP response status.
    #[serde(default, skip_serializing_if = "is_zero_u16")]
    pub http_code: u16,
    /// Business code, already offset by the service code.
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub business_code: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ErrCode {
    pub fn new(http_code: u16, business_code: i64, message: impl Into<String>) -> Self {
        Self {
            http_code,
            business_code,
            message: message.into(),
        }
    }
}

/// The code-bearing node of an error chain, and the result of
/// [`crate::parse_code`].
///
/// `cause` is the error the code was attached to. It is never serialized.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeError {
    #[serde(skip)]
    pub(crate) cause: Option<Error>,
    pub message: String,
    pub http_code: u16,
    pub business_code: i64,
}

impl CodeError {
    pub(crate) fn from_code(cause: Option<Error>, code: ErrCode) -> Self {
        Self {
            cause,
            message: code.message,
            http_code: code.http_code,
            business_code: code.business_code,
        }
    }

    /// The wrapped error, if the code was attached to one.
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_ref()
    }

    /// Copy of the code metadata without the cause.
    pub fn err_code(&self) -> ErrCode {
        ErrCode::new(self.http_code, self.business_code, self.message.clone())
    }
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("CodeError");
        d.field("message", &self.message);
        d.field("http_code", &self.http_code);
        d.field("business_code", &self.business_code);
        if let Some(cause) = &self.cause {
            d.field("cause", &cause.to_string());
        }
        d.finish()
    }
}

/// Transform applied to a freshly built [`CodeError`] before it is returned
/// from [`crate::with_code_options`].
pub struct CodeOption(Box<dyn Fn(&mut CodeError) + Send + Sync>);

impl CodeOption {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut CodeError) + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    #[inline]
    pub fn apply(&self, code: &mut CodeError) {
        (self.0)(code)
    }
}

impl fmt::Debug for CodeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CodeOption(..)")
    }
}

/// Replace the message resolved from the registry.
pub fn with_message(message: impl Into<String>) -> CodeOption {
    let message = message.into();
    CodeOption::new(move |code| code.message = message.clone())
}
