//! HTTP status codes bound by the `new_*` shortcuts.
//!
//! Only the statuses the shortcuts use are listed; any other `u16` is
//! accepted by [`crate::new_code`].

pub const STATUS_OK:                       u16 = 200;
pub const STATUS_BAD_REQUEST:              u16 = 400;
pub const STATUS_UNAUTHORIZED:             u16 = 401;
pub const STATUS_FORBIDDEN:                u16 = 403;
pub const STATUS_NOT_FOUND:                u16 = 404;
pub const STATUS_METHOD_NOT_ALLOWED:       u16 = 405;
pub const STATUS_CONFLICT:                 u16 = 409;
pub const STATUS_GONE:                     u16 = 410;
pub const STATUS_REQUEST_ENTITY_TOO_LARGE: u16 = 413;
pub const STATUS_TOO_MANY_REQUESTS:        u16 = 429;
pub const STATUS_INTERNAL_SERVER_ERROR:    u16 = 500;
pub const STATUS_SERVICE_UNAVAILABLE:      u16 = 503;
pub const STATUS_GATEWAY_TIMEOUT:          u16 = 504;
