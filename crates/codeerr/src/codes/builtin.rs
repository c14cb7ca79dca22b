//! Built-in business codes.
//!
//! Raw values; the service offset is added when they are registered or
//! resolved. Nothing is registered for them until a `new_*` call does.

pub const ERR_BASIC:          i64 = 1;
pub const ERR_DB:             i64 = 2;
pub const ERR_PARAM:          i64 = 3;
pub const ERR_RETRY:          i64 = 4;
pub const ERR_SERVICE_INVOKE: i64 = 5;
