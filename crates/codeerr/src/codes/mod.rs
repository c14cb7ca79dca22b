//! Well-known code constants.
//!
//! # Business Code Layout
//!
//! A composed business code is `app_code * 10000 + raw`. The low four
//! decimal digits belong to the module code and the module's own error code:
//!
//! ```text
//! ┌──────────────┬────────────┬─────────────────┐
//! │  app code    │  module    │  module error   │
//! │  (any width) │  2 digits  │  2 digits       │
//! └──────────────┴────────────┴─────────────────┘
//!   101            01           21              → 1010121
//! ```
//!
//! # Usage
//!
//! ```rust
//! use codeerr::codes::*;
//! use codeerr::CodeCenter;
//!
//! let center = CodeCenter::new();
//! center.set_app_code(101);
//! let code = center.new_code(STATUS_BAD_REQUEST, 121, "bad module input");
//! assert_eq!(code.business_code, 1010121);
//! assert_eq!(center.resolve(1010121).http_code, STATUS_BAD_REQUEST);
//! ```

mod builtin;
mod http;

pub use builtin::*;
pub use http::*;
