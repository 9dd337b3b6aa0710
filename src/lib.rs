//! Request-time principal modeling for authorization checks.
//!
//! This crate normalizes heterogeneous identity input into one canonical
//! value object, [`Principal`], carrying:
//! - a non-empty **username**,
//! - an ordered list of **roles** (opaque string labels), and
//! - arbitrary **extra attributes** adopted from the construction input.
//!
//! The only query operation is a role-membership check. There is no role
//! hierarchy, no permission expressions, and no I/O: authorization
//! middleware constructs a `Principal` from an authenticated-request
//! context and calls [`Principal::has_role`] to gate access.
//!
//! # Core Types
//!
//! - [`Principal`]: the validated identity value
//! - [`RoleQuery`]: normalized string-or-sequence input for role queries
//! - [`Error`]: the construction-time error taxonomy
//!
//! # Examples
//!
//! ```
//! use principal_core::Principal;
//! use serde_json::json;
//!
//! // Record form: one object, validated and normalized.
//! let principal = Principal::from_record(json!({
//!     "username": "foobar",
//!     "roles": ["admin", "user"],
//!     "tenant": "acme",
//! }))?;
//!
//! assert_eq!(principal.username(), "foobar");
//! assert!(principal.has_role("admin"));
//! assert!(principal.has_role(["bad", "user"]));
//! assert!(!principal.has_role(["bad", "role"]));
//!
//! // Positional form: username and roles, with optional extra properties.
//! let principal = Principal::from_parts("alice", json!(["viewer"]), None)?;
//! assert_eq!(principal.roles(), &["viewer"]);
//! # Ok::<(), principal_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod principal;
mod query;

pub use error::Error;
pub use principal::Principal;
pub use query::RoleQuery;
