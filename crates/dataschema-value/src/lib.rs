//! Path-addressable dynamic values.
//!
//! [`Holder`] wraps one arbitrary value (parsed JSON, a generic mapping, or a
//! typed [`Record`]) and gives uniform access to anything inside it through
//! dotted paths:
//!
//! - `get("a.0.b")` never fails; a path that does not resolve yields the
//!   absent holder;
//! - `set("a.0.b", v)` creates what is missing and returns the new root,
//!   sharing untouched branches with the old one;
//! - `as_string`, `as_int`, `as_float`, `as_bool` and `as_time` read typed
//!   scalars and fall back to zero values.
//!
//! # Example
//!
//! ```
//! use dataschema_value::Holder;
//! use serde_json::json;
//!
//! let doc = Holder::parse(r#"{"user": {"name": "ann", "age": "41"}}"#);
//! assert_eq!(doc.get("user.age").as_int(), 41);
//!
//! let doc = doc.set("user.tags.1", "admin");
//! assert_eq!(
//!     doc.to_json(),
//!     json!({"user": {"name": "ann", "age": "41", "tags": [null, "admin"]}})
//! );
//! ```

mod coerce;
pub mod error;
mod get;
pub mod holder;
pub mod path;
pub mod record;
mod set;
pub mod time;
pub mod value;

pub use error::Error;
pub use holder::{Holder, ParseOptions, Raw};
pub use path::{join_path, parse_path, Segment};
pub use record::{unpack, Field, Record, Serialized, DEFAULT_TAG};
pub use value::{Map, Value};
