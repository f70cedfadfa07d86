//! Dynamic data access for semi-structured values.
//!
//! Re-exports the value engine ([`dataschema_value`]) and the join engine
//! ([`dataschema_join`]) under one roof, plus the logic behind the `ds-get`,
//! `ds-set` and `ds-keys` binaries.
//!
//! # Example
//!
//! ```
//! use dataschema::{Holder, Joiner, KeySet};
//! use serde_json::json;
//!
//! let users = Holder::parse(r#"[{"id": 1}, {"id": 2}]"#);
//! let ids = KeySet::collect(&users, "id");
//! assert_eq!(ids.to_vec(), vec!["1", "2"]);
//!
//! let posts = Holder::parse(r#"[{"uid": 2, "t": "x"}, {"uid": 1, "t": "y"}, {"uid": 2, "t": "z"}]"#);
//! let mut joiner = Joiner::new(|u, p| u.get("id").as_int() == p.get("uid").as_int());
//! joiner.set_meta(users).set_sub_group(posts).join_many("posts");
//!
//! let result = joiner.into_result();
//! assert_eq!(result.get("1.posts.1.t").as_string(), "z");
//! assert_eq!(result.get("0.posts").to_json(), json!([{"uid": 1, "t": "y"}]));
//! ```

pub mod cli;

pub use dataschema_join::{split_relation, Compare, Joiner, KeySet, Transform};
pub use dataschema_value::{
    join_path, parse_path, time, unpack, Error, Field, Holder, Map, ParseOptions, Raw, Record,
    Segment, Serialized, Value, DEFAULT_TAG,
};
