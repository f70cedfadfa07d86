//! Relational joins over [`dataschema_value::Holder`] trees.
//!
//! A relation is a `|`-separated chain of keys, e.g. `orders|items`. Arrays
//! met along the way are iterated, so `orders|items` on a list of users
//! reaches the `items` slot of every order of every user.
//!
//! - [`Joiner`] splices a child collection into a parent tree with has-one
//!   (first match) or has-many (all matches, in order) semantics.
//! - [`KeySet`] gathers the distinct values found along a relation, usually
//!   to build the child query before joining.

pub mod joiner;
pub mod keys;
pub mod relation;

pub use joiner::{Compare, Joiner, Transform};
pub use keys::KeySet;
pub use relation::split_relation;
