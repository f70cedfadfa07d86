//! Auto-vivifying, copy-on-write mutation.
//!
//! Every node on the mutated path is taken out of its parent, rewritten and
//! put back. Containers are `Arc`-shared with older roots, so
//! [`Arc::make_mut`] copies a node only when someone else still holds it;
//! untouched branches stay shared.

use std::sync::Arc;

use crate::holder::Holder;
use crate::path::{parse_path, Segment};
use crate::record::unpack;
use crate::value::{Map, Value};

impl Holder {
    /// Store `value` at `path` and return the new root.
    ///
    /// Missing containers are created on the way down, arrays are padded
    /// with nulls up to the target index, and a value that is in the way of
    /// an index segment is promoted to the first element of a new array.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_value::Holder;
    /// use serde_json::json;
    ///
    /// let h = Holder::parse("{}").set("items.2.name", "x");
    /// assert_eq!(h.to_json(), json!({"items": [null, null, {"name": "x"}]}));
    ///
    /// let h = Holder::parse(r#""only""#).set("1", "x");
    /// assert_eq!(h.to_json(), json!(["only", "x"]));
    ///
    /// let h = Holder::parse("{}").set("##1", "v");
    /// assert_eq!(h.to_json(), json!({"1": "v"}));
    /// ```
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Holder {
        self.set_mut(path, value);
        self
    }

    /// In-place form of [`Holder::set`].
    pub fn set_mut(&mut self, path: &str, value: impl Into<Value>) {
        let segments = parse_path(path);
        let root = self.value.take();
        self.value = Some(set_value(root, &segments, value.into(), &self.tag));
    }
}

/// Write `value` below `target` along `segments`, returning the rewritten
/// target.
///
/// An absent or null target starts out as an empty map, which an index
/// segment then promotes like any other value. An index too large to be
/// allocated leaves the target as it was.
fn set_value(target: Option<Value>, segments: &[Segment<'_>], value: Value, tag: &str) -> Value {
    let Some((segment, rest)) = segments.split_first() else {
        return value;
    };
    let target = match target {
        None | Some(Value::Null) => Value::empty_map(),
        Some(target) => target,
    };
    match segment.index() {
        Some(index) => {
            let Some(needed) = index.checked_add(1) else {
                log::debug!("index {index} cannot be addressed, leaving the target unchanged");
                return target;
            };
            let promoted = !matches!(target, Value::Array(_));
            let mut items = into_sequence(target);
            let list = Arc::make_mut(&mut items);
            if list.len() < needed {
                if list.try_reserve(needed - list.len()).is_err() {
                    log::debug!("index {index} is too large, leaving the target unchanged");
                    if promoted {
                        return list.pop().unwrap_or_default();
                    }
                    return Value::Array(items);
                }
                list.resize(needed, Value::Null);
            }
            let slot = std::mem::take(&mut list[index]);
            list[index] = set_value(Some(slot), rest, value, tag);
            Value::Array(items)
        }
        None => {
            let mut entries = into_mapping(target, tag);
            let map = Arc::make_mut(&mut entries);
            let key = segment.key();
            let child = match map.get_mut(key).map(std::mem::take) {
                None | Some(Value::Null) => rest.first().map(seed),
                child => child,
            };
            let child = set_value(child, rest, value, tag);
            map.insert(key.to_string(), child);
            Value::Map(entries)
        }
    }
}

/// Empty container for a missing or null map entry, chosen by the segment
/// that will be written into it.
fn seed(segment: &Segment<'_>) -> Value {
    if segment.is_index() {
        Value::empty_array()
    } else {
        Value::empty_map()
    }
}

fn into_sequence(target: Value) -> Arc<Vec<Value>> {
    match target {
        Value::Array(items) => items,
        other => {
            log::trace!("promoting {} to the first element of an array", other.type_name());
            Arc::new(vec![other])
        }
    }
}

fn into_mapping(target: Value, tag: &str) -> Arc<Map> {
    match target {
        Value::Map(entries) => entries,
        Value::Record(record) => match unpack(record.as_ref(), tag) {
            Value::Map(entries) => entries,
            other => {
                log::debug!("record unpacked to {}, replacing it with a map", other.type_name());
                Arc::new(Map::new())
            }
        },
        other => {
            log::debug!("replacing {} with a map", other.type_name());
            Arc::new(Map::new())
        }
    }
}
