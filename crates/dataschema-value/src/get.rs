//! Path traversal.

use std::borrow::Cow;

use crate::holder::Holder;
use crate::path::{parse_path, Segment};
use crate::record::unpack;
use crate::value::Value;

/// Resolve one segment against one node.
///
/// Records are unpacked on demand with the holder's tag namespace, and the
/// same segment is retried against the result.
fn child_of<'a>(node: Cow<'a, Value>, segment: &Segment<'_>, tag: &str) -> Option<Cow<'a, Value>> {
    if let Value::Record(record) = &*node {
        let unpacked = unpack(record.as_ref(), tag);
        return child_of(Cow::Owned(unpacked), segment, tag);
    }
    match node {
        Cow::Borrowed(value) => borrowed_child(value, segment).map(Cow::Borrowed),
        Cow::Owned(value) => borrowed_child(&value, segment).cloned().map(Cow::Owned),
    }
}

fn borrowed_child<'a>(node: &'a Value, segment: &Segment<'_>) -> Option<&'a Value> {
    match node {
        Value::Map(entries) => entries.get(segment.key()),
        Value::Array(items) => items.get(segment.index()?),
        _ => None,
    }
}

impl Holder {
    /// Look up a dotted path.
    ///
    /// Returns the absent holder when any segment fails to resolve; the
    /// remaining segments are not evaluated. The empty path is a single
    /// empty key.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_value::Holder;
    ///
    /// let h = Holder::parse(r#"{"a": [{"b": 1}], "7": "seven"}"#);
    /// assert_eq!(h.get("a.0.b").as_int(), 1);
    /// assert_eq!(h.get("7").as_string(), "seven");
    /// assert_eq!(h.get("##7").as_string(), "seven");
    /// assert!(!h.get("a.1.b").exists());
    /// ```
    pub fn get(&self, path: &str) -> Holder {
        let Some(root) = self.value() else {
            return self.absent_child();
        };
        let mut current = Cow::Borrowed(root);
        for segment in parse_path(path) {
            match child_of(current, &segment, self.tag()) {
                Some(next) => current = next,
                None => return self.absent_child(),
            }
        }
        self.child(Some(current.into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, Record};
    use serde_json::json;

    #[derive(Debug)]
    struct Item {
        sku: String,
    }

    impl Record for Item {
        fn fields(&self) -> Vec<Field> {
            vec![
                Field::new("Sku", self.sku.as_str())
                    .tag("json", "sku")
                    .tag("db", "item_sku"),
            ]
        }
    }

    #[test]
    fn test_get_nested() {
        let h = Holder::parse(r#"{"a": {"b": [10, {"c": "x"}]}}"#);
        assert_eq!(h.get("a.b.0").to_json(), json!(10));
        assert_eq!(h.get("a.b.1.c").to_json(), json!("x"));
    }

    #[test]
    fn test_get_out_of_range() {
        let h = Holder::parse("[1, 2]");
        assert!(!h.get("2").exists());
        assert!(!h.get("x").exists());
    }

    #[test]
    fn test_get_through_scalar() {
        let h = Holder::parse(r#"{"a": 1}"#);
        assert!(!h.get("a.b").exists());
        assert!(!h.get("a.0").exists());
    }

    #[test]
    fn test_get_short_circuits() {
        let h = Holder::parse("{}");
        let missing = h.get("a.b.c");
        assert!(!missing.exists());
        assert_eq!(missing.as_string(), "");
        assert_eq!(missing.as_int(), 0);
        assert!(!missing.as_bool());
    }

    #[test]
    fn test_get_unpacks_records_lazily() {
        let h = Holder::new(Value::map(
            [(
                "items".to_string(),
                Value::array(vec![Value::record(Item {
                    sku: "A-1".to_string(),
                })]),
            )]
            .into_iter()
            .collect(),
        ));
        assert_eq!(h.get("items.0.sku").as_string(), "A-1");
        assert!(matches!(h.get("items.0").value(), Some(Value::Record(_))));
    }

    #[test]
    fn test_get_record_uses_holder_tag() {
        use crate::holder::{ParseOptions, Raw};
        let h = Holder::parse_with(
            Raw::record(Item {
                sku: "B-2".to_string(),
            }),
            &ParseOptions::with_tag("db"),
        );
        assert_eq!(h.get("item_sku").as_string(), "B-2");
        assert_eq!(h.get("item_sku").tag(), "db");
    }

    #[test]
    fn test_get_empty_path_is_empty_key() {
        let h = Holder::parse(r#"{"": 1, "a": 2}"#);
        assert_eq!(h.get("").to_json(), json!(1));
        assert!(!Holder::parse(r#"{"a": 2}"#).get("").exists());
        assert!(!Holder::parse("[1]").get("").exists());
    }

    #[test]
    fn test_get_null_is_present() {
        let h = Holder::parse(r#"{"a": null}"#);
        assert!(h.get("a").exists());
        assert!(!h.get("a.b").exists());
    }
}
