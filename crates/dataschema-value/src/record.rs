//! Record unpacking: typed records to generic mappings.
//!
//! A record describes its fields once through [`Record::fields`]; the
//! unpacker then applies the per-namespace tag rules:
//!
//! - unexported fields and fields tagged `-` are skipped;
//! - `name,opt,...` renames the field when `name` is non-empty;
//! - `omitempty` drops fields holding a zero value;
//! - an anonymous field holding a record with no tag name is flattened into
//!   the parent mapping.
//!
//! A record that has its own JSON encoding returns it from
//! [`Record::custom_json`] and bypasses the field rules entirely.

use std::fmt;

use serde::Serialize;

use crate::value::{Map, Value};

/// Tag namespace used when none is configured.
pub const DEFAULT_TAG: &str = "json";

/// Tag value that excludes a field.
pub const SKIP_TAG: &str = "-";

/// Tag option that drops zero-valued fields.
pub const OMIT_EMPTY: &str = "omitempty";

/// A statically-typed record that can be viewed as a generic mapping.
pub trait Record: fmt::Debug + Send + Sync {
    /// Field descriptions, in declaration order.
    fn fields(&self) -> Vec<Field>;

    /// Custom JSON encoding. When present it replaces field-based unpacking.
    fn custom_json(&self) -> Option<serde_json::Value> {
        None
    }
}

/// One field of a [`Record`] plus its metadata.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    value: Value,
    tags: Vec<(String, String)>,
    exported: bool,
    anonymous: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            tags: Vec::new(),
            exported: true,
            anonymous: false,
        }
    }

    /// An embedded record field.
    pub fn embedded<R: Record + 'static>(name: impl Into<String>, record: R) -> Self {
        let mut field = Self::new(name, Value::record(record));
        field.anonymous = true;
        field
    }

    /// Attach a tag for `namespace`, e.g. `.tag("json", "user_id,omitempty")`.
    pub fn tag(mut self, namespace: impl Into<String>, tag: impl Into<String>) -> Self {
        self.tags.push((namespace.into(), tag.into()));
        self
    }

    pub fn unexported(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Raw tag for `namespace`, or `""` when the field has none.
    pub fn tag_for(&self, namespace: &str) -> &str {
        self.tags
            .iter()
            .find(|(ns, _)| ns == namespace)
            .map(|(_, tag)| tag.as_str())
            .unwrap_or("")
    }
}

/// Parsed tag options following the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOptions<'a>(&'a str);

impl TagOptions<'_> {
    pub fn has(&self, option: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|o| o == option)
    }
}

/// Split a tag into its name and options.
///
/// # Example
///
/// ```
/// use dataschema_value::record::parse_tag;
///
/// let (name, opts) = parse_tag("id,omitempty");
/// assert_eq!(name, "id");
/// assert!(opts.has("omitempty"));
///
/// let (name, opts) = parse_tag(",omitempty");
/// assert_eq!(name, "");
/// assert!(opts.has("omitempty"));
/// ```
pub fn parse_tag(tag: &str) -> (&str, TagOptions<'_>) {
    match tag.split_once(',') {
        Some((name, options)) => (name, TagOptions(options)),
        None => (tag, TagOptions("")),
    }
}

/// Unpack a record into a generic value using the tags of `namespace`.
///
/// The result is a mapping unless the record has a custom encoding, in
/// which case it is whatever that encoding produced.
pub fn unpack(record: &dyn Record, namespace: &str) -> Value {
    if let Some(json) = record.custom_json() {
        return Value::from(json);
    }
    Value::map(unpack_fields(record, namespace))
}

fn unpack_fields(record: &dyn Record, namespace: &str) -> Map {
    let fields = record.fields();
    let mut out = Map::with_capacity(fields.len());
    for field in fields {
        if !field.exported {
            continue;
        }
        let tag = field.tag_for(namespace).to_string();
        if tag == SKIP_TAG {
            continue;
        }
        let (tag_name, options) = parse_tag(&tag);
        let name = if tag_name.is_empty() {
            field.name
        } else {
            tag_name.to_string()
        };
        if options.has(OMIT_EMPTY) && field.value.is_zero_in(namespace) {
            continue;
        }
        match field.value {
            Value::Record(inner) if field.anonymous && tag_name.is_empty() => {
                match unpack(inner.as_ref(), namespace) {
                    Value::Map(entries) => {
                        for (k, v) in entries.iter() {
                            out.insert(k.clone(), v.clone());
                        }
                    }
                    other => {
                        out.insert(name, other);
                    }
                }
            }
            value => {
                out.insert(name, value);
            }
        }
    }
    out
}

/// Adapts any `serde::Serialize` type as a [`Record`] whose custom encoding
/// is its serde JSON form.
///
/// # Example
///
/// ```
/// use dataschema_value::{Holder, Serialized};
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// let h = Holder::from_record(Serialized(User { id: 7, name: "ann".into() }));
/// assert_eq!(h.get("name").as_string(), "ann");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized<T>(pub T);

impl<T> Record for Serialized<T>
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    fn custom_json(&self) -> Option<serde_json::Value> {
        match serde_json::to_value(&self.0) {
            Ok(json) => Some(json),
            Err(err) => {
                log::debug!("record serialization failed: {err}");
                Some(serde_json::Value::Null)
            }
        }
    }
}
