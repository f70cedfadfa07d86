//! The value holder and `parse`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, Serializer};

use crate::error::Error;
use crate::record::{unpack, Record, DEFAULT_TAG};
use crate::value::{Map, Value};

/// Options applied by [`Holder::parse_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Tag namespace used when records are unpacked.
    pub tag: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl ParseOptions {
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Raw input accepted by [`Holder::parse`].
#[derive(Debug, Clone)]
pub enum Raw {
    /// JSON text; anything that is not JSON is kept as a string.
    Text(String),
    /// Bytes tried as UTF-8 JSON; anything else is kept as opaque bytes.
    Bytes(Vec<u8>),
    Record(Arc<dyn Record>),
    Holder(Holder),
    Value(Value),
}

impl Raw {
    pub fn record<R: Record + 'static>(record: R) -> Self {
        Raw::Record(Arc::new(record))
    }
}

impl From<&str> for Raw {
    fn from(text: &str) -> Self {
        Raw::Text(text.to_string())
    }
}

impl From<String> for Raw {
    fn from(text: String) -> Self {
        Raw::Text(text)
    }
}

impl From<&[u8]> for Raw {
    fn from(bytes: &[u8]) -> Self {
        Raw::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Raw {
    fn from(bytes: Vec<u8>) -> Self {
        Raw::Bytes(bytes)
    }
}

impl From<Holder> for Raw {
    fn from(holder: Holder) -> Self {
        Raw::Holder(holder)
    }
}

impl From<&Holder> for Raw {
    fn from(holder: &Holder) -> Self {
        Raw::Holder(holder.clone())
    }
}

impl From<Value> for Raw {
    fn from(value: Value) -> Self {
        Raw::Value(value)
    }
}

impl From<serde_json::Value> for Raw {
    fn from(json: serde_json::Value) -> Self {
        Raw::Value(Value::from(json))
    }
}

macro_rules! raw_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Raw {
                fn from(value: $ty) -> Self {
                    Raw::Value(Value::from(value))
                }
            }
        )*
    };
}

raw_from_value!(bool, i32, i64, u32, u64, f64, Vec<Value>, Map);

impl From<Arc<dyn Record>> for Raw {
    fn from(record: Arc<dyn Record>) -> Self {
        Raw::Record(record)
    }
}

/// One value plus the distinction between "absent" and "present".
///
/// A holder produced by a failed lookup is absent; every coercion on it
/// returns the zero value of the requested type. A holder wrapping
/// [`Value::Null`] is present.
#[derive(Debug, Clone)]
pub struct Holder {
    pub(crate) value: Option<Value>,
    pub(crate) tag: Arc<str>,
}

impl Default for Holder {
    fn default() -> Self {
        Self::absent()
    }
}

impl PartialEq for Holder {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Holder {
    /// The absent holder.
    pub fn absent() -> Self {
        Self {
            value: None,
            tag: Arc::from(DEFAULT_TAG),
        }
    }

    /// Wrap a value as-is.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            tag: Arc::from(DEFAULT_TAG),
        }
    }

    /// Parse raw input with the default options. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_value::Holder;
    ///
    /// let h = Holder::parse(r#"{"user": {"tags": ["a", "b"]}}"#);
    /// assert_eq!(h.get("user.tags.1").as_string(), "b");
    ///
    /// let h = Holder::parse("plain text");
    /// assert_eq!(h.as_string(), "plain text");
    /// ```
    pub fn parse(raw: impl Into<Raw>) -> Self {
        Self::parse_with(raw, &ParseOptions::default())
    }

    /// Parse raw input. A holder passed in is returned unchanged.
    pub fn parse_with(raw: impl Into<Raw>, options: &ParseOptions) -> Self {
        let tag: Arc<str> = Arc::from(options.tag.as_str());
        let value = match raw.into() {
            Raw::Holder(holder) => return holder,
            Raw::Text(text) => parse_text(text),
            Raw::Bytes(bytes) => parse_bytes(bytes),
            Raw::Record(record) => unpack(record.as_ref(), &tag),
            Raw::Value(value) => value,
        };
        Self {
            value: Some(value),
            tag,
        }
    }

    /// Unpack a record with the default tag namespace.
    pub fn from_record<R: Record + 'static>(record: R) -> Self {
        Self::parse(Raw::record(record))
    }

    /// A holder sharing this holder's options.
    pub(crate) fn child(&self, value: Option<Value>) -> Self {
        Self {
            value,
            tag: Arc::clone(&self.tag),
        }
    }

    pub(crate) fn absent_child(&self) -> Self {
        self.child(None)
    }

    /// Tag namespace used for records reached through this holder.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Whether the holder resolved to something, `null` included.
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// Absent or `null`.
    pub fn is_null(&self) -> bool {
        matches!(self.value, None | Some(Value::Null))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, Some(Value::Array(_)))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.value, Some(Value::Map(_)))
    }

    /// Number of elements or entries; `0` for scalars and absent holders.
    pub fn len(&self) -> usize {
        match &self.value {
            Some(Value::Array(items)) => items.len(),
            Some(Value::Map(entries)) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements as holders.
    ///
    /// A non-array value is treated as a one-element collection; an absent
    /// holder yields nothing.
    pub fn array(&self) -> Vec<Holder> {
        match &self.value {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| self.child(Some(item.clone())))
                .collect(),
            Some(_) => vec![self.clone()],
        }
    }

    /// Mapping entries; empty when the value is not a mapping.
    pub fn map(&self) -> Map {
        match &self.value {
            Some(Value::Map(entries)) => entries.as_ref().clone(),
            Some(Value::Record(record)) => match unpack(record.as_ref(), &self.tag) {
                Value::Map(entries) => entries.as_ref().clone(),
                _ => Map::new(),
            },
            _ => Map::new(),
        }
    }

    /// Visit entries of a mapping, elements of an array (index as key), or
    /// the fields of a record. Stops when `visit` returns `false`.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_value::Holder;
    ///
    /// let h = Holder::parse("[10, 20, 30]");
    /// let mut seen = Vec::new();
    /// h.foreach(|key, item| {
    ///     seen.push(format!("{key}={}", item.as_int()));
    ///     key != "1"
    /// });
    /// assert_eq!(seen, vec!["0=10", "1=20"]);
    /// ```
    pub fn foreach<F>(&self, mut visit: F)
    where
        F: FnMut(&str, Holder) -> bool,
    {
        let unpacked;
        let node = match &self.value {
            Some(Value::Record(record)) => {
                unpacked = unpack(record.as_ref(), &self.tag);
                &unpacked
            }
            Some(value) => value,
            None => return,
        };
        match node {
            Value::Map(entries) => {
                for (key, value) in entries.iter() {
                    if !visit(key, self.child(Some(value.clone()))) {
                        break;
                    }
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !visit(&index.to_string(), self.child(Some(item.clone()))) {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    /// JSON form of the value; absent becomes `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.value {
            Some(value) => value.to_json(),
            None => serde_json::Value::Null,
        }
    }

    /// Pretty-printed canonical JSON.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::Encode)
    }

    /// Fill a typed target from this holder's JSON form.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_value::Holder;
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize, PartialEq)]
    /// struct Point {
    ///     x: i64,
    ///     y: i64,
    /// }
    ///
    /// let h = Holder::parse(r#"{"x": 1, "y": 2}"#);
    /// assert_eq!(h.decode::<Point>().unwrap(), Point { x: 1, y: 2 });
    /// ```
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(self.to_json()).map_err(Error::Decode)
    }
}

impl Serialize for Holder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.value {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_unit(),
        }
    }
}

impl From<Holder> for Value {
    fn from(holder: Holder) -> Self {
        holder.value.unwrap_or(Value::Null)
    }
}

impl From<&Holder> for Value {
    fn from(holder: &Holder) -> Self {
        holder.value.clone().unwrap_or(Value::Null)
    }
}

fn parse_text(text: String) -> Value {
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => Value::from(json),
        Err(err) => {
            log::debug!("input is not JSON ({err}), keeping it as a string");
            Value::String(text)
        }
    }
}

fn parse_bytes(bytes: Vec<u8>) -> Value {
    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(json) => Value::from(json),
        Err(err) => {
            log::debug!("input bytes are not JSON ({err}), keeping them opaque");
            Value::Bytes(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_text() {
        let h = Holder::parse(r#"{"a": [1, 2]}"#);
        assert_eq!(h.to_json(), json!({"a": [1, 2]}));
        assert!(h.is_map());
    }

    #[test]
    fn test_parse_non_json_text() {
        let h = Holder::parse("hello world");
        assert_eq!(h.value(), Some(&Value::from("hello world")));
    }

    #[test]
    fn test_parse_bytes() {
        let h = Holder::parse(&b"[1, 2]"[..]);
        assert!(h.is_array());

        let raw = vec![0xff, 0xfe, 0x00];
        let h = Holder::parse(raw.clone());
        assert_eq!(h.value(), Some(&Value::Bytes(raw)));
    }

    #[test]
    fn test_parse_holder_is_identity() {
        let h = Holder::parse_with("{}", &ParseOptions::with_tag("db"));
        let again = Holder::parse(h.clone());
        assert_eq!(again, h);
        assert_eq!(again.tag(), "db");
    }

    #[test]
    fn test_parse_scalars_as_is() {
        assert_eq!(Holder::parse(42).to_json(), json!(42));
        assert_eq!(Holder::parse(true).value(), Some(&Value::Bool(true)));
        assert_eq!(Holder::parse(json!({"k": [1]})).get("k.0").as_int(), 1);
    }

    #[test]
    fn test_absent_vs_null() {
        let h = Holder::parse(r#"{"a": null}"#);
        assert!(h.get("a").exists());
        assert!(h.get("a").is_null());
        assert!(!h.get("b").exists());
        assert!(h.get("b").is_null());
    }

    #[test]
    fn test_array_of_scalar_is_itself() {
        let h = Holder::new(5);
        assert_eq!(h.array(), vec![Holder::new(5)]);
        assert!(Holder::absent().array().is_empty());
    }

    #[test]
    fn test_foreach_map_stops() {
        let h = Holder::parse(r#"{"a": 1, "b": 2, "c": 3}"#);
        let mut keys = Vec::new();
        h.foreach(|key, _| {
            keys.push(key.to_string());
            keys.len() < 2
        });
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_foreach_record_uses_holder_tag() {
        use crate::record::Field;

        #[derive(Debug)]
        struct Account {
            id: i64,
            owner: String,
        }

        impl Record for Account {
            fn fields(&self) -> Vec<Field> {
                vec![
                    Field::new("Id", self.id).tag("json", "id").tag("db", "account_id"),
                    Field::new("Owner", self.owner.as_str()).tag("json", "-").tag("db", "owner"),
                ]
            }
        }

        let h = Holder::parse_with(
            Raw::Value(Value::record(Account {
                id: 7,
                owner: "ann".to_string(),
            })),
            &ParseOptions::with_tag("db"),
        );
        assert!(matches!(h.value(), Some(Value::Record(_))));
        let mut seen = Vec::new();
        h.foreach(|key, item| {
            seen.push((key.to_string(), item.as_string(), item.tag().to_string()));
            true
        });
        assert_eq!(
            seen,
            vec![
                ("account_id".to_string(), "7".to_string(), "db".to_string()),
                ("owner".to_string(), "ann".to_string(), "db".to_string()),
            ]
        );
    }

    #[test]
    fn test_foreach_scalar_visits_nothing() {
        let mut count = 0;
        Holder::new("x").foreach(|_, _| {
            count += 1;
            true
        });
        assert_eq!(count, 0);
    }

    #[test]
    fn test_decode_error() {
        let h = Holder::parse(r#"{"x": "not a number"}"#);
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Point {
            x: i64,
        }
        assert!(matches!(h.decode::<Point>(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_serialize_absent_is_null() {
        assert_eq!(serde_json::to_string(&Holder::absent()).unwrap(), "null");
    }
}
