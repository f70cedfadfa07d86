//! Total typed accessors.
//!
//! Every accessor returns the zero value of its type for absent holders and
//! for values that cannot be read as that type.

use chrono::{DateTime, FixedOffset};

use crate::holder::Holder;
use crate::record::unpack;
use crate::time::{parse_time, parse_time_layout, zero_time};
use crate::value::{format_time, Value};

fn value_to_string(value: &Value, tag: &str) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        // `Display` for f64 never switches to exponent notation and drops
        // trailing zeros.
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Value::Time(t) => format_time(t),
        Value::Array(_) | Value::Map(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Record(record) => value_to_string(&unpack(record.as_ref(), tag), tag),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl Holder {
    /// Text form of the value.
    ///
    /// Containers become canonical JSON with sorted keys, timestamps
    /// RFC3339, null and absent the empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_value::Holder;
    ///
    /// let h = Holder::parse(r#"{"b": 1, "a": [1.50, 2e3]}"#);
    /// assert_eq!(h.as_string(), r#"{"a":[1.5,2000.0],"b":1}"#);
    /// assert_eq!(h.get("a.1").as_string(), "2000");
    /// assert_eq!(h.get("missing").as_string(), "");
    /// ```
    pub fn as_string(&self) -> String {
        match self.value() {
            Some(value) => value_to_string(value, self.tag()),
            None => String::new(),
        }
    }

    /// Signed integer; floats are truncated toward zero.
    pub fn as_int(&self) -> i64 {
        match self.value() {
            None => 0,
            Some(Value::Int(i)) => *i,
            Some(Value::Float(f)) => *f as i64,
            Some(Value::Bool(b)) => i64::from(*b),
            Some(_) => self.as_string().parse().unwrap_or(0),
        }
    }

    /// Like [`Holder::as_int`], zero when the result does not fit in `i32`.
    pub fn as_i32(&self) -> i32 {
        i32::try_from(self.as_int()).unwrap_or(0)
    }

    /// Unsigned integer; negative values read as zero.
    pub fn as_uint(&self) -> u64 {
        match self.value() {
            None => 0,
            Some(Value::Int(i)) => u64::try_from(*i).unwrap_or(0),
            Some(Value::Float(f)) if *f > 0.0 => *f as u64,
            Some(Value::Float(_)) => 0,
            Some(Value::Bool(b)) => u64::from(*b),
            Some(_) => self.as_string().parse().unwrap_or(0),
        }
    }

    pub fn as_float(&self) -> f64 {
        match self.value() {
            None => 0.0,
            Some(Value::Int(i)) => *i as f64,
            Some(Value::Float(f)) => *f,
            Some(Value::Bool(b)) => f64::from(u8::from(*b)),
            Some(_) => self.as_string().parse().unwrap_or(0.0),
        }
    }

    /// Boolean; numbers are `true` when non-zero, strings accept
    /// `1 t T TRUE true True` and their false counterparts.
    pub fn as_bool(&self) -> bool {
        match self.value() {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Int(i)) => *i != 0,
            Some(Value::Float(f)) => *f != 0.0,
            Some(_) => parse_bool(&self.as_string()).unwrap_or(false),
        }
    }

    /// Timestamp via the layout cascade of [`parse_time`]; the zero
    /// timestamp when nothing matches.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_value::Holder;
    /// use dataschema_value::time::is_zero_time;
    ///
    /// let t = Holder::new("2024-01-02T03:04:05Z").as_time();
    /// assert_eq!(t.to_rfc3339(), "2024-01-02T03:04:05+00:00");
    /// assert!(is_zero_time(&Holder::new("soon").as_time()));
    /// ```
    pub fn as_time(&self) -> DateTime<FixedOffset> {
        match self.value() {
            None => zero_time(),
            Some(Value::Time(t)) => *t,
            Some(_) => {
                let text = self.as_string();
                parse_time(&text).unwrap_or_else(|| {
                    log::debug!("no time layout matched {text:?}");
                    zero_time()
                })
            }
        }
    }

    /// Timestamp read with a single strftime `layout`.
    pub fn as_time_layout(&self, layout: &str) -> DateTime<FixedOffset> {
        match self.value() {
            None => zero_time(),
            Some(Value::Time(t)) => *t,
            Some(_) => parse_time_layout(&self.as_string(), layout).unwrap_or_else(zero_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::is_zero_time;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_as_string_scalars() {
        assert_eq!(Holder::new(true).as_string(), "true");
        assert_eq!(Holder::new(-12).as_string(), "-12");
        assert_eq!(Holder::new(0.1).as_string(), "0.1");
        assert_eq!(Holder::new(1e21).as_string(), "1000000000000000000000");
        assert_eq!(Holder::new(Value::Null).as_string(), "");
        assert_eq!(Holder::new(Value::bytes(b"raw".to_vec())).as_string(), "raw");
    }

    #[test]
    fn test_as_string_sorts_keys() {
        let h = Holder::parse(r#"{"z": {"y": 1, "x": 2}, "a": null}"#);
        assert_eq!(h.as_string(), r#"{"a":null,"z":{"x":2,"y":1}}"#);
    }

    #[test]
    fn test_as_string_time() {
        let t = parse_time("2024-01-02T03:04:05.9+08:00").unwrap();
        assert_eq!(Holder::new(t).as_string(), "2024-01-02T03:04:05+08:00");
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Holder::new(7.9).as_int(), 7);
        assert_eq!(Holder::new(-7.9).as_int(), -7);
        assert_eq!(Holder::new(true).as_int(), 1);
        assert_eq!(Holder::new("42").as_int(), 42);
        assert_eq!(Holder::new("4.2").as_int(), 0);
        assert_eq!(Holder::new("x").as_int(), 0);
        assert_eq!(Holder::new(i64::MAX).as_int(), i64::MAX);
    }

    #[test]
    fn test_as_i32_and_uint() {
        assert_eq!(Holder::new(i64::MAX).as_i32(), 0);
        assert_eq!(Holder::new(12).as_i32(), 12);
        assert_eq!(Holder::new(-1).as_uint(), 0);
        assert_eq!(Holder::new("18446744073709551615").as_uint(), u64::MAX);
    }

    #[test]
    fn test_as_float() {
        assert_eq!(Holder::new(3).as_float(), 3.0);
        assert_eq!(Holder::new("2.5").as_float(), 2.5);
        assert_eq!(Holder::new("nope").as_float(), 0.0);
    }

    #[test]
    fn test_as_bool() {
        assert!(Holder::new("T").as_bool());
        assert!(Holder::new("True").as_bool());
        assert!(!Holder::new("yes").as_bool());
        assert!(Holder::new(2).as_bool());
        assert!(!Holder::new(0.0).as_bool());
    }

    #[test]
    fn test_absent_is_zero() {
        let h = Holder::absent();
        assert_eq!(h.as_string(), "");
        assert_eq!(h.as_int(), 0);
        assert_eq!(h.as_uint(), 0);
        assert_eq!(h.as_float(), 0.0);
        assert!(!h.as_bool());
        assert!(is_zero_time(&h.as_time()));
    }

    #[test]
    fn test_as_time_date_is_local_midnight() {
        let t = Holder::new("2024-01-02").as_time();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 1, 2));
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));
    }

    #[test]
    fn test_as_time_garbage_is_zero() {
        assert!(is_zero_time(&Holder::new("garbage").as_time()));
        assert!(is_zero_time(&Holder::new(17).as_time()));
    }

    #[test]
    fn test_as_time_layout() {
        let t = Holder::new("02/01/2024").as_time_layout("%d/%m/%Y");
        assert_eq!((t.year(), t.month(), t.day()), (2024, 1, 2));
        assert!(is_zero_time(&Holder::new("x").as_time_layout("%d/%m/%Y")));
    }
}
