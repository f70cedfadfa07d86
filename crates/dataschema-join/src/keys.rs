//! Candidate key collection.

use dataschema_value::Holder;
use indexmap::IndexSet;

use crate::relation::split_relation;

/// Deduplicated, insertion-ordered set of non-empty key strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: IndexSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the values reachable from `input` along `relation`.
    ///
    /// Arrays are transparent at every level: each element is searched with
    /// the same relation.
    ///
    /// # Example
    ///
    /// ```
    /// use dataschema_join::KeySet;
    /// use dataschema_value::Holder;
    ///
    /// let users = Holder::parse(r#"[
    ///     {"orders": [{"sku": "a"}, {"sku": "b"}]},
    ///     {"orders": [{"sku": "a"}, {"sku": ""}]}
    /// ]"#);
    /// let keys = KeySet::collect(&users, "orders|sku");
    /// assert_eq!(keys.to_vec(), vec!["a", "b"]);
    /// ```
    pub fn collect(input: &Holder, relation: &str) -> Self {
        let mut set = Self::new();
        set.extend_from(input, relation);
        set
    }

    /// Add the values reachable from `input` along `relation`.
    pub fn extend_from(&mut self, input: &Holder, relation: &str) -> &mut Self {
        let (first, rest) = split_relation(relation);
        if input.is_array() {
            for element in input.array() {
                match rest {
                    Some(_) => {
                        self.extend_from(&element, relation);
                    }
                    None => self.insert(element.get(first).as_string()),
                }
            }
        } else {
            match rest {
                Some(rest) => {
                    self.extend_from(&input.get(first), rest);
                }
                None => self.insert(input.get(first).as_string()),
            }
        }
        self
    }

    fn insert(&mut self, key: String) {
        if !key.is_empty() {
            self.keys.insert(key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.keys.into_iter().collect()
    }
}
