//! Has-one / has-many joins.
//!
//! A [`Joiner`] owns a parent tree (`meta`) and a child collection
//! (`sub_group`). Walking a relation such as `orders|items` through the
//! parent, it compares every terminal parent node against the children and
//! writes the matches back into `meta` under the last relation segment.

use std::fmt;

use dataschema_value::{join_path, Holder, Value};

use crate::relation::split_relation;

/// Decides whether a child belongs to a parent node.
pub type Compare<'a> = Box<dyn Fn(&Holder, &Holder) -> bool + 'a>;

/// Rewrites a matched `(parent, child)` pair before it is written back.
pub type Transform<'a> = Box<dyn Fn(&Holder, &Holder) -> (Holder, Holder) + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinality {
    One,
    Many,
}

/// Relational join engine.
///
/// # Example
///
/// ```
/// use dataschema_join::Joiner;
/// use dataschema_value::Holder;
/// use serde_json::json;
///
/// let users = Holder::parse(r#"[{"id": 1}, {"id": 2}]"#);
/// let profiles = Holder::parse(r#"[{"user_id": 2, "bio": "hi"}]"#);
///
/// let mut joiner = Joiner::new(|user, profile| {
///     user.get("id").as_int() == profile.get("user_id").as_int()
/// });
/// joiner.set_meta(users).set_sub_group(profiles).join_one("profile");
///
/// assert_eq!(
///     joiner.result().to_json(),
///     json!([
///         {"id": 1, "profile": {}},
///         {"id": 2, "profile": {"user_id": 2, "bio": "hi"}}
///     ])
/// );
/// ```
pub struct Joiner<'a> {
    compare: Compare<'a>,
    transform: Option<Transform<'a>>,
    sub_group: Holder,
    meta: Holder,
}

impl fmt::Debug for Joiner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Joiner")
            .field("meta", &self.meta)
            .field("sub_group", &self.sub_group)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl<'a> Joiner<'a> {
    /// A joiner with an empty parent and no children.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&Holder, &Holder) -> bool + 'a,
    {
        Self {
            compare: Box::new(compare),
            transform: None,
            sub_group: Holder::absent(),
            meta: Holder::absent(),
        }
    }

    pub fn set_meta(&mut self, meta: Holder) -> &mut Self {
        self.meta = meta;
        self
    }

    /// Set the child collection. A non-array value is a single child.
    pub fn set_sub_group(&mut self, sub_group: Holder) -> &mut Self {
        self.sub_group = sub_group;
        self
    }

    pub fn set_compare<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(&Holder, &Holder) -> bool + 'a,
    {
        self.compare = Box::new(compare);
        self
    }

    /// Install a transform run on every matched pair.
    ///
    /// The returned parent replaces the parent node in `meta`; the returned
    /// child is what gets written under the relation key.
    pub fn set_transform<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(&Holder, &Holder) -> (Holder, Holder) + 'a,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn clear_transform(&mut self) -> &mut Self {
        self.transform = None;
        self
    }

    /// The parent tree with everything joined so far.
    pub fn result(&self) -> &Holder {
        &self.meta
    }

    pub fn into_result(self) -> Holder {
        self.meta
    }

    /// Attach the first matching child to every parent node reached from
    /// `input` along `relation`. Target paths are built from `base`.
    ///
    /// `input` is normally `meta` itself, or the part of it found at `base`.
    pub fn has_one(&mut self, input: &Holder, base: &str, relation: &str) -> &mut Self {
        self.walk(input, base, relation, Cardinality::One);
        self
    }

    /// Attach every matching child, in `sub_group` order.
    pub fn has_many(&mut self, input: &Holder, base: &str, relation: &str) -> &mut Self {
        self.walk(input, base, relation, Cardinality::Many);
        self
    }

    /// [`Joiner::has_one`] starting at the root of `meta`.
    pub fn join_one(&mut self, relation: &str) -> &mut Self {
        let input = self.meta.clone();
        self.has_one(&input, "", relation)
    }

    /// [`Joiner::has_many`] starting at the root of `meta`.
    pub fn join_many(&mut self, relation: &str) -> &mut Self {
        let input = self.meta.clone();
        self.has_many(&input, "", relation)
    }

    fn walk(&mut self, input: &Holder, base: &str, relation: &str, cardinality: Cardinality) {
        let (first, rest) = split_relation(relation);
        if input.is_array() {
            for (index, element) in input.array().into_iter().enumerate() {
                let own_path = join_path(base, &index.to_string());
                let target = join_path(&own_path, first);
                match rest {
                    Some(rest) => self.walk(&element.get(first), &target, rest, cardinality),
                    None => self.attach(element, &own_path, &target, cardinality),
                }
            }
        } else {
            let target = join_path(base, first);
            match rest {
                Some(rest) => self.walk(&input.get(first), &target, rest, cardinality),
                None => self.attach(input.clone(), base, &target, cardinality),
            }
        }
    }

    fn attach(&mut self, parent: Holder, parent_path: &str, target: &str, cardinality: Cardinality) {
        let value = match cardinality {
            Cardinality::One => self.match_one(parent, parent_path),
            Cardinality::Many => self.match_many(parent, parent_path),
        };
        log::trace!("writing {} at {target:?}", value.type_name());
        self.meta.set_mut(target, value);
    }

    fn match_one(&mut self, parent: Holder, parent_path: &str) -> Value {
        let found = self
            .sub_group
            .array()
            .into_iter()
            .find(|child| (self.compare)(&parent, child));
        if found.is_none() {
            log::trace!("no match for parent at {parent_path:?}");
        }
        let mut child = found.unwrap_or_default();
        let rewritten = self.transform.as_ref().map(|transform| transform(&parent, &child));
        if let Some((new_parent, new_child)) = rewritten {
            self.write_parent(parent_path, new_parent);
            child = new_child;
        }
        child.into_value().unwrap_or_else(Value::empty_map)
    }

    fn match_many(&mut self, mut parent: Holder, parent_path: &str) -> Value {
        let mut matched = Vec::new();
        for child in self.sub_group.array() {
            if !(self.compare)(&parent, &child) {
                continue;
            }
            let rewritten = self.transform.as_ref().map(|transform| transform(&parent, &child));
            match rewritten {
                Some((new_parent, new_child)) => {
                    self.write_parent(parent_path, new_parent.clone());
                    parent = new_parent;
                    matched.push(Value::from(new_child));
                }
                None => matched.push(Value::from(child)),
            }
        }
        log::trace!("{} matches for parent at {parent_path:?}", matched.len());
        Value::array(matched)
    }

    /// Store a transformed parent; the empty path replaces `meta` itself.
    fn write_parent(&mut self, path: &str, parent: Holder) {
        if path.is_empty() {
            self.meta = parent;
        } else {
            self.meta.set_mut(path, Value::from(parent));
        }
    }
}
