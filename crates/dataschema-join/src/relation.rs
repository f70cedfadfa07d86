/// Separator between relation segments.
pub const RELATION_SEPARATOR: char = '|';

/// Split a relation into its first segment and the rest of the chain.
///
/// # Example
///
/// ```
/// use dataschema_join::relation::split_relation;
///
/// assert_eq!(split_relation("orders|items"), ("orders", Some("items")));
/// assert_eq!(split_relation("a|b|c"), ("a", Some("b|c")));
/// assert_eq!(split_relation("child"), ("child", None));
/// ```
pub fn split_relation(relation: &str) -> (&str, Option<&str>) {
    match relation.split_once(RELATION_SEPARATOR) {
        Some((first, rest)) => (first, Some(rest)),
        None => (relation, None),
    }
}
