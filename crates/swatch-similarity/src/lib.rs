//! Property-set similarity scoring.
//!
//! Two scores walk the union of keys of a pair of bags:
//!
//! | key present in | [`compatibility`] | [`similarity`] |
//! |---|---|---|
//! | both, similar values | 1 | 1 |
//! | both, different values | 0 | 0 |
//! | only one | 0.5 | 0 |
//!
//! The total is divided by the union size. Compatibility is the lenient
//! score used to decide whether two tokens can merge; similarity is the
//! strict one used for parent discovery and merge benefit.

use std::collections::BTreeSet;

use swatch_math::{approx_eq, ratio};
use swatch_types::{PropValue, PropertyBag, Token};

/// Default minimum similarity for a token to become a parent.
pub const DEFAULT_PARENT_THRESHOLD: f64 = 0.8;

/// Value equality used throughout scoring.
///
/// Numbers compare within an absolute tolerance of 0.01; lists compare
/// element-wise when lengths match; objects compare value-wise when key
/// sets match. Anything else must be exactly equal.
pub fn are_values_similar(a: &PropValue, b: &PropValue) -> bool {
    match (a, b) {
        (PropValue::Number(x), PropValue::Number(y)) => approx_eq(*x, *y),
        (PropValue::Bool(x), PropValue::Bool(y)) => x == y,
        (PropValue::Text(x), PropValue::Text(y)) => x == y,
        (PropValue::List(xs), PropValue::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| are_values_similar(x, y))
        }
        (PropValue::Object(xs), PropValue::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| are_values_similar(x, y)))
        }
        _ => false,
    }
}

fn union_keys<'a>(a: &'a PropertyBag, b: &'a PropertyBag) -> BTreeSet<&'a str> {
    a.keys().chain(b.keys()).map(String::as_str).collect()
}

fn score(a: &PropertyBag, b: &PropertyBag, one_sided_credit: f64) -> f64 {
    let keys = union_keys(a, b);
    let total: f64 = keys
        .iter()
        .map(|key| match (a.get(*key), b.get(*key)) {
            (Some(x), Some(y)) if are_values_similar(x, y) => 1.0,
            (Some(_), Some(_)) => 0.0,
            _ => one_sided_credit,
        })
        .sum();
    ratio(total, keys.len())
}

/// Lenient score in `[0, 1]`: one-sided keys earn half credit.
pub fn compatibility(a: &PropertyBag, b: &PropertyBag) -> f64 {
    score(a, b, 0.5)
}

/// Strict score in `[0, 1]`: one-sided keys earn nothing.
pub fn similarity(a: &PropertyBag, b: &PropertyBag) -> f64 {
    score(a, b, 0.0)
}

/// Keys whose value is present and similar in every bag.
///
/// This is an intersection: values are taken from the first bag. An
/// empty group yields an empty bag.
pub fn extract_common_properties(bags: &[&PropertyBag]) -> PropertyBag {
    let Some((first, rest)) = bags.split_first() else {
        return PropertyBag::new();
    };
    first
        .iter()
        .filter(|(key, value)| {
            rest.iter()
                .all(|bag| bag.get(*key).is_some_and(|other| are_values_similar(value, other)))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Best parent for `bag` among `tokens`.
///
/// A token qualifies when its similarity lies in `[threshold, 1.0)`; an
/// exact match is never a parent. Ties keep the first-seen token.
pub fn find_potential_parent<'a, I>(
    tokens: I,
    bag: &PropertyBag,
    threshold: f64,
) -> Option<(&'a Token, f64)>
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut best: Option<(&'a Token, f64)> = None;
    for token in tokens {
        let s = similarity(&token.bag(), bag);
        if s < threshold || s >= 1.0 {
            continue;
        }
        if best.is_none_or(|(_, top)| s > top) {
            best = Some((token, s));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, PropValue)]) -> PropertyBag {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn numbers_within_tolerance_are_similar() {
        assert!(are_values_similar(&8.0.into(), &8.005.into()));
        assert!(!are_values_similar(&8.0.into(), &8.5.into()));
    }

    #[test]
    fn mismatched_shapes_are_not_similar() {
        assert!(!are_values_similar(&"8".into(), &8.0.into()));
        assert!(!are_values_similar(
            &PropValue::List(vec![1.0.into()]),
            &PropValue::List(vec![1.0.into(), 2.0.into()])
        ));
    }

    #[test]
    fn objects_need_matching_key_sets() {
        let a = PropValue::Object(bag(&[("hex", "#fff".into())]));
        let b = PropValue::Object(bag(&[("hex", "#fff".into()), ("opacity", 1.0.into())]));
        assert!(!are_values_similar(&a, &b));
        assert!(are_values_similar(&a, &a.clone()));
    }

    #[test]
    fn compatibility_gives_half_credit_for_one_sided_keys() {
        let a = bag(&[("a", 1.0.into()), ("b", 2.0.into())]);
        let b = bag(&[("a", 1.0.into())]);
        assert_eq!(compatibility(&a, &b), 0.75);
        assert_eq!(similarity(&a, &b), 0.5);
    }

    #[test]
    fn empty_bags_score_zero() {
        let empty = PropertyBag::new();
        assert_eq!(compatibility(&empty, &empty), 0.0);
        assert_eq!(similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn common_properties_of_empty_group_is_empty() {
        assert!(extract_common_properties(&[]).is_empty());
    }

    #[test]
    fn common_properties_is_intersection() {
        let a = bag(&[("r", 8.0.into()), ("c", "#111".into())]);
        let b = bag(&[("r", 8.0.into()), ("c", "#222".into()), ("x", true.into())]);
        let common = extract_common_properties(&[&a, &b]);
        assert_eq!(common, bag(&[("r", 8.0.into())]));
    }
}
