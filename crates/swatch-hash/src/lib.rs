//! # swatch-hash
//!
//! **Tier 0.5 (Utilities)**
//!
//! Canonical fingerprints for style properties.
//!
//! A hash here is the exhaustive structural serialization of a key-sorted
//! [`PropertyBag`], not a fixed-width digest: two bags hash equal exactly
//! when they are structurally equal, regardless of the order keys were
//! inserted in. [`short_digest`] derives a compact BLAKE3 display form for
//! receipts; it is never used for lookups.

use swatch_types::{Category, PropertyBag, StyleProperties};

/// Serialize a bag in canonical (key-sorted, compact) form.
///
/// Nested objects are `BTreeMap`s as well, so ordering is canonical at
/// every depth.
pub fn canonical_hash(bag: &PropertyBag) -> String {
    serde_json::to_string(bag).unwrap_or_else(|_| format!("{bag:?}"))
}

/// Exact-match hash of submitted properties.
///
/// Prefixed with the category so two categories that happen to produce
/// identical bags never share a hash.
pub fn exact_hash(props: &StyleProperties) -> String {
    format!("{}:{}", props.category(), canonical_hash(&props.to_bag()))
}

/// Exact hash of a merge-synthesized base token.
///
/// The `base:` segment keeps base tokens out of reach of submission
/// lookups.
pub fn base_hash(category: Category, common: &PropertyBag) -> String {
    format!("{}:base:{}", category, canonical_hash(common))
}

/// Compute a short (16-character) BLAKE3 digest of a hash string.
pub fn short_digest(hash: &str) -> String {
    let mut hex = blake3::hash(hash.as_bytes()).to_hex().to_string();
    hex.truncate(16);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_types::{ColorProps, DecorationProps, Paint, PropValue};

    fn bag(pairs: &[(&str, PropValue)]) -> PropertyBag {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn key_order_does_not_matter() {
        let a = bag(&[("a", 1.0.into()), ("b", 2.0.into())]);
        let b = bag(&[("b", 2.0.into()), ("a", 1.0.into())]);
        assert_eq!(canonical_hash(&a), canonical_hash(&b));
    }

    #[test]
    fn nested_difference_changes_hash() {
        let mut inner_a = PropertyBag::new();
        inner_a.insert("hex".into(), "#111111".into());
        let mut inner_b = PropertyBag::new();
        inner_b.insert("hex".into(), "#111112".into());
        let a = bag(&[("fills", PropValue::List(vec![PropValue::Object(inner_a)]))]);
        let b = bag(&[("fills", PropValue::List(vec![PropValue::Object(inner_b)]))]);
        assert_ne!(canonical_hash(&a), canonical_hash(&b));
    }

    #[test]
    fn exact_hash_separates_categories() {
        let fills = vec![Paint::hex("#ff0000")];
        let color = StyleProperties::Color(ColorProps {
            fills: fills.clone(),
        });
        let decoration = StyleProperties::Decoration(DecorationProps {
            fills,
            ..Default::default()
        });
        assert_eq!(color.to_bag(), decoration.to_bag());
        assert_ne!(exact_hash(&color), exact_hash(&decoration));
    }

    #[test]
    fn base_hash_never_equals_exact_hash() {
        let props = StyleProperties::Color(ColorProps {
            fills: vec![Paint::hex("#ff0000")],
        });
        assert_ne!(
            base_hash(Category::Color, &props.to_bag()),
            exact_hash(&props)
        );
    }

    #[test]
    fn short_digest_is_sixteen_hex_chars() {
        let digest = short_digest("color:{}");
        assert_eq!(digest.len(), 16);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, short_digest("color:{}"));
    }
}
