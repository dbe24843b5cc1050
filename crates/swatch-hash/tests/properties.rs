//! Property-based tests for canonical hashing.

use proptest::prelude::*;
use swatch_hash::{canonical_hash, short_digest};
use swatch_types::{PropValue, PropertyBag};

fn arb_leaf() -> impl Strategy<Value = PropValue> {
    prop_oneof![
        any::<bool>().prop_map(PropValue::Bool),
        (0u32..1000).prop_map(|n| PropValue::Number(f64::from(n))),
        "[a-z#0-9]{0,8}".prop_map(PropValue::Text),
    ]
}

fn arb_value() -> impl Strategy<Value = PropValue> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(PropValue::List),
            prop::collection::btree_map("[a-z]{1,5}", inner, 0..4).prop_map(PropValue::Object),
        ]
    })
}

fn arb_pairs() -> impl Strategy<Value = Vec<(String, PropValue)>> {
    prop::collection::btree_map("[a-zA-Z]{1,8}", arb_value(), 0..6)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #[test]
    fn insertion_order_is_irrelevant(pairs in arb_pairs()) {
        let forward: PropertyBag = pairs.iter().cloned().collect();
        let reverse: PropertyBag = pairs.iter().rev().cloned().collect();
        prop_assert_eq!(canonical_hash(&forward), canonical_hash(&reverse));
    }

    #[test]
    fn hash_is_deterministic(pairs in arb_pairs()) {
        let bag: PropertyBag = pairs.into_iter().collect();
        prop_assert_eq!(canonical_hash(&bag), canonical_hash(&bag.clone()));
    }

    #[test]
    fn structurally_different_bags_hash_differently(
        a in arb_pairs(),
        b in arb_pairs(),
    ) {
        let a: PropertyBag = a.into_iter().collect();
        let b: PropertyBag = b.into_iter().collect();
        if a != b {
            prop_assert_ne!(canonical_hash(&a), canonical_hash(&b));
        }
    }

    #[test]
    fn short_digest_is_stable(s in ".{0,64}") {
        prop_assert_eq!(short_digest(&s), short_digest(&s));
        prop_assert_eq!(short_digest(&s).len(), 16);
    }
}
