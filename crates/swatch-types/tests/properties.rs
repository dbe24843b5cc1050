//! Property-based tests for the typed property bags.
//!
//! These check that the bag view is lossless for every category the
//! merge engine rebuilds from an intersection.

use proptest::prelude::*;
use swatch_types::{
    Category, ColorProps, PaddingProps, Paint, StyleProperties, Token, TokenOrigin,
    TypographyProps,
};

fn arb_px() -> impl Strategy<Value = f64> {
    (0u32..200).prop_map(f64::from)
}

fn arb_hex() -> impl Strategy<Value = String> {
    "#[0-9a-fA-F]{6}"
}

fn arb_typography() -> impl Strategy<Value = TypographyProps> {
    (
        prop::option::of("[A-Z][a-z]{2,10}"),
        prop::option::of(arb_px()),
        prop::option::of((1u32..10).prop_map(|w| f64::from(w * 100))),
        prop::option::of(arb_px()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(font_family, font_size, font_weight, line_height, italic)| TypographyProps {
                font_family,
                font_size,
                font_weight,
                line_height,
                letter_spacing: None,
                italic,
            },
        )
}

fn arb_padding() -> impl Strategy<Value = PaddingProps> {
    (
        prop::option::of(arb_px()),
        prop::option::of(arb_px()),
        prop::option::of(arb_px()),
        prop::option::of(arb_px()),
    )
        .prop_map(|(top, right, bottom, left)| PaddingProps {
            top,
            right,
            bottom,
            left,
            uniform: None,
        })
}

proptest! {
    #[test]
    fn typography_bag_is_lossless(props in arb_typography()) {
        let props = StyleProperties::Typography(props);
        let back = StyleProperties::from_bag(Category::Typography, &props.to_bag());
        prop_assert_eq!(back, props);
    }

    #[test]
    fn padding_bag_is_lossless(props in arb_padding()) {
        let props = StyleProperties::Padding(props);
        let back = StyleProperties::from_bag(Category::Padding, &props.to_bag());
        prop_assert_eq!(back, props);
    }

    #[test]
    fn color_bag_has_one_entry_per_fill(hexes in prop::collection::vec(arb_hex(), 1..5)) {
        let props = StyleProperties::Color(ColorProps {
            fills: hexes.iter().map(Paint::hex).collect(),
        });
        let bag = props.to_bag();
        prop_assert_eq!(bag.len(), 1);
        prop_assert_eq!(bag["fills"].as_list().map(<[_]>::len), Some(hexes.len()));
    }

    #[test]
    fn token_json_round_trips(props in arb_typography(), usage in 1u32..100) {
        let token = Token {
            id: "typography_1".to_string(),
            properties: StyleProperties::Typography(props),
            exact_hash: "h".to_string(),
            semantic_hash: "s".to_string(),
            usage_count: usage,
            parent_id: None,
            child_ids: vec![],
            variance: 0.0,
            origin: TokenOrigin::Submitted,
            source_node: Some("1:2".to_string()),
        };
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, token);
    }
}
