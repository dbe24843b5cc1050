//! BDD-style scenarios for semantic normalization.

use swatch_normalize::{normalize, semantic_hash, semantic_key};
use swatch_types::{
    ColorProps, DecorationProps, LayoutProps, PaddingProps, Paint, PropValue, StyleProperties,
};

fn fills(hex: &str) -> StyleProperties {
    StyleProperties::Color(ColorProps {
        fills: vec![Paint::hex(hex)],
    })
}

#[test]
fn given_long_and_short_black_when_hashed_then_semantic_hashes_match() {
    let long = fills("#000000");
    let short = fills("#000");
    assert_ne!(long.to_bag(), short.to_bag());
    assert_eq!(semantic_hash(&long), semantic_hash(&short));
}

#[test]
fn given_black_fill_when_keyed_then_marker_object_is_used() {
    let key = semantic_key(&normalize(&fills("#000")));
    let marker = key["color"].as_object().expect("marker object");
    assert_eq!(marker["normalized"], PropValue::Text("black".to_string()));
}

#[test]
fn given_secondary_fills_differ_when_hashed_then_primary_fill_decides() {
    let a = StyleProperties::Color(ColorProps {
        fills: vec![Paint::hex("#336699"), Paint::hex("#111111")],
    });
    let b = StyleProperties::Color(ColorProps {
        fills: vec![Paint::hex("#336699"), Paint::hex("#222222")],
    });
    assert_eq!(semantic_hash(&a), semantic_hash(&b));
}

#[test]
fn given_uniform_sides_when_normalized_then_padding_is_marked_uniform() {
    let props = StyleProperties::Padding(PaddingProps::sides(12.0, 12.0, 12.0, 12.0));
    let bag = normalize(&props).to_bag();
    assert_eq!(bag["uniform"], PropValue::Number(12.0));
    assert_eq!(bag["isUniform"], PropValue::Bool(true));
    assert!(!bag.contains_key("top"));
}

#[test]
fn given_sides_and_uniform_forms_when_hashed_then_semantic_hashes_match() {
    let sides = StyleProperties::Padding(PaddingProps::sides(4.0, 4.0, 4.0, 4.0));
    let uniform = StyleProperties::Padding(PaddingProps {
        uniform: Some(4.0),
        ..Default::default()
    });
    assert_eq!(semantic_hash(&sides), semantic_hash(&uniform));
}

#[test]
fn given_layout_with_uniform_padding_when_normalized_then_nested_padding_collapses() {
    let props = StyleProperties::Layout(LayoutProps {
        gap: Some(8.0),
        padding: Some(PaddingProps::sides(16.0, 16.0, 16.0, 16.0)),
        ..Default::default()
    });
    match normalize(&props) {
        StyleProperties::Layout(layout) => {
            assert_eq!(layout.padding.and_then(|p| p.uniform), Some(16.0));
        }
        other => panic!("unexpected category: {other:?}"),
    }
}

#[test]
fn given_decorations_differing_only_in_opacity_when_hashed_then_they_collapse() {
    let a = StyleProperties::Decoration(DecorationProps {
        fills: vec![Paint::hex("#ff0000")],
        opacity: Some(1.0),
        ..Default::default()
    });
    let b = StyleProperties::Decoration(DecorationProps {
        fills: vec![Paint::hex("#FF0000")],
        opacity: Some(0.9),
        ..Default::default()
    });
    assert_eq!(semantic_hash(&a), semantic_hash(&b));
}
