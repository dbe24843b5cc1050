//! # swatch-normalize
//!
//! Semantic normalization for style properties.
//!
//! [`normalize`] rewrites properties into a coarser canonical form:
//! hex colors are case-folded and pure black/white collapse onto shared
//! markers, four equal padding sides collapse to a uniform value, four
//! equal corner radii collapse to a scalar. [`semantic_key`] then keeps
//! only the load-bearing subset, and [`semantic_hash`] fingerprints it.
//!
//! `normalize(normalize(x)) == normalize(x)` for every input.

use std::collections::BTreeMap;

use swatch_hash::canonical_hash;
use swatch_math::{approx_eq, format_number};
use swatch_types::{
    CornerRadius, DecorationProps, LayoutProps, PaddingProps, Paint, PropValue, PropertyBag,
    Shadow, Stroke, StyleProperties, TypographyProps,
};

/// Font size used when a text style omits one.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
/// Font weight used when a text style omits one.
pub const DEFAULT_FONT_WEIGHT: f64 = 400.0;
/// Family placeholder in typography keys when a text style omits one.
pub const DEFAULT_FONT_FAMILY: &str = "default";

pub const BLACK: &str = "black";
pub const WHITE: &str = "white";

/// Case-fold a hex color and map pure black/white to their marker.
///
/// Returns `(hex, marker)`; exactly one side is `Some` for non-empty input.
pub fn normalize_hex(hex: &str) -> (Option<String>, Option<&'static str>) {
    let lower = hex.trim().to_ascii_lowercase();
    match lower.as_str() {
        "#000" | "#000000" => (None, Some(BLACK)),
        "#fff" | "#ffffff" => (None, Some(WHITE)),
        _ => (Some(lower), None),
    }
}

pub fn normalize_paint(paint: &Paint) -> Paint {
    if paint.normalized.is_some() {
        return Paint {
            hex: None,
            ..paint.clone()
        };
    }
    match paint.hex.as_deref().map(normalize_hex) {
        Some((hex, marker)) => Paint {
            hex,
            normalized: marker.map(str::to_string),
            opacity: paint.opacity,
        },
        None => paint.clone(),
    }
}

/// Collapse four present, equal sides to `uniform`.
pub fn normalize_padding(padding: &PaddingProps) -> PaddingProps {
    if padding.uniform.is_some() {
        return PaddingProps {
            uniform: padding.uniform,
            ..Default::default()
        };
    }
    match (padding.top, padding.right, padding.bottom, padding.left) {
        (Some(t), Some(r), Some(b), Some(l)) if approx_eq(t, r) && approx_eq(t, b) && approx_eq(t, l) => {
            PaddingProps {
                uniform: Some(t),
                ..Default::default()
            }
        }
        _ => padding.clone(),
    }
}

fn normalize_radius(radius: &CornerRadius) -> CornerRadius {
    match radius.scalar() {
        Some(r) => CornerRadius::Uniform(r),
        None => radius.clone(),
    }
}

fn normalize_decoration(p: &DecorationProps) -> DecorationProps {
    DecorationProps {
        fills: p.fills.iter().map(normalize_paint).collect(),
        corner_radius: p.corner_radius.as_ref().map(normalize_radius),
        border: p.border.as_ref().map(|s| Stroke {
            color: normalize_paint(&s.color),
            weight: s.weight,
        }),
        shadows: p
            .shadows
            .iter()
            .map(|s| Shadow {
                color: normalize_paint(&s.color),
                ..s.clone()
            })
            .collect(),
        opacity: p.opacity,
    }
}

/// Rewrite properties into canonical form. Unrecognized shapes pass
/// through unchanged.
pub fn normalize(props: &StyleProperties) -> StyleProperties {
    match props {
        StyleProperties::Color(p) => {
            let mut p = p.clone();
            p.fills = p.fills.iter().map(normalize_paint).collect();
            StyleProperties::Color(p)
        }
        StyleProperties::Decoration(p) => StyleProperties::Decoration(normalize_decoration(p)),
        StyleProperties::Padding(p) => StyleProperties::Padding(normalize_padding(p)),
        StyleProperties::Layout(p) => StyleProperties::Layout(LayoutProps {
            padding: p.padding.as_ref().map(normalize_padding),
            ..p.clone()
        }),
        StyleProperties::Typography(_) | StyleProperties::Component(_) | StyleProperties::Text(_) => {
            props.clone()
        }
    }
}

/// `"<size>_<family>_<weight>"`, with defaults for missing fields.
pub fn typography_key(p: &TypographyProps) -> String {
    format!(
        "{}_{}_{}",
        format_number(p.font_size.unwrap_or(DEFAULT_FONT_SIZE)),
        p.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY),
        format_number(p.font_weight.unwrap_or(DEFAULT_FONT_WEIGHT)),
    )
}

/// Key for a paint: the marker object for black/white, else the hex.
fn paint_key(paint: &Paint) -> Option<PropValue> {
    if let Some(marker) = &paint.normalized {
        let mut map = BTreeMap::new();
        map.insert("normalized".to_string(), PropValue::Text(marker.clone()));
        return Some(PropValue::Object(map));
    }
    paint.hex.clone().map(PropValue::Text)
}

/// Reduce normalized properties to their load-bearing subset.
///
/// Falls back to the full normalized bag when the reduction is empty, so
/// unrelated inputs never collapse onto an empty key.
pub fn semantic_key(normalized: &StyleProperties) -> PropertyBag {
    let mut key = PropertyBag::new();
    match normalized {
        StyleProperties::Color(p) => {
            if let Some(v) = p.fills.first().and_then(paint_key) {
                key.insert("color".to_string(), v);
            }
        }
        StyleProperties::Decoration(p) => {
            if let Some(v) = p.fills.first().and_then(paint_key) {
                key.insert("fill".to_string(), v);
            }
            if let Some(r) = p.corner_radius.as_ref().and_then(CornerRadius::scalar) {
                key.insert("radius".to_string(), PropValue::Number(r));
            }
        }
        StyleProperties::Padding(p) => {
            if let Some(v) = p.uniform {
                key.insert("padding".to_string(), PropValue::Number(v));
            }
        }
        StyleProperties::Typography(p) => {
            key.insert("key".to_string(), PropValue::Text(typography_key(p)));
        }
        StyleProperties::Component(_) | StyleProperties::Text(_) | StyleProperties::Layout(_) => {}
    }
    if key.is_empty() {
        normalized.to_bag()
    } else {
        key
    }
}

/// Fingerprint of the normalized, reduced view of `props`.
pub fn semantic_hash(props: &StyleProperties) -> String {
    format!(
        "{}~{}",
        props.category(),
        canonical_hash(&semantic_key(&normalize(props)))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_types::{ColorProps, ComponentProps};

    fn color(hex: &str) -> StyleProperties {
        StyleProperties::Color(ColorProps {
            fills: vec![Paint::hex(hex)],
        })
    }

    #[test]
    fn black_aliases_collapse() {
        assert_eq!(normalize(&color("#000000")), normalize(&color("#000")));
        assert_eq!(semantic_hash(&color("#000000")), semantic_hash(&color("#000")));
    }

    #[test]
    fn white_aliases_are_case_insensitive() {
        assert_eq!(semantic_hash(&color("#FFF")), semantic_hash(&color("#ffffff")));
    }

    #[test]
    fn other_hex_is_case_folded_only() {
        let (hex, marker) = normalize_hex("#FF00AA");
        assert_eq!(hex.as_deref(), Some("#ff00aa"));
        assert!(marker.is_none());
        assert_ne!(semantic_hash(&color("#ff0000")), semantic_hash(&color("#f00")));
    }

    #[test]
    fn uniform_padding_collapses() {
        let p = normalize_padding(&PaddingProps::sides(8.0, 8.0, 8.0, 8.0));
        assert_eq!(p.uniform, Some(8.0));
        assert!(p.top.is_none());
    }

    #[test]
    fn uneven_padding_is_untouched() {
        let raw = PaddingProps::sides(8.0, 16.0, 8.0, 16.0);
        assert_eq!(normalize_padding(&raw), raw);
    }

    #[test]
    fn partial_padding_is_untouched() {
        let raw = PaddingProps {
            top: Some(4.0),
            ..Default::default()
        };
        assert_eq!(normalize_padding(&raw), raw);
    }

    #[test]
    fn typography_key_uses_defaults() {
        let p = TypographyProps {
            font_family: Some("Roboto".to_string()),
            ..Default::default()
        };
        assert_eq!(typography_key(&p), "16_Roboto_400");
    }

    #[test]
    fn typography_ignores_line_height_semantically() {
        let a = StyleProperties::Typography(TypographyProps {
            font_family: Some("Inter".to_string()),
            font_size: Some(14.0),
            font_weight: Some(500.0),
            line_height: Some(20.0),
            ..Default::default()
        });
        let b = StyleProperties::Typography(TypographyProps {
            font_family: Some("Inter".to_string()),
            font_size: Some(14.0),
            font_weight: Some(500.0),
            ..Default::default()
        });
        assert_eq!(semantic_hash(&a), semantic_hash(&b));
    }

    #[test]
    fn decoration_key_keeps_fill_and_radius() {
        let props = StyleProperties::Decoration(DecorationProps {
            fills: vec![Paint::hex("#000")],
            corner_radius: Some(CornerRadius::Uniform(4.0)),
            opacity: Some(0.5),
            ..Default::default()
        });
        let key = semantic_key(&normalize(&props));
        assert_eq!(key.len(), 2);
        assert_eq!(key["radius"], PropValue::Number(4.0));
        assert!(key["fill"].as_object().is_some());
    }

    #[test]
    fn empty_reduction_falls_back_to_full_bag() {
        let props = StyleProperties::Decoration(DecorationProps {
            opacity: Some(0.5),
            ..Default::default()
        });
        let key = semantic_key(&normalize(&props));
        assert_eq!(key, props.to_bag());
    }

    #[test]
    fn component_key_is_full_bag() {
        let props = StyleProperties::Component(ComponentProps {
            component_name: Some("Button".to_string()),
            ..Default::default()
        });
        assert_eq!(semantic_key(&normalize(&props)), props.to_bag());
    }

    #[test]
    fn semantic_hash_separates_categories() {
        let fills = vec![Paint::hex("#123456")];
        let c = StyleProperties::Color(ColorProps {
            fills: fills.clone(),
        });
        let d = StyleProperties::Decoration(DecorationProps {
            fills,
            ..Default::default()
        });
        assert_ne!(semantic_hash(&c), semantic_hash(&d));
    }
}
