//! Built-in per-category extractors.
//!
//! Each one reads a single slice of a [`DesignNode`]'s raw attributes and
//! submits at most a couple of property sets. A node without the relevant
//! attribute is a no-op.

use swatch_normalize::{DEFAULT_FONT_SIZE, DEFAULT_FONT_WEIGHT};
use swatch_registry::{SubmitContext, TokenRegistry};
use swatch_types::{
    ColorProps, ComponentProps, CornerRadius, DecorationProps, DesignNode, Effect, EffectKind,
    Fill, LayoutProps, PaddingProps, Paint, Shadow, Sides, Stroke, StyleProperties, TextProps,
    TokenId, TypographyProps,
};

use crate::variants::parse_variant_name;

/// One category's view of a design node.
pub trait StyleExtractor {
    /// Stable extractor name (e.g., "color").
    fn name(&self) -> &'static str;

    /// Submit whatever this node contributes; returns the resolved ids.
    fn extract(&self, node: &DesignNode, registry: &mut TokenRegistry) -> Vec<TokenId>;
}

fn submit_all(
    node: &DesignNode,
    registry: &mut TokenRegistry,
    props: impl IntoIterator<Item = StyleProperties>,
) -> Vec<TokenId> {
    let ctx = SubmitContext::new(node.id.as_str(), node.name.as_str());
    props
        .into_iter()
        .map(|p| registry.submit(p, Some(&ctx)))
        .collect()
}

fn paint(fill: &Fill) -> Option<Paint> {
    if !fill.is_usable() {
        return None;
    }
    Some(Paint {
        hex: fill.hex.clone(),
        normalized: None,
        opacity: fill.opacity.filter(|o| *o < 1.0),
    })
}

fn usable_paints(fills: &[Fill]) -> Vec<Paint> {
    fills.iter().filter_map(paint).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorExtractor;

impl ColorExtractor {
    pub fn properties(node: &DesignNode) -> Option<StyleProperties> {
        let fills = usable_paints(&node.fills);
        if fills.is_empty() {
            return None;
        }
        Some(StyleProperties::Color(ColorProps { fills }))
    }
}

impl StyleExtractor for ColorExtractor {
    fn name(&self) -> &'static str {
        "color"
    }

    fn extract(&self, node: &DesignNode, registry: &mut TokenRegistry) -> Vec<TokenId> {
        submit_all(node, registry, Self::properties(node))
    }
}

/// Font properties, plus a separate text token for alignment and casing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypographyExtractor;

impl TypographyExtractor {
    pub fn properties(node: &DesignNode) -> Vec<StyleProperties> {
        let Some(style) = &node.text_style else {
            return Vec::new();
        };
        let mut out = vec![StyleProperties::Typography(TypographyProps {
            font_family: style.font_family.clone(),
            font_size: Some(style.font_size.unwrap_or(DEFAULT_FONT_SIZE)),
            font_weight: Some(style.font_weight.unwrap_or(DEFAULT_FONT_WEIGHT)),
            line_height: style.line_height,
            letter_spacing: style.letter_spacing,
            italic: style.italic,
        })];
        let text = TextProps {
            text_align: style.text_align.clone(),
            text_case: style.text_case.clone(),
            text_decoration: style.text_decoration.clone(),
            max_lines: style.max_lines,
        };
        if text != TextProps::default() {
            out.push(StyleProperties::Text(text));
        }
        out
    }
}

impl StyleExtractor for TypographyExtractor {
    fn name(&self) -> &'static str {
        "typography"
    }

    fn extract(&self, node: &DesignNode, registry: &mut TokenRegistry) -> Vec<TokenId> {
        submit_all(node, registry, Self::properties(node))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentExtractor;

impl ComponentExtractor {
    pub fn properties(node: &DesignNode) -> Option<StyleProperties> {
        if !node.kind.is_component_like() {
            return None;
        }
        let variant_properties = parse_variant_name(&node.name).unwrap_or_default();
        Some(StyleProperties::Component(ComponentProps {
            component_name: (!node.name.is_empty()).then(|| node.name.clone()),
            component_kind: Some(node.kind.as_str().to_string()),
            variant_properties,
            width: node.bounds.map(|b| b.width),
            height: node.bounds.map(|b| b.height),
        }))
    }
}

impl StyleExtractor for ComponentExtractor {
    fn name(&self) -> &'static str {
        "component"
    }

    fn extract(&self, node: &DesignNode, registry: &mut TokenRegistry) -> Vec<TokenId> {
        submit_all(node, registry, Self::properties(node))
    }
}

/// Auto-layout settings, plus padding as its own token.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutExtractor;

fn padding_props(sides: &Sides) -> Option<PaddingProps> {
    let values = [sides.top, sides.right, sides.bottom, sides.left].map(|v| v.unwrap_or(0.0));
    if values.iter().all(|v| *v == 0.0) {
        return None;
    }
    let [top, right, bottom, left] = values;
    Some(PaddingProps::sides(top, right, bottom, left))
}

impl LayoutExtractor {
    pub fn properties(node: &DesignNode) -> Vec<StyleProperties> {
        let padding = node.padding.as_ref().and_then(padding_props);
        let mut out = Vec::new();
        if let Some(layout) = &node.layout {
            out.push(StyleProperties::Layout(LayoutProps {
                direction: layout.direction,
                gap: layout.gap,
                main_axis_align: layout.main_axis_align.clone(),
                cross_axis_align: layout.cross_axis_align.clone(),
                wrap: layout.wrap,
                padding: padding.clone(),
            }));
        }
        if let Some(p) = padding {
            out.push(StyleProperties::Padding(p));
        }
        out
    }
}

impl StyleExtractor for LayoutExtractor {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn extract(&self, node: &DesignNode, registry: &mut TokenRegistry) -> Vec<TokenId> {
        submit_all(node, registry, Self::properties(node))
    }
}

/// Surface treatment: radius, border, shadows, and opacity.
///
/// Fills are carried along but never trigger a token on their own; a node
/// with only a fill contributes a color token and nothing here.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecorationExtractor;

fn corner_radius(node: &DesignNode) -> Option<CornerRadius> {
    if let Some([tl, tr, br, bl]) = node.corner_radii {
        let radius = CornerRadius::PerCorner {
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        };
        return (radius.scalar() != Some(0.0)).then_some(radius);
    }
    node.corner_radius.filter(|r| *r > 0.0).map(CornerRadius::Uniform)
}

fn shadow(effect: &Effect) -> Option<Shadow> {
    if effect.visible == Some(false) {
        return None;
    }
    let inset = match effect.kind {
        EffectKind::DropShadow => false,
        EffectKind::InnerShadow => true,
        _ => return None,
    };
    Some(Shadow {
        color: Paint {
            hex: effect.hex.clone(),
            ..Default::default()
        },
        offset_x: effect.offset_x.unwrap_or(0.0),
        offset_y: effect.offset_y.unwrap_or(0.0),
        blur: effect.radius.unwrap_or(0.0),
        spread: effect.spread.unwrap_or(0.0),
        inset,
    })
}

impl DecorationExtractor {
    pub fn properties(node: &DesignNode) -> Option<StyleProperties> {
        let border = node
            .strokes
            .iter()
            .find_map(paint)
            .zip(node.stroke_weight.filter(|w| *w > 0.0))
            .map(|(color, weight)| Stroke { color, weight });
        let decoration = DecorationProps {
            fills: Vec::new(),
            corner_radius: corner_radius(node),
            border,
            shadows: node.effects.iter().filter_map(shadow).collect(),
            opacity: node.opacity.filter(|o| *o < 1.0),
        };
        if decoration == DecorationProps::default() {
            return None;
        }
        Some(StyleProperties::Decoration(DecorationProps {
            fills: usable_paints(&node.fills),
            ..decoration
        }))
    }
}

impl StyleExtractor for DecorationExtractor {
    fn name(&self) -> &'static str {
        "decoration"
    }

    fn extract(&self, node: &DesignNode, registry: &mut TokenRegistry) -> Vec<TokenId> {
        submit_all(node, registry, Self::properties(node))
    }
}

/// Built-in extractors in invocation order.
pub fn default_extractors() -> Vec<Box<dyn StyleExtractor>> {
    vec![
        Box::new(ColorExtractor),
        Box::new(TypographyExtractor),
        Box::new(ComponentExtractor),
        Box::new(LayoutExtractor),
        Box::new(DecorationExtractor),
    ]
}
