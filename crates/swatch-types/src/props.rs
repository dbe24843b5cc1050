//! Typed per-category style properties.
//!
//! Each category has a struct of optional fields. All of them share a
//! uniform key/value view ([`PropertyBag`]) through [`StyleProperties::to_bag`],
//! which is what hashing and similarity scoring operate on.
//! [`StyleProperties::from_bag`] goes the other way, so merge results
//! (an intersection of bags) can be turned back into a typed value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::LayoutDirection;
use crate::{Category, PropValue, PropertyBag};

/// A solid paint.
///
/// `normalized` holds a canonical marker (`"black"`, `"white"`) after
/// semantic normalization; raw submissions only carry `hex`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Paint {
    pub fn hex(hex: impl Into<String>) -> Self {
        Self {
            hex: Some(hex.into()),
            ..Default::default()
        }
    }

    pub fn to_value(&self) -> PropValue {
        let mut map = BTreeMap::new();
        put(&mut map, "hex", self.hex.clone());
        put(&mut map, "normalized", self.normalized.clone());
        put(&mut map, "opacity", self.opacity);
        PropValue::Object(map)
    }

    pub fn from_value(value: &PropValue) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            hex: text(map, "hex"),
            normalized: text(map, "normalized"),
            opacity: num(map, "opacity"),
        })
    }
}

/// Corner radius: one scalar, or four explicit corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    Uniform(f64),
    #[serde(rename_all = "camelCase")]
    PerCorner {
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    },
}

impl CornerRadius {
    /// The single radius value, if all corners agree.
    pub fn scalar(&self) -> Option<f64> {
        match *self {
            CornerRadius::Uniform(r) => Some(r),
            CornerRadius::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => {
                let same = [top_right, bottom_right, bottom_left]
                    .iter()
                    .all(|c| (c - top_left).abs() <= f64::EPSILON);
                same.then_some(top_left)
            }
        }
    }

    pub fn to_value(&self) -> PropValue {
        match *self {
            CornerRadius::Uniform(r) => PropValue::Number(r),
            CornerRadius::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => {
                let mut map = BTreeMap::new();
                map.insert("topLeft".to_string(), PropValue::Number(top_left));
                map.insert("topRight".to_string(), PropValue::Number(top_right));
                map.insert("bottomRight".to_string(), PropValue::Number(bottom_right));
                map.insert("bottomLeft".to_string(), PropValue::Number(bottom_left));
                PropValue::Object(map)
            }
        }
    }

    pub fn from_value(value: &PropValue) -> Option<Self> {
        match value {
            PropValue::Number(r) => Some(CornerRadius::Uniform(*r)),
            PropValue::Object(map) => Some(CornerRadius::PerCorner {
                top_left: num(map, "topLeft")?,
                top_right: num(map, "topRight")?,
                bottom_right: num(map, "bottomRight")?,
                bottom_left: num(map, "bottomLeft")?,
            }),
            _ => None,
        }
    }
}

/// A border stroke.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: Paint,
    pub weight: f64,
}

impl Stroke {
    pub fn to_value(&self) -> PropValue {
        let mut map = BTreeMap::new();
        map.insert("color".to_string(), self.color.to_value());
        map.insert("weight".to_string(), PropValue::Number(self.weight));
        PropValue::Object(map)
    }

    pub fn from_value(value: &PropValue) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            color: map.get("color").and_then(Paint::from_value)?,
            weight: num(map, "weight").unwrap_or(1.0),
        })
    }
}

/// A drop or inner shadow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: Paint,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub spread: f64,
    #[serde(default)]
    pub inset: bool,
}

impl Shadow {
    pub fn to_value(&self) -> PropValue {
        let mut map = BTreeMap::new();
        map.insert("color".to_string(), self.color.to_value());
        map.insert("offsetX".to_string(), PropValue::Number(self.offset_x));
        map.insert("offsetY".to_string(), PropValue::Number(self.offset_y));
        map.insert("blur".to_string(), PropValue::Number(self.blur));
        map.insert("spread".to_string(), PropValue::Number(self.spread));
        map.insert("inset".to_string(), PropValue::Bool(self.inset));
        PropValue::Object(map)
    }

    pub fn from_value(value: &PropValue) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            color: map.get("color").and_then(Paint::from_value)?,
            offset_x: num(map, "offsetX").unwrap_or(0.0),
            offset_y: num(map, "offsetY").unwrap_or(0.0),
            blur: num(map, "blur").unwrap_or(0.0),
            spread: num(map, "spread").unwrap_or(0.0),
            inset: map.get("inset").and_then(PropValue::as_bool).unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorProps {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_kind: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variant_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationProps {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Stroke>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shadows: Vec<Shadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<LayoutDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_axis_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_axis_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingProps>,
}

/// Four-sided padding, or its collapsed uniform form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddingProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniform: Option<f64>,
}

impl PaddingProps {
    pub fn sides(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
            uniform: None,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.uniform.is_some()
    }

    fn to_bag(&self) -> PropertyBag {
        let mut bag = PropertyBag::new();
        put(&mut bag, "top", self.top);
        put(&mut bag, "right", self.right);
        put(&mut bag, "bottom", self.bottom);
        put(&mut bag, "left", self.left);
        if let Some(v) = self.uniform {
            bag.insert("uniform".to_string(), PropValue::Number(v));
            bag.insert("isUniform".to_string(), PropValue::Bool(true));
        }
        bag
    }

    fn from_bag(bag: &PropertyBag) -> Self {
        Self {
            top: num(bag, "top"),
            right: num(bag, "right"),
            bottom: num(bag, "bottom"),
            left: num(bag, "left"),
            uniform: num(bag, "uniform"),
        }
    }
}

/// Style properties tagged by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "properties", rename_all = "snake_case")]
pub enum StyleProperties {
    Color(ColorProps),
    Typography(TypographyProps),
    Component(ComponentProps),
    Decoration(DecorationProps),
    Text(TextProps),
    Layout(LayoutProps),
    Padding(PaddingProps),
}

impl StyleProperties {
    pub fn category(&self) -> Category {
        match self {
            StyleProperties::Color(_) => Category::Color,
            StyleProperties::Typography(_) => Category::Typography,
            StyleProperties::Component(_) => Category::Component,
            StyleProperties::Decoration(_) => Category::Decoration,
            StyleProperties::Text(_) => Category::Text,
            StyleProperties::Layout(_) => Category::Layout,
            StyleProperties::Padding(_) => Category::Padding,
        }
    }

    /// Flatten into the key/value view. Absent fields are omitted.
    pub fn to_bag(&self) -> PropertyBag {
        let mut bag = PropertyBag::new();
        match self {
            StyleProperties::Color(p) => {
                put_paints(&mut bag, "fills", &p.fills);
            }
            StyleProperties::Typography(p) => {
                put(&mut bag, "fontFamily", p.font_family.clone());
                put(&mut bag, "fontSize", p.font_size);
                put(&mut bag, "fontWeight", p.font_weight);
                put(&mut bag, "lineHeight", p.line_height);
                put(&mut bag, "letterSpacing", p.letter_spacing);
                put(&mut bag, "italic", p.italic);
            }
            StyleProperties::Component(p) => {
                put(&mut bag, "componentName", p.component_name.clone());
                put(&mut bag, "componentKind", p.component_kind.clone());
                if !p.variant_properties.is_empty() {
                    let map = p
                        .variant_properties
                        .iter()
                        .map(|(k, v)| (k.clone(), PropValue::Text(v.clone())))
                        .collect();
                    bag.insert("variantProperties".to_string(), PropValue::Object(map));
                }
                put(&mut bag, "width", p.width);
                put(&mut bag, "height", p.height);
            }
            StyleProperties::Decoration(p) => {
                put_paints(&mut bag, "fills", &p.fills);
                if let Some(radius) = &p.corner_radius {
                    bag.insert("cornerRadius".to_string(), radius.to_value());
                }
                if let Some(border) = &p.border {
                    bag.insert("border".to_string(), border.to_value());
                }
                if !p.shadows.is_empty() {
                    let shadows = p.shadows.iter().map(Shadow::to_value).collect();
                    bag.insert("shadows".to_string(), PropValue::List(shadows));
                }
                put(&mut bag, "opacity", p.opacity);
            }
            StyleProperties::Text(p) => {
                put(&mut bag, "textAlign", p.text_align.clone());
                put(&mut bag, "textCase", p.text_case.clone());
                put(&mut bag, "textDecoration", p.text_decoration.clone());
                put(&mut bag, "maxLines", p.max_lines);
            }
            StyleProperties::Layout(p) => {
                put(&mut bag, "direction", p.direction.map(|d| d.as_str()));
                put(&mut bag, "gap", p.gap);
                put(&mut bag, "mainAxisAlign", p.main_axis_align.clone());
                put(&mut bag, "crossAxisAlign", p.cross_axis_align.clone());
                put(&mut bag, "wrap", p.wrap);
                if let Some(padding) = &p.padding {
                    bag.insert(
                        "padding".to_string(),
                        PropValue::Object(padding.to_bag()),
                    );
                }
            }
            StyleProperties::Padding(p) => {
                bag = p.to_bag();
            }
        }
        bag
    }

    /// Rebuild a typed value of `category` from a bag.
    ///
    /// Keys that do not belong to the category, or values of the wrong
    /// shape, are ignored.
    pub fn from_bag(category: Category, bag: &PropertyBag) -> Self {
        match category {
            Category::Color => StyleProperties::Color(ColorProps {
                fills: paints(bag, "fills"),
            }),
            Category::Typography => StyleProperties::Typography(TypographyProps {
                font_family: text(bag, "fontFamily"),
                font_size: num(bag, "fontSize"),
                font_weight: num(bag, "fontWeight"),
                line_height: num(bag, "lineHeight"),
                letter_spacing: num(bag, "letterSpacing"),
                italic: bag.get("italic").and_then(PropValue::as_bool),
            }),
            Category::Component => StyleProperties::Component(ComponentProps {
                component_name: text(bag, "componentName"),
                component_kind: text(bag, "componentKind"),
                variant_properties: bag
                    .get("variantProperties")
                    .and_then(PropValue::as_object)
                    .map(|map| {
                        map.iter()
                            .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_string())))
                            .collect()
                    })
                    .unwrap_or_default(),
                width: num(bag, "width"),
                height: num(bag, "height"),
            }),
            Category::Decoration => StyleProperties::Decoration(DecorationProps {
                fills: paints(bag, "fills"),
                corner_radius: bag.get("cornerRadius").and_then(CornerRadius::from_value),
                border: bag.get("border").and_then(Stroke::from_value),
                shadows: bag
                    .get("shadows")
                    .and_then(PropValue::as_list)
                    .map(|items| items.iter().filter_map(Shadow::from_value).collect())
                    .unwrap_or_default(),
                opacity: num(bag, "opacity"),
            }),
            Category::Text => StyleProperties::Text(TextProps {
                text_align: text(bag, "textAlign"),
                text_case: text(bag, "textCase"),
                text_decoration: text(bag, "textDecoration"),
                max_lines: num(bag, "maxLines").map(|n| n.max(0.0) as u32),
            }),
            Category::Layout => StyleProperties::Layout(LayoutProps {
                direction: bag
                    .get("direction")
                    .and_then(PropValue::as_str)
                    .and_then(LayoutDirection::parse),
                gap: num(bag, "gap"),
                main_axis_align: text(bag, "mainAxisAlign"),
                cross_axis_align: text(bag, "crossAxisAlign"),
                wrap: bag.get("wrap").and_then(PropValue::as_bool),
                padding: bag
                    .get("padding")
                    .and_then(PropValue::as_object)
                    .map(PaddingProps::from_bag),
            }),
            Category::Padding => StyleProperties::Padding(PaddingProps::from_bag(bag)),
        }
    }
}

fn put<V: Into<PropValue>>(map: &mut BTreeMap<String, PropValue>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

fn put_paints(bag: &mut PropertyBag, key: &str, paints: &[Paint]) {
    if !paints.is_empty() {
        let list = paints.iter().map(Paint::to_value).collect();
        bag.insert(key.to_string(), PropValue::List(list));
    }
}

fn paints(bag: &PropertyBag, key: &str) -> Vec<Paint> {
    bag.get(key)
        .and_then(PropValue::as_list)
        .map(|items| items.iter().filter_map(Paint::from_value).collect())
        .unwrap_or_default()
}

fn num(map: &BTreeMap<String, PropValue>, key: &str) -> Option<f64> {
    map.get(key).and_then(PropValue::as_f64)
}

fn text(map: &BTreeMap<String, PropValue>, key: &str) -> Option<String> {
    map.get(key).and_then(PropValue::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoration() -> StyleProperties {
        StyleProperties::Decoration(DecorationProps {
            fills: vec![Paint::hex("#ff0000")],
            corner_radius: Some(CornerRadius::Uniform(8.0)),
            border: Some(Stroke {
                color: Paint::hex("#000000"),
                weight: 1.0,
            }),
            shadows: vec![Shadow {
                color: Paint::hex("#00000040"),
                offset_y: 2.0,
                blur: 4.0,
                ..Default::default()
            }],
            opacity: None,
        })
    }

    #[test]
    fn bag_omits_absent_fields() {
        let props = StyleProperties::Typography(TypographyProps {
            font_size: Some(16.0),
            ..Default::default()
        });
        let bag = props.to_bag();
        assert_eq!(bag.len(), 1);
        assert_eq!(bag["fontSize"], PropValue::Number(16.0));
    }

    #[test]
    fn decoration_survives_bag_conversion() {
        let props = decoration();
        let back = StyleProperties::from_bag(Category::Decoration, &props.to_bag());
        assert_eq!(back, props);
    }

    #[test]
    fn layout_with_padding_survives_bag_conversion() {
        let props = StyleProperties::Layout(LayoutProps {
            direction: Some(LayoutDirection::Vertical),
            gap: Some(12.0),
            padding: Some(PaddingProps {
                uniform: Some(8.0),
                ..Default::default()
            }),
            ..Default::default()
        });
        let back = StyleProperties::from_bag(Category::Layout, &props.to_bag());
        assert_eq!(back, props);
    }

    #[test]
    fn uniform_padding_bag_carries_marker() {
        let props = StyleProperties::Padding(PaddingProps {
            uniform: Some(4.0),
            ..Default::default()
        });
        let bag = props.to_bag();
        assert_eq!(bag["uniform"], PropValue::Number(4.0));
        assert_eq!(bag["isUniform"], PropValue::Bool(true));
    }

    #[test]
    fn from_bag_ignores_foreign_keys() {
        let mut bag = PropertyBag::new();
        bag.insert("fontSize".to_string(), PropValue::Number(12.0));
        let props = StyleProperties::from_bag(Category::Color, &bag);
        assert_eq!(props, StyleProperties::Color(ColorProps::default()));
    }

    #[test]
    fn per_corner_scalar_only_when_equal() {
        let equal = CornerRadius::PerCorner {
            top_left: 4.0,
            top_right: 4.0,
            bottom_right: 4.0,
            bottom_left: 4.0,
        };
        let mixed = CornerRadius::PerCorner {
            top_left: 4.0,
            top_right: 0.0,
            bottom_right: 4.0,
            bottom_left: 0.0,
        };
        assert_eq!(equal.scalar(), Some(4.0));
        assert_eq!(mixed.scalar(), None);
    }

    #[test]
    fn style_properties_json_is_tagged_by_category() {
        let props = StyleProperties::Color(ColorProps {
            fills: vec![Paint::hex("#fff")],
        });
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(
            json,
            r##"{"category":"color","properties":{"fills":[{"hex":"#fff"}]}}"##
        );
    }
}
