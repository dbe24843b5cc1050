//! The read-only design tree consumed by the walker.
//!
//! Every attribute is optional and defaults on deserialization, so a
//! node missing an expected field contributes nothing instead of failing.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Container,
    Text,
    Shape,
    Component,
    ComponentSet,
    Instance,
    #[serde(other)]
    Other,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Text => "text",
            NodeKind::Shape => "shape",
            NodeKind::Component => "component",
            NodeKind::ComponentSet => "component_set",
            NodeKind::Instance => "instance",
            NodeKind::Other => "other",
        }
    }

    pub fn is_component_like(self) -> bool {
        matches!(
            self,
            NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintType {
    #[default]
    Solid,
    GradientLinear,
    GradientRadial,
    Image,
    #[serde(other)]
    Other,
}

/// A raw fill or stroke paint as authored on a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    #[serde(rename = "type", default)]
    pub paint_type: PaintType,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl Fill {
    pub fn solid(hex: impl Into<String>) -> Self {
        Self {
            hex: Some(hex.into()),
            ..Default::default()
        }
    }

    /// Visible solid paint with a hex value.
    pub fn is_usable(&self) -> bool {
        self.paint_type == PaintType::Solid && self.visible != Some(false) && self.hex.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    #[default]
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type", default)]
    pub kind: EffectKind,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub offset_x: Option<f64>,
    #[serde(default)]
    pub offset_y: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub spread: Option<f64>,
    #[serde(default)]
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_weight: Option<f64>,
    #[serde(default)]
    pub line_height: Option<f64>,
    #[serde(default)]
    pub letter_spacing: Option<f64>,
    #[serde(default)]
    pub italic: Option<bool>,
    #[serde(default)]
    pub text_align: Option<String>,
    #[serde(default)]
    pub text_case: Option<String>,
    #[serde(default)]
    pub text_decoration: Option<String>,
    #[serde(default)]
    pub max_lines: Option<u32>,
}

/// Raw four-sided spacing. Missing sides read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sides {
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
}

impl Sides {
    pub fn all(value: f64) -> Self {
        Self {
            top: Some(value),
            right: Some(value),
            bottom: Some(value),
            left: Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
}

impl LayoutDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutDirection::Horizontal => "horizontal",
            LayoutDirection::Vertical => "vertical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "horizontal" => Some(LayoutDirection::Horizontal),
            "vertical" => Some(LayoutDirection::Vertical),
            _ => None,
        }
    }
}

fn lenient_direction<'de, D>(deserializer: D) -> Result<Option<LayoutDirection>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => LayoutDirection::parse(&s),
        Some(Raw::Other(_)) | None => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLayout {
    /// Unrecognized directions read as absent.
    #[serde(default, deserialize_with = "lenient_direction")]
    pub direction: Option<LayoutDirection>,
    #[serde(default)]
    pub gap: Option<f64>,
    #[serde(default)]
    pub main_axis_align: Option<String>,
    #[serde(default)]
    pub cross_axis_align: Option<String>,
    #[serde(default)]
    pub wrap: Option<bool>,
}

/// Missing coordinates read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One node of the external design document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<DesignNode>,
    #[serde(default)]
    pub fills: Vec<Fill>,
    #[serde(default)]
    pub strokes: Vec<Fill>,
    #[serde(default)]
    pub stroke_weight: Option<f64>,
    #[serde(default)]
    pub text_style: Option<TextStyle>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Per-corner radii: top-left, top-right, bottom-right, bottom-left.
    #[serde(default)]
    pub corner_radii: Option<[f64; 4]>,
    #[serde(default)]
    pub padding: Option<Sides>,
    #[serde(default)]
    pub layout: Option<AutoLayout>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

impl DesignNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<DesignNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_fill(mut self, hex: impl Into<String>) -> Self {
        self.fills.push(Fill::solid(hex));
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(DesignNode::subtree_len).sum::<usize>()
    }
}
