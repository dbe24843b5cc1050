//! # swatch-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the core data structures and contracts for `swatch`.
//! It contains only data types, Serde definitions, and `SCHEMA_VERSION`.
//!
//! ## What belongs here
//! * The read-only design tree (`DesignNode` and its raw attributes)
//! * Typed per-category style properties and their key/value bag view
//! * Tokens, merge candidates, and receipt rows
//!
//! ## What does NOT belong here
//! * Hashing, normalization, or similarity scoring
//! * Registry state
//! * File I/O

pub mod node;
pub mod props;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use node::{
    AutoLayout, Bounds, DesignNode, Effect, EffectKind, Fill, LayoutDirection, NodeKind, PaintType,
    Sides, TextStyle,
};
pub use props::{
    ColorProps, ComponentProps, CornerRadius, DecorationProps, LayoutProps, PaddingProps, Paint,
    Shadow, Stroke, StyleProperties, TextProps, TypographyProps,
};

/// The current schema version for extraction receipts.
pub const SCHEMA_VERSION: u32 = 1;

/// Stable token identifier, unique within one extraction run.
pub type TokenId = String;

/// Key/value view of one category's style properties.
///
/// Keys are sorted, so iteration and serialization order are canonical.
pub type PropertyBag = BTreeMap<String, PropValue>;

/// The style domain a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Color,
    Typography,
    Component,
    Decoration,
    Text,
    Layout,
    Padding,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Color,
        Category::Typography,
        Category::Component,
        Category::Decoration,
        Category::Text,
        Category::Layout,
        Category::Padding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Typography => "typography",
            Category::Component => "component",
            Category::Decoration => "decoration",
            Category::Text => "text",
            Category::Layout => "layout",
            Category::Padding => "padding",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single property value: scalar, list, or nested object.
///
/// Absent fields never appear in a [`PropertyBag`], so there is no
/// `Null` variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<PropValue>),
    Object(BTreeMap<String, PropValue>),
}

impl PropValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, PropValue>> {
        match self {
            PropValue::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(value: Vec<PropValue>) -> Self {
        PropValue::List(value)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(value: BTreeMap<String, PropValue>) -> Self {
        PropValue::Object(value)
    }
}

/// How a token came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenOrigin {
    /// Created by a registry submission during the tree walk.
    #[default]
    Submitted,
    /// Synthesized by the merge engine from two or more existing tokens.
    Merged,
}

/// A deduplicated, named representation of one style-property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    #[serde(flatten)]
    pub properties: StyleProperties,
    pub exact_hash: String,
    pub semantic_hash: String,
    pub usage_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TokenId>,
    #[serde(default)]
    pub child_ids: Vec<TokenId>,
    pub variance: f64,
    #[serde(default)]
    pub origin: TokenOrigin,
    /// Id of the design node whose submission created this token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_node: Option<String>,
}

impl Token {
    pub fn category(&self) -> Category {
        self.properties.category()
    }

    pub fn bag(&self) -> PropertyBag {
        self.properties.to_bag()
    }

    pub fn is_merged(&self) -> bool {
        self.origin == TokenOrigin::Merged
    }
}

/// A proposed consolidation of two or more tokens into one base token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeCandidate {
    pub category: Category,
    /// Member token ids, in registry order.
    pub styles: Vec<TokenId>,
    pub common_properties: PropertyBag,
    /// Per non-common key, the distinct values observed across members.
    pub differences: BTreeMap<String, Vec<PropValue>>,
    pub merge_score: f64,
}

/// A merge candidate that was applied to a registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedMerge {
    pub base_id: TokenId,
    pub absorbed: Vec<TokenId>,
    pub score: f64,
}

/// Registry resolution counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub submissions: usize,
    pub exact_hits: usize,
    pub semantic_hits: usize,
    pub tokens_created: usize,
    pub linked_to_parent: usize,
    pub merged_tokens: usize,
}

/// Traversal counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    pub roots: usize,
    pub nodes_visited: usize,
    /// Nodes excluded because they sit deeper than `max_depth`.
    pub nodes_skipped: usize,
    pub max_depth: usize,
}

/// The tokens a single design node resolved to, in extractor order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyles {
    pub node_id: String,
    pub node_name: String,
    pub token_ids: Vec<TokenId>,
}

/// One token as it appears in an extraction receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRow {
    #[serde(flatten)]
    pub token: Token,
    /// Short display digest of `exact_hash`.
    pub digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<TokenId>,
}

/// Component-set variant table: property name to the distinct values seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAnalysis {
    pub component_set: String,
    pub variant_count: usize,
    pub properties: BTreeMap<String, Vec<String>>,
    /// Child components whose names did not parse as `Prop=Value` pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unparsed: Vec<String>,
}
