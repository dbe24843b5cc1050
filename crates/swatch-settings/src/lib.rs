//! # swatch-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Settings types for one extraction run, plus the `swatch.toml` file
//! shape they can be loaded from.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Default values and range validation
//! * TOML parsing into [`SwatchConfig`]
//!
//! ## What does NOT belong here
//! * Walking, registry, or merge logic
//! * Mapping settings onto engine parameters (use swatch-core)

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Traversal settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSettings {
    /// Deepest level visited; roots are depth 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    5
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Parent-discovery settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HierarchySettings {
    /// Minimum similarity for an existing token to become a parent.
    #[serde(default = "default_parent_threshold")]
    pub parent_threshold: f64,
}

fn default_parent_threshold() -> f64 {
    0.8
}

impl Default for HierarchySettings {
    fn default() -> Self {
        Self {
            parent_threshold: default_parent_threshold(),
        }
    }
}

/// Merge analysis settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Candidates scoring below this are dropped.
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Pairwise compatibility must exceed this for a merge to apply.
    #[serde(default = "default_compatibility_threshold")]
    pub compatibility_threshold: f64,

    /// Pairwise merge benefit must exceed this for a merge to apply.
    #[serde(default = "default_benefit_threshold")]
    pub benefit_threshold: f64,

    /// Combined usage at which the benefit usage term saturates.
    #[serde(default = "default_usage_divisor")]
    pub usage_divisor: f64,

    /// Apply candidates to the registry after searching.
    #[serde(default)]
    pub auto_apply: bool,
}

fn default_min_score() -> f64 {
    0.6
}

fn default_compatibility_threshold() -> f64 {
    0.7
}

fn default_benefit_threshold() -> f64 {
    0.5
}

fn default_usage_divisor() -> f64 {
    20.0
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            compatibility_threshold: default_compatibility_threshold(),
            benefit_threshold: default_benefit_threshold(),
            usage_divisor: default_usage_divisor(),
            auto_apply: false,
        }
    }
}

/// Receipt shaping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Keep only the `top` most-used tokens; 0 keeps all.
    #[serde(default)]
    pub top: usize,
}

/// Everything one extraction run needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractSettings {
    #[serde(default)]
    pub walk: WalkSettings,
    #[serde(default)]
    pub hierarchy: HierarchySettings,
    #[serde(default)]
    pub merge: MergeSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

impl ExtractSettings {
    /// Reject thresholds outside `[0, 1]` and non-positive divisors.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("hierarchy.parent_threshold", self.hierarchy.parent_threshold),
            ("merge.min_score", self.merge.min_score),
            ("merge.compatibility_threshold", self.merge.compatibility_threshold),
            ("merge.benefit_threshold", self.merge.benefit_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                bail!("{name} must be within [0, 1], got {value}");
            }
        }
        if self.merge.usage_divisor.is_nan() || self.merge.usage_divisor <= 0.0 {
            bail!(
                "merge.usage_divisor must be positive, got {}",
                self.merge.usage_divisor
            );
        }
        Ok(())
    }
}

// ============================================================
// swatch.toml
// ============================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub parent_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub min_score: Option<f64>,
    pub compatibility_threshold: Option<f64>,
    pub benefit_threshold: Option<f64>,
    pub usage_divisor: Option<f64>,
    pub auto_apply: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top: Option<usize>,
}

/// Contents of a `swatch.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwatchConfig {
    pub walk: WalkConfig,
    pub hierarchy: HierarchyConfig,
    pub merge: MergeConfig,
    pub report: ReportConfig,
}

impl SwatchConfig {
    /// Load configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load configuration from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Overlay the keys present in this file onto `base`.
    pub fn apply_to(&self, base: ExtractSettings) -> ExtractSettings {
        let mut s = base;
        if let Some(v) = self.walk.max_depth {
            s.walk.max_depth = v;
        }
        if let Some(v) = self.hierarchy.parent_threshold {
            s.hierarchy.parent_threshold = v;
        }
        if let Some(v) = self.merge.min_score {
            s.merge.min_score = v;
        }
        if let Some(v) = self.merge.compatibility_threshold {
            s.merge.compatibility_threshold = v;
        }
        if let Some(v) = self.merge.benefit_threshold {
            s.merge.benefit_threshold = v;
        }
        if let Some(v) = self.merge.usage_divisor {
            s.merge.usage_divisor = v;
        }
        if let Some(v) = self.merge.auto_apply {
            s.merge.auto_apply = v;
        }
        if let Some(v) = self.report.top {
            s.report.top = v;
        }
        s
    }

    /// Defaults overlaid with this file.
    pub fn to_settings(&self) -> ExtractSettings {
        self.apply_to(ExtractSettings::default())
    }
}
