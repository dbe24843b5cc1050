//! # swatch-core
//!
//! This crate is the **primary library interface** for `swatch`.
//! It walks design trees into a fresh token registry, searches for merge
//! candidates, and packages the result as an [`ExtractionReceipt`].
//!
//! If you are embedding `swatch` into another Rust application, depend on
//! this crate and `swatch-types`. Reach for the engine crates directly only
//! when you need to drive a registry by hand.
//!
//! ## Example
//!
//! ```rust
//! use swatch_core::extract_workflow;
//! use swatch_core::settings::ExtractSettings;
//! use swatch_core::types::{DesignNode, NodeKind};
//!
//! let page = DesignNode::new("page", "Page", NodeKind::Container).with_children(vec![
//!     DesignNode::new("a", "dot", NodeKind::Shape).with_fill("#000000"),
//!     DesignNode::new("b", "dot", NodeKind::Shape).with_fill("#000"),
//! ]);
//!
//! let receipt = extract_workflow(&[page], &ExtractSettings::default()).unwrap();
//! assert_eq!(receipt.tokens.len(), 1);
//! assert_eq!(receipt.tokens[0].token.usage_count, 2);
//! ```

pub mod error;
pub mod ffi;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use swatch_settings as settings;
pub use swatch_types as types;

use error::SwatchError;
use swatch_hash::short_digest;
use swatch_math::round_f64;
use swatch_merge::{MergePolicy, apply_merge_candidates, find_merge_candidates};
use swatch_registry::TokenRegistry;
use swatch_settings::{ExtractSettings, MergeSettings};
use swatch_types::{
    AppliedMerge, DesignNode, MergeCandidate, RegistryStats, SCHEMA_VERSION, Token, TokenRow,
    VariantAnalysis, WalkStats,
};
use swatch_walk::{WalkOptions, analyze_variants, walk};

/// Everything one extraction run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReceipt {
    pub schema_version: u32,
    pub mode: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub settings: ExtractSettings,
    pub walk: WalkStats,
    pub registry: RegistryStats,
    pub tokens: Vec<TokenRow>,
    pub merge_candidates: Vec<MergeCandidate>,
    #[serde(default)]
    pub applied_merges: Vec<AppliedMerge>,
}

/// Engine parameters for the `[merge]` settings section.
pub fn merge_policy(settings: &MergeSettings) -> MergePolicy {
    MergePolicy {
        min_score: settings.min_score,
        compatibility_threshold: settings.compatibility_threshold,
        benefit_threshold: settings.benefit_threshold,
        benefit_usage_divisor: settings.usage_divisor,
        ..MergePolicy::default()
    }
}

/// Runs the complete extraction: Walk -> Registry -> Merge analysis -> Receipt.
///
/// Each call owns a fresh [`TokenRegistry`]; nothing carries over between
/// runs.
pub fn extract_workflow(
    roots: &[DesignNode],
    settings: &ExtractSettings,
) -> Result<ExtractionReceipt, SwatchError> {
    settings.validate().map_err(SwatchError::invalid_settings)?;

    let mut registry = TokenRegistry::with_parent_threshold(settings.hierarchy.parent_threshold);
    let summary = walk(
        roots,
        &mut registry,
        WalkOptions {
            max_depth: settings.walk.max_depth,
        },
    );

    let mut warnings = Vec::new();
    if roots.is_empty() {
        warnings.push("no root nodes supplied".to_string());
    }
    if summary.stats.nodes_skipped > 0 {
        warnings.push(format!(
            "{} nodes deeper than max_depth {} were skipped",
            summary.stats.nodes_skipped, settings.walk.max_depth
        ));
    }
    if registry.is_empty() && !roots.is_empty() {
        warnings.push("no style properties found".to_string());
    }

    let policy = merge_policy(&settings.merge);
    let candidates = find_merge_candidates(&registry.submitted(), &policy);
    let applied = if settings.merge.auto_apply {
        apply_merge_candidates(&mut registry, &candidates, &policy)
    } else {
        Vec::new()
    };
    debug!(
        tokens = registry.len(),
        candidates = candidates.len(),
        applied = applied.len(),
        "extraction finished"
    );

    Ok(ExtractionReceipt {
        schema_version: SCHEMA_VERSION,
        mode: "extract".to_string(),
        warnings,
        settings: *settings,
        walk: summary.stats,
        registry: registry.stats(),
        tokens: token_rows(&registry, settings.report.top),
        merge_candidates: candidates.into_iter().map(round_candidate).collect(),
        applied_merges: applied
            .into_iter()
            .map(|m| AppliedMerge {
                score: round_f64(m.score, 4),
                ..m
            })
            .collect(),
    })
}

/// Tabulate a component set's variants. Any other node kind fails.
pub fn variants_workflow(node: &DesignNode) -> Result<VariantAnalysis, SwatchError> {
    analyze_variants(node).map_err(|e| SwatchError::precondition_failed(format!("{e:#}")))
}

/// Rows in insertion order; with `top > 0`, only the `top` most used.
fn token_rows(registry: &TokenRegistry, top: usize) -> Vec<TokenRow> {
    let keep: Option<BTreeSet<&str>> = (top > 0).then(|| {
        registry
            .top_by_usage(top)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect()
    });
    registry
        .all()
        .iter()
        .filter(|t| keep.as_ref().is_none_or(|k| k.contains(t.id.as_str())))
        .map(|t| TokenRow {
            digest: short_digest(&t.exact_hash),
            superseded_by: registry.superseded_by(&t.id).cloned(),
            token: Token {
                variance: round_f64(t.variance, 4),
                ..t.clone()
            },
        })
        .collect()
}

fn round_candidate(c: MergeCandidate) -> MergeCandidate {
    MergeCandidate {
        merge_score: round_f64(c.merge_score, 4),
        ..c
    }
}
