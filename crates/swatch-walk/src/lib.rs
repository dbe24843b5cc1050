//! # swatch-walk
//!
//! **Tier 3 (Orchestration)**
//!
//! Depth-first traversal of design trees, feeding every visited node
//! through the registered [`StyleExtractor`]s into a caller-owned
//! [`TokenRegistry`].
//!
//! ## What belongs here
//! * The traversal and its depth limit
//! * Built-in per-category extractors
//! * Component-set variant analysis
//!
//! ## What does NOT belong here
//! * Hashing and dedup (use swatch-registry)
//! * Merge analysis (use swatch-merge)
//! * Fetching or parsing design documents

pub mod extractors;
pub mod variants;

use tracing::debug;

use swatch_registry::TokenRegistry;
use swatch_types::{DesignNode, NodeStyles, WalkStats};

pub use extractors::{
    ColorExtractor, ComponentExtractor, DecorationExtractor, LayoutExtractor, StyleExtractor,
    TypographyExtractor, default_extractors,
};
pub use variants::{analyze_variants, parse_variant_name};

/// Deepest level visited by default. Roots are depth 0.
pub const DEFAULT_MAX_DEPTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// What one walk saw and resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkSummary {
    pub stats: WalkStats,
    /// Every visited node, in visit order.
    pub nodes: Vec<NodeStyles>,
}

/// A traversal bound to an ordered extractor set.
pub struct Walker {
    extractors: Vec<Box<dyn StyleExtractor>>,
    options: WalkOptions,
}

impl Walker {
    /// Walker with the built-in extractors.
    pub fn new(options: WalkOptions) -> Self {
        Self::with_extractors(options, default_extractors())
    }

    pub fn with_extractors(options: WalkOptions, extractors: Vec<Box<dyn StyleExtractor>>) -> Self {
        Self {
            extractors,
            options,
        }
    }

    pub fn extractor_names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    pub fn walk(&self, roots: &[DesignNode], registry: &mut TokenRegistry) -> WalkSummary {
        let mut summary = WalkSummary {
            stats: WalkStats {
                roots: roots.len(),
                max_depth: self.options.max_depth,
                ..Default::default()
            },
            nodes: Vec::new(),
        };
        for root in roots {
            self.visit(root, 0, registry, &mut summary);
        }
        summary
    }

    fn visit(
        &self,
        node: &DesignNode,
        depth: usize,
        registry: &mut TokenRegistry,
        summary: &mut WalkSummary,
    ) {
        if depth > self.options.max_depth {
            let skipped = node.subtree_len();
            debug!(node = %node.id, depth, skipped, "depth limit reached");
            summary.stats.nodes_skipped += skipped;
            return;
        }
        summary.stats.nodes_visited += 1;

        let token_ids = self
            .extractors
            .iter()
            .flat_map(|e| e.extract(node, registry))
            .collect();
        summary.nodes.push(NodeStyles {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            token_ids,
        });

        for child in &node.children {
            self.visit(child, depth + 1, registry, summary);
        }
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(WalkOptions::default())
    }
}

/// Walk `roots` with the built-in extractors.
pub fn walk(roots: &[DesignNode], registry: &mut TokenRegistry, options: WalkOptions) -> WalkSummary {
    Walker::new(options).walk(roots, registry)
}
