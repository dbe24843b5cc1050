//! Property-based tests for traversal bookkeeping.

use proptest::prelude::*;
use swatch_registry::TokenRegistry;
use swatch_types::{DesignNode, NodeKind, TextStyle};
use swatch_walk::{WalkOptions, walk};

fn arb_leaf() -> impl Strategy<Value = DesignNode> {
    (
        0u8..4,
        prop::sample::select(vec!["#111111", "#222222", "#FFF"]),
        prop::sample::select(vec![12.0, 14.0, 16.0]),
    )
        .prop_map(|(kind, hex, size)| match kind {
            0 => DesignNode::new("s", "shape", NodeKind::Shape).with_fill(hex),
            1 => {
                let mut node = DesignNode::new("t", "text", NodeKind::Text);
                node.text_style = Some(TextStyle {
                    font_size: Some(size),
                    ..Default::default()
                });
                node
            }
            2 => DesignNode::new("c", "Size=Small", NodeKind::Component),
            _ => DesignNode::new("f", "frame", NodeKind::Container),
        })
}

fn arb_tree() -> impl Strategy<Value = DesignNode> {
    arb_leaf().prop_recursive(5, 48, 4, |inner| {
        (arb_leaf(), prop::collection::vec(inner, 0..4))
            .prop_map(|(node, children)| node.with_children(children))
    })
}

proptest! {
    #[test]
    fn every_node_is_visited_or_skipped(tree in arb_tree(), depth in 0usize..7) {
        let mut reg = TokenRegistry::new();
        let size = tree.subtree_len();
        let summary = walk(&[tree], &mut reg, WalkOptions { max_depth: depth });
        prop_assert_eq!(summary.stats.nodes_visited + summary.stats.nodes_skipped, size);
        prop_assert_eq!(summary.nodes.len(), summary.stats.nodes_visited);
    }

    #[test]
    fn walking_leaves_the_tree_untouched(tree in arb_tree()) {
        let before = tree.clone();
        let mut reg = TokenRegistry::new();
        walk(std::slice::from_ref(&tree), &mut reg, WalkOptions::default());
        prop_assert_eq!(tree, before);
    }

    #[test]
    fn node_tokens_account_for_every_submission(tree in arb_tree()) {
        let mut reg = TokenRegistry::new();
        let summary = walk(&[tree], &mut reg, WalkOptions::default());
        let resolved: usize = summary.nodes.iter().map(|n| n.token_ids.len()).sum();
        prop_assert_eq!(resolved, reg.stats().submissions);
        for id in summary.nodes.iter().flat_map(|n| &n.token_ids) {
            prop_assert!(reg.get(id).is_some());
        }
    }
}
