//! Property-based tests over generated design trees.

use proptest::prelude::*;
use swatch_core::extract_workflow;
use swatch_core::settings::ExtractSettings;
use swatch_types::{DesignNode, NodeKind};

fn arb_node() -> impl Strategy<Value = DesignNode> {
    (
        prop::sample::select(vec!["#000", "#000000", "#FFFFFF", "#ff0000", "#FF0000", "#336699"]),
        prop::option::of(prop::sample::select(vec![0.0, 4.0, 8.0])),
        0u32..1000,
    )
        .prop_map(|(hex, radius, id)| {
            let mut node = DesignNode::new(format!("n{id}"), "shape", NodeKind::Shape).with_fill(hex);
            node.corner_radius = radius;
            node
        })
}

fn arb_tree() -> impl Strategy<Value = DesignNode> {
    arb_node().prop_recursive(4, 40, 5, |inner| {
        (arb_node(), prop::collection::vec(inner, 0..5))
            .prop_map(|(node, children)| node.with_children(children))
    })
}

proptest! {
    #[test]
    fn usage_adds_up_to_submissions(tree in arb_tree()) {
        let receipt = extract_workflow(&[tree], &ExtractSettings::default()).unwrap();
        let usage: usize = receipt.tokens.iter().map(|r| r.token.usage_count as usize).sum();
        prop_assert_eq!(usage, receipt.registry.submissions);
    }

    #[test]
    fn visited_plus_skipped_is_tree_size(tree in arb_tree(), depth in 0usize..6) {
        let mut settings = ExtractSettings::default();
        settings.walk.max_depth = depth;
        let size = tree.subtree_len();
        let receipt = extract_workflow(&[tree], &settings).unwrap();
        prop_assert_eq!(receipt.walk.nodes_visited + receipt.walk.nodes_skipped, size);
    }

    #[test]
    fn extraction_is_deterministic(tree in arb_tree()) {
        let settings = ExtractSettings::default();
        let a = extract_workflow(std::slice::from_ref(&tree), &settings).unwrap();
        let b = extract_workflow(&[tree], &settings).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn receipt_scores_are_in_range(tree in arb_tree()) {
        let receipt = extract_workflow(&[tree], &ExtractSettings::default()).unwrap();
        for c in &receipt.merge_candidates {
            prop_assert!(c.merge_score >= 0.6 && c.merge_score <= 1.0);
        }
        for r in &receipt.tokens {
            prop_assert!((0.0..=1.0).contains(&r.token.variance));
        }
    }
}
