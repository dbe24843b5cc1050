//! Component-set variant analysis.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use swatch_types::{DesignNode, NodeKind, VariantAnalysis};

/// Parse `"Size=Large, State=Hover"` into `{Size: Large, State: Hover}`.
///
/// Returns `None` when any comma-separated part lacks a `=` or has an
/// empty side, or when the name is blank.
pub fn parse_variant_name(name: &str) -> Option<BTreeMap<String, String>> {
    if name.trim().is_empty() {
        return None;
    }
    name.split(',')
        .map(|part| {
            let (key, value) = part.split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Tabulate the variant properties of a component set's children.
///
/// Fails when `node` is not a `component_set`.
pub fn analyze_variants(node: &DesignNode) -> Result<VariantAnalysis> {
    if node.kind != NodeKind::ComponentSet {
        bail!(
            "variant analysis needs a component_set node; `{}` ({}) is a {}",
            node.name,
            node.id,
            node.kind.as_str()
        );
    }

    let mut analysis = VariantAnalysis {
        component_set: node.name.clone(),
        ..Default::default()
    };
    for child in node.children.iter().filter(|c| c.kind == NodeKind::Component) {
        analysis.variant_count += 1;
        let Some(pairs) = parse_variant_name(&child.name) else {
            analysis.unparsed.push(child.name.clone());
            continue;
        };
        for (key, value) in pairs {
            let values = analysis.properties.entry(key).or_default();
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
    Ok(analysis)
}
