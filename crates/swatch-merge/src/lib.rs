//! Merge-candidate search and base-token synthesis.
//!
//! Runs as a post-pass over an accumulated token population:
//! 1. Group tokens by category
//! 2. Score every unordered pair, plus the whole group when it has 3+ members
//! 3. Keep candidates scoring at least `min_score`, best first
//! 4. Optionally apply them, synthesizing a base token per candidate
//!
//! This is a greedy, threshold-driven heuristic. It does not search for
//! the minimum token count.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use swatch_math::{clamp01, ratio};
use swatch_registry::TokenRegistry;
use swatch_similarity::{compatibility, extract_common_properties, similarity};
use swatch_types::{AppliedMerge, Category, MergeCandidate, PropValue, PropertyBag, Token, TokenId};

/// Thresholds and divisors for merge scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePolicy {
    /// Minimum candidate score kept by [`find_merge_candidates`].
    pub min_score: f64,
    /// `can_merge` requires compatibility strictly above this.
    pub compatibility_threshold: f64,
    /// `can_merge` requires merge benefit strictly above this.
    pub benefit_threshold: f64,
    /// Combined usage at which the benefit usage term saturates.
    pub benefit_usage_divisor: f64,
    /// Per-member divisor of the candidate usage bonus.
    pub usage_divisor: f64,
    /// Penalty per differing key.
    pub difference_penalty: f64,
    /// Upper bound of the total difference penalty.
    pub max_difference_penalty: f64,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            min_score: 0.6,
            compatibility_threshold: 0.7,
            benefit_threshold: 0.5,
            benefit_usage_divisor: 20.0,
            usage_divisor: 10.0,
            difference_penalty: 0.1,
            max_difference_penalty: 0.3,
        }
    }
}

/// Average of saturated combined usage and strict similarity.
pub fn merge_benefit(t1: &Token, t2: &Token, policy: &MergePolicy) -> f64 {
    let usage = f64::from(t1.usage_count) + f64::from(t2.usage_count);
    let usage_term = if policy.benefit_usage_divisor > 0.0 {
        (usage / policy.benefit_usage_divisor).min(1.0)
    } else {
        1.0
    };
    (usage_term + similarity(&t1.bag(), &t2.bag())) / 2.0
}

/// Same category, compatible enough, and worth it.
pub fn can_merge(t1: &Token, t2: &Token, policy: &MergePolicy) -> bool {
    t1.category() == t2.category()
        && compatibility(&t1.bag(), &t2.bag()) > policy.compatibility_threshold
        && merge_benefit(t1, t2, policy) > policy.benefit_threshold
}

/// Score one group of same-category tokens.
pub fn build_candidate(members: &[&Token], policy: &MergePolicy) -> Option<MergeCandidate> {
    let first = members.first()?;
    let bags: Vec<PropertyBag> = members.iter().map(|t| t.bag()).collect();
    let refs: Vec<&PropertyBag> = bags.iter().collect();
    let common = extract_common_properties(&refs);

    let union: BTreeSet<&String> = bags.iter().flat_map(|b| b.keys()).collect();
    let mut differences: BTreeMap<String, Vec<PropValue>> = BTreeMap::new();
    for key in union.iter().filter(|k| !common.contains_key(k.as_str())) {
        let mut seen: Vec<PropValue> = Vec::new();
        for value in bags.iter().filter_map(|b| b.get(*key)) {
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
        differences.insert((*key).clone(), seen);
    }

    let count = members.len();
    let usage: f64 = members.iter().map(|t| f64::from(t.usage_count)).sum();
    let common_ratio = ratio(common.len() as f64, union.len());
    let usage_bonus = if policy.usage_divisor > 0.0 {
        usage / (count as f64 * policy.usage_divisor)
    } else {
        0.0
    };
    let penalty = (differences.len() as f64 * policy.difference_penalty)
        .min(policy.max_difference_penalty);

    Some(MergeCandidate {
        category: first.category(),
        styles: members.iter().map(|t| t.id.clone()).collect(),
        common_properties: common,
        differences,
        merge_score: clamp01(common_ratio + usage_bonus - penalty),
    })
}

/// Propose merges across `tokens`, best score first.
///
/// A category with fewer than two tokens yields nothing.
pub fn find_merge_candidates(tokens: &[&Token], policy: &MergePolicy) -> Vec<MergeCandidate> {
    let mut groups: BTreeMap<Category, Vec<&Token>> = BTreeMap::new();
    for &token in tokens {
        groups.entry(token.category()).or_default().push(token);
    }

    let mut candidates = Vec::new();
    for group in groups.values() {
        if group.len() < 2 {
            continue;
        }
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                candidates.extend(build_candidate(&[group[i], group[j]], policy));
            }
        }
        if group.len() >= 3 {
            candidates.extend(build_candidate(group, policy));
        }
    }

    candidates.retain(|c| c.merge_score >= policy.min_score);
    candidates.sort_by(|a, b| {
        b.merge_score
            .partial_cmp(&a.merge_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Synthesize a base token from the common properties of `ids`.
///
/// Needs at least two known, same-category tokens and a non-empty common
/// set; otherwise returns `None`. Members stay in the registry untouched.
pub fn merge_styles(registry: &mut TokenRegistry, ids: &[TokenId]) -> Option<TokenId> {
    if ids.len() < 2 {
        return None;
    }
    let members: Vec<&Token> = ids
        .iter()
        .map(|id| registry.get(id))
        .collect::<Option<_>>()?;
    let category = members[0].category();
    if members.iter().any(|t| t.category() != category) {
        return None;
    }
    let bags: Vec<PropertyBag> = members.iter().map(|t| t.bag()).collect();
    let refs: Vec<&PropertyBag> = bags.iter().collect();
    let common = extract_common_properties(&refs);
    if common.is_empty() {
        return None;
    }
    registry.register_merged(category, &common, ids)
}

/// Apply candidates in order.
///
/// A candidate is skipped when any member was already absorbed earlier in
/// the pass, or when some pair of its members fails [`can_merge`].
pub fn apply_merge_candidates(
    registry: &mut TokenRegistry,
    candidates: &[MergeCandidate],
    policy: &MergePolicy,
) -> Vec<AppliedMerge> {
    let mut applied = Vec::new();
    for candidate in candidates {
        if candidate
            .styles
            .iter()
            .any(|id| registry.superseded_by(id).is_some())
        {
            continue;
        }
        if !pairwise_mergeable(registry, &candidate.styles, policy) {
            debug!(styles = ?candidate.styles, "skipped candidate: members not pairwise mergeable");
            continue;
        }
        if let Some(base_id) = merge_styles(registry, &candidate.styles) {
            debug!(base = %base_id, score = candidate.merge_score, "applied merge");
            applied.push(AppliedMerge {
                base_id,
                absorbed: candidate.styles.clone(),
                score: candidate.merge_score,
            });
        }
    }
    applied
}

fn pairwise_mergeable(registry: &TokenRegistry, ids: &[TokenId], policy: &MergePolicy) -> bool {
    let Some(members) = ids
        .iter()
        .map(|id| registry.get(id))
        .collect::<Option<Vec<&Token>>>()
    else {
        return false;
    };
    members
        .iter()
        .enumerate()
        .all(|(i, a)| members[i + 1..].iter().all(|b| can_merge(a, b, policy)))
}
