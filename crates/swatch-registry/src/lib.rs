//! # swatch-registry
//!
//! **Tier 2 (State)**
//!
//! The token registry for one extraction run.
//!
//! A [`TokenRegistry`] is an ordinary value: construct one per run, pass
//! it by `&mut` to the walker and the merge engine, and drop it when the
//! run ends. Nothing here is global.
//!
//! Submissions resolve in a fixed order:
//! 1. exact-hash hit: bump usage, return the existing id
//! 2. semantic-hash hit: bump usage, return the existing id (no property merge)
//! 3. otherwise create a token, linked to the most similar existing token
//!    when one scores in `[parent_threshold, 1.0)`

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use swatch_hash::{base_hash, exact_hash};
use swatch_normalize::semantic_hash;
use swatch_similarity::{DEFAULT_PARENT_THRESHOLD, find_potential_parent};
use swatch_types::{
    Category, PropertyBag, RegistryStats, StyleProperties, Token, TokenId, TokenOrigin,
};

/// Where a submission came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitContext {
    pub node_id: String,
    pub node_name: String,
}

impl SubmitContext {
    pub fn new(node_id: impl Into<String>, node_name: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            node_name: node_name.into(),
        }
    }
}

/// How a submission was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exact,
    Semantic,
    Created,
}

#[derive(Debug, Clone)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
    by_id: FxHashMap<TokenId, usize>,
    exact_index: FxHashMap<String, usize>,
    semantic_index: FxHashMap<String, usize>,
    counters: BTreeMap<Category, u32>,
    base_counters: BTreeMap<Category, u32>,
    superseded: BTreeMap<TokenId, TokenId>,
    stats: RegistryStats,
    parent_threshold: f64,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::with_parent_threshold(DEFAULT_PARENT_THRESHOLD)
    }

    pub fn with_parent_threshold(parent_threshold: f64) -> Self {
        Self {
            tokens: Vec::new(),
            by_id: FxHashMap::default(),
            exact_index: FxHashMap::default(),
            semantic_index: FxHashMap::default(),
            counters: BTreeMap::new(),
            base_counters: BTreeMap::new(),
            superseded: BTreeMap::new(),
            stats: RegistryStats::default(),
            parent_threshold,
        }
    }

    pub fn parent_threshold(&self) -> f64 {
        self.parent_threshold
    }

    /// Submit one property object and return the id it resolved to.
    pub fn submit(
        &mut self,
        properties: StyleProperties,
        context: Option<&SubmitContext>,
    ) -> TokenId {
        self.submit_detailed(properties, context).0
    }

    /// Like [`submit`](Self::submit), also reporting how it resolved.
    pub fn submit_detailed(
        &mut self,
        properties: StyleProperties,
        context: Option<&SubmitContext>,
    ) -> (TokenId, Resolution) {
        self.stats.submissions += 1;

        let exact = exact_hash(&properties);
        if let Some(&idx) = self.exact_index.get(&exact) {
            self.stats.exact_hits += 1;
            return (self.bump(idx, Resolution::Exact), Resolution::Exact);
        }

        let semantic = semantic_hash(&properties);
        if let Some(&idx) = self.semantic_index.get(&semantic) {
            self.stats.semantic_hits += 1;
            return (self.bump(idx, Resolution::Semantic), Resolution::Semantic);
        }

        let category = properties.category();
        let bag = properties.to_bag();
        let parent = find_potential_parent(&self.tokens, &bag, self.parent_threshold)
            .map(|(token, score)| (token.id.clone(), score));

        let id = next_id(&mut self.counters, category, "");
        let (parent_id, variance) = match parent {
            Some((parent_id, score)) => (Some(parent_id), 1.0 - score),
            None => (None, 0.0),
        };

        let token = Token {
            id: id.clone(),
            properties,
            exact_hash: exact.clone(),
            semantic_hash: semantic.clone(),
            usage_count: 1,
            parent_id: parent_id.clone(),
            child_ids: Vec::new(),
            variance,
            origin: TokenOrigin::Submitted,
            source_node: context.map(|c| c.node_id.clone()),
        };
        let idx = self.push(token);
        self.exact_index.insert(exact, idx);
        self.semantic_index.insert(semantic, idx);
        self.stats.tokens_created += 1;

        if let Some(parent_id) = parent_id {
            if let Some(&pidx) = self.by_id.get(&parent_id) {
                self.tokens[pidx].child_ids.push(id.clone());
            }
            self.stats.linked_to_parent += 1;
            debug!(token = %id, parent = %parent_id, variance, "linked token to parent");
        }
        trace!(token = %id, %category, "created token");

        (id, Resolution::Created)
    }

    fn bump(&mut self, idx: usize, how: Resolution) -> TokenId {
        let token = &mut self.tokens[idx];
        token.usage_count += 1;
        trace!(token = %token.id, usage = token.usage_count, ?how, "resolved submission");
        token.id.clone()
    }

    fn push(&mut self, token: Token) -> usize {
        let idx = self.tokens.len();
        self.by_id.insert(token.id.clone(), idx);
        self.tokens.push(token);
        idx
    }

    /// Insert a merge-synthesized base token absorbing `members`.
    ///
    /// Returns `None` without allocating an id when fewer than two distinct
    /// members are given, a member repeats, any member is unknown or of
    /// another category, `common` is empty or not expressible as typed
    /// properties of `category`, or an identical base already exists. Members are never
    /// modified; their supersession is recorded in a side index.
    pub fn register_merged(
        &mut self,
        category: Category,
        common: &PropertyBag,
        members: &[TokenId],
    ) -> Option<TokenId> {
        if members.len() < 2 || common.is_empty() {
            return None;
        }
        let mut seen = FxHashSet::default();
        if !members.iter().all(|m| seen.insert(m.as_str())) {
            debug!(%category, "skipped merge: repeated member id");
            return None;
        }
        let mut usage = 0u32;
        for member in members {
            let token = self.get(member)?;
            if token.category() != category {
                return None;
            }
            usage = usage.saturating_add(token.usage_count);
        }
        let properties = StyleProperties::from_bag(category, common);
        if properties.to_bag() != *common {
            debug!(%category, "skipped merge: common set has no typed form");
            return None;
        }
        let hash = base_hash(category, common);
        if self.exact_index.contains_key(&hash) {
            debug!(%category, "skipped merge: identical base already registered");
            return None;
        }

        let id = next_id(&mut self.base_counters, category, "base_");
        let token = Token {
            id: id.clone(),
            semantic_hash: semantic_hash(&properties),
            properties,
            exact_hash: hash.clone(),
            usage_count: usage,
            parent_id: None,
            child_ids: members.to_vec(),
            variance: 0.0,
            origin: TokenOrigin::Merged,
            source_node: None,
        };
        let idx = self.push(token);
        self.exact_index.insert(hash, idx);
        for member in members {
            self.superseded
                .entry(member.clone())
                .or_insert_with(|| id.clone());
        }
        self.stats.merged_tokens += 1;
        debug!(base = %id, absorbed = members.len(), usage, "registered merged token");
        Some(id)
    }

    pub fn get(&self, id: &str) -> Option<&Token> {
        self.by_id.get(id).map(|&idx| &self.tokens[idx])
    }

    /// Every token, in insertion order.
    pub fn all(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn by_category(&self, category: Category) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| t.category() == category)
            .collect()
    }

    /// Submitted tokens only, in insertion order.
    pub fn submitted(&self) -> Vec<&Token> {
        self.tokens.iter().filter(|t| !t.is_merged()).collect()
    }

    /// Highest usage first; ties keep insertion order. `n == 0` means all.
    pub fn top_by_usage(&self, n: usize) -> Vec<&Token> {
        let mut sorted: Vec<&Token> = self.tokens.iter().collect();
        sorted.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        if n > 0 {
            sorted.truncate(n);
        }
        sorted
    }

    pub fn parent_of(&self, id: &str) -> Option<&Token> {
        self.get(id)?.parent_id.as_deref().and_then(|p| self.get(p))
    }

    pub fn children_of(&self, id: &str) -> Vec<&Token> {
        self.get(id)
            .map(|t| t.child_ids.iter().filter_map(|c| self.get(c)).collect())
            .unwrap_or_default()
    }

    /// Submitted tokens with no parent.
    pub fn roots(&self) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| !t.is_merged() && t.parent_id.is_none())
            .collect()
    }

    /// The merged base token that absorbed `id`, if any.
    pub fn superseded_by(&self, id: &str) -> Option<&TokenId> {
        self.superseded.get(id)
    }

    /// The consolidated view: merged bases plus tokens no merge absorbed.
    pub fn effective_tokens(&self) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| !self.superseded.contains_key(&t.id))
            .collect()
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    /// Forget every token, index, counter, and statistic.
    pub fn reset(&mut self) {
        *self = Self::with_parent_threshold(self.parent_threshold);
    }
}

fn next_id(counters: &mut BTreeMap<Category, u32>, category: Category, infix: &str) -> TokenId {
    let n = counters.entry(category).or_insert(0);
    *n += 1;
    format!("{category}_{infix}{n}")
}
