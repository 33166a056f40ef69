//!
//! Ancestral mutation maps: the divergence a query's nearest placement node
//! has accumulated relative to the root reference.
//!

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use privmut_core::models::NucSub;

///
/// Ordered mapping from position to the state accumulated at a placement
/// node. A position absent from the map matches the reference.
///
/// Holds nucleotide states keyed by reference position, or amino-acid states
/// keyed by gene-local codon position; the map itself is agnostic.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestralMap {
    states: BTreeMap<usize, u8>,
}

impl AncestralMap {
    /// Replay a root-to-node list of (position, resulting state) events.
    /// Later events at the same position override earlier ones, so a
    /// position mutated twice along the path keeps only its final state,
    /// the only divergence observable at the node.
    pub fn from_path(events: impl IntoIterator<Item = (usize, u8)>) -> Self {
        let mut states = BTreeMap::new();
        for (pos, state) in events {
            states.insert(pos, state);
        }
        AncestralMap { states }
    }

    /// Replay a root-to-node substitution list.
    pub fn from_substitutions(subs: &[NucSub]) -> Self {
        Self::from_path(subs.iter().map(|sub| (sub.pos, sub.qry_nuc)))
    }

    pub fn get(&self, pos: usize) -> Option<u8> {
        self.states.get(&pos).copied()
    }

    /// Iterate (position, state) pairs in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.states.iter().map(|(&pos, &state)| (pos, state))
    }

    /// Highest mapped position, if any. Used for bounds validation.
    pub fn max_pos(&self) -> Option<usize> {
        self.states.last_key_value().map(|(&pos, _)| pos)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Per-gene ancestral amino-acid maps. A missing gene key means the ancestor
/// has no recorded divergence in that gene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestralAaMaps {
    by_gene: BTreeMap<String, AncestralMap>,
}

impl AncestralAaMaps {
    pub fn from_genes(genes: impl IntoIterator<Item = (String, AncestralMap)>) -> Self {
        AncestralAaMaps {
            by_gene: genes.into_iter().collect(),
        }
    }

    pub fn gene(&self, name: &str) -> Option<&AncestralMap> {
        self.by_gene.get(name)
    }

    pub fn genes(&self) -> impl Iterator<Item = (&String, &AncestralMap)> {
        self.by_gene.iter()
    }

    pub fn len(&self) -> usize {
        self.by_gene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_gene.is_empty()
    }
}
