//!
//! Nucleotide-level private-mutation calling.
//!
//! Classifies a query's aligned substitutions and deletions against the
//! ancestral map of its placement node: mutations the node already explains
//! are dropped, everything else is partitioned into reversions, labeled, and
//! unlabeled private mutations.
//!

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use privmut_core::alphabet::GAP;
use privmut_core::models::{NucDelRange, NucSub, PosRange};

use crate::ancestral::AncestralMap;
use crate::catalog::LabelCatalog;
use crate::classify::{StateClass, classify_state};
use crate::error::CallingError;
use crate::query::QueryNucAnalysis;

/// A private substitution together with its catalog labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucSubLabeled {
    pub sub: NucSub,
    pub labels: Vec<String>,
}

/// A private deletion sub-range together with its catalog labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucDelLabeled {
    pub del: NucDelRange,
    pub labels: Vec<String>,
}

///
/// Private nucleotide mutations of one query relative to its placement node.
///
/// The substitution lists are disjoint: every private substitution lands in
/// exactly one of `reversions`, `reversion_substitutions`,
/// `labeled_substitutions`, or `unlabeled_substitutions`. Deletions are
/// reported as sub-ranges, split wherever the per-position classification
/// (or label set) changes.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateNucMutations {
    /// Mutations back to the reference state at positions where the
    /// ancestor had diverged. `ref_nuc` holds the ancestral state.
    pub reversions: Vec<NucSub>,
    /// Mutations away from the ancestral divergent state to a third state,
    /// inconsistent with the ancestor. Catalog labels, when present, are
    /// attached in place.
    pub reversion_substitutions: Vec<NucSubLabeled>,
    pub labeled_substitutions: Vec<NucSubLabeled>,
    pub unlabeled_substitutions: Vec<NucSub>,
    /// Deletions of positions the ancestor had substituted.
    pub reversion_deletions: Vec<NucDelRange>,
    pub labeled_deletions: Vec<NucDelLabeled>,
    pub unlabeled_deletions: Vec<NucDelRange>,
    /// All private substitution events, both reversion flavors included.
    pub total_private_substitutions: usize,
    /// Total deleted positions across all private deletion sub-ranges.
    pub total_private_deletions: usize,
    /// Both reversion flavors: reversions to reference plus divergences
    /// from the ancestral state.
    pub total_reversions: usize,
    pub total_labeled_substitutions: usize,
    pub total_unlabeled_substitutions: usize,
}

/// Classification of one deleted position; runs of equal values collapse
/// into one reported sub-range.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DelClass {
    Reversion,
    Labeled(Vec<String>),
    Unlabeled,
}

struct DelRun {
    start: usize,
    class: DelClass,
}

///
/// Find the query's private nucleotide mutations.
///
/// Pure and deterministic: identical inputs produce identical output. The
/// ancestral map and every query record must lie within the reference
/// sequence; violations indicate malformed upstream data and abort the
/// query.
///
pub fn find_private_nuc_mutations(
    query: &QueryNucAnalysis,
    ref_seq: &[u8],
    ancestral: &AncestralMap,
    catalog: &LabelCatalog,
) -> Result<PrivateNucMutations, CallingError> {
    if let Some(pos) = ancestral.max_pos() {
        if pos >= ref_seq.len() {
            return Err(CallingError::PositionOutOfBounds {
                pos,
                len: ref_seq.len(),
            });
        }
    }

    let mut result = PrivateNucMutations::default();

    // Positions covered by explicit query records; the reversion scan below
    // must not revisit them.
    let mut covered = BTreeSet::new();

    for sub in &query.substitutions {
        if sub.pos >= ref_seq.len() {
            return Err(CallingError::PositionOutOfBounds {
                pos: sub.pos,
                len: ref_seq.len(),
            });
        }
        covered.insert(sub.pos);
        if !query.is_sequenced(sub.pos) {
            continue;
        }

        let ref_nuc = ref_seq[sub.pos];
        let ancestral_state = ancestral.get(sub.pos);
        // The state the query diverged from: the ancestral state when the
        // ancestor had one, the reference base otherwise.
        let from_state = ancestral_state.unwrap_or(ref_nuc);

        match classify_state(ref_nuc, ancestral_state, sub.qry_nuc) {
            StateClass::Explained => {}
            StateClass::Novel => {
                let labels = catalog.nuc_sub_labels(sub.pos, sub.qry_nuc);
                let private = NucSub::new(sub.pos, from_state, sub.qry_nuc);
                if labels.is_empty() {
                    result.unlabeled_substitutions.push(private);
                } else {
                    result.labeled_substitutions.push(NucSubLabeled {
                        sub: private,
                        labels: labels.to_vec(),
                    });
                }
            }
            StateClass::ReversionToRef => {
                result
                    .reversions
                    .push(NucSub::new(sub.pos, from_state, sub.qry_nuc));
            }
            StateClass::DivergedFromAncestor => {
                let labels = catalog.nuc_sub_labels(sub.pos, sub.qry_nuc);
                result.reversion_substitutions.push(NucSubLabeled {
                    sub: NucSub::new(sub.pos, from_state, sub.qry_nuc),
                    labels: labels.to_vec(),
                });
            }
        }
    }

    for del in &query.deletions {
        if del.range.is_empty() {
            continue;
        }
        if del.range.end > ref_seq.len() {
            return Err(CallingError::PositionOutOfBounds {
                pos: del.range.end - 1,
                len: ref_seq.len(),
            });
        }
        covered.extend(del.range.iter());
        classify_deletion_range(&mut result, query, ref_seq, ancestral, catalog, del.range);
    }

    // Ancestor-diverged positions where the query records nothing and is
    // definitively sequenced: the query letter there is the reference
    // letter, so the query reverted without leaving an alignment record.
    for (pos, ancestral_state) in ancestral.iter() {
        if covered.contains(&pos) || !query.is_sequenced(pos) {
            continue;
        }
        let ref_nuc = ref_seq[pos];
        if ancestral_state != ref_nuc {
            result.reversions.push(NucSub::new(pos, ancestral_state, ref_nuc));
        }
    }

    result.reversions.sort();
    result.reversion_substitutions.sort_by_key(|labeled| labeled.sub);
    result.labeled_substitutions.sort_by_key(|labeled| labeled.sub);
    result.unlabeled_substitutions.sort();
    result.reversion_deletions.sort();
    result.labeled_deletions.sort_by_key(|labeled| labeled.del);
    result.unlabeled_deletions.sort();

    tally(&mut result);

    debug!(
        "private nucleotide mutations: {} substitutions ({} reversions), {} deleted positions",
        result.total_private_substitutions, result.total_reversions, result.total_private_deletions
    );

    Ok(result)
}

/// Classify each deleted position and emit maximal sub-ranges of equal
/// classification. Runs never extend across a classification or label-set
/// change, nor across positions without a definitive call.
fn classify_deletion_range(
    result: &mut PrivateNucMutations,
    query: &QueryNucAnalysis,
    ref_seq: &[u8],
    ancestral: &AncestralMap,
    catalog: &LabelCatalog,
    range: PosRange,
) {
    let mut run: Option<DelRun> = None;

    for pos in range.iter() {
        let class = if !query.is_sequenced(pos) {
            None
        } else {
            let ref_nuc = ref_seq[pos];
            match classify_state(ref_nuc, ancestral.get(pos), GAP) {
                // Ancestor already deleted this position.
                StateClass::Explained => None,
                StateClass::Novel => {
                    let labels = catalog.nuc_del_labels(pos);
                    if labels.is_empty() {
                        Some(DelClass::Unlabeled)
                    } else {
                        Some(DelClass::Labeled(labels.to_vec()))
                    }
                }
                StateClass::DivergedFromAncestor => Some(DelClass::Reversion),
                // A gap never equals the reference base.
                StateClass::ReversionToRef => None,
            }
        };

        run = match (run, class) {
            (None, None) => None,
            (None, Some(class)) => Some(DelRun { start: pos, class }),
            (Some(current), None) => {
                flush_del_run(result, current, pos);
                None
            }
            (Some(current), Some(class)) => {
                if current.class == class {
                    Some(current)
                } else {
                    flush_del_run(result, current, pos);
                    Some(DelRun { start: pos, class })
                }
            }
        };
    }

    if let Some(current) = run {
        flush_del_run(result, current, range.end);
    }
}

fn flush_del_run(result: &mut PrivateNucMutations, run: DelRun, end: usize) {
    let del = NucDelRange::new(run.start, end);
    match run.class {
        DelClass::Reversion => result.reversion_deletions.push(del),
        DelClass::Unlabeled => result.unlabeled_deletions.push(del),
        DelClass::Labeled(labels) => result.labeled_deletions.push(NucDelLabeled { del, labels }),
    }
}

fn tally(result: &mut PrivateNucMutations) {
    result.total_reversions = result.reversions.len() + result.reversion_substitutions.len();
    result.total_labeled_substitutions = result.labeled_substitutions.len();
    result.total_unlabeled_substitutions = result.unlabeled_substitutions.len();
    result.total_private_substitutions = result.total_reversions
        + result.total_labeled_substitutions
        + result.total_unlabeled_substitutions;
    result.total_private_deletions = result
        .reversion_deletions
        .iter()
        .map(NucDelRange::len)
        .chain(result.labeled_deletions.iter().map(|labeled| labeled.del.len()))
        .chain(result.unlabeled_deletions.iter().map(NucDelRange::len))
        .sum();
}
