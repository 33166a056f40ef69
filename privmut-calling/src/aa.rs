//!
//! Amino-acid private-mutation calling, repeated independently per gene.
//!
//! Each gene is classified in its own codon space against its reference
//! peptide and its slice of the ancestral map. A gene whose reference
//! peptide is missing is contained as a warning; the remaining genes are
//! unaffected.
//!

use std::collections::{BTreeMap, BTreeSet};

use log::warn;
use serde::{Deserialize, Serialize};

use privmut_core::alphabet::GAP;
use privmut_core::models::{AaDelRange, AaSub, GeneMap, PosRange, RefPeptide, RefPeptideMap};

use crate::ancestral::{AncestralAaMaps, AncestralMap};
use crate::catalog::LabelCatalog;
use crate::classify::{StateClass, classify_state};
use crate::error::CallingError;
use crate::query::{GeneAaAnalysis, QueryAaAnalysis};

/// A private amino-acid substitution together with its catalog labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaSubLabeled {
    pub sub: AaSub,
    pub labels: Vec<String>,
}

/// A private amino-acid deletion sub-range together with its catalog labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaDelLabeled {
    pub del: AaDelRange,
    pub labels: Vec<String>,
}

/// Private amino-acid mutations of one gene, partitioned the same way as
/// the nucleotide result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateAaMutations {
    /// Mutations back to the reference residue at codons where the ancestor
    /// had diverged. `ref_aa` holds the ancestral residue.
    pub reversions: Vec<AaSub>,
    /// Mutations away from the ancestral residue to a third state,
    /// inconsistent with the ancestor.
    pub reversion_substitutions: Vec<AaSubLabeled>,
    pub labeled_substitutions: Vec<AaSubLabeled>,
    pub unlabeled_substitutions: Vec<AaSub>,
    /// Deletions of codons the ancestor had substituted.
    pub reversion_deletions: Vec<AaDelRange>,
    pub labeled_deletions: Vec<AaDelLabeled>,
    pub unlabeled_deletions: Vec<AaDelRange>,
    pub total_private_substitutions: usize,
    pub total_private_deletions: usize,
    pub total_reversions: usize,
    pub total_labeled_substitutions: usize,
    pub total_unlabeled_substitutions: usize,
}

/// A contained, gene-scoped failure surfaced alongside the per-gene results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneWarning {
    pub gene: String,
    pub message: String,
}

/// Aggregated amino-acid calls of one query: one entry per successfully
/// processed gene, plus warnings for the genes that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateAaCalls {
    pub by_gene: BTreeMap<String, PrivateAaMutations>,
    pub warnings: Vec<GeneWarning>,
}

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
/// Find the query's private amino-acid mutations, gene by gene.
///
/// A gene with no registered reference peptide is reported as a warning and
/// skipped; every other error is fatal for the query. Genes are independent
/// and their order of processing does not affect the result.
///
pub fn find_private_aa_mutations(
    query: &QueryAaAnalysis,
    ancestral: &AncestralAaMaps,
    peptides: &RefPeptideMap,
    gene_map: &GeneMap,
    catalog: &LabelCatalog,
) -> Result<PrivateAaCalls, CallingError> {
    // An ancestral map naming a gene absent from the annotation is malformed
    // upstream data, in the same class as an out-of-bounds position.
    for (gene, _) in ancestral.genes() {
        if !gene_map.contains_gene(gene) {
            return Err(CallingError::UnknownGene(gene.clone()));
        }
    }

    let mut calls = PrivateAaCalls::default();

    for gene_query in &query.genes {
        match call_gene(gene_query, ancestral.gene(&gene_query.gene), peptides, catalog) {
            Ok(mutations) => {
                calls.by_gene.insert(gene_query.gene.clone(), mutations);
            }
            Err(err) if err.is_gene_scoped() => {
                warn!(
                    "Skipping amino-acid calls for gene '{}': {}",
                    gene_query.gene, err
                );
                calls.warnings.push(GeneWarning {
                    gene: gene_query.gene.clone(),
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(calls)
}

fn call_gene(
    gene_query: &GeneAaAnalysis,
    ancestral: Option<&AncestralMap>,
    peptides: &RefPeptideMap,
    catalog: &LabelCatalog,
) -> Result<PrivateAaMutations, CallingError> {
    let peptide = peptides
        .get(&gene_query.gene)
        .ok_or_else(|| CallingError::RefPeptideNotFound(gene_query.gene.clone()))?;

    // A gene absent from the ancestral maps simply has zero recorded
    // divergence: every query mutation in it is novel.
    let no_divergence = AncestralMap::default();
    let ancestral = ancestral.unwrap_or(&no_divergence);

    if let Some(pos) = ancestral.max_pos() {
        if pos >= peptide.len() {
            return Err(CallingError::CodonOutOfBounds {
                gene: gene_query.gene.clone(),
                pos,
                len: peptide.len(),
            });
        }
    }

    let gene = gene_query.gene.as_str();
    let mut result = PrivateAaMutations::default();
    let mut covered = BTreeSet::new();

    for sub in &gene_query.substitutions {
        let ref_aa = peptide.get(sub.pos).ok_or_else(|| CallingError::CodonOutOfBounds {
            gene: gene_query.gene.clone(),
            pos: sub.pos,
            len: peptide.len(),
        })?;
        covered.insert(sub.pos);
        if !gene_query.is_sequenced(sub.pos) {
            continue;
        }

        let ancestral_state = ancestral.get(sub.pos);
        let from_state = ancestral_state.unwrap_or(ref_aa);

        match classify_state(ref_aa, ancestral_state, sub.qry_aa) {
            StateClass::Explained => {}
            StateClass::Novel => {
                let labels = catalog.aa_sub_labels(gene, sub.pos, sub.qry_aa);
                let private = AaSub::new(gene, sub.pos, from_state, sub.qry_aa);
                if labels.is_empty() {
                    result.unlabeled_substitutions.push(private);
                } else {
                    result.labeled_substitutions.push(AaSubLabeled {
                        sub: private,
                        labels: labels.to_vec(),
                    });
                }
            }
            StateClass::ReversionToRef => {
                result
                    .reversions
                    .push(AaSub::new(gene, sub.pos, from_state, sub.qry_aa));
            }
            StateClass::DivergedFromAncestor => {
                let labels = catalog.aa_sub_labels(gene, sub.pos, sub.qry_aa);
                result.reversion_substitutions.push(AaSubLabeled {
                    sub: AaSub::new(gene, sub.pos, from_state, sub.qry_aa),
                    labels: labels.to_vec(),
                });
            }
        }
    }

    for del in &gene_query.deletions {
        if del.range.is_empty() {
            continue;
        }
        if del.range.end > peptide.len() {
            return Err(CallingError::CodonOutOfBounds {
                gene: gene_query.gene.clone(),
                pos: del.range.end - 1,
                len: peptide.len(),
            });
        }
        covered.extend(del.range.iter());
        classify_deletion_range(&mut result, gene_query, peptide, ancestral, catalog, del.range);
    }

    // Silent reversions: ancestor-diverged codons with no query record and a
    // definitive call carry the reference residue again.
    for (pos, ancestral_state) in ancestral.iter() {
        if covered.contains(&pos) || !gene_query.is_sequenced(pos) {
            continue;
        }
        if let Some(ref_aa) = peptide.get(pos) {
            if ancestral_state != ref_aa {
                result
                    .reversions
                    .push(AaSub::new(gene, pos, ancestral_state, ref_aa));
            }
        }
    }

    result.reversions.sort();
    result
        .reversion_substitutions
        .sort_by(|a, b| a.sub.cmp(&b.sub));
    result.labeled_substitutions.sort_by(|a, b| a.sub.cmp(&b.sub));
    result.unlabeled_substitutions.sort();
    result.reversion_deletions.sort();
    result.labeled_deletions.sort_by(|a, b| a.del.cmp(&b.del));
    result.unlabeled_deletions.sort();

    tally(&mut result);

    Ok(result)
}

/// Per-codon deletion classification; identical run semantics to the
/// nucleotide side, in the gene's codon space.
fn classify_deletion_range(
    result: &mut PrivateAaMutations,
    gene_query: &GeneAaAnalysis,
    peptide: &RefPeptide,
    ancestral: &AncestralMap,
    catalog: &LabelCatalog,
    range: PosRange,
) {
    let gene = gene_query.gene.as_str();
    let mut run: Option<DelRun> = None;

    for pos in range.iter() {
        let class = match peptide.get(pos) {
            Some(ref_aa) if gene_query.is_sequenced(pos) => {
                match classify_state(ref_aa, ancestral.get(pos), GAP) {
                    StateClass::Explained => None,
                    StateClass::Novel => {
                        let labels = catalog.aa_del_labels(gene, pos);
                        if labels.is_empty() {
                            Some(DelClass::Unlabeled)
                        } else {
                            Some(DelClass::Labeled(labels.to_vec()))
                        }
                    }
                    StateClass::DivergedFromAncestor => Some(DelClass::Reversion),
                    StateClass::ReversionToRef => None,
                }
            }
            _ => None,
        };

        run = match (run, class) {
            (None, None) => None,
            (None, Some(class)) => Some(DelRun { start: pos, class }),
            (Some(current), None) => {
                flush_del_run(result, gene, current, pos);
                None
            }
            (Some(current), Some(class)) => {
                if current.class == class {
                    Some(current)
                } else {
                    flush_del_run(result, gene, current, pos);
                    Some(DelRun { start: pos, class })
                }
            }
        };
    }

    if let Some(current) = run {
        flush_del_run(result, gene, current, range.end);
    }
}

fn flush_del_run(result: &mut PrivateAaMutations, gene: &str, run: DelRun, end: usize) {
    let del = AaDelRange::new(gene, run.start, end);
    match run.class {
        DelClass::Reversion => result.reversion_deletions.push(del),
        DelClass::Unlabeled => result.unlabeled_deletions.push(del),
        DelClass::Labeled(labels) => result.labeled_deletions.push(AaDelLabeled { del, labels }),
    }
}

fn tally(result: &mut PrivateAaMutations) {
    result.total_reversions = result.reversions.len() + result.reversion_substitutions.len();
    result.total_labeled_substitutions = result.labeled_substitutions.len();
    result.total_unlabeled_substitutions = result.unlabeled_substitutions.len();
    result.total_private_substitutions = result.total_reversions
        + result.total_labeled_substitutions
        + result.total_unlabeled_substitutions;
    result.total_private_deletions = result
        .reversion_deletions
        .iter()
        .map(AaDelRange::len)
        .chain(result.labeled_deletions.iter().map(|labeled| labeled.del.len()))
        .chain(result.unlabeled_deletions.iter().map(AaDelRange::len))
        .sum();
}
