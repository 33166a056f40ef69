//!
//! The label catalog: a build-once lookup from (position, mutated state) to
//! the names of known recurring mutations, used to annotate private
//! mutations with lineage information.
//!

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use privmut_core::models::GeneMap;

use crate::error::CallingError;

/// One nucleotide-substitution label entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucSubLabel {
    pub pos: usize,
    pub qry_nuc: u8,
    pub label: String,
}

/// One nucleotide-deletion label entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucDelLabel {
    pub pos: usize,
    pub label: String,
}

/// One amino-acid-substitution label entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaSubLabel {
    pub gene: String,
    pub pos: usize,
    pub qry_aa: u8,
    pub label: String,
}

/// One amino-acid-deletion label entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaDelLabel {
    pub gene: String,
    pub pos: usize,
    pub label: String,
}

/// The raw label tables as supplied by the reference metadata, in catalog
/// order. Several entries may target the same (position, state) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCatalogSource {
    pub nuc_subs: Vec<NucSubLabel>,
    pub nuc_dels: Vec<NucDelLabel>,
    pub aa_subs: Vec<AaSubLabel>,
    pub aa_dels: Vec<AaDelLabel>,
}

///
/// Immutable lookup from (position, mutated state) to an ordered label set.
///
/// Built once per analysis run and shared by reference across all query and
/// gene tasks; there is no mutation API after construction.
///
#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    nuc_subs: FxHashMap<(usize, u8), Vec<String>>,
    nuc_dels: FxHashMap<usize, Vec<String>>,
    aa_subs: FxHashMap<String, FxHashMap<(usize, u8), Vec<String>>>,
    aa_dels: FxHashMap<String, FxHashMap<usize, Vec<String>>>,
}

impl LabelCatalog {
    /// Build the catalog, preserving per-key label order and dropping exact
    /// duplicates. An amino-acid entry naming a gene absent from the gene
    /// map indicates broken reference metadata and fails construction.
    pub fn from_source(
        source: &LabelCatalogSource,
        gene_map: &GeneMap,
    ) -> Result<Self, CallingError> {
        let mut catalog = LabelCatalog::default();

        for entry in &source.nuc_subs {
            push_label(
                catalog.nuc_subs.entry((entry.pos, entry.qry_nuc)).or_default(),
                &entry.label,
            );
        }
        for entry in &source.nuc_dels {
            push_label(catalog.nuc_dels.entry(entry.pos).or_default(), &entry.label);
        }
        for entry in &source.aa_subs {
            if !gene_map.contains_gene(&entry.gene) {
                return Err(CallingError::UnknownGene(entry.gene.clone()));
            }
            push_label(
                catalog
                    .aa_subs
                    .entry(entry.gene.clone())
                    .or_default()
                    .entry((entry.pos, entry.qry_aa))
                    .or_default(),
                &entry.label,
            );
        }
        for entry in &source.aa_dels {
            if !gene_map.contains_gene(&entry.gene) {
                return Err(CallingError::UnknownGene(entry.gene.clone()));
            }
            push_label(
                catalog
                    .aa_dels
                    .entry(entry.gene.clone())
                    .or_default()
                    .entry(entry.pos)
                    .or_default(),
                &entry.label,
            );
        }

        Ok(catalog)
    }

    /// Labels attached to a nucleotide substitution, empty if none.
    pub fn nuc_sub_labels(&self, pos: usize, qry_nuc: u8) -> &[String] {
        self.nuc_subs
            .get(&(pos, qry_nuc))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Labels attached to a nucleotide deletion position, empty if none.
    pub fn nuc_del_labels(&self, pos: usize) -> &[String] {
        self.nuc_dels.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labels attached to an amino-acid substitution, empty if none.
    pub fn aa_sub_labels(&self, gene: &str, pos: usize, qry_aa: u8) -> &[String] {
        self.aa_subs
            .get(gene)
            .and_then(|by_pos| by_pos.get(&(pos, qry_aa)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Labels attached to an amino-acid deletion position, empty if none.
    pub fn aa_del_labels(&self, gene: &str, pos: usize) -> &[String] {
        self.aa_dels
            .get(gene)
            .and_then(|by_pos| by_pos.get(&pos))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn push_label(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|existing| existing == label) {
        labels.push(label.to_string());
    }
}
