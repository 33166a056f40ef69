//!
//! Per-query input shapes, as produced by the alignment and translation
//! layers upstream. Everything here is already coordinate-mapped to the
//! reference.
//!

use serde::{Deserialize, Serialize};

use privmut_core::models::{AaDelRange, AaSub, NucDelRange, NucSub, PosRange, ranges_contain};

///
/// Aligned nucleotide-level view of one query sequence.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryNucAnalysis {
    pub substitutions: Vec<NucSub>,
    pub deletions: Vec<NucDelRange>,
    /// Unsequenced stretches (runs of N).
    pub missing: Vec<PosRange>,
    /// Stretches of partially ambiguous calls (IUPAC codes other than N).
    pub ambiguous: Vec<PosRange>,
    /// The aligned span; positions outside it were never sequenced.
    pub alignment_range: PosRange,
}

impl QueryNucAnalysis {
    /// A position carries a definitive base call when it falls inside the
    /// aligned span and is neither missing nor ambiguous. Deleted positions
    /// count as sequenced: a deletion is a definitive call.
    pub fn is_sequenced(&self, pos: usize) -> bool {
        self.alignment_range.contains(pos)
            && !ranges_contain(&self.missing, pos)
            && !ranges_contain(&self.ambiguous, pos)
    }
}

/// Aligned amino-acid view of one gene of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneAaAnalysis {
    pub gene: String,
    pub substitutions: Vec<AaSub>,
    pub deletions: Vec<AaDelRange>,
    /// Codon ranges without a definitive amino-acid call (unsequenced or X).
    pub unknown: Vec<PosRange>,
}

impl GeneAaAnalysis {
    pub fn is_sequenced(&self, pos: usize) -> bool {
        !ranges_contain(&self.unknown, pos)
    }
}

/// Per-gene amino-acid views of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAaAnalysis {
    pub genes: Vec<GeneAaAnalysis>,
}
