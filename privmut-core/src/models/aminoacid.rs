use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::is_aa;
use crate::errors::MutationParseError;
use crate::models::range::PosRange;

///
/// An amino-acid substitution, scoped to one gene.
///
/// `pos` is the 0-based codon index within the gene, never a genome-global
/// coordinate. `ref_aa` is the state being replaced: the reference peptide
/// residue, or the ancestral residue for private mutations.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AaSub {
    pub gene: String,
    pub pos: usize,
    pub ref_aa: u8,
    pub qry_aa: u8,
}

impl AaSub {
    pub fn new(gene: impl Into<String>, pos: usize, ref_aa: u8, qry_aa: u8) -> Self {
        AaSub {
            gene: gene.into(),
            pos,
            ref_aa,
            qry_aa,
        }
    }

    /// Substitution records never map a state onto itself.
    pub fn is_valid(&self) -> bool {
        self.ref_aa != self.qry_aa
    }
}

impl Display for AaSub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}{}{}",
            self.gene,
            self.ref_aa as char,
            self.pos + 1,
            self.qry_aa as char
        )
    }
}

impl FromStr for AaSub {
    type Err = MutationParseError;

    /// Parse the usual `S:N501Y` notation (1-based codon position).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MutationParseError::InvalidFormat(s.to_string());
        let (gene, mutation) = s.split_once(':').ok_or_else(invalid)?;
        if gene.is_empty() {
            return Err(invalid());
        }
        let bytes = mutation.as_bytes();
        if bytes.len() < 3 {
            return Err(invalid());
        }
        let ref_aa = bytes[0].to_ascii_uppercase();
        let qry_aa = bytes[bytes.len() - 1].to_ascii_uppercase();
        if !is_aa(ref_aa) {
            return Err(MutationParseError::InvalidAminoAcid(ref_aa as char));
        }
        if !is_aa(qry_aa) {
            return Err(MutationParseError::InvalidAminoAcid(qry_aa as char));
        }
        let pos: usize = mutation[1..mutation.len() - 1]
            .parse()
            .map_err(|_| invalid())?;
        if pos == 0 {
            return Err(invalid());
        }
        Ok(AaSub::new(gene, pos - 1, ref_aa, qry_aa))
    }
}

/// A run of deleted codons within one gene.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AaDelRange {
    pub gene: String,
    pub range: PosRange,
}

impl AaDelRange {
    pub fn new(gene: impl Into<String>, start: usize, end: usize) -> Self {
        AaDelRange {
            gene: gene.into(),
            range: PosRange::new(start, end),
        }
    }

    /// Number of deleted codons.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl Display for AaDelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.gene, self.range)
    }
}
