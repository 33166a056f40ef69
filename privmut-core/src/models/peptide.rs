use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The reference amino-acid sequence of one gene.
///
/// Serves as the implicit reference state for amino-acid comparison: a codon
/// position absent from any mutation map matches this peptide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefPeptide {
    pub gene: String,
    pub seq: Vec<u8>,
}

impl RefPeptide {
    pub fn new(gene: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        RefPeptide {
            gene: gene.into(),
            seq: seq.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Reference residue at a 0-based codon position.
    pub fn get(&self, pos: usize) -> Option<u8> {
        self.seq.get(pos).copied()
    }
}

/// Lookup from gene name to its reference peptide, built once per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefPeptideMap {
    peptides: FxHashMap<String, RefPeptide>,
}

impl RefPeptideMap {
    pub fn from_peptides(peptides: impl IntoIterator<Item = RefPeptide>) -> Self {
        RefPeptideMap {
            peptides: peptides
                .into_iter()
                .map(|peptide| (peptide.gene.clone(), peptide))
                .collect(),
        }
    }

    pub fn get(&self, gene: &str) -> Option<&RefPeptide> {
        self.peptides.get(gene)
    }

    pub fn contains_gene(&self, gene: &str) -> bool {
        self.peptides.contains_key(gene)
    }

    pub fn len(&self) -> usize {
        self.peptides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peptides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_peptide_lookup() {
        let peptides = RefPeptideMap::from_peptides(vec![RefPeptide::new("S", *b"MFVFLV")]);
        let peptide = peptides.get("S").unwrap();
        assert_eq!(peptide.len(), 6);
        assert_eq!(peptide.get(1), Some(b'F'));
        assert_eq!(peptide.get(6), None);
        assert!(peptides.get("ORF9").is_none());
    }
}
