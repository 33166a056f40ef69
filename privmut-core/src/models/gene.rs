use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::range::PosRange;

///
/// One annotated gene: its name, reference coordinates, and reading frame.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub name: String,
    pub range: PosRange,
    pub frame: u8,
}

impl Gene {
    pub fn new(name: impl Into<String>, start: usize, end: usize, frame: u8) -> Self {
        Gene {
            name: name.into(),
            range: PosRange::new(start, end),
            frame,
        }
    }

    /// Number of codons covered by this gene's coding span.
    pub fn codon_len(&self) -> usize {
        self.range.len() / 3
    }
}

/// Lookup from gene name to its annotation, built once per analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneMap {
    genes: FxHashMap<String, Gene>,
}

impl GeneMap {
    pub fn from_genes(genes: impl IntoIterator<Item = Gene>) -> Self {
        GeneMap {
            genes: genes
                .into_iter()
                .map(|gene| (gene.name.clone(), gene))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Gene> {
        self.genes.get(name)
    }

    pub fn contains_gene(&self, name: &str) -> bool {
        self.genes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gene> {
        self.genes.values()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_gene_map_lookup() {
        let gene_map = GeneMap::from_genes(vec![
            Gene::new("S", 21562, 25384, 0),
            Gene::new("ORF1a", 265, 13468, 0),
        ]);
        assert_eq!(gene_map.len(), 2);
        assert!(gene_map.contains_gene("S"));
        assert!(!gene_map.contains_gene("ORF9"));
        assert_eq!(gene_map.get("S").unwrap().codon_len(), 1274);
    }
}
