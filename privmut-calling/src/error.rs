use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallingError {
    /// The only gene-scoped error: callers contain it at the per-gene
    /// boundary and keep processing the remaining genes.
    #[error("Reference peptide not found for gene '{0}'")]
    RefPeptideNotFound(String),

    #[error("Position {pos} is outside the reference sequence of length {len}")]
    PositionOutOfBounds { pos: usize, len: usize },

    #[error("Codon {pos} is outside the reference peptide of gene '{gene}' (length {len})")]
    CodonOutOfBounds {
        gene: String,
        pos: usize,
        len: usize,
    },

    #[error("Gene '{0}' is not present in the gene map")]
    UnknownGene(String),
}

impl CallingError {
    /// Whether this error is contained to a single gene. Everything else
    /// indicates malformed upstream data and aborts the current query.
    pub fn is_gene_scoped(&self) -> bool {
        matches!(self, CallingError::RefPeptideNotFound(_))
    }
}
