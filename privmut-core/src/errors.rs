use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationParseError {
    #[error("Error parsing mutation '{0}': expected <ref><1-based position><qry>")]
    InvalidFormat(String),

    #[error("Invalid nucleotide character '{0}'")]
    InvalidNucleotide(char),

    #[error("Invalid amino acid character '{0}'")]
    InvalidAminoAcid(char),

    #[error("Error parsing range '{0}': expected <1-based start>-<end>")]
    InvalidRange(String),
}
