//! # privmut-core
//!
//! Shared data model for private-mutation calling against phylogenetic
//! placements.
//!
//! ## Main Components
//!
//! - **`alphabet`**: byte-level nucleotide and amino-acid classification
//! - **`models`**: substitutions, deletions, position ranges, gene map, and
//!   reference peptides, with the standard genomics string notation
//!   (`A123T`, `S:N501Y`)
//!
//! Positions are 0-based reference coordinates; amino-acid positions are
//! 0-based codon indices local to their gene. The 1-based convention appears
//! only in `Display`/`FromStr`.

pub mod alphabet;
pub mod errors;
pub mod models;

// re-export things
pub use errors::MutationParseError;
pub use models::{
    AaDelRange, AaSub, Gene, GeneMap, NucDelRange, NucSub, PosRange, RefPeptide, RefPeptideMap,
    ranges_contain,
};
