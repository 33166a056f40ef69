pub mod aminoacid;
pub mod gene;
pub mod nucleotide;
pub mod peptide;
pub mod range;

// re-export for cleaner imports
pub use self::aminoacid::{AaDelRange, AaSub};
pub use self::gene::{Gene, GeneMap};
pub use self::nucleotide::{NucDelRange, NucSub};
pub use self::peptide::{RefPeptide, RefPeptideMap};
pub use self::range::{PosRange, ranges_contain};
