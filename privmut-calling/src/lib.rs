//! # privmut-calling
//!
//! Private-mutation calling against phylogenetic placements.
//!
//! ## Purpose
//!
//! Given a query sequence's aligned mutations and the mutation map of its
//! nearest tree node, this crate determines which of the query's mutations
//! are *private*, i.e. not already explained by the divergence accumulated
//! along the path to that node. Private-mutation counts feed lineage-assignment
//! confidence and quality-control scoring downstream: a query with
//! abnormally many unexplained mutations is likely low-quality or
//! mis-placed.
//!
//! ## Main Components
//!
//! - **`AncestralMap`** / **`AncestralAaMaps`**: the placement node's
//!   accumulated divergence, replayed last-write-wins from the tree path
//! - **`LabelCatalog`**: build-once lookup annotating private mutations with
//!   known recurring-mutation names
//! - **`find_private_nuc_mutations`** / **`find_private_aa_mutations`**: the
//!   finders, pure per-query (and per-gene) classification
//! - **`call_batch`**: rayon-parallel driver over independent queries
//!
//! ## Classification
//!
//! Every mutated position is compared three ways (reference state,
//! ancestral state, query state) and lands in exactly one bucket:
//! explained (dropped), reversion, labeled private, or unlabeled private.
//! Positions without a definitive base call never contribute.

pub mod aa;
pub mod ancestral;
pub mod batch;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod nuc;
pub mod query;

// re-export things
pub use aa::{
    AaDelLabeled, AaSubLabeled, GeneWarning, PrivateAaCalls, PrivateAaMutations,
    find_private_aa_mutations,
};
pub use ancestral::{AncestralAaMaps, AncestralMap};
pub use batch::{CallContext, PrivateCalls, QueryCallInput, call_batch, call_query};
pub use catalog::{
    AaDelLabel, AaSubLabel, LabelCatalog, LabelCatalogSource, NucDelLabel, NucSubLabel,
};
pub use classify::{StateClass, classify_state};
pub use error::CallingError;
pub use nuc::{NucDelLabeled, NucSubLabeled, PrivateNucMutations, find_private_nuc_mutations};
pub use query::{GeneAaAnalysis, QueryAaAnalysis, QueryNucAnalysis};
