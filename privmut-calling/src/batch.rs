//!
//! Batch execution: queries are independent, so a batch is a parallel map
//! over read-only shared inputs.
//!

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use privmut_core::models::{GeneMap, RefPeptideMap};

use crate::aa::{PrivateAaCalls, find_private_aa_mutations};
use crate::ancestral::{AncestralAaMaps, AncestralMap};
use crate::catalog::LabelCatalog;
use crate::error::CallingError;
use crate::nuc::{PrivateNucMutations, find_private_nuc_mutations};
use crate::query::{QueryAaAnalysis, QueryNucAnalysis};

/// Read-only per-run inputs, shared across every query of a batch without
/// locking.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    pub ref_seq: &'a [u8],
    pub gene_map: &'a GeneMap,
    pub ref_peptides: &'a RefPeptideMap,
    pub catalog: &'a LabelCatalog,
}

/// Per-query inputs: the aligned analysis plus the mutation maps of the
/// query's placement node.
#[derive(Debug, Clone)]
pub struct QueryCallInput {
    pub name: String,
    pub nuc: QueryNucAnalysis,
    pub aa: QueryAaAnalysis,
    pub ancestral_nuc: AncestralMap,
    pub ancestral_aa: AncestralAaMaps,
}

/// Aggregated private-mutation calls of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateCalls {
    pub name: String,
    pub nuc: PrivateNucMutations,
    pub aa: PrivateAaCalls,
}

/// Run both finders for one query.
pub fn call_query(
    input: &QueryCallInput,
    ctx: &CallContext<'_>,
) -> Result<PrivateCalls, CallingError> {
    let nuc = find_private_nuc_mutations(&input.nuc, ctx.ref_seq, &input.ancestral_nuc, ctx.catalog)?;
    let aa = find_private_aa_mutations(
        &input.aa,
        &input.ancestral_aa,
        ctx.ref_peptides,
        ctx.gene_map,
        ctx.catalog,
    )?;
    debug!(
        "query '{}': {} private nucleotide substitutions, {} genes with amino-acid calls",
        input.name,
        nuc.total_private_substitutions,
        aa.by_gene.len()
    );
    Ok(PrivateCalls {
        name: input.name.clone(),
        nuc,
        aa,
    })
}

///
/// Call every query of a batch in parallel.
///
/// Output order matches input order. A fatal error stays in its query's
/// slot and never aborts the rest of the batch; there is no partial state
/// to roll back, so callers may simply discard slots they no longer need.
///
pub fn call_batch(
    queries: &[QueryCallInput],
    ctx: &CallContext<'_>,
) -> Vec<Result<PrivateCalls, CallingError>> {
    info!("Calling private mutations for {} queries", queries.len());
    queries.par_iter().map(|query| call_query(query, ctx)).collect()
}
