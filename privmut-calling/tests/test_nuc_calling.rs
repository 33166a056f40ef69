use pretty_assertions::assert_eq;

use privmut_calling::{
    AncestralMap, CallingError, LabelCatalog, LabelCatalogSource, NucDelLabel, NucSubLabel,
    PrivateNucMutations, QueryNucAnalysis, find_private_nuc_mutations,
};
use privmut_core::models::{Gene, GeneMap, NucDelRange, NucSub, PosRange};

const REF_LEN: usize = 30;

fn ref_seq() -> Vec<u8> {
    vec![b'A'; REF_LEN]
}

fn gene_map() -> GeneMap {
    GeneMap::from_genes(vec![Gene::new("S", 0, 30, 0)])
}

fn empty_catalog() -> LabelCatalog {
    LabelCatalog::from_source(&LabelCatalogSource::default(), &gene_map()).unwrap()
}

fn query(substitutions: Vec<NucSub>, deletions: Vec<NucDelRange>) -> QueryNucAnalysis {
    QueryNucAnalysis {
        substitutions,
        deletions,
        missing: vec![],
        ambiguous: vec![],
        alignment_range: PosRange::new(0, REF_LEN),
    }
}

#[test]
fn test_mutation_explained_by_ancestor_is_excluded() {
    // Scenario A: the ancestor mutated 10 to G and the query carries G, so
    // the aligner records A10G; the node fully explains it.
    let ancestral = AncestralMap::from_path(vec![(10, b'G')]);
    let result = find_private_nuc_mutations(
        &query(vec![NucSub::new(10, b'A', b'G')], vec![]),
        &ref_seq(),
        &ancestral,
        &empty_catalog(),
    )
    .unwrap();
    assert_eq!(result, PrivateNucMutations::default());
}

#[test]
fn test_recorded_reversion_to_reference() {
    // Scenario B: ancestor diverged to G at 10, the query carries the
    // reference base again.
    let ancestral = AncestralMap::from_path(vec![(10, b'G')]);
    let result = find_private_nuc_mutations(
        &query(vec![NucSub::new(10, b'A', b'A')], vec![]),
        &ref_seq(),
        &ancestral,
        &empty_catalog(),
    )
    .unwrap();
    assert_eq!(result.reversions, vec![NucSub::new(10, b'G', b'A')]);
    assert!(result.unlabeled_substitutions.is_empty());
    assert!(result.labeled_substitutions.is_empty());
    assert!(result.reversion_substitutions.is_empty());
    assert_eq!(result.total_reversions, 1);
    assert_eq!(result.total_private_substitutions, 1);
}

#[test]
fn test_silent_reversion_found_by_ancestral_scan() {
    // The aligner records nothing at a position where the query matches the
    // reference, so a reversion is only visible through the ancestral map.
    let ancestral = AncestralMap::from_path(vec![(10, b'G'), (20, b'T')]);
    let result = find_private_nuc_mutations(
        &query(vec![NucSub::new(20, b'A', b'T')], vec![]),
        &ref_seq(),
        &ancestral,
        &empty_catalog(),
    )
    .unwrap();
    // Position 20 is explained; position 10 reverted silently.
    assert_eq!(result.reversions, vec![NucSub::new(10, b'G', b'A')]);
    assert_eq!(result.total_private_substitutions, 1);
}

#[test]
fn test_silent_reversion_suppressed_without_definitive_call() {
    let ancestral = AncestralMap::from_path(vec![(10, b'G')]);
    let mut q = query(vec![], vec![]);
    q.missing = vec![PosRange::new(8, 12)];
    let result =
        find_private_nuc_mutations(&q, &ref_seq(), &ancestral, &empty_catalog()).unwrap();
    assert_eq!(result, PrivateNucMutations::default());

    // Same when the position was never aligned at all.
    let mut q = query(vec![], vec![]);
    q.alignment_range = PosRange::new(15, REF_LEN);
    let result =
        find_private_nuc_mutations(&q, &ref_seq(), &ancestral, &empty_catalog()).unwrap();
    assert_eq!(result, PrivateNucMutations::default());
}

#[test]
fn test_novel_substitution_unlabeled() {
    // Scenario C: no ancestral divergence at 10, no catalog entry.
    let result = find_private_nuc_mutations(
        &query(vec![NucSub::new(10, b'A', b'T')], vec![]),
        &ref_seq(),
        &AncestralMap::default(),
        &empty_catalog(),
    )
    .unwrap();
    assert_eq!(result.unlabeled_substitutions, vec![NucSub::new(10, b'A', b'T')]);
    assert_eq!(result.total_unlabeled_substitutions, 1);
    assert_eq!(result.total_private_substitutions, 1);
    assert_eq!(result.total_reversions, 0);
}

#[test]
fn test_novel_substitution_labeled() {
    // Scenario D: the catalog knows (10, T).
    let source = LabelCatalogSource {
        nuc_subs: vec![NucSubLabel {
            pos: 10,
            qry_nuc: b'T',
            label: "exampleLineage".to_string(),
        }],
        ..Default::default()
    };
    let catalog = LabelCatalog::from_source(&source, &gene_map()).unwrap();
    let result = find_private_nuc_mutations(
        &query(vec![NucSub::new(10, b'A', b'T')], vec![]),
        &ref_seq(),
        &AncestralMap::default(),
        &catalog,
    )
    .unwrap();
    assert!(result.unlabeled_substitutions.is_empty());
    assert_eq!(result.labeled_substitutions.len(), 1);
    assert_eq!(result.labeled_substitutions[0].sub, NucSub::new(10, b'A', b'T'));
    assert_eq!(result.labeled_substitutions[0].labels, vec!["exampleLineage"]);
    assert_eq!(result.total_labeled_substitutions, 1);
}

#[test]
fn test_ancestor_already_back_at_reference_counts_as_novel() {
    // The ancestor's own history reverted 10 to the reference base; a query
    // mutation there is novel, not a reversion case.
    let ancestral = AncestralMap::from_path(vec![(10, b'G'), (10, b'A')]);
    let result = find_private_nuc_mutations(
        &query(vec![NucSub::new(10, b'A', b'T')], vec![]),
        &ref_seq(),
        &ancestral,
        &empty_catalog(),
    )
    .unwrap();
    assert_eq!(result.unlabeled_substitutions, vec![NucSub::new(10, b'A', b'T')]);
    assert!(result.reversions.is_empty());
    assert!(result.reversion_substitutions.is_empty());
}

#[test]
fn test_divergence_to_third_state() {
    // Ancestor went A->G, query carries T: private and inconsistent with
    // the ancestor. Catalog labels still attach.
    let ancestral = AncestralMap::from_path(vec![(10, b'G')]);
    let source = LabelCatalogSource {
        nuc_subs: vec![NucSubLabel {
            pos: 10,
            qry_nuc: b'T',
            label: "exampleLineage".to_string(),
        }],
        ..Default::default()
    };
    let catalog = LabelCatalog::from_source(&source, &gene_map()).unwrap();
    let result = find_private_nuc_mutations(
        &query(vec![NucSub::new(10, b'A', b'T')], vec![]),
        &ref_seq(),
        &ancestral,
        &catalog,
    )
    .unwrap();
    assert_eq!(result.reversion_substitutions.len(), 1);
    assert_eq!(
        result.reversion_substitutions[0].sub,
        NucSub::new(10, b'G', b'T')
    );
    assert_eq!(result.reversion_substitutions[0].labels, vec!["exampleLineage"]);
    assert!(result.labeled_substitutions.is_empty());
    assert!(result.unlabeled_substitutions.is_empty());
    assert_eq!(result.total_reversions, 1);
}

#[test]
fn test_substitution_in_missing_region_is_skipped() {
    let mut q = query(vec![NucSub::new(10, b'A', b'T')], vec![]);
    q.missing = vec![PosRange::new(10, 11)];
    let result = find_private_nuc_mutations(
        &q,
        &ref_seq(),
        &AncestralMap::default(),
        &empty_catalog(),
    )
    .unwrap();
    assert_eq!(result, PrivateNucMutations::default());
}

#[test]
fn test_deletion_runs_split_at_classification_boundaries() {
    // Ancestor substituted 12 and deleted 14; the query deletes 10..16.
    let ancestral = AncestralMap::from_path(vec![(12, b'G'), (14, b'-')]);
    let result = find_private_nuc_mutations(
        &query(vec![], vec![NucDelRange::new(10, 16)]),
        &ref_seq(),
        &ancestral,
        &empty_catalog(),
    )
    .unwrap();
    // 10-11 novel, 12 deletes the ancestor's substitution, 13 novel,
    // 14 already deleted by the ancestor, 15 novel.
    assert_eq!(
        result.unlabeled_deletions,
        vec![
            NucDelRange::new(10, 12),
            NucDelRange::new(13, 14),
            NucDelRange::new(15, 16),
        ]
    );
    assert_eq!(result.reversion_deletions, vec![NucDelRange::new(12, 13)]);
    assert!(result.labeled_deletions.is_empty());
    assert_eq!(result.total_private_deletions, 5);
    assert_eq!(result.total_private_substitutions, 0);
}

#[test]
fn test_labeled_deletion_runs_split_on_label_change() {
    let source = LabelCatalogSource {
        nuc_dels: vec![
            NucDelLabel { pos: 10, label: "21J".to_string() },
            NucDelLabel { pos: 11, label: "21J".to_string() },
            NucDelLabel { pos: 12, label: "20H".to_string() },
        ],
        ..Default::default()
    };
    let catalog = LabelCatalog::from_source(&source, &gene_map()).unwrap();
    let result = find_private_nuc_mutations(
        &query(vec![], vec![NucDelRange::new(10, 14)]),
        &ref_seq(),
        &AncestralMap::default(),
        &catalog,
    )
    .unwrap();
    assert_eq!(result.labeled_deletions.len(), 2);
    assert_eq!(result.labeled_deletions[0].del, NucDelRange::new(10, 12));
    assert_eq!(result.labeled_deletions[0].labels, vec!["21J"]);
    assert_eq!(result.labeled_deletions[1].del, NucDelRange::new(12, 13));
    assert_eq!(result.labeled_deletions[1].labels, vec!["20H"]);
    assert_eq!(result.unlabeled_deletions, vec![NucDelRange::new(13, 14)]);
    assert_eq!(result.total_private_deletions, 4);
}

#[test]
fn test_deletion_over_ancestor_mutation_beats_silent_reversion_scan() {
    // The deleted position is covered by a query record, so the ancestral
    // scan must not also report it as a reversion to reference.
    let ancestral = AncestralMap::from_path(vec![(10, b'G')]);
    let result = find_private_nuc_mutations(
        &query(vec![], vec![NucDelRange::new(10, 11)]),
        &ref_seq(),
        &ancestral,
        &empty_catalog(),
    )
    .unwrap();
    assert!(result.reversions.is_empty());
    assert_eq!(result.reversion_deletions, vec![NucDelRange::new(10, 11)]);
}

#[test]
fn test_categories_are_disjoint_and_totals_consistent() {
    let ancestral = AncestralMap::from_path(vec![(5, b'G'), (10, b'G'), (15, b'C')]);
    let source = LabelCatalogSource {
        nuc_subs: vec![NucSubLabel {
            pos: 20,
            qry_nuc: b'T',
            label: "exampleLineage".to_string(),
        }],
        ..Default::default()
    };
    let catalog = LabelCatalog::from_source(&source, &gene_map()).unwrap();
    let q = query(
        vec![
            NucSub::new(5, b'A', b'A'),  // reversion to reference
            NucSub::new(10, b'A', b'T'), // third state
            NucSub::new(20, b'A', b'T'), // labeled novel
            NucSub::new(25, b'A', b'C'), // unlabeled novel
        ],
        vec![],
    );
    let result = find_private_nuc_mutations(&q, &ref_seq(), &ancestral, &catalog).unwrap();

    // Position 15 reverts silently; every event lands in exactly one list.
    assert_eq!(result.reversions.len(), 2);
    assert_eq!(result.reversion_substitutions.len(), 1);
    assert_eq!(result.labeled_substitutions.len(), 1);
    assert_eq!(result.unlabeled_substitutions.len(), 1);
    assert_eq!(result.total_reversions, 3);
    assert_eq!(result.total_private_substitutions, 5);
    assert_eq!(
        result.total_private_substitutions,
        result.reversions.len()
            + result.reversion_substitutions.len()
            + result.labeled_substitutions.len()
            + result.unlabeled_substitutions.len()
    );
}

#[test]
fn test_output_is_deterministic() {
    let ancestral = AncestralMap::from_path(vec![(5, b'G'), (15, b'C')]);
    let q = query(
        vec![NucSub::new(25, b'A', b'C'), NucSub::new(10, b'A', b'T')],
        vec![NucDelRange::new(18, 20)],
    );
    let first = find_private_nuc_mutations(&q, &ref_seq(), &ancestral, &empty_catalog()).unwrap();
    let second = find_private_nuc_mutations(&q, &ref_seq(), &ancestral, &empty_catalog()).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    // Lists come out position-sorted regardless of input order.
    assert_eq!(
        first.unlabeled_substitutions,
        vec![NucSub::new(10, b'A', b'T'), NucSub::new(25, b'A', b'C')]
    );
}

#[test]
fn test_out_of_bounds_inputs_are_fatal() {
    let ancestral = AncestralMap::from_path(vec![(100, b'G')]);
    let err = find_private_nuc_mutations(
        &query(vec![], vec![]),
        &ref_seq(),
        &ancestral,
        &empty_catalog(),
    )
    .unwrap_err();
    assert_eq!(err, CallingError::PositionOutOfBounds { pos: 100, len: REF_LEN });

    let err = find_private_nuc_mutations(
        &query(vec![NucSub::new(99, b'A', b'T')], vec![]),
        &ref_seq(),
        &AncestralMap::default(),
        &empty_catalog(),
    )
    .unwrap_err();
    assert_eq!(err, CallingError::PositionOutOfBounds { pos: 99, len: REF_LEN });

    let err = find_private_nuc_mutations(
        &query(vec![], vec![NucDelRange::new(25, 40)]),
        &ref_seq(),
        &AncestralMap::default(),
        &empty_catalog(),
    )
    .unwrap_err();
    assert_eq!(err, CallingError::PositionOutOfBounds { pos: 39, len: REF_LEN });
}
