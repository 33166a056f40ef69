//!
//! The three-way reference/ancestor/query comparison shared by the
//! nucleotide and amino-acid finders.
//!

/// Outcome of comparing the query state at one position against the
/// reference state and the ancestral state recorded at the placement node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    /// Query state equals the ancestral state: the mutation is fully
    /// explained by the path to the placement node. Not private.
    Explained,
    /// The ancestor has no divergence here, or its own history had already
    /// returned it to the reference state: the query mutation is new.
    Novel,
    /// The ancestor diverged and the query carries the reference state
    /// again: the query mutated back.
    ReversionToRef,
    /// The ancestor diverged and the query moved to a third state, distinct
    /// from both reference and ancestor.
    DivergedFromAncestor,
}

/// Classify one position. `ancestral` is `None` when the placement node has
/// no recorded state there.
pub fn classify_state(ref_state: u8, ancestral: Option<u8>, qry_state: u8) -> StateClass {
    match ancestral {
        None => StateClass::Novel,
        Some(anc) if anc == ref_state => StateClass::Novel,
        Some(anc) if qry_state == anc => StateClass::Explained,
        Some(_) if qry_state == ref_state => StateClass::ReversionToRef,
        Some(_) => StateClass::DivergedFromAncestor,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b'A', None, b'T', StateClass::Novel)]
    #[case(b'A', Some(b'A'), b'T', StateClass::Novel)]
    #[case(b'A', Some(b'G'), b'G', StateClass::Explained)]
    #[case(b'A', Some(b'G'), b'A', StateClass::ReversionToRef)]
    #[case(b'A', Some(b'G'), b'T', StateClass::DivergedFromAncestor)]
    #[case(b'A', Some(b'G'), b'-', StateClass::DivergedFromAncestor)]
    #[case(b'A', Some(b'-'), b'-', StateClass::Explained)]
    #[case(b'A', Some(b'-'), b'A', StateClass::ReversionToRef)]
    fn test_classify_state(
        #[case] ref_state: u8,
        #[case] ancestral: Option<u8>,
        #[case] qry_state: u8,
        #[case] expected: StateClass,
    ) {
        assert_eq!(classify_state(ref_state, ancestral, qry_state), expected);
    }
}
