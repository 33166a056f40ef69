use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::is_nuc;
use crate::errors::MutationParseError;
use crate::models::range::PosRange;

///
/// A single-nucleotide substitution in reference coordinates.
///
/// `ref_nuc` is the state being replaced. For aligner output that is the
/// root reference base; for private mutations it is the state the query
/// diverged from (the ancestral state when the ancestor had one).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NucSub {
    pub pos: usize,
    pub ref_nuc: u8,
    pub qry_nuc: u8,
}

impl NucSub {
    pub fn new(pos: usize, ref_nuc: u8, qry_nuc: u8) -> Self {
        NucSub {
            pos,
            ref_nuc,
            qry_nuc,
        }
    }

    /// Substitution records never map a state onto itself.
    pub fn is_valid(&self) -> bool {
        self.ref_nuc != self.qry_nuc
    }
}

impl Display for NucSub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.ref_nuc as char,
            self.pos + 1,
            self.qry_nuc as char
        )
    }
}

impl FromStr for NucSub {
    type Err = MutationParseError;

    /// Parse the usual `A123T` notation (1-based position).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MutationParseError::InvalidFormat(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() < 3 {
            return Err(invalid());
        }
        let ref_nuc = bytes[0].to_ascii_uppercase();
        let qry_nuc = bytes[bytes.len() - 1].to_ascii_uppercase();
        if !is_nuc(ref_nuc) {
            return Err(MutationParseError::InvalidNucleotide(ref_nuc as char));
        }
        if !is_nuc(qry_nuc) {
            return Err(MutationParseError::InvalidNucleotide(qry_nuc as char));
        }
        let pos: usize = s[1..s.len() - 1].parse().map_err(|_| invalid())?;
        if pos == 0 {
            return Err(invalid());
        }
        Ok(NucSub::new(pos - 1, ref_nuc, qry_nuc))
    }
}

/// A run of deleted positions in reference coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NucDelRange {
    pub range: PosRange,
}

impl NucDelRange {
    pub fn new(start: usize, end: usize) -> Self {
        NucDelRange {
            range: PosRange::new(start, end),
        }
    }

    /// Number of deleted positions.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl Display for NucDelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_nuc_sub_display_round_trip() {
        let sub = NucSub::new(122, b'A', b'T');
        assert_eq!(sub.to_string(), "A123T");
        assert_eq!("A123T".parse::<NucSub>().unwrap(), sub);
        assert_eq!("a123t".parse::<NucSub>().unwrap(), sub);
    }

    #[rstest]
    #[case("")]
    #[case("AT")]
    #[case("A0T")]
    #[case("AxyzT")]
    #[case("E123T")]
    fn test_nuc_sub_parse_rejects_garbage(#[case] input: &str) {
        assert!(input.parse::<NucSub>().is_err());
    }

    #[test]
    fn test_nuc_sub_validity() {
        assert!(NucSub::new(5, b'A', b'G').is_valid());
        assert!(!NucSub::new(5, b'A', b'A').is_valid());
    }

    #[test]
    fn test_nuc_del_range() {
        let del = NucDelRange::new(10, 13);
        assert_eq!(del.len(), 3);
        assert_eq!(del.to_string(), "11-13");
    }
}
