pub mod section;
pub mod descriptor;
pub mod pat;
pub mod cat;
pub mod pmt;

pub use section::Psi;
pub use descriptor::{Descriptor, DescriptorIter, DescriptorLoop};
pub use pat::{Pat, PatEntry};
pub use cat::Cat;
pub use pmt::{ElementInfoIter, ElementInfoLoop, Pmt, ProgramElementInfo};

use crate::constants::{CAT_TABLE_ID, PAT_TABLE_ID, PMT_TABLE_ID};
use crate::error::PsiError;

/// Any of the decoded table kinds.
#[derive(Debug, Clone, Copy)]
pub enum Section<'a> {
    Pat(Pat<'a>),
    Cat(Cat<'a>),
    Pmt(Pmt<'a>),
}

impl<'a> Section<'a> {
    /// Picks the decoder from the table_id byte.
    pub fn parse(data: &'a [u8]) -> Result<Self, PsiError> {
        let Some(&table_id) = data.first() else {
            return Err(PsiError::too_short("section", 1, 0));
        };
        match table_id {
            PAT_TABLE_ID => Pat::new(data).map(Section::Pat),
            CAT_TABLE_ID => Cat::new(data).map(Section::Cat),
            PMT_TABLE_ID => Pmt::new(data).map(Section::Pmt),
            other => Err(PsiError::UnsupportedTable(other)),
        }
    }

    pub fn psi(&self) -> Psi<'a> {
        match self {
            Section::Pat(t) => t.psi(),
            Section::Cat(t) => t.psi(),
            Section::Pmt(t) => t.psi(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    #[test]
    fn dispatch_on_table_id() {
        let cat = hex!("01 B0 10 FF FF F9 00 00 F6 05 00 0E E0 71 01 04 CC 5F AB");
        assert_matches!(Section::parse(&cat), Ok(Section::Cat(_)));

        let pat = hex!("00 B0 09 00 01 C1 00 00 DE AD BE EF");
        let sec = Section::parse(&pat).unwrap();
        assert_matches!(sec, Section::Pat(_));
        assert_eq!(sec.psi().section_length(), 9);
    }

    #[test]
    fn unknown_table() {
        let sdt = hex!("42 B0 09 00 01 C1 00 00 DE AD BE EF");
        assert_eq!(Section::parse(&sdt).unwrap_err(), PsiError::UnsupportedTable(0x42));
        assert_matches!(Section::parse(&[]), Err(PsiError::TooShort { .. }));
    }
}
