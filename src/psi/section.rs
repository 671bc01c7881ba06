// psi/section.rs
//! Generic PSI section view: the three header bytes every table starts with,
//! the trailing CRC, and the long-form header shared by PAT / CAT / PMT.

use crate::constants::*;
use crate::error::PsiError;
use crate::types::TableId;

/// Borrowed overlay on one PSI section. Nothing is validated here; the
/// table constructors check lengths before handing one out.
#[derive(Clone, Copy)]
pub struct Psi<'a> {
    data: &'a [u8],
}

impl<'a> Psi<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn table_id(&self) -> TableId {
        TableId(self.data[0])
    }

    /// 0 or 1
    pub fn section_syntax_indicator(&self) -> u8 {
        (self.data[1] & SYNTAX_INDICATOR_BIT) >> 7
    }

    /// Bytes following the length field, CRC included.
    pub fn section_length(&self) -> usize {
        (u16::from_be_bytes([self.data[1], self.data[2]]) & LENGTH_MASK) as usize
    }

    /// Last four bytes of the buffer. Not checked against the section content.
    pub fn crc32(&self) -> &'a [u8] {
        &self.data[self.data.len().saturating_sub(CRC_LEN)..]
    }

    /* ── long-form header, only valid after `with_long_header` ── */

    pub(crate) fn table_id_extension(&self) -> u16 {
        u16::from_be_bytes([self.data[3], self.data[4]])
    }

    pub(crate) fn version_number(&self) -> u8 {
        (self.data[5] & VERSION_MASK) >> 1
    }

    pub(crate) fn current_next_indicator(&self) -> u8 {
        self.data[5] & 0x01
    }

    pub(crate) fn section_number(&self) -> u8 {
        self.data[6]
    }

    pub(crate) fn last_section_number(&self) -> u8 {
        self.data[7]
    }

    /// Offset one past the last body byte, i.e. where the CRC starts.
    pub(crate) fn body_end(&self) -> usize {
        PSI_HEADER_LEN + self.section_length() - CRC_LEN
    }

    /// Shared check for every long-form table: the buffer holds at least
    /// `min_len` bytes, the declared section fits in it, and section_length
    /// is large enough for the long header, `fixed_len` table bytes and the CRC.
    pub(crate) fn with_long_header(
        data: &'a [u8],
        table: &'static str,
        min_len: usize,
        fixed_len: usize,
    ) -> Result<Self, PsiError> {
        if data.len() < min_len {
            return Err(PsiError::too_short(table, min_len, data.len()));
        }
        let psi = Psi::new(data);

        let end = PSI_HEADER_LEN + psi.section_length();
        if end > data.len() {
            return Err(PsiError::too_short(table, end, data.len()));
        }
        let needed = LONG_HEADER_LEN + fixed_len + CRC_LEN;
        if psi.section_length() < needed {
            return Err(PsiError::too_short("section_length", needed, psi.section_length()));
        }
        Ok(psi)
    }
}

impl std::fmt::Debug for Psi<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Psi")
            .field("table_id", &self.table_id())
            .field("section_syntax_indicator", &self.section_syntax_indicator())
            .field("section_length", &self.section_length())
            .field("crc32", &self.crc32())
            .finish()
    }
}
