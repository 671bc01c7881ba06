use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PsiError {
    /// The buffer, or a length-declared region inside it, ends before the
    /// layout says it should.
    #[error("{field} too short (expected {expected} bytes, found {actual})")]
    TooShort {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("PAT has no network PID entry (program_number 0x0000)")]
    NoNetworkId,

    #[error("unsupported table_id 0x{0:02X}")]
    UnsupportedTable(u8),
}

impl PsiError {
    pub(crate) fn too_short(field: &'static str, expected: usize, actual: usize) -> Self {
        log::warn!("{field}: need {expected} bytes, have {actual}");
        PsiError::TooShort { field, expected, actual }
    }
}
