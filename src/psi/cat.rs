use crate::constants::*;
use crate::error::PsiError;
use crate::psi::descriptor::DescriptorLoop;
use crate::psi::section::Psi;

/// Conditional Access Table: the long header followed by one descriptor
/// loop that runs up to the CRC.
#[derive(Clone, Copy)]
pub struct Cat<'a> {
    psi: Psi<'a>,
    descriptors: DescriptorLoop<'a>,
}

impl<'a> Cat<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, PsiError> {
        let psi = Psi::with_long_header(data, "CAT", CAT_MIN_LEN, 0)?;
        let descriptors = DescriptorLoop::new(&data[LONG_HEADER_END..psi.body_end()])?;
        log::debug!("CAT v{} with {} descriptors", psi.version_number(), descriptors.len());
        Ok(Self { psi, descriptors })
    }

    pub fn psi(&self) -> Psi<'a> {
        self.psi
    }

    pub fn version_number(&self) -> u8 {
        self.psi.version_number()
    }

    pub fn current_next_indicator(&self) -> u8 {
        self.psi.current_next_indicator()
    }

    pub fn section_number(&self) -> u8 {
        self.psi.section_number()
    }

    pub fn last_section_number(&self) -> u8 {
        self.psi.last_section_number()
    }

    pub fn descriptors(&self) -> DescriptorLoop<'a> {
        self.descriptors
    }
}

impl std::fmt::Debug for Cat<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cat")
            .field("version_number", &self.version_number())
            .field("descriptors", &self.descriptors)
            .finish()
    }
}
