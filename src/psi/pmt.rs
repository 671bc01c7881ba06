// psi/pmt.rs
//! Program Map Table: program descriptors, then one entry per elementary
//! stream, each carrying its own descriptor loop.

use std::fmt;
use std::iter::FusedIterator;

use crate::constants::*;
use crate::error::PsiError;
use crate::psi::descriptor::DescriptorLoop;
use crate::psi::section::Psi;
use crate::types::{Pid, ProgramNumber, StreamType};

/// 12-bit length field at `off`
fn read_length(b: &[u8], off: usize) -> usize {
    (u16::from_be_bytes([b[off], b[off + 1]]) & LENGTH_MASK) as usize
}

/// ─────────── PMT ───────────
#[derive(Clone, Copy)]
pub struct Pmt<'a> {
    psi: Psi<'a>,
    descriptors: DescriptorLoop<'a>,
    elements: ElementInfoLoop<'a>,
}

impl<'a> Pmt<'a> {
    /// Validates the header, the program descriptor loop and every
    /// elementary stream entry up front.
    pub fn new(data: &'a [u8]) -> Result<Self, PsiError> {
        let psi = Psi::with_long_header(data, "PMT", PMT_MIN_LEN, PMT_FIXED_LEN)?;

        let body_start = LONG_HEADER_END + PMT_FIXED_LEN;
        let body = &data[body_start..psi.body_end()];
        let program_info_length = read_length(data, LONG_HEADER_END + 2);
        if program_info_length > body.len() {
            return Err(PsiError::too_short("PMT program_info", program_info_length, body.len()));
        }

        let descriptors = DescriptorLoop::with_length(body, program_info_length)?;
        let elements = ElementInfoLoop::new(&body[program_info_length..])?;

        log::debug!(
            "PMT program={} v{} pcr_pid={} with {} streams",
            psi.table_id_extension(),
            psi.version_number(),
            Pid::read(data, LONG_HEADER_END),
            elements.len()
        );
        Ok(Self { psi, descriptors, elements })
    }

    pub fn psi(&self) -> Psi<'a> {
        self.psi
    }

    pub fn program_number(&self) -> ProgramNumber {
        self.psi.table_id_extension()
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

    pub fn pcr_pid(&self) -> Pid {
        Pid::read(self.psi.as_bytes(), LONG_HEADER_END)
    }

    pub fn program_info_length(&self) -> usize {
        read_length(self.psi.as_bytes(), LONG_HEADER_END + 2)
    }

    /// Program-level descriptors.
    pub fn descriptors(&self) -> DescriptorLoop<'a> {
        self.descriptors
    }

    pub fn element_info(&self) -> ElementInfoLoop<'a> {
        self.elements
    }
}

impl fmt::Debug for Pmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pmt")
            .field("program_number", &self.program_number())
            .field("version_number", &self.version_number())
            .field("pcr_pid", &self.pcr_pid())
            .field("descriptors", &self.descriptors)
            .field("element_info", &self.elements)
            .finish()
    }
}

/// One elementary stream entry of a PMT.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ProgramElementInfo<'a> {
    data: &'a [u8],
    descriptors: DescriptorLoop<'a>,
}

impl<'a> ProgramElementInfo<'a> {
    /// Decodes the entry at the start of `data`; bytes after it are ignored.
    pub fn new(data: &'a [u8]) -> Result<Self, PsiError> {
        if data.len() < ELEMENT_HEADER_LEN {
            return Err(PsiError::too_short("element info", ELEMENT_HEADER_LEN, data.len()));
        }
        let size = ELEMENT_HEADER_LEN + read_length(data, 3);
        if size > data.len() {
            return Err(PsiError::too_short("element info", size, data.len()));
        }
        let descriptors = DescriptorLoop::new(&data[ELEMENT_HEADER_LEN..size])?;
        Ok(Self { data: &data[..size], descriptors })
    }

    pub fn stream_type(&self) -> u8 {
        self.data[0]
    }

    pub fn stream_kind(&self) -> StreamType {
        StreamType::from(self.stream_type())
    }

    pub fn elementary_pid(&self) -> Pid {
        Pid::read(self.data, 1)
    }

    pub fn es_info_length(&self) -> usize {
        read_length(self.data, 3)
    }

    pub fn descriptors(&self) -> DescriptorLoop<'a> {
        self.descriptors
    }

    /// Raw entry, 5 + es_info_length bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl fmt::Debug for ProgramElementInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramElementInfo")
            .field("stream_type", &self.stream_kind())
            .field("elementary_pid", &self.elementary_pid())
            .field("descriptors", &self.descriptors)
            .finish()
    }
}

/// The element-info region of a PMT, checked so that entries tile it
/// exactly.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementInfoLoop<'a> {
    data: &'a [u8],
}

impl<'a> ElementInfoLoop<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, PsiError> {
        let mut rest = data;
        while !rest.is_empty() {
            let info = ProgramElementInfo::new(rest)?;
            rest = &rest[info.as_bytes().len()..];
        }
        Ok(Self { data })
    }

    pub fn iter(&self) -> ElementInfoIter<'a> {
        ElementInfoIter(self.data)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl<'a> IntoIterator for &ElementInfoLoop<'a> {
    type Item = ProgramElementInfo<'a>;
    type IntoIter = ElementInfoIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for ElementInfoLoop<'a> {
    type Item = ProgramElementInfo<'a>;
    type IntoIter = ElementInfoIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ElementInfoLoop<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[derive(Clone)]
pub struct ElementInfoIter<'a>(&'a [u8]);

impl<'a> Iterator for ElementInfoIter<'a> {
    type Item = ProgramElementInfo<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            return None;
        }
        // already validated by ElementInfoLoop::new, so this cannot fail
        let info = ProgramElementInfo::new(self.0).ok()?;
        self.0 = &self.0[info.as_bytes().len()..];
        Some(info)
    }
}

impl FusedIterator for ElementInfoIter<'_> {}
