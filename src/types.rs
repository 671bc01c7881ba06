use std::fmt;

use serde::Serialize;

use crate::constants::{CAT_PID, CAT_TABLE_ID, NULL_PID, PAT_PID, PAT_TABLE_ID, PID_MASK, PMT_TABLE_ID};

/// program_number as carried in PAT entries and the PMT header
pub type ProgramNumber = u16;

/// 13-bit packet identifier. The top three bits are always masked off.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Pid(u16);

impl Pid {
    pub const PAT: Pid = Pid(PAT_PID);
    pub const CAT: Pid = Pid(CAT_PID);
    pub const NULL: Pid = Pid(NULL_PID);

    pub const fn new(v: u16) -> Self {
        Pid(v & PID_MASK)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Reads a PID from the two bytes at `off`.
    pub(crate) fn read(b: &[u8], off: usize) -> Self {
        Pid::new(u16::from_be_bytes([b[off], b[off + 1]]))
    }
}

impl From<u16> for Pid {
    fn from(v: u16) -> Self {
        Pid::new(v)
    }
}

impl From<Pid> for u16 {
    fn from(pid: Pid) -> u16 {
        pid.0
    }
}

impl PartialEq<u16> for Pid {
    fn eq(&self, other: &u16) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pid(0x{:04X})", self.0)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// table_id byte of a section
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TableId(pub u8);

impl TableId {
    pub const PAT: TableId = TableId(PAT_TABLE_ID);
    pub const CAT: TableId = TableId(CAT_TABLE_ID);
    pub const PMT: TableId = TableId(PMT_TABLE_ID);

    pub fn name(self) -> &'static str {
        match self.0 {
            PAT_TABLE_ID => "program_association_section",
            CAT_TABLE_ID => "conditional_access_section",
            PMT_TABLE_ID => "TS_program_map_section",
            0x03 => "TS_description_section",
            0x40..=0xFE => "user private",
            0xFF => "forbidden",
            _ => "reserved",
        }
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId(0x{:02X})", self.0)
    }
}

impl PartialEq<u8> for TableId {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

/// ISO/IEC 13818-1 Table 2-34, plus the common ATSC / DVB private types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamType {
    Mpeg1Video,
    Mpeg2Video,
    Mpeg1Audio,
    Mpeg2Audio,
    PrivateSections,
    PrivateData,
    Dsmcc,
    AacAdts,
    Mpeg4Visual,
    AacLatm,
    Metadata,
    H264,
    H265,
    Ac3,
    Scte35,
    Eac3,
    Unknown(u8),
}

impl StreamType {
    pub fn name(self) -> &'static str {
        match self {
            StreamType::Mpeg1Video => "MPEG-1 Video",
            StreamType::Mpeg2Video => "MPEG-2 Video",
            StreamType::Mpeg1Audio => "MPEG-1 Audio",
            StreamType::Mpeg2Audio => "MPEG-2 Audio",
            StreamType::PrivateSections => "Private Sections",
            StreamType::PrivateData => "PES Private Data",
            StreamType::Dsmcc => "DSM-CC",
            StreamType::AacAdts => "AAC (ADTS)",
            StreamType::Mpeg4Visual => "MPEG-4 Visual",
            StreamType::AacLatm => "AAC (LATM)",
            StreamType::Metadata => "Metadata",
            StreamType::H264 => "H.264",
            StreamType::H265 => "H.265",
            StreamType::Ac3 => "AC-3",
            StreamType::Scte35 => "SCTE-35",
            StreamType::Eac3 => "E-AC-3",
            StreamType::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for StreamType {
    fn from(d: u8) -> Self {
        match d {
            0x01 => StreamType::Mpeg1Video,
            0x02 => StreamType::Mpeg2Video,
            0x03 => StreamType::Mpeg1Audio,
            0x04 => StreamType::Mpeg2Audio,
            0x05 => StreamType::PrivateSections,
            0x06 => StreamType::PrivateData,
            0x0A..=0x0D => StreamType::Dsmcc,
            0x0F => StreamType::AacAdts,
            0x10 => StreamType::Mpeg4Visual,
            0x11 => StreamType::AacLatm,
            0x15 => StreamType::Metadata,
            0x1B => StreamType::H264,
            0x24 => StreamType::H265,
            0x81 => StreamType::Ac3,
            0x86 => StreamType::Scte35,
            0x87 => StreamType::Eac3,
            _ => StreamType::Unknown(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_is_masked_to_13_bits() {
        assert_eq!(Pid::new(0xFFC8).value(), 0x1FC8);
        assert_eq!(Pid::from(0xE010).value(), 0x0010);
        assert_eq!(Pid::read(&[0x00, 0xE1, 0x81], 1), Pid::new(0x0181));
    }

    #[test]
    fn pid_display_is_hex() {
        assert_eq!(Pid::new(0x42A).to_string(), "0x042A");
    }

    #[test]
    fn stream_type_names() {
        assert_eq!(StreamType::from(0x1B), StreamType::H264);
        assert_eq!(StreamType::from(0x0D), StreamType::Dsmcc);
        assert_eq!(StreamType::from(0x0F).name(), "AAC (ADTS)");
        assert_eq!(StreamType::from(0xC0), StreamType::Unknown(0xC0));
    }

    #[test]
    fn table_id_names() {
        assert_eq!(TableId::PAT.name(), "program_association_section");
        assert_eq!(TableId(0x42).name(), "user private");
    }
}
