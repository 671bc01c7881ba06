//! Constants for PSI section layout (ISO/IEC 13818-1, 2.4.4)

/// Table ids handled by this crate
pub const PAT_TABLE_ID: u8 = 0x00;
pub const CAT_TABLE_ID: u8 = 0x01;
pub const PMT_TABLE_ID: u8 = 0x02;

/// Well-known PIDs
pub const PAT_PID: u16 = 0x0000;
pub const CAT_PID: u16 = 0x0001;
pub const NULL_PID: u16 = 0x1FFF;

/// Bit masks for the packed fields
pub const PID_MASK: u16 = 0x1FFF;      // 13-bit PID
pub const LENGTH_MASK: u16 = 0x0FFF;   // 12-bit section / info lengths
pub const VERSION_MASK: u8 = 0x3E;     // version_number, bits 1..5
pub const SYNTAX_INDICATOR_BIT: u8 = 0x80;

/// Bytes up to and including section_length
pub const PSI_HEADER_LEN: usize = 3;
/// table_id_extension .. last_section_number, counted inside section_length
pub const LONG_HEADER_LEN: usize = 5;
pub const CRC_LEN: usize = 4;

/// Minimum buffer sizes before each table's fixed header can be read
pub const PAT_MIN_LEN: usize = 12;
pub const CAT_MIN_LEN: usize = 9;
pub const PMT_MIN_LEN: usize = 12;

/// Offset of the first byte after last_section_number
pub const LONG_HEADER_END: usize = PSI_HEADER_LEN + LONG_HEADER_LEN;

pub const PAT_ENTRY_LEN: usize = 4;
pub const DESCRIPTOR_HEADER_LEN: usize = 2;
pub const ELEMENT_HEADER_LEN: usize = 5;
/// pcr_pid + program_info_length
pub const PMT_FIXED_LEN: usize = 4;

/// program_number reserved for the network PID entry of a PAT
pub const NETWORK_PROGRAM_NUMBER: u16 = 0x0000;
