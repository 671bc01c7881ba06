use std::collections::HashMap;

use crate::constants::*;
use crate::error::PsiError;
use crate::psi::section::Psi;
use crate::types::{Pid, ProgramNumber};

/// ─────────── PAT ───────────
#[derive(Clone, Copy)]
pub struct Pat<'a> {
    psi: Psi<'a>,
}

/// One record of the program loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatEntry {
    pub program_number: ProgramNumber,
    pub pid: Pid,
}

impl PatEntry {
    pub fn is_network(&self) -> bool {
        self.program_number == NETWORK_PROGRAM_NUMBER
    }
}

impl<'a> Pat<'a> {
    /// Checks the fixed header and that the program loop is a whole number
    /// of 4-byte records inside the declared section.
    pub fn new(data: &'a [u8]) -> Result<Self, PsiError> {
        let psi = Psi::with_long_header(data, "PAT", PAT_MIN_LEN, 0)?;
        let loop_len = psi.body_end() - LONG_HEADER_END;
        if loop_len % PAT_ENTRY_LEN != 0 {
            let expected = loop_len.next_multiple_of(PAT_ENTRY_LEN);
            return Err(PsiError::too_short("PAT program loop", expected, loop_len));
        }
        log::debug!(
            "PAT ts_id=0x{:04X} v{} with {} entries",
            psi.table_id_extension(),
            psi.version_number(),
            loop_len / PAT_ENTRY_LEN
        );
        Ok(Self { psi })
    }

    pub fn psi(&self) -> Psi<'a> {
        self.psi
    }

    pub fn transport_stream_id(&self) -> u16 {
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

    /// Every record of the program loop, network entry included.
    pub fn programs(&self) -> impl Iterator<Item = PatEntry> + 'a {
        let b = &self.psi.as_bytes()[LONG_HEADER_END..self.psi.body_end()];
        b.chunks_exact(PAT_ENTRY_LEN).map(|e| PatEntry {
            program_number: u16::from_be_bytes([e[0], e[1]]),
            pid: Pid::read(e, 2),
        })
    }

    /// PID of the entry with program_number 0x0000. Last one wins if the
    /// loop repeats it.
    pub fn network_pid(&self) -> Result<Pid, PsiError> {
        self.programs()
            .filter(PatEntry::is_network)
            .last()
            .map(|e| e.pid)
            .ok_or(PsiError::NoNetworkId)
    }

    /// program_number → PMT PID, without the network entry.
    pub fn program_pid_map(&self) -> HashMap<ProgramNumber, Pid> {
        self.programs()
            .filter(|e| !e.is_network())
            .map(|e| (e.program_number, e.pid))
            .collect()
    }
}

impl std::fmt::Debug for Pat<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pat")
            .field("transport_stream_id", &self.transport_stream_id())
            .field("version_number", &self.version_number())
            .field("programs", &self.programs().collect::<Vec<_>>())
            .finish()
    }
}
