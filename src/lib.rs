// src/lib.rs
//! Zero-copy decoders for the MPEG-TS PAT, CAT and PMT sections.

pub mod dump {
    use anyhow::Context;

    use crate::psi::{Cat, Pat, Pmt, Section};
    use crate::report::Reporter;
    use crate::types::TableId;

    /// Which decoder to apply
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
    pub enum TableKind {
        /// Dispatch on the table_id byte
        #[default]
        Auto,
        Pat,
        Cat,
        Pmt,
    }

    impl TableKind {
        fn expected_id(self) -> Option<TableId> {
            match self {
                TableKind::Auto => None,
                TableKind::Pat => Some(TableId::PAT),
                TableKind::Cat => Some(TableId::CAT),
                TableKind::Pmt => Some(TableId::PMT),
            }
        }
    }

    pub struct Options {
        pub table: TableKind,
        pub pretty: bool,
        /// Leading bytes to drop before the section starts
        pub skip: usize,
    }

    /// Decodes one section and renders it as JSON.
    pub fn run(opts: &Options, input: &[u8]) -> anyhow::Result<String> {
        let data = input
            .get(opts.skip..)
            .with_context(|| format!("cannot skip {} bytes of a {}-byte input", opts.skip, input.len()))?;

        if let (Some(want), Some(&got)) = (opts.table.expected_id(), data.first()) {
            if want != got {
                log::warn!("decoding table_id 0x{got:02X} as {:?}", opts.table);
            }
        }

        let section = match opts.table {
            TableKind::Auto => Section::parse(data),
            TableKind::Pat => Pat::new(data).map(Section::Pat),
            TableKind::Cat => Cat::new(data).map(Section::Cat),
            TableKind::Pmt => Pmt::new(data).map(Section::Pmt),
        }
        .with_context(|| format!("decoding {}-byte section", data.len()))?;

        let report = Reporter::create_report(&section);
        Ok(Reporter::to_json(&report, opts.pretty)?)
    }
}

pub mod constants;
pub mod error;
pub mod psi;
pub mod report;
pub mod types;

pub use error::PsiError;
pub use psi::{Cat, Descriptor, DescriptorLoop, ElementInfoLoop, Pat, Pmt, ProgramElementInfo, Psi, Section};
pub use types::{Pid, ProgramNumber, StreamType, TableId};
