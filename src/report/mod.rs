//! Serializable reports for decoded PSI sections

use serde::Serialize;

use crate::psi::{Descriptor, DescriptorLoop, ProgramElementInfo, Section};

/// JSON structure for one descriptor
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorJson {
    pub tag: u8,
    pub length: u8,
    pub payload: String,
}

/// JSON structure for one PAT entry
#[derive(Debug, Clone, Serialize)]
pub struct ProgramJson {
    pub program_number: u16,
    pub pmt_pid: u16,
}

/// JSON structure for one PMT elementary stream
#[derive(Debug, Clone, Serialize)]
pub struct StreamJson {
    pub stream_type: u8,
    pub codec: &'static str,
    pub elementary_pid: u16,
    pub es_info_length: usize,
    pub descriptors: Vec<DescriptorJson>,
}

/// Table-specific part of a report
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableJson {
    Pat {
        transport_stream_id: u16,
        version_number: u8,
        current_next_indicator: u8,
        section_number: u8,
        last_section_number: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        network_pid: Option<u16>,
        programs: Vec<ProgramJson>,
    },
    Cat {
        version_number: u8,
        current_next_indicator: u8,
        section_number: u8,
        last_section_number: u8,
        descriptors: Vec<DescriptorJson>,
    },
    Pmt {
        program_number: u16,
        version_number: u8,
        current_next_indicator: u8,
        section_number: u8,
        last_section_number: u8,
        pcr_pid: u16,
        program_info_length: usize,
        descriptors: Vec<DescriptorJson>,
        streams: Vec<StreamJson>,
    },
}

/// Complete report for a single section
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub decoded_at: String,
    pub table_id: u8,
    pub table_name: &'static str,
    pub section_syntax_indicator: u8,
    pub section_length: usize,
    pub crc32: String,
    #[serde(flatten)]
    pub table: TableJson,
}

fn hex_string(b: &[u8]) -> String {
    b.iter().map(|x| format!("{x:02X}")).collect()
}

fn descriptor_json(d: Descriptor<'_>) -> DescriptorJson {
    DescriptorJson {
        tag: d.tag(),
        length: d.length(),
        payload: hex_string(d.payload()),
    }
}

fn descriptors_json(lp: DescriptorLoop<'_>) -> Vec<DescriptorJson> {
    lp.iter().map(descriptor_json).collect()
}

fn stream_json(e: ProgramElementInfo<'_>) -> StreamJson {
    StreamJson {
        stream_type: e.stream_type(),
        codec: e.stream_kind().name(),
        elementary_pid: e.elementary_pid().value(),
        es_info_length: e.es_info_length(),
        descriptors: descriptors_json(e.descriptors()),
    }
}

/// Report generator for decoded sections
pub struct Reporter;

impl Reporter {
    pub fn create_report(section: &Section<'_>) -> SectionReport {
        let psi = section.psi();
        let table = match section {
            Section::Pat(pat) => {
                let mut programs: Vec<ProgramJson> = pat
                    .program_pid_map()
                    .into_iter()
                    .map(|(program_number, pid)| ProgramJson { program_number, pmt_pid: pid.value() })
                    .collect();
                programs.sort_by_key(|p| p.program_number);
                TableJson::Pat {
                    transport_stream_id: pat.transport_stream_id(),
                    version_number: pat.version_number(),
                    current_next_indicator: pat.current_next_indicator(),
                    section_number: pat.section_number(),
                    last_section_number: pat.last_section_number(),
                    network_pid: pat.network_pid().ok().map(|p| p.value()),
                    programs,
                }
            }
            Section::Cat(cat) => TableJson::Cat {
                version_number: cat.version_number(),
                current_next_indicator: cat.current_next_indicator(),
                section_number: cat.section_number(),
                last_section_number: cat.last_section_number(),
                descriptors: descriptors_json(cat.descriptors()),
            },
            Section::Pmt(pmt) => TableJson::Pmt {
                program_number: pmt.program_number(),
                version_number: pmt.version_number(),
                current_next_indicator: pmt.current_next_indicator(),
                section_number: pmt.section_number(),
                last_section_number: pmt.last_section_number(),
                pcr_pid: pmt.pcr_pid().value(),
                program_info_length: pmt.program_info_length(),
                descriptors: descriptors_json(pmt.descriptors()),
                streams: pmt.element_info().iter().map(stream_json).collect(),
            },
        };

        SectionReport {
            decoded_at: chrono::Utc::now().to_rfc3339(),
            table_id: psi.table_id().0,
            table_name: psi.table_id().name(),
            section_syntax_indicator: psi.section_syntax_indicator(),
            section_length: psi.section_length(),
            crc32: hex_string(psi.crc32()),
            table,
        }
    }

    pub fn to_json(report: &SectionReport, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn pat_report_sorted_without_network_entry() {
        let data = hex!(
            "00 B0 1D 7F E5 ED 00 00 00 00 E0 10 04 28 E4 28 04 29 E4 29"
            "04 2A E4 2A 05 A8 FF C8 8E FD B2 A4"
        );
        let rep = Reporter::create_report(&Section::parse(&data).unwrap());
        assert_eq!(rep.crc32, "8EFDB2A4");
        assert_eq!(rep.section_length, 29);
        let TableJson::Pat { network_pid, programs, .. } = &rep.table else {
            panic!("expected a PAT report, got {:?}", rep.table);
        };
        assert_eq!(*network_pid, Some(0x0010));
        let numbers: Vec<u16> = programs.iter().map(|p| p.program_number).collect();
        assert_eq!(numbers, [0x0428, 0x0429, 0x042A, 0x05A8]);
        assert_eq!(programs[3].pmt_pid, 0x1FC8);
    }

    #[test]
    fn cat_json() {
        let data = hex!("01 B0 10 FF FF F9 00 00 F6 05 00 0E E0 71 01 04 CC 5F AB");
        let rep = Reporter::create_report(&Section::parse(&data).unwrap());
        let json: serde_json::Value =
            serde_json::from_str(&Reporter::to_json(&rep, false).unwrap()).unwrap();
        assert_eq!(json["kind"], "cat");
        assert_eq!(json["table_name"], "conditional_access_section");
        assert_eq!(json["version_number"], 28);
        assert_eq!(json["descriptors"][0]["tag"], 0xF6);
        assert_eq!(json["descriptors"][0]["payload"], "000EE07101");
    }
}
