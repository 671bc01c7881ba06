use std::collections::HashMap;

use assert_matches::assert_matches;
use hex_literal::hex;
use mpegts_psi::dump::{self, Options, TableKind};
use mpegts_psi::{Cat, Pat, Pid, Pmt, PsiError, Section, TableId};

const PAT: [u8; 32] = hex!(
    "00 B0 1D 7F E5 ED 00 00 00 00 E0 10 04 28 E4 28 04 29 E4 29"
    "04 2A E4 2A 05 A8 FF C8 8E FD B2 A4"
);

const CAT: [u8; 19] = hex!("01 B0 10 FF FF F9 00 00 F6 05 00 0E E0 71 01 04 CC 5F AB");

const PMT: [u8; 102] = hex!(
    "02 B0 63 05 A8 ED 00 00 E1 01 F0 06 C1 01 88 DE 01 EF 1B E1"
    "81 F0 03 52 01 81 0F E1 82 F0 03 52 01 83 06 E1 84 F0 08 52"
    "01 87 FD 03 00 12 AD 0D F0 30 F0 0F 52 01 80 FD 0A 00 0D 3F"
    "2F 00 0C 00 00 FF BF 0D F0 39 F0 03 52 01 89 0D F0 3A F0 03"
    "52 01 8A 0D F0 3B F0 0A 52 01 8B FD 05 00 0D 1F FF BF FE 9B"
    "EB D9"
);

#[test]
fn pat_walkthrough() {
    let pat = Pat::new(&PAT).unwrap();
    assert_eq!(pat.psi().table_id(), TableId::PAT);
    assert_eq!(pat.psi().section_length(), 29);
    assert_eq!(pat.transport_stream_id(), 0x7FE5);
    assert_eq!(pat.version_number(), 22);
    assert_eq!(pat.network_pid().unwrap(), Pid::new(0x0010));
    assert_eq!(
        pat.program_pid_map(),
        HashMap::from([
            (0x0428, Pid::new(0x0428)),
            (0x0429, Pid::new(0x0429)),
            (0x042A, Pid::new(0x042A)),
            (0x05A8, Pid::new(0x1FC8)),
        ])
    );
}

#[test]
fn every_decoder_rejects_short_headers() {
    for len in 0..12 {
        assert_matches!(Pat::new(&PAT[..len]), Err(PsiError::TooShort { .. }), "PAT len {len}");
        assert_matches!(Pmt::new(&PMT[..len]), Err(PsiError::TooShort { .. }), "PMT len {len}");
        assert_matches!(Cat::new(&CAT[..len]), Err(PsiError::TooShort { .. }), "CAT len {len}");
    }
}

#[test]
fn cat_walkthrough() {
    let cat = Cat::new(&CAT).unwrap();
    let d: Vec<_> = cat.descriptors().iter().collect();
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].as_bytes(), &[0xF6, 0x05, 0x00, 0x0E, 0xE0, 0x71, 0x01]);
}

#[test]
fn pmt_walkthrough() {
    let pmt = Pmt::new(&PMT).unwrap();
    assert_eq!(pmt.program_number(), 0x05A8);
    assert_eq!(pmt.pcr_pid(), Pid::new(0x0101));
    assert_eq!(pmt.descriptors().len(), 2);

    let pids: Vec<u16> = pmt.element_info().iter().map(|e| e.elementary_pid().value()).collect();
    assert_eq!(pids, [0x0181, 0x0182, 0x0184, 0x1030, 0x1039, 0x103A, 0x103B]);

    // nested descriptors concatenate back to each entry's descriptor region
    for e in &pmt.element_info() {
        let joined: Vec<u8> = e.descriptors().iter().flat_map(|d| d.as_bytes().to_vec()).collect();
        assert_eq!(joined, &e.as_bytes()[5..]);
    }
}

#[test]
fn pmt_truncated_after_program_descriptors() {
    let data = hex!("02 B0 63 05 A8 ED 00 00 E1 01 F0 06 C1 01 88");
    assert_matches!(Pmt::new(&data), Err(PsiError::TooShort { .. }));
}

#[test]
fn pmt_element_overrun_is_rejected() {
    // second entry needs 9 bytes but only 8 remain before the CRC
    let data = hex!("02 B0 1A 00 01 C1 00 00 E1 00 F0 00 1B E1 00 F0 00 0F E1 01 F0 04 52 01 81 00 00 00 00");
    assert_matches!(
        Pmt::new(&data),
        Err(PsiError::TooShort { field: "element info", expected: 9, actual: 8 })
    );
}

#[test]
fn views_share_a_buffer_across_threads() {
    let buf: &'static [u8] = &PMT;
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || Pmt::new(buf).unwrap().element_info().len()))
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 7);
    }
}

#[test]
fn dump_auto_detects_table() {
    let opts = Options { table: TableKind::Auto, pretty: false, skip: 0 };
    let json: serde_json::Value = serde_json::from_str(&dump::run(&opts, &PMT).unwrap()).unwrap();
    assert_eq!(json["kind"], "pmt");
    assert_eq!(json["pcr_pid"], 0x0101);
    assert_eq!(json["streams"].as_array().unwrap().len(), 7);
    assert_eq!(json["streams"][0]["codec"], "H.264");
}

#[test]
fn dump_skips_pointer_field() {
    let mut input = vec![0x00];
    input.extend_from_slice(&CAT);
    let opts = Options { table: TableKind::Cat, pretty: true, skip: 1 };
    let out = dump::run(&opts, &input).unwrap();
    assert!(out.contains("\"kind\": \"cat\""));
}

#[test]
fn dump_reports_decode_errors() {
    let opts = Options { table: TableKind::Pat, pretty: false, skip: 0 };
    let err = dump::run(&opts, &PAT[..11]).unwrap_err();
    assert_matches!(err.downcast_ref::<PsiError>(), Some(PsiError::TooShort { .. }));

    let opts = Options { table: TableKind::Auto, pretty: false, skip: 40 };
    assert!(dump::run(&opts, &PAT).is_err());
}

#[test]
fn section_enum_matches_constructors() {
    assert_matches!(Section::parse(&PAT), Ok(Section::Pat(_)));
    assert_matches!(Section::parse(&PMT), Ok(Section::Pmt(_)));
}
