#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;

pub const HEADER: &str = "Tracking No,Current Station,Receive Status,Remark";

pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in entries {
        w.start_file(*name, SimpleFileOptions::default()).unwrap();
        w.write_all(body.as_bytes()).unwrap();
    }
    w.finish().unwrap().into_inner()
}

/// CSV text with `HEADER` followed by `(tracking, status, remark)` rows.
pub fn shipments(rows: &[(&str, &str, &str)]) -> String {
    let mut out = String::from(HEADER);
    for (id, status, remark) in rows {
        out.push('\n');
        out.push_str(&format!("{id},MNL,{status},\"{remark}\""));
    }
    out.push('\n');
    out
}

pub const QUALIFYING: &str = "Packed in another TO, Received in Manila";

/// 10 rows: 3 pending, 2 qualifying abnormal, 5 others (A1..A10).
pub fn file_a() -> String {
    shipments(&[
        ("A1", "Pending Receive", ""),
        ("A2", "In Transit", ""),
        ("A3", "Abnormal", QUALIFYING),
        ("A4", "Abnormal", "Packed in another TO"),
        ("A5", "Pending Receive", "late"),
        ("A6", "Delivered", QUALIFYING),
        ("A7", "Abnormal", "Received in Cebu"),
        ("A8", "Abnormal", QUALIFYING),
        ("A9", "", ""),
        ("A10", "Pending Receive", ""),
    ])
}

/// 5 rows: 1 qualifying abnormal, 4 others (B1..B5).
pub fn file_b() -> String {
    shipments(&[
        ("B1", "In Transit", ""),
        ("B2", "Abnormal", "Packed in another TO; Received in Davao"),
        ("B3", "Abnormal", ""),
        ("B4", "Returned", ""),
        ("B5", "In Transit", QUALIFYING),
    ])
}
