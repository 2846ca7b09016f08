mod common;

use common::*;
use socpack_core::export::write_csv;
use socpack_core::facet::{FacetFilter, facet_columns, unique_values};
use socpack_core::policy::ExportLayout;
use socpack_core::{Policy, ingest};

#[test]
fn filtered_rows_export_with_kept_columns() {
    let other = "Tracking No,Current Station,Receive Status,Remark\nC1,CEB,Pending Receive,\"a \"\"b\"\"\"\n";
    let zip = build_zip(&[("a.csv", &file_a()), ("c.csv", other)]);
    let ds = ingest(&zip, None, None).unwrap();

    let policy = Policy::default();
    assert_eq!(
        facet_columns(&ds.headers, &policy),
        ["Current Station", "Receive Status"]
    );
    assert_eq!(unique_values(&ds.rows, "Current Station"), ["CEB", "MNL"]);

    let mut filter = FacetFilter::new();
    filter.toggle("Current Station", "CEB");
    let rows = filter.apply(&ds.rows);
    assert_eq!(rows.len(), 1);

    // drop "Current Station" only
    let layout = ExportLayout {
        dropped_columns: vec![1],
    };
    let mut out = Vec::new();
    write_csv(&mut out, &ds.headers, rows, &layout).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Tracking No,Receive Status,Remark\nC1,Pending Receive,\"a \"\"b\"\"\"\n"
    );
}

#[test]
fn default_layout_on_narrow_dataset_keeps_first_two_columns() {
    let zip = build_zip(&[("a.csv", &file_a())]);
    let ds = ingest(&zip, None, None).unwrap();
    let mut out = Vec::new();
    let n = write_csv(&mut out, &ds.headers, &ds.rows, &ExportLayout::default()).unwrap();
    assert_eq!(n, 5);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().next(), Some("Tracking No,Current Station"));
    assert_eq!(text.lines().nth(1), Some("A1,MNL"));
}
