mod common;

use std::io::Write;

use common::{extract_from_str, init_test_tracing, messages, CORRELATOR_LOG};
use errscan_core::api::{
    divergence_index, extract_mismatch, scan_file, ErrorBlockExtractor, ScanMode, ScanOptions,
};
use pretty_assertions::assert_eq;

#[test]
fn strips_metadata_fields_from_error_line() {
    let out = ErrorBlockExtractor::new(ScanMode::Block)
        .with_trailing_block(true)
        .extract_all(["2024-01-01-ERROR-assertion failed"]);
    assert_eq!(messages(&out), vec!["ERROR-assertion failed"]);
}

#[test]
fn next_error_line_closes_accumulated_block() {
    let out = extract_from_str(
        ScanMode::Block,
        "ERROR-a-b-msg1\ncont1\ncont2\nERROR-a-b-msg2\n",
    );
    assert_eq!(messages(&out), vec!["msg1\ncont1\ncont2\n"]);
}

#[test]
fn lone_block_at_end_of_input_is_not_emitted() {
    assert!(extract_from_str(ScanMode::Block, "ERROR-a-b-msg1\n").is_empty());
}

#[test]
fn mismatch_pair_and_divergence_from_block_text() {
    let pair = extract_mismatch("assert failed\nactual: abcXe\nexpected: abcYe\n").unwrap();
    assert_eq!(pair.actual, "abcXe");
    assert_eq!(pair.expected, "abcYe");
    assert_eq!(divergence_index(&pair.actual, &pair.expected), 3);
}

#[test]
fn identical_strings_fall_back_to_last_index() {
    assert_eq!(divergence_index("abc", "abc"), 2);
}

#[test]
fn block_without_markers_still_emits_message() {
    let out = extract_from_str(ScanMode::Block, "x-y-ERROR-assert failed\nERROR-a-b-next\n");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].message, "assert failed\n");
    assert!(out[0].mismatch.is_none());
}

#[test]
fn correlator_log_block_mode() {
    init_test_tracing();
    let out = extract_from_str(ScanMode::Block, CORRELATOR_LOG);
    assert_eq!(out.len(), 3);
    assert_eq!(
        out.iter().map(|e| e.line).collect::<Vec<_>>(),
        vec![4, 8, 9]
    );

    assert!(out[0]
        .message
        .starts_with(" Asserts - assertEquals failed in 01_arith\nactual: 1234X678\n"));
    // The INFO line between the two ERROR lines is continuation text of the first block.
    assert!(out[0].message.ends_with("from file 02_strings.mon\n"));
    assert_eq!(out[0].divergence, Some(4));

    assert_eq!(out[1].message, " Asserts - assertTrue failed in 02_strings\n");
    assert_eq!(out[1].mismatch, None);

    let pair = out[2].mismatch.as_ref().unwrap();
    assert_eq!((pair.actual.as_str(), pair.expected.as_str()), ("done", "done"));
    assert_eq!(out[2].divergence, Some(3));
}

#[test]
fn correlator_log_trailing_block_on_request() {
    let out = ErrorBlockExtractor::new(ScanMode::Block)
        .with_trailing_block(true)
        .extract_all(CORRELATOR_LOG.split_inclusive('\n'));
    assert_eq!(out.len(), 4);
    assert_eq!(out[3].line, 13);
    assert_eq!(out[3].divergence, Some(0));
}

#[test]
fn correlator_log_line_mode() {
    let out = extract_from_str(ScanMode::Line, CORRELATOR_LOG);
    assert_eq!(
        messages(&out),
        vec![
            " Asserts - assertEquals failed in 01_arith\n",
            " Asserts - assertTrue failed in 02_strings\n",
            " Asserts - assertEquals failed in 03_same\n",
            " Asserts - assertEquals failed in 04_tail\n",
        ]
    );
}

#[test]
fn rescanning_a_file_is_idempotent() {
    init_test_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CORRELATOR_LOG.as_bytes()).unwrap();

    let opts = ScanOptions::default();
    let first = scan_file(file.path(), &opts).unwrap();
    let second = scan_file(file.path(), &opts).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.lines, 15);
}

#[test]
fn independent_extractors_share_no_state() {
    let mut a = ErrorBlockExtractor::new(ScanMode::Block);
    let mut b = ErrorBlockExtractor::new(ScanMode::Block);

    assert!(a.feed_line("x-y-ERROR-open in a\n").is_none());
    assert!(b.feed_line("unrelated noise\n").is_none());
    assert!(a.is_block_open());
    assert!(!b.is_block_open());

    let closed = a.feed_line("x-y-ERROR-second\n").unwrap();
    assert_eq!(closed.message, "open in a\n");
    assert!(b.finish().is_none());
}
