//! Tests for the output sink.

use crate::sink::{LINE_BUF, Sink, outf};

#[test]
fn writes_append_in_order() {
    let mut out = Vec::new();
    {
        let mut sink = Sink::writer(&mut out);
        outf!(sink, "a{}", 1).unwrap();
        sink.raw("b").unwrap();
        outf!(sink, "c{}", 2).unwrap();
    }
    assert_eq!(out, b"a1bc2");
}

#[test]
fn formatted_path_truncates_at_line_buffer() {
    let long = "x".repeat(LINE_BUF * 2);
    let mut out = Vec::new();
    {
        let mut sink = Sink::writer(&mut out);
        outf!(sink, "{long}").unwrap();
    }
    assert_eq!(out.len(), LINE_BUF);
    assert!(out.iter().all(|&b| b == b'x'));
}

#[test]
fn formatted_path_keeps_short_lines_intact() {
    let exact = "y".repeat(LINE_BUF);
    let mut out = Vec::new();
    {
        let mut sink = Sink::writer(&mut out);
        outf!(sink, "{exact}").unwrap();
    }
    assert_eq!(out.len(), LINE_BUF);
}

#[test]
fn raw_path_is_unbounded() {
    let long = "z".repeat(LINE_BUF * 3);
    let mut out = Vec::new();
    {
        let mut sink = Sink::writer(&mut out);
        sink.raw(&long).unwrap();
    }
    assert_eq!(out.len(), LINE_BUF * 3);
}
