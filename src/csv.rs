// src/csv.rs
use std::borrow::Cow;
use std::io::{self, Write};
use std::mem::take;

use encoding_rs::{Encoding, GBK};

pub const UTF8_BOM: &str = "\u{feff}";
pub const SEP: char = ',';

/* ---------------- Encodings ---------------- */

/// Encodings tried, in order, when reading a vendor export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Gbk,
    Gb2312,
    Utf8Sig,
}

pub const ENCODING_ATTEMPTS: [SourceEncoding; 4] = [
    SourceEncoding::Utf8,
    SourceEncoding::Gbk,
    SourceEncoding::Gb2312,
    SourceEncoding::Utf8Sig,
];

impl SourceEncoding {
    pub fn label(self) -> &'static str {
        match self {
            SourceEncoding::Utf8    => "utf-8",
            SourceEncoding::Gbk     => "gbk",
            SourceEncoding::Gb2312  => "gb2312",
            SourceEncoding::Utf8Sig => "utf-8-sig",
        }
    }

    /// Strict decode: any malformed sequence fails the attempt.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            SourceEncoding::Utf8 => std::str::from_utf8(bytes)
                .ok()
                .map(|s| s.strip_prefix(UTF8_BOM).unwrap_or(s).to_string()),
            SourceEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM.as_bytes()).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_string)
            }
            SourceEncoding::Gbk => decode_legacy(GBK, bytes),
            SourceEncoding::Gb2312 => {
                // WHATWG maps the gb2312 label onto GBK; kept as its own step so the
                // attempt sequence matches what uploads have always been read with.
                let enc = Encoding::for_label(b"gb2312").unwrap_or(GBK);
                decode_legacy(enc, bytes)
            }
        }
    }
}

fn decode_legacy(enc: &'static Encoding, bytes: &[u8]) -> Option<String> {
    enc.decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

/// Decode + parse with the first encoding that yields a usable header row.
pub fn decode_rows(bytes: &[u8]) -> Option<(SourceEncoding, Vec<Vec<String>>)> {
    for enc in ENCODING_ATTEMPTS {
        let Some(text) = enc.decode(bytes) else {
            logd!("CSV: {} decode failed", enc.label());
            continue;
        };
        let rows = parse_rows(&text, SEP);
        let header_ok = rows
            .first()
            .map(|h| h.iter().any(|c| !c.trim().is_empty()))
            .unwrap_or(false);
        if header_ok {
            return Some((enc, rows));
        }
        logd!("CSV: {} decoded but no header row", enc.label());
    }
    None
}

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing row without newline, even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header + rows as one CSV string, optionally BOM-prefixed.
pub fn rows_to_string(headers: &[String], rows: &[Vec<String>], bom: bool) -> String {
    let mut buf: Vec<u8> = Vec::new();
    if bom {
        buf.extend_from_slice(UTF8_BOM.as_bytes());
    }
    let _ = write_row(&mut buf, headers, SEP);
    for r in rows {
        let _ = write_row(&mut buf, r, SEP);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quotes_and_crlf() {
        let rows = parse_rows("a,\"b,c\",\"d\"\"e\"\r\n1,2,3\r\n", ',');
        assert_eq!(rows, vec![strs!["a", "b,c", "d\"e"], strs!["1", "2", "3"]]);
    }

    #[test]
    fn skips_blank_lines_and_flushes_tail() {
        let rows = parse_rows("h1,h2\n\nx,y", ',');
        assert_eq!(rows, vec![strs!["h1", "h2"], strs!["x", "y"]]);
    }

    #[test]
    fn write_quotes_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &strs!["12,345", "plain", "say \"hi\""], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"12,345\",plain,\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn gbk_bytes_fall_through_to_gbk() {
        let (bytes, _, _) = GBK.encode("指数名称,PE\n沪深300,12.5\n");
        let (enc, rows) = decode_rows(&bytes).unwrap();
        assert_eq!(enc, SourceEncoding::Gbk);
        assert_eq!(rows[0], strs!["指数名称", "PE"]);
    }

    #[test]
    fn utf8_bom_is_dropped() {
        let text = format!("{}指数名称,PE\n", UTF8_BOM);
        let (enc, rows) = decode_rows(text.as_bytes()).unwrap();
        assert_eq!(enc, SourceEncoding::Utf8);
        assert_eq!(rows[0][0], "指数名称");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(decode_rows(b"").is_none());
        assert!(decode_rows(b"\n\n").is_none());
    }

    #[test]
    fn bom_prefix_on_output() {
        let s = rows_to_string(&strs!["a"], &[strs!["1"]], true);
        assert!(s.starts_with(UTF8_BOM));
        assert!(s.ends_with("a\n1\n"));
    }
}
