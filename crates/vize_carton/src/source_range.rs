//! Source-map primitives shared by the rope buffer and the template
//! transform, independent of any particular mapping *format* consumer.
//!
//! The representation kept here is a simple sorted list of segments
//! (`SourceMapping`), each mapping a generated-offset to an original-offset.
//! That's enough to answer "where did this generated byte come from",
//! which is all the compiler itself needs; encoding to the standard
//! base64-VLQ "mappings" string is provided as an output format but is not
//! required to round-trip through this crate.

use std::cmp::Ordering;

/// A half-open byte range `[start, end)` in some source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start: u32,
    pub end: u32,
}

impl SourceRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One generated-offset -> original-offset correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingData {
    pub generated_offset: u32,
    pub original_offset: u32,
    pub original_line: u32,
    pub original_column: u32,
}

/// A single recorded mapping, covering `len` generated bytes starting at
/// `generated_offset` that correspond 1:1 (byte for byte) to original bytes
/// starting at `original_offset`. Synthesized text (no original counterpart)
/// is recorded with `original_offset = None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMapping {
    pub generated_offset: u32,
    pub len: u32,
    pub original_offset: Option<u32>,
}

/// An append-only, offset-sorted collection of mappings for one output file.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    mappings: Vec<SourceMapping>,
    source_name: String,
    source_content: String,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source_name: impl Into<String>, source_content: impl Into<String>) -> Self {
        Self {
            mappings: Vec::new(),
            source_name: source_name.into(),
            source_content: source_content.into(),
        }
    }

    /// Record that `len` generated bytes at `generated_offset` map 1:1 onto
    /// original bytes starting at `original_offset`.
    pub fn add_copy(&mut self, generated_offset: u32, original_offset: u32, len: u32) {
        if len == 0 {
            return;
        }
        self.mappings.push(SourceMapping {
            generated_offset,
            len,
            original_offset: Some(original_offset),
        });
    }

    /// Record `len` generated bytes at `generated_offset` with no original
    /// counterpart (synthesized text, e.g. a helper import).
    pub fn add_synthesized(&mut self, generated_offset: u32, len: u32) {
        if len == 0 {
            return;
        }
        self.mappings.push(SourceMapping {
            generated_offset,
            len,
            original_offset: None,
        });
    }

    pub fn mappings(&self) -> &[SourceMapping] {
        &self.mappings
    }

    /// Resolve the original offset, if any, that produced `generated_offset`.
    pub fn resolve(&self, generated_offset: u32) -> Option<u32> {
        let idx = self
            .mappings
            .partition_point(|m| m.generated_offset <= generated_offset);
        if idx == 0 {
            return None;
        }
        let m = &self.mappings[idx - 1];
        if generated_offset < m.generated_offset + m.len {
            m.original_offset
                .map(|orig| orig + (generated_offset - m.generated_offset))
        } else {
            None
        }
    }

    /// Encode as a (line, column) decoded-mapping list against `original`,
    /// suitable for feeding into a VLQ encoder or a JSON `"mappings"` field.
    pub fn to_decoded(&self, original: &str, generated: &str) -> Vec<MappingData> {
        let original_lines = LineIndex::new(original);
        let generated_lines = LineIndex::new(generated);
        let mut out = Vec::with_capacity(self.mappings.len());
        for m in &self.mappings {
            let Some(orig) = m.original_offset else {
                continue;
            };
            let (line, column) = original_lines.line_col(orig);
            let _ = generated_lines; // generated-side line/col is derived by the consumer
            out.push(MappingData {
                generated_offset: m.generated_offset,
                original_offset: orig,
                original_line: line,
                original_column: column,
            });
        }
        out
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn source_content(&self) -> &str {
        &self.source_content
    }
}

/// Byte-offset -> (line, column) lookup, built once per source text.
struct LineIndex {
    /// Byte offset of the start of each line.
    line_starts: Vec<u32>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { line_starts }
    }

    fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let col = offset - self.line_starts[line];
        (line as u32, col)
    }
}

/// Base64-VLQ encode a single signed integer (source-map spec encoding).
fn encode_vlq(value: i64) -> String {
    const ALPHABET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut value = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    let mut out = String::new();
    loop {
        let mut digit = (value & 0b11111) as u8;
        value >>= 5;
        if value > 0 {
            digit |= 0b100000;
        }
        out.push(ALPHABET[digit as usize] as char);
        if value == 0 {
            break;
        }
    }
    out
}

/// Encode decoded mappings into a single `"mappings"` string, one segment
/// group per generated line, relative-delta encoded per the source-map v3
/// spec. `generated` is needed to know where generated-line boundaries fall.
pub fn encode_mappings(decoded: &[MappingData], generated: &str) -> String {
    let generated_lines = LineIndex::new(generated);
    let mut by_line: Vec<Vec<&MappingData>> = vec![Vec::new(); generated_lines.line_starts.len()];
    for m in decoded {
        let (line, _) = generated_lines.line_col(m.generated_offset);
        by_line[line as usize].push(m);
    }

    let mut prev_original_line = 0i64;
    let mut prev_original_column = 0i64;
    let mut out = String::new();
    for (i, segs) in by_line.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let mut prev_generated_column = 0i64;
        let mut sorted = segs.clone();
        sorted.sort_by(|a, b| a.generated_offset.cmp(&b.generated_offset));
        for (j, m) in sorted.iter().enumerate() {
            let (_, gcol) = generated_lines.line_col(m.generated_offset);
            if j > 0 {
                out.push(',');
            }
            out.push_str(&encode_vlq(gcol as i64 - prev_generated_column));
            out.push_str(&encode_vlq(0)); // single-source file
            out.push_str(&encode_vlq(m.original_line as i64 - prev_original_line));
            out.push_str(&encode_vlq(m.original_column as i64 - prev_original_column));
            prev_generated_column = gcol as i64;
            prev_original_line = m.original_line as i64;
            prev_original_column = m.original_column as i64;
        }
    }
    out
}

impl PartialOrd for SourceMapping {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceMapping {
    fn cmp(&self, other: &Self) -> Ordering {
        self.generated_offset.cmp(&other.generated_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_finds_containing_segment() {
        let mut map = SourceMap::new();
        map.add_copy(0, 100, 10);
        map.add_synthesized(10, 5);
        map.add_copy(15, 110, 10);

        assert_eq!(map.resolve(5), Some(105));
        assert_eq!(map.resolve(12), None);
        assert_eq!(map.resolve(20), Some(115));
        assert_eq!(map.resolve(9999), None);
    }

    #[test]
    fn vlq_roundtrip_small_values() {
        assert_eq!(encode_vlq(0), "A");
        assert_eq!(encode_vlq(-1), "D");
    }
}
