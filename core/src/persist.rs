//! Text index file: one line per word, `word docId count [docId count ...]`.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{FormatError, FormatErrorKind, IndexError};
use crate::tokenizer::is_word;
use crate::{CounterSet, DocId, Index};

pub fn save_index<P: AsRef<Path>>(path: P, index: &Index) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_index(&mut out, index)?;
    out.flush()
}

pub fn load_index<P: AsRef<Path>>(path: P) -> Result<Index, IndexError> {
    let f = File::open(path)?;
    read_index(BufReader::new(f))
}

/// Write every word on its own line, words and ids in ascending order.
pub fn write_index<W: Write>(out: &mut W, index: &Index) -> std::io::Result<()> {
    for (word, counters) in index.iter() {
        out.write_all(word.as_bytes())?;
        for (doc_id, count) in counters.iter() {
            write!(out, " {doc_id} {count}")?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Parse a whole index. Any malformed line fails the load; blank lines are skipped.
pub fn read_index<R: BufRead>(mut reader: R) -> Result<Index, IndexError> {
    let mut index = Index::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 { break; }
        line_no += 1;
        let line = std::str::from_utf8(&buf).map_err(|_| FormatError {
            line: line_no,
            kind: FormatErrorKind::NotUtf8(String::from_utf8_lossy(&buf).trim_end().to_string()),
        })?;
        if line.trim().is_empty() { continue; }
        let (word, counters) = parse_line(line).map_err(|kind| FormatError { line: line_no, kind })?;
        if !seen.insert(word.clone()) {
            return Err(FormatError { line: line_no, kind: FormatErrorKind::DuplicateWord(word) }.into());
        }
        index.insert(word, counters);
    }
    tracing::debug!(words = index.len(), "index loaded");
    Ok(index)
}

fn parse_line(line: &str) -> Result<(String, CounterSet), FormatErrorKind> {
    let mut fields = line.split_whitespace();
    let word = fields.next().unwrap_or_default();
    if !is_word(word) {
        return Err(FormatErrorKind::InvalidWord(word.to_string()));
    }

    let mut counters = CounterSet::new();
    while let Some(id_field) = fields.next() {
        let Some(count_field) = fields.next() else {
            return Err(FormatErrorKind::UnpairedField(word.to_string()));
        };
        let doc_id = positive(id_field)?;
        let count = positive(count_field)?;
        if counters.set(doc_id, count).is_some() {
            return Err(FormatErrorKind::DuplicateDoc { word: word.to_string(), doc_id });
        }
    }
    Ok((word.to_string(), counters))
}

fn positive(field: &str) -> Result<DocId, FormatErrorKind> {
    let invalid = || FormatErrorKind::InvalidNumber(field.to_string());
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match field.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    }
}
