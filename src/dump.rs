//! Loading `key=value` pairs into a [`ByteTable`] and printing its buckets.

use std::io::{self, BufRead, Write};

use chaintable::ByteTable;
use log::{trace, warn};

use crate::DumpError;

/// Splits one input line. Blank lines and `#` comments yield `None`.
pub fn parse_pair(line: usize, text: &str) -> Result<Option<(&str, &str)>, DumpError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    match trimmed.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(Some((key, value))),
        _ => Err(DumpError::MalformedLine {
            line,
            text: text.to_string(),
        }),
    }
}

/// Inserts every pair; returns how many were inserted
pub fn load_pairs<'a, I>(table: &mut ByteTable<String>, pairs: I) -> Result<usize, DumpError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut inserted = 0;
    for (i, text) in pairs.into_iter().enumerate() {
        if let Some((key, value)) = parse_pair(i + 1, text)? {
            table.insert(key, value.to_string())?;
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Like [`load_pairs`], reading lines from `input`. Malformed lines are
/// skipped with a warning rather than aborting the whole load.
pub fn load_reader<R: BufRead>(table: &mut ByteTable<String>, input: R) -> Result<usize, DumpError> {
    let mut inserted = 0;
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        match parse_pair(i + 1, &line) {
            Ok(Some((key, value))) => {
                table.insert(key, value.to_string())?;
                inserted += 1;
            }
            Ok(None) => trace!(target: "load_reader", "skipping line {}", i + 1),
            Err(e) => warn!("{e}"),
        }
    }
    Ok(inserted)
}

/// Prints every non-empty bucket, chains head first:
///
/// ```text
/// Bucket #4:
///   pluto14 = Vartika (0xdf8bc254)
/// ```
pub fn render<W: Write>(table: &ByteTable<String>, out: &mut W) -> io::Result<()> {
    for idx in 0..table.bucket_count() {
        let Some(chain) = table.bucket(idx) else {
            break;
        };
        if chain.len() == 0 {
            continue;
        }

        writeln!(out, "Bucket #{idx}:")?;
        for node in chain {
            writeln!(
                out,
                "  {} = {} ({:#x})",
                String::from_utf8_lossy(node.key().as_bytes()),
                node.value(),
                node.hash()
            )?;
        }
    }
    Ok(())
}

pub fn render_stats<W: Write>(table: &ByteTable<String>, out: &mut W) -> io::Result<()> {
    let occupied = table.chain_lens().filter(|&l| l > 0).count();
    writeln!(
        out,
        "entries: {}, buckets: {} ({} occupied), load factor: {:.2}, longest chain: {}",
        table.len(),
        table.bucket_count(),
        occupied,
        table.load_factor(),
        table.longest_chain()
    )
}
