//! The fgraph6 text codec: a radix-64 encoding of `(n, f, adjacency)`
//! records, one per line, with `>`-prefixed comment lines.
//!
//! Grounded on `original_source/fgraph.h` (`mapping`/`inverse_mapping`,
//! `read_fgraph6_string`). The line-oriented comment/record split has no
//! counterpart there (the original reads a single graph per process
//! invocation); it follows spec directly and is structurally the same kind
//! of job `dimacs.rs`'s `skip_comments` does for DIMACS files, just against
//! a fixed-width binary layout rather than a numeric grammar, so it's
//! spelled as plain byte indexing rather than `nom` combinators.

use crate::error::{FchoosabilityError, Result};
use crate::graph::{FVector, Graph, VertexId};

const MAX_RADIX64: usize = 63;

fn encode_6bits(x: u8) -> u8 {
    match x {
        0..=9 => b'0' + x,
        10..=35 => b'A' + (x - 10),
        36..=61 => b'a' + (x - 36),
        62 => b'@',
        63 => b'#',
        _ => unreachable!("radix-64 digit out of range: {}", x),
    }
}

fn decode_6bits(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        b'a'..=b'z' => Some(c - b'a' + 36),
        b'@' => Some(62),
        b'#' => Some(63),
        _ => None,
    }
}

fn malformed(msg: impl Into<String>) -> FchoosabilityError {
    FchoosabilityError::MalformedInput(msg.into())
}

/// Encodes `(graph, f)` as a single fgraph6 record line (no trailing
/// newline).
pub fn encode_record(graph: &Graph, f: &FVector) -> Result<String> {
    let n = graph.n();
    if n > MAX_RADIX64 {
        return Err(FchoosabilityError::OutOfRange {
            what: "number of vertices".into(),
            value: n,
            limit: MAX_RADIX64,
        });
    }
    let mut out = Vec::with_capacity(2 + n + 1 + (n * n) / 6 + 1);
    out.push(encode_6bits(n as u8));
    out.push(b'_');
    for v in 0..n {
        let fv = f.get(v);
        if fv > MAX_RADIX64 {
            return Err(FchoosabilityError::OutOfRange {
                what: format!("f({})", v),
                value: fv,
                limit: MAX_RADIX64,
            });
        }
        out.push(encode_6bits(fv as u8));
    }
    out.push(b'_');

    let mut val: u8 = 0;
    let mut bits_in_val = 0usize;
    for j in 0..n {
        for i in 0..j {
            let bit = graph.are_adjacent(i, j) as u8;
            val = (val << 1) | bit;
            bits_in_val += 1;
            if bits_in_val == 6 {
                out.push(encode_6bits(val));
                val = 0;
                bits_in_val = 0;
            }
        }
    }
    if bits_in_val > 0 {
        val <<= 6 - bits_in_val;
        out.push(encode_6bits(val));
    }

    Ok(String::from_utf8(out).expect("radix-64 alphabet is pure ASCII"))
}

/// Decodes a single fgraph6 record line into `(graph, f)`.
///
/// The caller is responsible for skipping comment lines (first byte `>`)
/// and lines shorter than 4 bytes, per the format's framing rules; this
/// function treats any such line as malformed.
pub fn decode_record(line: &str) -> Result<(Graph, FVector)> {
    let bytes = line.as_bytes();
    if bytes.len() < 4 {
        return Err(malformed("record shorter than 4 bytes"));
    }

    let n = decode_6bits(bytes[0]).ok_or_else(|| malformed("invalid radix-64 digit for n"))? as usize;
    // bytes[1] is a separator byte, ignored.
    if bytes.len() < 2 + n + 1 {
        return Err(malformed("record truncated before end of f-vector"));
    }

    let mut f = Vec::with_capacity(n);
    for i in 0..n {
        let fv = decode_6bits(bytes[2 + i]).ok_or_else(|| malformed("invalid radix-64 digit in f-vector"))?;
        f.push(fv as usize);
    }
    // bytes[2 + n] is a separator byte, ignored.

    let adj_start = 2 + n + 1;
    let pairs = n * n.saturating_sub(1) / 2;
    let adj_bytes_needed = (pairs + 5) / 6;
    if bytes.len() < adj_start + adj_bytes_needed {
        return Err(malformed("record truncated before end of adjacency data"));
    }

    let mut adj: Vec<Vec<VertexId>> = vec![Vec::new(); n];
    let mut val: u8 = 0;
    let mut bit_index = 0usize;
    for j in 0..n {
        for i in 0..j {
            if bit_index % 6 == 0 {
                let byte = bytes[adj_start + bit_index / 6];
                val = decode_6bits(byte).ok_or_else(|| malformed("invalid radix-64 digit in adjacency"))?;
            }
            let shift = 5 - (bit_index % 6);
            if (val >> shift) & 1 != 0 {
                adj[i].push(j);
                adj[j].push(i);
            }
            bit_index += 1;
        }
    }

    let graph = Graph::from_adjacency(adj)?;
    let fvector = FVector::new(f, n)?;
    Ok((graph, fvector))
}

/// One line of an fgraph6 input stream, classified for the caller.
#[derive(Debug)]
pub enum Line<'a> {
    /// A `>`-prefixed comment, or a record shorter than 4 bytes: both are
    /// silently skipped per the format.
    Skipped(&'a str),
    /// A graph record, successfully or unsuccessfully decoded.
    Record(Result<(Graph, FVector)>),
}

/// Reads a multi-line fgraph6 stream, classifying and decoding each line.
pub fn read_records(input: &str) -> impl Iterator<Item = Line<'_>> {
    input.lines().map(|line| {
        if line.starts_with('>') || line.as_bytes().len() < 4 {
            Line::Skipped(line)
        } else {
            Line::Record(decode_record(line))
        }
    })
}
