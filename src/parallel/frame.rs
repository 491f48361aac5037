//! Byte framing of [`Message`] for byte-oriented transports.
//!
//! Layout (little endian):
//!
//! ```text
//! kind: u8 | start_row: u64 | row_count: u64 | pixels: row_count·width·3 bytes (r, g, b)
//! ```
//!
//! `kind` is 0 for an assignment (row count and pixels are absent) and 1 for a
//! result.

use super::Message;
use crate::core::types::{ResultChunk, Rgb};
use crate::error::FarmError;

const KIND_ASSIGN: u8 = 0;
const KIND_RESULT: u8 = 1;

pub fn encode(message: &Message) -> Vec<u8> {
    match message {
        Message::Assign { start_row } => {
            let mut out = Vec::with_capacity(9);
            out.push(KIND_ASSIGN);
            out.extend_from_slice(&(*start_row as u64).to_le_bytes());
            out
        }
        Message::Result(chunk) => {
            let mut out = Vec::with_capacity(17 + 3 * chunk.pixels.len());
            out.push(KIND_RESULT);
            out.extend_from_slice(&(chunk.start_row as u64).to_le_bytes());
            out.extend_from_slice(&(chunk.row_count as u64).to_le_bytes());
            for p in &chunk.pixels {
                out.extend_from_slice(&[p.r, p.g, p.b]);
            }
            out
        }
    }
}

fn read_u64(bytes: &[u8], at: usize) -> Result<usize, FarmError> {
    let raw: [u8; 8] = bytes
        .get(at..at + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| FarmError::Codec(format!("truncated header at byte {}", at)))?;
    usize::try_from(u64::from_le_bytes(raw))
        .map_err(|_| FarmError::Codec("row index exceeds usize".into()))
}

pub fn decode(bytes: &[u8]) -> Result<Message, FarmError> {
    match bytes.first() {
        Some(&KIND_ASSIGN) => Ok(Message::Assign {
            start_row: read_u64(bytes, 1)?,
        }),
        Some(&KIND_RESULT) => {
            let start_row = read_u64(bytes, 1)?;
            let row_count = read_u64(bytes, 9)?;
            let body = &bytes[17..];
            if body.len() % 3 != 0 {
                return Err(FarmError::Codec(format!(
                    "pixel payload of {} bytes is not whole RGB triples",
                    body.len()
                )));
            }
            let pixels = body
                .chunks_exact(3)
                .map(|c| Rgb::new(c[0], c[1], c[2]))
                .collect();
            Ok(Message::Result(ResultChunk::new(start_row, row_count, pixels)))
        }
        Some(k) => Err(FarmError::Codec(format!("unknown message kind {}", k))),
        None => Err(FarmError::Codec("empty frame".into())),
    }
}
