//! Chunk sources standing in for a streaming transport

use crate::recording::{RecordedChunk, RecordingSession};
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};

pub enum ChunkSource {
    /// Chunks of a recorded session, optionally delayed to their recorded time
    Playback {
        chunks: VecDeque<RecordedChunk>,
        simulate_timing: bool,
        started: Instant,
    },
    /// Raw bytes from a reader, decoded as UTF-8 as they arrive
    Reader {
        reader: Box<dyn AsyncRead + Unpin + Send>,
        buf: Vec<u8>,
        // Bytes of a multi-byte character split by the last read
        carry: Vec<u8>,
    },
}

impl ChunkSource {
    pub fn from_session(session: RecordingSession, fast: bool) -> Self {
        ChunkSource::Playback {
            chunks: session.chunks.into(),
            simulate_timing: !fast,
            started: Instant::now(),
        }
    }

    pub fn from_reader(reader: Box<dyn AsyncRead + Unpin + Send>, chunk_size: usize) -> Self {
        ChunkSource::Reader {
            reader,
            buf: vec![0; chunk_size.max(1)],
            carry: Vec::new(),
        }
    }

    /// Next chunk, or None at the end of the stream
    pub async fn next_chunk(&mut self) -> Result<Option<String>> {
        match self {
            ChunkSource::Playback {
                chunks,
                simulate_timing,
                started,
            } => {
                let Some(chunk) = chunks.pop_front() else {
                    return Ok(None);
                };
                if *simulate_timing {
                    let due = Duration::from_millis(chunk.timestamp_ms);
                    let elapsed = started.elapsed();
                    if due > elapsed {
                        tokio::time::sleep(due - elapsed).await;
                    }
                }
                Ok(Some(chunk.data))
            }
            ChunkSource::Reader { reader, buf, carry } => loop {
                let n = reader.read(buf).await.context("Failed to read input")?;
                if n == 0 {
                    if carry.is_empty() {
                        return Ok(None);
                    }
                    tracing::warn!("Input ended inside a multi-byte character");
                    let rest = String::from_utf8_lossy(carry).into_owned();
                    carry.clear();
                    return Ok(Some(rest));
                }

                carry.extend_from_slice(&buf[..n]);
                if let Some(text) = take_utf8_prefix(carry) {
                    return Ok(Some(text));
                }
            },
        }
    }
}

/// Remove and return the longest decodable prefix of `carry`, leaving an
/// incomplete trailing character in place. Invalid bytes become U+FFFD.
fn take_utf8_prefix(carry: &mut Vec<u8>) -> Option<String> {
    let end = match std::str::from_utf8(carry) {
        Ok(text) => text.len(),
        Err(err) => match err.error_len() {
            None => err.valid_up_to(),
            Some(invalid_len) => err.valid_up_to() + invalid_len,
        },
    };
    if end == 0 {
        return None;
    }

    let bytes: Vec<u8> = carry.drain(..end).collect();
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
