//! Recorded chunk sessions, for replaying a stream with its original timing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Recording session that contains the stream source and all chunks
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecordingSession {
    /// Description of where the stream came from
    pub request: serde_json::Value,
    /// Timestamp of when the recording was started
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Chunks in arrival order
    pub chunks: Vec<RecordedChunk>,
}

/// Single recorded chunk with timing info
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecordedChunk {
    /// Chunk text exactly as delivered
    pub data: String,
    /// Milliseconds since recording start
    pub timestamp_ms: u64,
}

/// Appends sessions to a JSON array file
pub struct ChunkRecorder {
    file_path: PathBuf,
    current_session: Option<RecordingSession>,
    start_time: Option<Instant>,
}

impl ChunkRecorder {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
            current_session: None,
            start_time: None,
        }
    }

    /// Start a new recording session
    pub fn start_recording(&mut self, request: serde_json::Value) {
        self.current_session = Some(RecordingSession {
            request,
            timestamp: chrono::Utc::now(),
            chunks: Vec::new(),
        });
        self.start_time = Some(Instant::now());
    }

    pub fn record_chunk(&mut self, data: &str) {
        if let (Some(session), Some(start_time)) = (self.current_session.as_mut(), self.start_time)
        {
            let timestamp_ms = start_time.elapsed().as_millis() as u64;
            session.chunks.push(RecordedChunk {
                data: data.to_string(),
                timestamp_ms,
            });
        }
    }

    /// End the current session and append it to the recording file
    pub fn end_recording(&mut self) -> Result<()> {
        self.start_time = None;
        let Some(session) = self.current_session.take() else {
            return Ok(());
        };

        let mut sessions = if self.file_path.exists() {
            read_sessions(&self.file_path)?
        } else {
            Vec::new()
        };
        sessions.push(session);

        let json = serde_json::to_string_pretty(&sessions)?;
        std::fs::write(&self.file_path, format!("{json}\n"))
            .with_context(|| format!("Failed to write recording {}", self.file_path.display()))?;

        tracing::debug!(
            "Saved recording with {} sessions to {}",
            sessions.len(),
            self.file_path.display()
        );
        Ok(())
    }
}

fn read_sessions(path: &Path) -> Result<Vec<RecordingSession>> {
    let contents = std::fs::read_to_string(path).context("Failed to read recording file")?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&contents).context("Failed to parse recording file")
}

/// Playback over the sessions of a recording file
pub struct PlaybackState {
    sessions: Vec<RecordingSession>,
    index: usize,
    pub fast: bool,
}

impl PlaybackState {
    pub fn from_file<P: AsRef<Path>>(path: P, fast: bool) -> Result<Self> {
        let sessions = read_sessions(path.as_ref())?;
        Ok(Self {
            sessions,
            index: 0,
            fast,
        })
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Take the next session, or None if exhausted
    pub fn next_session(&mut self) -> Option<RecordingSession> {
        let session = self.sessions.get(self.index)?.clone();
        self.index += 1;
        Some(session)
    }
}
