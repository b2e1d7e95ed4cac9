use crate::error::StreamError;
use crate::finalize::FinalizationPass;
use crate::region::RegionStateMachine;
use crate::segment::{RegionType, Segment};

/// Public entry point: one instance per streamed message.
///
/// Call [`feed`](Self::feed) once per received chunk, in arrival order, then
/// [`finalize`](Self::finalize) exactly once when the transport signals the
/// end of the stream.
///
/// The classifier state behind it is not part of the public API:
///
/// ```compile_fail
/// use reasoning_stream::RegionStateMachine;
/// ```
#[derive(Debug, Default)]
pub struct SegmentStream {
    machine: RegionStateMachine,
}

impl SegmentStream {
    pub fn new() -> Self {
        Self {
            machine: RegionStateMachine::new(),
        }
    }

    /// Append `chunk` and return every segment it allows to be decided.
    ///
    /// Text that could still be the start of a tag is withheld until a later
    /// call (or `finalize`) resolves it.
    pub fn feed(&mut self, chunk: &str) -> Result<Vec<Segment>, StreamError> {
        if self.machine.state().is_finalized() {
            tracing::warn!("Rejecting {} byte chunk after finalize", chunk.len());
            return Err(StreamError::AlreadyFinalized);
        }

        let mut segments = Vec::new();
        self.machine.advance(chunk, &mut segments);

        tracing::trace!(
            "Fed {} bytes, emitted {} segments, {} bytes pending",
            chunk.len(),
            segments.len(),
            self.pending_len()
        );
        Ok(segments)
    }

    /// Release anything still withheld and close the stream
    pub fn finalize(&mut self) -> Result<Vec<Segment>, StreamError> {
        FinalizationPass::run(&mut self.machine)
    }

    /// Classify a complete text, e.g. a message loaded from history
    pub fn classify(text: &str) -> Vec<Segment> {
        let mut stream = Self::new();
        let mut segments = Vec::new();
        stream.machine.advance(text, &mut segments);
        // A fresh stream cannot be finalized yet
        segments.extend(FinalizationPass::run(&mut stream.machine).unwrap_or_default());
        segments
    }

    pub fn is_finalized(&self) -> bool {
        self.machine.state().is_finalized()
    }

    pub fn active_region(&self) -> RegionType {
        self.machine.state().active_region()
    }

    /// Whether the stream is currently inside a reasoning region
    pub fn is_in_thinking(&self) -> bool {
        self.machine.is_in_thinking()
    }

    /// Number of bytes withheld as a possible tag prefix
    pub fn pending_len(&self) -> usize {
        self.machine.state().pending().len()
    }
}
