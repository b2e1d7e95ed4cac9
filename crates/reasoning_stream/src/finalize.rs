use crate::error::StreamError;
use crate::region::RegionStateMachine;
use crate::segment::Segment;

/// Closes a stream exactly once.
///
/// Withheld text is released under whichever region was active at the end of
/// input. An opener without a closer keeps its region: a genuine tag was
/// recognized, so the content is not demoted to response text.
pub(crate) struct FinalizationPass;

impl FinalizationPass {
    pub(crate) fn run(machine: &mut RegionStateMachine) -> Result<Vec<Segment>, StreamError> {
        if machine.state().is_finalized() {
            tracing::warn!("Finalize called on an already finalized stream");
            return Err(StreamError::AlreadyFinalized);
        }

        let mut segments = Vec::new();
        if let Some(segment) = machine.take_pending() {
            tracing::debug!(
                "Stream ended with {} withheld bytes, releasing as content",
                segment.content.len()
            );
            segments.push(segment);
        }

        if machine.is_in_thinking() {
            tracing::debug!("Stream ended inside an unclosed reasoning region");
        }

        machine.mark_finalized();
        Ok(segments)
    }
}
