use crate::segment::{RegionType, Segment};
use crate::tag::{consider, Tag, TagMatch};

/// The two states of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum RegionState {
    #[default]
    Outside,
    InThinking,
}

impl RegionState {
    pub fn region(self) -> RegionType {
        match self {
            RegionState::Outside => RegionType::None,
            RegionState::InThinking => RegionType::Thinking,
        }
    }
}

/// Per-stream classifier state
#[derive(Debug, Default)]
pub(crate) struct ParserState {
    // Text starting at a `<` that may still become a tag. Never longer than
    // the longest tag spelling.
    pending: String,
    state: RegionState,
    is_finalized: bool,
}

impl ParserState {
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn region_state(&self) -> RegionState {
        self.state
    }

    pub fn active_region(&self) -> RegionType {
        self.state.region()
    }

    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }
}

/// Tracks whether the stream is inside a reasoning region and turns text into
/// decided segments.
///
/// Any opener moves `Outside` to `InThinking` and any closer moves back,
/// whichever spelling opened the region. An opener inside a region or a closer
/// outside one is still stripped as markup but does not change state.
#[derive(Debug, Default)]
pub(crate) struct RegionStateMachine {
    state: ParserState,
}

impl RegionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn is_in_thinking(&self) -> bool {
        self.state.region_state() == RegionState::InThinking
    }

    /// Scan withheld text followed by `chunk` left to right, pushing every
    /// segment that can be decided into `out`.
    pub(crate) fn advance(&mut self, chunk: &str, out: &mut Vec<Segment>) {
        let mut text = std::mem::take(&mut self.state.pending);
        text.push_str(chunk);

        let mut cursor = 0;
        let mut run_start = 0;

        while let Some(offset) = text[cursor..].find('<') {
            let tag_start = cursor + offset;

            match consider(&text[tag_start..]) {
                TagMatch::Complete(tag) => {
                    self.emit_content(&text[run_start..tag_start], out);
                    let tag_end = tag_start + tag.byte_len();
                    self.apply_tag(tag, &text[tag_start..tag_end], out);
                    cursor = tag_end;
                    run_start = tag_end;
                }
                TagMatch::Ambiguous => {
                    self.emit_content(&text[run_start..tag_start], out);
                    self.state.pending = text.split_off(tag_start);
                    tracing::trace!(
                        "Withholding {} bytes of possible tag",
                        self.state.pending.len()
                    );
                    return;
                }
                // '<' is one byte, so the next offset is a char boundary
                TagMatch::NotATag => cursor = tag_start + 1,
            }
        }

        self.emit_content(&text[run_start..], out);
    }

    /// Hand out withheld text as content of the active region
    pub(crate) fn take_pending(&mut self) -> Option<Segment> {
        if self.state.pending.is_empty() {
            return None;
        }
        let content = std::mem::take(&mut self.state.pending);
        Some(Segment::text(content, self.state.active_region()))
    }

    pub(crate) fn mark_finalized(&mut self) {
        self.state.is_finalized = true;
    }

    fn emit_content(&self, content: &str, out: &mut Vec<Segment>) {
        if !content.is_empty() {
            out.push(Segment::text(content, self.state.active_region()));
        }
    }

    fn apply_tag(&mut self, tag: Tag, literal: &str, out: &mut Vec<Segment>) {
        // Openers belong to the region they open, closers to the region they end
        let marker_region = if tag.is_open() {
            RegionType::Thinking
        } else {
            self.state.active_region()
        };
        out.push(Segment::marker(literal, marker_region));

        match (self.state.state, tag.is_open()) {
            (RegionState::Outside, true) => {
                tracing::debug!("Reasoning region opened by {}", literal);
                self.state.state = RegionState::InThinking;
            }
            (RegionState::InThinking, false) => {
                tracing::debug!("Reasoning region closed by {}", literal);
                self.state.state = RegionState::Outside;
            }
            (RegionState::InThinking, true) => {
                tracing::trace!("Ignoring {} inside a reasoning region", literal);
            }
            (RegionState::Outside, false) => {
                tracing::trace!("Ignoring {} outside a reasoning region", literal);
            }
        }
    }
}
