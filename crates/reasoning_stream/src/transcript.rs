//! Folding emitted segments into display blocks and persisted messages

use crate::segment::{RegionType, Segment};
use crate::stream::SegmentStream;
use crate::tag::{consider, TagMatch};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A run of content with one classification, as shown in one panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub region: RegionType,
    pub text: String,
}

/// Stored form of an assistant message: reconstructed content per region,
/// never raw tag markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedMessage {
    pub blocks: Vec<Block>,
    /// Response text only, as sent back to the model in later requests
    pub content: String,
}

/// Accumulates the segments of one stream.
///
/// Each reasoning region becomes its own block, so a message with two
/// separate `<think>` sections shows two reasoning panels in order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    blocks: Vec<Block>,
    markers: Vec<String>,
    // Mirrors the classifier so that only real region boundaries split blocks
    in_thinking: bool,
    boundary: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: &Segment) {
        if segment.is_tag_marker {
            self.push_marker(&segment.content);
            return;
        }
        if segment.content.is_empty() {
            return;
        }

        match self.blocks.last_mut() {
            Some(last) if !self.boundary && last.region == segment.region => {
                last.text.push_str(&segment.content);
            }
            _ => self.blocks.push(Block {
                region: segment.region,
                text: segment.content.clone(),
            }),
        }
        self.boundary = false;
    }

    pub fn extend<'a>(&mut self, segments: impl IntoIterator<Item = &'a Segment>) {
        for segment in segments {
            self.push(segment);
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Literal tag markers in the order they were seen
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Trimmed reasoning blocks. Blocks holding only whitespace are skipped.
    pub fn thinking_blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|block| block.region == RegionType::Thinking)
            .map(|block| block.text.trim())
            .filter(|text| !text.is_empty())
    }

    pub fn has_thinking(&self) -> bool {
        self.thinking_blocks().next().is_some()
    }

    /// All reasoning text, separate blocks joined by a blank line
    pub fn thinking_text(&self) -> String {
        self.thinking_blocks().collect::<Vec<_>>().join("\n\n")
    }

    pub fn response_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|block| block.region == RegionType::None)
            .map(|block| block.text.as_str())
            .collect()
    }

    /// Stored form: reasoning blocks trimmed, empty reasoning dropped, and
    /// the response content trimmed
    pub fn to_persisted(&self) -> PersistedMessage {
        let mut blocks: Vec<Block> = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            let text = match block.region {
                RegionType::Thinking => block.text.trim(),
                RegionType::None => block.text.as_str(),
            };
            if text.is_empty() {
                continue;
            }
            match blocks.last_mut() {
                // Response text on both sides of dropped reasoning
                Some(last) if last.region == block.region && block.region == RegionType::None => {
                    last.text.push_str(text);
                }
                _ => blocks.push(Block {
                    region: block.region,
                    text: text.to_string(),
                }),
            }
        }

        PersistedMessage {
            blocks,
            content: self.response_text().trim().to_string(),
        }
    }

    fn push_marker(&mut self, literal: &str) {
        self.markers.push(literal.to_string());

        if let TagMatch::Complete(tag) = consider(literal) {
            if tag.is_open() != self.in_thinking {
                self.in_thinking = tag.is_open();
                // A new reasoning region starts its own block. After a close the
                // next content is response text, which continues the last
                // response block if the region held no reasoning.
                self.boundary = tag.is_open();
            }
        }
    }
}

/// Remove reasoning from stored assistant content.
///
/// Unclosed reasoning at the end is removed as well. The result is trimmed
/// and runs of three or more newlines left behind are collapsed to two.
pub fn strip_thinking(content: &str) -> String {
    let mut transcript = Transcript::new();
    transcript.extend(&SegmentStream::classify(content));
    collapse_blank_lines(transcript.response_text().trim())
}

fn collapse_blank_lines(text: &str) -> String {
    static BLANK_LINES_RE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINES_RE
        .get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank lines regex"))
        .replace_all(text, "\n\n")
        .into_owned()
}
