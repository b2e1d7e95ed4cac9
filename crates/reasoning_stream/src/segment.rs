use serde::{Deserialize, Serialize};

/// Classification of a span of streamed content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    /// Ordinary response content
    #[default]
    None,
    /// Reasoning content enclosed by think tags
    Thinking,
}

/// A contiguous run of content carrying one classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub content: String,
    pub region: RegionType,
    /// Set for the literal text of a recognized tag. Markers are kept for
    /// logging and replay but never rendered.
    pub is_tag_marker: bool,
}

impl Segment {
    pub fn text(content: impl Into<String>, region: RegionType) -> Self {
        Self {
            content: content.into(),
            region,
            is_tag_marker: false,
        }
    }

    pub fn marker(content: impl Into<String>, region: RegionType) -> Self {
        Self {
            content: content.into(),
            region,
            is_tag_marker: true,
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.region == RegionType::Thinking
    }

    /// True for segments a renderer should show
    pub fn is_visible(&self) -> bool {
        !self.is_tag_marker && !self.content.is_empty()
    }
}
