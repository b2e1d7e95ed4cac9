//! Incremental classification of streamed model output into reasoning and
//! response segments.
//!
//! Text arrives chunk by chunk through [`SegmentStream::feed`]. Content inside
//! `<think>`/`<thinking>` markup is tagged [`RegionType::Thinking`], all other
//! content [`RegionType::None`]. Tags may be split across any number of chunks;
//! at most the length of `</thinking>` is ever withheld between calls, and a
//! segment, once returned, is never revised.

mod error;
mod finalize;
mod region;
mod segment;
mod stream;
mod tag;
mod transcript;

#[cfg(test)]
mod test_utils;

pub use error::StreamError;
pub use segment::{RegionType, Segment};
pub use stream::SegmentStream;
pub use tag::{consider, Tag, TagMatch, MAX_TAG_LEN};
pub use transcript::{strip_thinking, Block, PersistedMessage, Transcript};
