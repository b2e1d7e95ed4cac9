//! Shared helpers for the stream tests
use crate::segment::{RegionType, Segment};
use crate::stream::SegmentStream;
use crate::tag::Tag;

/// Split text into chunks of `chunk_size` characters
pub fn chunk_str(s: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut chunks = Vec::new();

    for chunk in chars.chunks(chunk_size) {
        chunks.push(chunk.iter().collect::<String>());
    }

    chunks
}

/// Split text at the given byte offsets
pub fn split_at_offsets(s: &str, offsets: &[usize]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for &offset in offsets {
        chunks.push(s[start..offset].to_string());
        start = offset;
    }
    chunks.push(s[start..].to_string());
    chunks
}

/// Char boundaries of `s`, including both ends
pub fn boundaries(s: &str) -> Vec<usize> {
    (0..=s.len()).filter(|&i| s.is_char_boundary(i)).collect()
}

/// Feed all chunks, then finalize, collecting every emitted segment
pub fn run_stream<S: AsRef<str>>(chunks: &[S]) -> Vec<Segment> {
    let mut stream = SegmentStream::new();
    let mut segments = Vec::new();

    for chunk in chunks {
        segments.extend(stream.feed(chunk.as_ref()).unwrap());
        assert!(
            stream.pending_len() <= crate::MAX_TAG_LEN,
            "pending buffer grew to {} bytes",
            stream.pending_len()
        );
    }
    segments.extend(stream.finalize().unwrap());

    segments
}

/// Visible content, with adjacent runs of the same region merged
pub fn visible(segments: &[Segment]) -> Vec<(RegionType, String)> {
    let mut result: Vec<(RegionType, String)> = Vec::new();

    for segment in segments.iter().filter(|s| !s.is_tag_marker) {
        match result.last_mut() {
            Some((region, text)) if *region == segment.region => text.push_str(&segment.content),
            _ => result.push((segment.region, segment.content.clone())),
        }
    }

    result
}

/// Concatenated content of all non-marker segments
pub fn rendered_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| !s.is_tag_marker)
        .map(|s| s.content.as_str())
        .collect()
}

/// Reference removal of all four spellings, ASCII case-insensitive
pub fn strip_tags(s: &str) -> String {
    let mut result = String::new();
    let mut pos = 0;

    'outer: while pos < s.len() {
        for tag in Tag::ALL {
            let literal = tag.literal();
            let end = pos + literal.len();
            if end <= s.len() && s.as_bytes()[pos..end].eq_ignore_ascii_case(literal.as_bytes())
            {
                pos = end;
                continue 'outer;
            }
        }
        let c = s[pos..].chars().next().unwrap();
        result.push(c);
        pos += c.len_utf8();
    }

    result
}

/// Shorthand for building expected visible output
pub fn thinking(text: &str) -> (RegionType, String) {
    (RegionType::Thinking, text.to_string())
}

pub fn response(text: &str) -> (RegionType, String) {
    (RegionType::None, text.to_string())
}
