//! Recognition of the reasoning tag spellings at an unmatched `<`

/// Length in bytes of the longest recognized spelling, `</thinking>`
pub const MAX_TAG_LEN: usize = 11;

/// The four recognized spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Think,
    Thinking,
    CloseThink,
    CloseThinking,
}

impl Tag {
    pub const ALL: [Tag; 4] = [
        Tag::Think,
        Tag::Thinking,
        Tag::CloseThink,
        Tag::CloseThinking,
    ];

    pub fn literal(self) -> &'static str {
        match self {
            Tag::Think => "<think>",
            Tag::Thinking => "<thinking>",
            Tag::CloseThink => "</think>",
            Tag::CloseThinking => "</thinking>",
        }
    }

    /// Byte length of the spelling; all spellings are ASCII
    pub fn byte_len(self) -> usize {
        self.literal().len()
    }

    pub fn is_open(self) -> bool {
        matches!(self, Tag::Think | Tag::Thinking)
    }
}

/// Outcome of looking at the text that starts at a `<`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    /// The text begins with a full tag spelling
    Complete(Tag),
    /// The whole text is a proper prefix of at least one spelling and has to
    /// be withheld until more input arrives
    Ambiguous,
    /// No spelling can match; the `<` is literal content
    NotATag,
}

/// Classify `suffix`, which is expected to start with `<`.
///
/// Case folding is ASCII-only so that characters such as the Kelvin sign
/// never fold into a tag letter.
pub fn consider(suffix: &str) -> TagMatch {
    let bytes = suffix.as_bytes();
    if bytes.first() != Some(&b'<') {
        return TagMatch::NotATag;
    }

    let mut ambiguous = false;
    for tag in Tag::ALL {
        let literal = tag.literal().as_bytes();
        if bytes.len() >= literal.len() {
            if bytes[..literal.len()].eq_ignore_ascii_case(literal) {
                return TagMatch::Complete(tag);
            }
        } else if bytes.eq_ignore_ascii_case(&literal[..bytes.len()]) {
            ambiguous = true;
        }
    }

    if ambiguous {
        TagMatch::Ambiguous
    } else {
        TagMatch::NotATag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_tags() {
        assert_eq!(consider("<think>"), TagMatch::Complete(Tag::Think));
        assert_eq!(consider("<thinking>"), TagMatch::Complete(Tag::Thinking));
        assert_eq!(consider("</think>"), TagMatch::Complete(Tag::CloseThink));
        assert_eq!(
            consider("</thinking>"),
            TagMatch::Complete(Tag::CloseThinking)
        );
    }

    #[test]
    fn test_complete_tag_followed_by_content() {
        assert_eq!(consider("<think>rest"), TagMatch::Complete(Tag::Think));
        assert_eq!(
            consider("</thinking>\nanswer"),
            TagMatch::Complete(Tag::CloseThinking)
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(consider("<THINK>"), TagMatch::Complete(Tag::Think));
        assert_eq!(consider("<ThInKiNg>"), TagMatch::Complete(Tag::Thinking));
        assert_eq!(consider("</Think>"), TagMatch::Complete(Tag::CloseThink));
    }

    #[test]
    fn test_every_proper_prefix_is_ambiguous() {
        for tag in Tag::ALL {
            let literal = tag.literal();
            for end in 1..literal.len() {
                assert_eq!(
                    consider(&literal[..end]),
                    TagMatch::Ambiguous,
                    "prefix {:?} of {:?}",
                    &literal[..end],
                    literal
                );
            }
        }
    }

    #[test]
    fn test_not_a_tag() {
        assert_eq!(consider("< b"), TagMatch::NotATag);
        assert_eq!(consider("<b>"), TagMatch::NotATag);
        assert_eq!(consider("<thinker>"), TagMatch::NotATag);
        assert_eq!(consider("<think >"), TagMatch::NotATag);
        assert_eq!(consider("</thin>"), TagMatch::NotATag);
        assert_eq!(consider("<<think>"), TagMatch::NotATag);
        assert_eq!(consider("<tool:read_files>"), TagMatch::NotATag);
    }

    #[test]
    fn test_input_without_angle_bracket() {
        assert_eq!(consider(""), TagMatch::NotATag);
        assert_eq!(consider("think>"), TagMatch::NotATag);
    }

    #[test]
    fn test_unicode_lookalikes_do_not_fold() {
        // U+212A KELVIN SIGN lowercases to 'k' under full Unicode folding
        assert_eq!(consider("<thin\u{212A}>"), TagMatch::NotATag);
        assert_eq!(consider("<thin\u{212A}"), TagMatch::NotATag);
    }

    #[test]
    fn test_ambiguity_is_bounded() {
        for tag in Tag::ALL {
            assert!(tag.byte_len() <= MAX_TAG_LEN);
        }
        assert_eq!(Tag::CloseThinking.byte_len(), MAX_TAG_LEN);
    }
}
