use crossterm::style::Stylize;
use reasoning_stream::{consider, RegionType, Segment, TagMatch};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_thinking: bool,
    pub show_markers: bool,
}

/// Writes segments as they arrive. Each reasoning region gets its own dimmed
/// panel under a "Thinking…" label.
pub struct SegmentRenderer<W: Write> {
    writer: W,
    options: RenderOptions,
    in_panel: bool,
}

impl<W: Write> SegmentRenderer<W> {
    pub fn new(writer: W, options: RenderOptions) -> Self {
        Self {
            writer,
            options,
            in_panel: false,
        }
    }

    pub fn render_all(&mut self, segments: &[Segment]) -> io::Result<()> {
        for segment in segments {
            self.render(segment)?;
        }
        self.writer.flush()
    }

    pub fn render(&mut self, segment: &Segment) -> io::Result<()> {
        if segment.is_tag_marker {
            if self.options.show_markers {
                write!(self.writer, "{}", segment.content.clone().dark_blue())?;
            }
            // Only a closer that actually ended a region carries the Thinking region
            let is_closer =
                matches!(consider(&segment.content), TagMatch::Complete(tag) if !tag.is_open());
            if is_closer && segment.region == RegionType::Thinking {
                self.close_panel()?;
            }
            return Ok(());
        }

        match segment.region {
            RegionType::Thinking => {
                if !self.options.show_thinking {
                    return Ok(());
                }
                if !self.in_panel {
                    writeln!(self.writer, "{}", "Thinking…".dark_grey().bold())?;
                    self.in_panel = true;
                }
                write!(
                    self.writer,
                    "{}",
                    segment.content.clone().dark_grey().italic()
                )?;
            }
            RegionType::None => {
                self.close_panel()?;
                write!(self.writer, "{}", segment.content)?;
            }
        }
        Ok(())
    }

    /// End of one stream
    pub fn finish(&mut self) -> io::Result<()> {
        self.close_panel()?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn close_panel(&mut self) -> io::Result<()> {
        if self.in_panel {
            writeln!(self.writer)?;
            self.in_panel = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasoning_stream::SegmentStream;

    fn render(text: &str, options: RenderOptions) -> String {
        let mut output = Vec::new();
        {
            let mut renderer = SegmentRenderer::new(&mut output, options);
            renderer
                .render_all(&SegmentStream::classify(text))
                .unwrap();
            renderer.finish().unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    const DEFAULT: RenderOptions = RenderOptions {
        show_thinking: true,
        show_markers: false,
    };

    #[test]
    fn test_renders_both_regions() {
        let output = render("<think>pondering</think>The answer", DEFAULT);
        assert!(output.contains("Thinking…"));
        assert!(output.contains("pondering"));
        assert!(output.contains("The answer"));
        assert!(!output.contains("<think>"));
    }

    #[test]
    fn test_hide_thinking() {
        let options = RenderOptions {
            show_thinking: false,
            ..DEFAULT
        };
        let output = render("<think>secret</think>visible", options);
        assert!(!output.contains("secret"));
        assert!(!output.contains("Thinking…"));
        assert!(output.contains("visible"));
    }

    #[test]
    fn test_separate_panels_for_separate_blocks() {
        let output = render("<think>a</think><think>b</think>c", DEFAULT);
        assert_eq!(output.matches("Thinking…").count(), 2);
    }

    #[test]
    fn test_continuing_region_has_one_label() {
        let mut output = Vec::new();
        {
            let mut renderer = SegmentRenderer::new(&mut output, DEFAULT);
            let mut stream = SegmentStream::new();
            for chunk in ["<think>one ", "two ", "three</think>done"] {
                renderer.render_all(&stream.feed(chunk).unwrap()).unwrap();
            }
            renderer.finish().unwrap();
        }
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Thinking…").count(), 1);
    }

    #[test]
    fn test_only_real_closers_end_a_panel() {
        let mut output = Vec::new();
        {
            let mut renderer = SegmentRenderer::new(&mut output, DEFAULT);
            let segments = [
                Segment::marker("<THINKING>", RegionType::Thinking),
                Segment::text("one", RegionType::Thinking),
                // Opener inside a region, not a panel boundary
                Segment::marker("<think>", RegionType::Thinking),
                Segment::text("two", RegionType::Thinking),
                Segment::marker("</THINKING>", RegionType::Thinking),
                Segment::marker("<Think>", RegionType::Thinking),
                Segment::text("three", RegionType::Thinking),
            ];
            renderer.render_all(&segments).unwrap();
            renderer.finish().unwrap();
        }
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Thinking…").count(), 2);
    }

    #[test]
    fn test_show_markers() {
        let options = RenderOptions {
            show_markers: true,
            ..DEFAULT
        };
        let output = render("<THINK>x</THINK>y", options);
        assert!(output.contains("<THINK>"));
        assert!(output.contains("</THINK>"));
    }
}
