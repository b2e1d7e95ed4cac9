mod cli;
mod config;
mod logging;
mod recording;
mod renderer;
mod settings;
mod source;

use crate::cli::{Args, Mode};
use crate::recording::{ChunkRecorder, PlaybackState};
use crate::renderer::{RenderOptions, SegmentRenderer};
use crate::source::ChunkSource;
use anyhow::{Context, Result};
use reasoning_stream::{strip_thinking, PersistedMessage, SegmentStream, Transcript};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

/// Feed one stream through the classifier, rendering as segments are decided
async fn view_stream<W: Write>(
    source: &mut ChunkSource,
    renderer: &mut SegmentRenderer<W>,
    mut recorder: Option<&mut ChunkRecorder>,
) -> Result<Transcript> {
    let mut stream = SegmentStream::new();
    let mut transcript = Transcript::new();
    let mut chunk_count = 0usize;

    while let Some(chunk) = source.next_chunk().await? {
        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.record_chunk(&chunk);
        }
        chunk_count += 1;

        let segments = stream.feed(&chunk)?;
        renderer.render_all(&segments)?;
        transcript.extend(&segments);
    }

    let segments = stream.finalize()?;
    renderer.render_all(&segments)?;
    renderer.finish()?;
    transcript.extend(&segments);

    tracing::info!(
        "Stream complete: {} chunks, {} reasoning blocks, {} tag markers",
        chunk_count,
        transcript.thinking_blocks().count(),
        transcript.markers().len()
    );
    Ok(transcript)
}

async fn run_view(args: Args) -> Result<()> {
    let settings = settings::get_settings();
    let options = RenderOptions {
        show_thinking: settings.show_thinking && !args.hide_thinking,
        show_markers: settings.show_markers || args.show_markers,
    };
    let mut renderer = SegmentRenderer::new(io::stdout(), options);
    let mut messages: Vec<PersistedMessage> = Vec::new();

    if let Some(path) = &args.playback {
        let mut playback = PlaybackState::from_file(path, args.fast_playback)?;
        if playback.session_count() == 0 {
            anyhow::bail!("Recording file contains no sessions");
        }
        tracing::info!(
            "Playing back {} sessions from {}",
            playback.session_count(),
            path.display()
        );

        while let Some(session) = playback.next_session() {
            let mut source = ChunkSource::from_session(session, playback.fast);
            let transcript = view_stream(&mut source, &mut renderer, None).await?;
            messages.push(transcript.to_persisted());
        }
    } else {
        let (reader, source_name): (Box<dyn AsyncRead + Unpin + Send>, String) = match &args.input
        {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                (Box::new(file), path.display().to_string())
            }
            None => (Box::new(tokio::io::stdin()), "stdin".to_string()),
        };

        let mut recorder = args.record.as_ref().map(ChunkRecorder::new);
        if let Some(recorder) = recorder.as_mut() {
            recorder.start_recording(serde_json::json!({ "source": source_name }));
        }

        let mut source = ChunkSource::from_reader(reader, args.chunk_size);
        let transcript = view_stream(&mut source, &mut renderer, recorder.as_mut()).await?;
        messages.push(transcript.to_persisted());

        if let Some(recorder) = recorder.as_mut() {
            recorder.end_recording()?;
        }
    }

    if let Some(path) = &args.transcript {
        write_transcript(path, &messages)?;
    }
    Ok(())
}

fn write_transcript(path: &Path, messages: &[PersistedMessage]) -> Result<()> {
    let json = serde_json::to_string_pretty(messages)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write transcript {}", path.display()))?;
    tracing::debug!("Wrote {} messages to {}", messages.len(), path.display());
    Ok(())
}

fn run_strip(file: Option<PathBuf>) -> Result<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            content
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", strip_thinking(&content))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();
    logging::setup_logging(args.verbose, args.log_file.as_deref())?;

    match args.mode.take() {
        Some(Mode::Strip { file }) => run_strip(file),
        None => run_view(args).await,
    }
}
