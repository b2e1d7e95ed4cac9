use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Remove reasoning from stored assistant content and print the response text
    Strip {
        /// File with the stored content (reads stdin if omitted)
        file: Option<PathBuf>,
    },
}

/// Define the application arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Option<Mode>,

    /// Read the stream from a file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Maximum number of bytes per chunk when reading plain input
    #[arg(long, default_value_t = 64)]
    pub chunk_size: usize,

    /// Record the chunks read from the input to a file
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Play back a recorded session from a file
    #[arg(long, conflicts_with_all = ["input", "record"])]
    pub playback: Option<PathBuf>,

    /// Fast playback mode - ignore chunk timing when playing recordings
    #[arg(long)]
    pub fast_playback: bool,

    /// Do not print reasoning content
    #[arg(long)]
    pub hide_thinking: bool,

    /// Print recognized tag markers
    #[arg(long)]
    pub show_markers: bool,

    /// Write the stored form of each message as JSON to this file
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse() -> Self {
        <Args as Parser>::parse()
    }
}
