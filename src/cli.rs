use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "diffwatch",
    version,
    about = "Live TUI diff viewer with inline and side-by-side layouts"
)]
pub struct Cli {
    /// Repository path (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// View the staged diff (git diff --cached)
    #[arg(long)]
    pub staged: bool,

    /// Start in inline layout instead of side-by-side
    #[arg(long)]
    pub inline: bool,

    /// Color theme name
    #[arg(long)]
    pub theme: Option<String>,

    /// Quiet period for change coalescing, in milliseconds
    #[arg(long = "debounce-ms")]
    pub debounce_ms: Option<u64>,
}
