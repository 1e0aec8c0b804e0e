mod action;
mod app;
mod cli;
mod commit;
mod config;
mod diff;
mod git;
mod input;
mod render;
mod theme;
mod tui;
mod view;
mod watch;

use anyhow::Result;
use clap::Parser;
use std::env;
use std::time::Duration;

use crate::app::App;
use crate::cli::Cli;
use crate::git::GitCli;
use crate::theme::Theme;
use crate::view::Layout;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();

    let start = match cli.path {
        Some(path) => path,
        None => env::current_dir()?,
    };

    // Validate we're in a git repo before launching the TUI
    let git = match GitCli::discover(&start).await {
        Ok(git) => git,
        Err(_) => {
            eprintln!(
                "diffwatch: not a git repository (or any parent up to mount point /)\n\
                 Run this command from inside a git working tree."
            );
            std::process::exit(1);
        }
    };

    // Load config from the environment, apply CLI overrides (CLI wins)
    let mut config = config::load_config();
    if let Some(ref theme_name) = cli.theme {
        config.theme = Theme::from_name(theme_name);
    }
    if let Some(ms) = cli.debounce_ms {
        config.debounce = Duration::from_millis(ms);
    }

    let layout = if cli.inline {
        Layout::Inline
    } else {
        Layout::SideBySide
    };

    let mut app = App::new(config, git, cli.staged, layout);

    let mut terminal = tui::init(true)?;
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    if let Err(ref e) = result {
        eprintln!("diffwatch: {e:#}");
    }

    result
}
