use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout as FrameLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use crate::action::{map_event, Action};
use crate::commit;
use crate::config::Config;
use crate::diff::{parse_diff, FileSection};
use crate::git::GitCli;
use crate::input::Decoder;
use crate::render::{build_tree, format_inline, format_side_by_side, render_tree};
use crate::tui::{self, Tui};
use crate::view::{Layout, ViewEvent, ViewState};
use crate::watch::ChangeWatcher;

const TICK_RATE: Duration = Duration::from_millis(250);

enum Flow {
    Continue,
    Quit,
}

pub struct App {
    config: Config,
    git: GitCli,
    staged: bool,
    sections: Vec<FileSection>,
    /// Whether the plain diff is non-empty, tracked in staged mode for the
    /// stage-all hint banner.
    unstaged_changes: bool,
    view: ViewState,
    decoder: Decoder,
    /// Height of the diff viewport from the last render; page scrolls move
    /// by this many lines.
    page_height: usize,
}

impl App {
    pub fn new(config: Config, git: GitCli, staged: bool, layout: Layout) -> Self {
        Self {
            config,
            git,
            staged,
            sections: Vec::new(),
            unstaged_changes: false,
            view: ViewState::new(layout),
            decoder: Decoder::new(),
            page_height: 1,
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.refresh().await;

        let mut input_rx = spawn_input_reader();
        let mut watcher = ChangeWatcher::new(self.git.workdir(), self.config.debounce)?;
        let mut tick = tokio::time::interval(TICK_RATE);

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                chunk = input_rx.recv() => {
                    let Some(bytes) = chunk else { return Ok(()) };
                    for event in self.decoder.feed(&bytes) {
                        let Some(action) = map_event(event) else { continue };
                        if let Flow::Quit = self.handle_action(action, terminal).await? {
                            return Ok(());
                        }
                    }
                }
                _ = watcher.changed() => {
                    self.refresh().await;
                }
                // The periodic tick only re-renders; a resize is picked up
                // because the frame area is queried fresh each draw.
                _ = tick.tick() => {}
            }
        }
    }

    async fn handle_action(&mut self, action: Action, terminal: &mut Tui) -> Result<Flow> {
        match action {
            Action::Quit => return Ok(Flow::Quit),
            Action::SetLayout(layout) => {
                self.view = self.view.clone().apply(ViewEvent::SetLayout(layout));
            }
            Action::ScrollLines(delta) => {
                self.view = self.view.clone().apply(ViewEvent::ScrollBy(delta));
            }
            Action::PageUp => {
                let delta = -(self.page_height as isize);
                self.view = self.view.clone().apply(ViewEvent::ScrollBy(delta));
            }
            Action::PageDown => {
                let delta = self.page_height as isize;
                self.view = self.view.clone().apply(ViewEvent::ScrollBy(delta));
            }
            Action::ToggleMouse => {
                self.view = self.view.clone().apply(ViewEvent::ToggleMouse);
                tui::set_mouse_capture(self.view.mouse_enabled)?;
            }
            Action::ToggleTree => {
                self.view = self.view.clone().apply(ViewEvent::ToggleTree);
            }
            Action::StageAll => {
                match self.git.stage_all().await {
                    Ok(()) => self.view = self.view.clone().notify("staged all changes"),
                    Err(e) => self.view = self.view.clone().notify(format!("stage failed: {e:#}")),
                }
                self.refresh().await;
            }
            Action::DraftCommit => self.draft_commit(terminal).await?,
        }
        Ok(Flow::Continue)
    }

    /// Draft a commit message from the staged diff, then drop to the
    /// primary screen for `git commit -eF`. Every failure becomes a
    /// notification; the view stays scrollable afterward.
    async fn draft_commit(&mut self, terminal: &mut Tui) -> Result<()> {
        let staged_diff = match self.git.diff_text(true).await {
            Ok(diff) => diff,
            Err(e) => {
                self.view = self.view.clone().notify(format!("diff failed: {e:#}"));
                return Ok(());
            }
        };
        if staged_diff.trim().is_empty() {
            self.view = self.view.clone().notify("nothing staged to commit");
            return Ok(());
        }

        self.view = self.view.clone().notify("drafting commit message...");
        terminal.draw(|frame| self.draw(frame))?;

        let message = match commit::draft_commit_message(&self.config, staged_diff).await {
            Ok(message) => message,
            Err(e) => {
                self.view = self.view.clone().notify(format!("commit draft failed: {e:#}"));
                return Ok(());
            }
        };

        let message_file = commit::write_message_file(&message)?;
        tui::restore()?;
        let commit_result = self.git.commit_with_file(message_file.path()).await;
        *terminal = tui::init(self.view.mouse_enabled)?;
        terminal.clear()?;

        match commit_result {
            Ok(()) => self.view = self.view.clone().notify("commit created"),
            Err(e) => self.view = self.view.clone().notify(format!("commit failed: {e:#}")),
        }
        self.refresh().await;
        Ok(())
    }

    /// Re-read the diff text wholesale; parsing never fails, so only the
    /// git invocation itself can surface an error.
    async fn refresh(&mut self) {
        match self.git.diff_text(self.staged).await {
            Ok(raw) => self.sections = parse_diff(&raw),
            Err(e) => {
                self.view = self.view.clone().notify(format!("diff failed: {e:#}"));
            }
        }
        if self.staged {
            self.unstaged_changes = match self.git.diff_text(false).await {
                Ok(raw) => !raw.trim().is_empty(),
                Err(_) => false,
            };
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let theme = self.config.theme.clone();
        let area = frame.area();

        let tree_lines = if self.view.tree_visible && !self.sections.is_empty() {
            let paths: Vec<String> = self.sections.iter().map(|s| s.path.clone()).collect();
            let roots = build_tree(&paths);
            render_tree(&roots, self.config.tree_rows, &theme)
        } else {
            Vec::new()
        };
        let tree_height = tree_lines.len() as u16;

        let chunks = FrameLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(tree_height),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        if tree_height > 0 {
            frame.render_widget(Paragraph::new(tree_lines), chunks[0]);
        }

        self.draw_diff(frame, chunks[1], &theme);
        self.draw_status(frame, chunks[2], &theme);
    }

    fn draw_diff(&mut self, frame: &mut Frame, area: Rect, theme: &crate::theme::Theme) {
        let width = area.width as usize;
        let height = area.height as usize;
        self.page_height = height.max(1);

        if self.sections.is_empty() {
            let message = if self.staged {
                " No staged changes"
            } else {
                " No changes detected"
            };
            let paragraph =
                Paragraph::new(message).style(Style::default().fg(theme.text_muted));
            frame.render_widget(paragraph, area);
            self.view = self.view.clone().with_max_scroll(0, height.max(1));
            return;
        }

        let lines = match self.view.layout {
            Layout::Inline => format_inline(&self.sections, width, theme),
            Layout::SideBySide => format_side_by_side(&self.sections, width, theme),
        };

        self.view = self.view.clone().with_max_scroll(lines.len(), height.max(1));

        let window: Vec<Line<'static>> = lines
            .into_iter()
            .skip(self.view.scroll_offset)
            .take(height)
            .collect();
        frame.render_widget(Paragraph::new(window), area);
    }

    fn draw_status(&mut self, frame: &mut Frame, area: Rect, theme: &crate::theme::Theme) {
        let status_style = Style::default().fg(theme.status_fg).bg(theme.status_bg);

        let notification = self.view.take_notification().or_else(|| {
            if self.staged && self.sections.is_empty() && self.unstaged_changes {
                Some("no staged changes - press a to stage all".to_string())
            } else {
                None
            }
        });

        let line = match notification {
            Some(text) => Line::from(Span::styled(
                format!(" {text}"),
                Style::default()
                    .fg(theme.warning)
                    .bg(theme.status_bg)
                    .add_modifier(Modifier::BOLD),
            )),
            None => {
                let layout_label = match self.view.layout {
                    Layout::Inline => "inline",
                    Layout::SideBySide => "side-by-side",
                };
                let mouse_label = if self.view.mouse_enabled { "on" } else { "off" };
                let tree_label = if self.view.tree_visible { "on" } else { "off" };
                let stage_hint = if self.staged { "a stage-all  " } else { "" };
                Line::from(Span::styled(
                    format!(
                        " s/i layout:{layout_label}  m mouse:{mouse_label}  t tree:{tree_label}  \
                         j/k scroll  b/f page  {stage_hint}c commit  q quit"
                    ),
                    status_style,
                ))
            }
        };

        frame.render_widget(Paragraph::new(line).style(status_style), area);
    }
}

/// Forward raw stdin chunks into the loop; the decoder reassembles
/// sequences split across reads.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<Vec<u8>> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut stdin = tokio::io::stdin();
        let mut buf = [0u8; 1024];
        loop {
            match stdin.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}
