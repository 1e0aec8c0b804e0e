#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Inline,
    SideBySide,
}

/// Events the view state machine reacts to. Everything else (quit, staging,
/// commit drafting) is handled by the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    SetLayout(Layout),
    /// Signed line delta; pages are expressed as a height-sized delta by
    /// the caller.
    ScrollBy(isize),
    ToggleMouse,
    ToggleTree,
}

/// Immutable-per-tick view state: every mutation goes through [`ViewState::apply`]
/// or [`ViewState::with_max_scroll`], both of which re-establish
/// `0 <= scroll_offset <= max_scroll`.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub layout: Layout,
    pub scroll_offset: usize,
    pub max_scroll: usize,
    pub mouse_enabled: bool,
    pub tree_visible: bool,
    /// Shown by the next render, then cleared.
    pub notification: Option<String>,
}

impl ViewState {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            scroll_offset: 0,
            max_scroll: 0,
            mouse_enabled: true,
            tree_visible: false,
            notification: None,
        }
    }

    /// Pure transition `(state, event) -> state`.
    pub fn apply(mut self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::SetLayout(layout) => {
                // Layout switches keep the scroll offset; the next render
                // recomputes max_scroll and re-clamps.
                self.layout = layout;
            }
            ViewEvent::ScrollBy(delta) => {
                self.scroll_offset = clamp_scroll(
                    self.scroll_offset as isize + delta,
                    self.max_scroll,
                );
            }
            ViewEvent::ToggleMouse => {
                self.mouse_enabled = !self.mouse_enabled;
            }
            ViewEvent::ToggleTree => {
                // Changing panel height shifts what prior offsets meant;
                // start over instead of remapping.
                self.tree_visible = !self.tree_visible;
                self.scroll_offset = 0;
            }
        }
        self
    }

    /// Recomputed on every render from the formatter output length and the
    /// visible height; the offset is immediately re-clamped so it is never
    /// left above the new bound.
    pub fn with_max_scroll(mut self, total_lines: usize, visible_height: usize) -> Self {
        self.max_scroll = total_lines.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);
        self
    }

    pub fn notify(mut self, message: impl Into<String>) -> Self {
        self.notification = Some(message.into());
        self
    }

    pub fn take_notification(&mut self) -> Option<String> {
        self.notification.take()
    }
}

/// Out-of-range offsets are clamped, never rejected. Idempotent.
pub fn clamp_scroll(offset: isize, max_scroll: usize) -> usize {
    offset.clamp(0, max_scroll as isize) as usize
}
