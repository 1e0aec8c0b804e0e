mod parse;

pub use parse::parse_diff;

/// One changed file: the `b/` path from the file header and its hunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSection {
    pub path: String,
    pub hunks: Vec<Hunk>,
}

/// One `@@`-delimited region of changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    /// Trailing context text from the `@@` line (often a function name).
    pub context: String,
    pub lines: Vec<DiffLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// Consumes an old and a new line number.
    Context(String),
    /// Consumes only an old line number.
    Removed(String),
    /// Consumes only a new line number.
    Added(String),
}

impl DiffLine {
    pub fn content(&self) -> &str {
        match self {
            DiffLine::Context(s) | DiffLine::Removed(s) | DiffLine::Added(s) => s,
        }
    }
}

impl FileSection {
    /// Highest old/new line number any hunk in this section can reach.
    pub fn max_line_numbers(&self) -> (usize, usize) {
        let mut max_old = 0;
        let mut max_new = 0;
        for hunk in &self.hunks {
            max_old = max_old.max(hunk.old_start + hunk.old_count);
            max_new = max_new.max(hunk.new_start + hunk.new_count);
        }
        (max_old, max_new)
    }
}
