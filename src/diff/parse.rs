use super::{DiffLine, FileSection, Hunk};

/// Parse raw `git diff` output into file sections.
///
/// This never fails: unrecognized lines inside a hunk fall back to context
/// so malformed input degrades to being shown verbatim.
pub fn parse_diff(raw: &str) -> Vec<FileSection> {
    let mut sections: Vec<FileSection> = Vec::new();
    let mut current_file: Option<FileSection> = None;
    let mut current_hunk: Option<Hunk> = None;

    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            flush_hunk(&mut current_hunk, &mut current_file);
            if let Some(file) = current_file.take() {
                sections.push(file);
            }
            current_file = Some(FileSection {
                path: display_path(rest),
                hunks: Vec::new(),
            });
            continue;
        }

        if line.starts_with("@@") {
            if let Some(hunk) = parse_hunk_header(line) {
                flush_hunk(&mut current_hunk, &mut current_file);
                current_hunk = Some(hunk);
                continue;
            }
            // A malformed @@ line falls through and is kept as content.
        }

        let Some(hunk) = current_hunk.as_mut() else {
            // Between the file header and the first hunk only metadata
            // appears; none of it carries display value.
            continue;
        };

        if let Some(rest) = line.strip_prefix('-') {
            hunk.lines.push(DiffLine::Removed(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix('+') {
            hunk.lines.push(DiffLine::Added(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix(' ') {
            hunk.lines.push(DiffLine::Context(rest.to_string()));
        } else if line == "\\ No newline at end of file" {
            // Carries no display value.
        } else {
            // Defensive fallback: keep the line verbatim.
            hunk.lines.push(DiffLine::Context(line.to_string()));
        }
    }

    flush_hunk(&mut current_hunk, &mut current_file);
    if let Some(file) = current_file.take() {
        sections.push(file);
    }

    sections
}

fn flush_hunk(hunk: &mut Option<Hunk>, file: &mut Option<FileSection>) {
    if let Some(h) = hunk.take() {
        if let Some(f) = file.as_mut() {
            f.hunks.push(h);
        }
    }
}

/// Extract the display path from `a/<old> b/<new>`: the right-hand path,
/// so renames show the post-rename name.
fn display_path(rest: &str) -> String {
    let b_path = rest
        .rfind(" b/")
        .map(|idx| &rest[idx + 3..])
        .or_else(|| rest.split_whitespace().last())
        .unwrap_or(rest);
    b_path.to_string()
}

/// Parse `@@ -oldStart[,oldCount] +newStart[,newCount] @@ [context]`.
fn parse_hunk_header(line: &str) -> Option<Hunk> {
    let after = line.strip_prefix("@@ ")?;
    let end = after.find(" @@")?;
    let ranges = &after[..end];
    let context = after[end + 3..].trim().to_string();

    let mut parts = ranges.split_whitespace();
    let old = parts.next()?.strip_prefix('-')?;
    let new = parts.next()?.strip_prefix('+')?;
    let (old_start, old_count) = parse_range(old)?;
    let (new_start, new_count) = parse_range(new)?;

    Some(Hunk {
        old_start,
        old_count,
        new_start,
        new_count,
        context,
        lines: Vec::new(),
    })
}

/// Parse `start,count` or bare `start` (count defaults to 1).
fn parse_range(s: &str) -> Option<(usize, usize)> {
    match s.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((s.parse().ok()?, 1)),
    }
}
