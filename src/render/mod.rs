mod inline;
mod side_by_side;
mod tree;

pub use inline::format_inline;
pub use side_by_side::format_side_by_side;
pub use tree::{build_tree, render_tree};

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::diff::Hunk;
use crate::theme::Theme;

/// Blank line + full-width divider + file-name header, all heading-styled.
/// The leading blank is skipped for the very first section.
pub(crate) fn section_header_lines(
    path: &str,
    width: usize,
    first: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(3);
    if !first {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(theme.divider),
    )));
    lines.push(Line::from(Span::styled(
        path.to_string(),
        Style::default()
            .fg(theme.heading)
            .add_modifier(Modifier::BOLD),
    )));
    lines
}

/// The hunk marker with its numeric range stripped: only the trailing
/// context text survives. Returns None when nothing would remain.
pub(crate) fn hunk_label_line(hunk: &Hunk, theme: &Theme) -> Option<Line<'static>> {
    if hunk.context.is_empty() {
        return None;
    }
    Some(Line::from(Span::styled(
        format!("@@ {}", hunk.context),
        Style::default().fg(theme.diff_hunk_header_fg),
    )))
}

/// Truncate to `width` chars, or pad with spaces up to it.
pub(crate) fn fit_width(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    let len = out.chars().count();
    if len < width {
        out.extend(std::iter::repeat(' ').take(width - len));
    }
    out
}

#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{parse_diff, DiffLine};
    use crate::theme::Theme;

    // Both formatters must carry every parsed content line; side-by-side may
    // only differ by the rows where a removed/added pair shares one row.
    #[test]
    fn test_no_content_line_is_dropped() {
        let raw = "\
diff --git a/a.rs b/a.rs
@@ -1,4 +1,5 @@ fn demo()
 keep
-gone
+here
+extra
 tail
diff --git a/b.rs b/b.rs
@@ -7,2 +7,1 @@
-one
-two
+merged
";
        let sections = parse_diff(raw);
        let theme = Theme::from_name("one-dark");

        let mut content_lines = 0;
        let mut expected_rows = 0;
        for section in &sections {
            for hunk in &section.hunks {
                let mut i = 0;
                let lines = &hunk.lines;
                while i < lines.len() {
                    match lines[i] {
                        DiffLine::Context(_) => {
                            content_lines += 1;
                            expected_rows += 1;
                            i += 1;
                        }
                        _ => {
                            let start = i;
                            while i < lines.len() && matches!(lines[i], DiffLine::Removed(_)) {
                                i += 1;
                            }
                            let dels = i - start;
                            let add_start = i;
                            while i < lines.len() && matches!(lines[i], DiffLine::Added(_)) {
                                i += 1;
                            }
                            let adds = i - add_start;
                            content_lines += dels + adds;
                            expected_rows += dels.max(adds);
                        }
                    }
                }
            }
        }

        // 2 two-line headers (divider + file name) + 1 blank + 1 hunk label
        // are the only non-content lines.
        let inline = format_inline(&sections, 60, &theme);
        assert_eq!(inline.len() - 6, content_lines);

        let sbs = format_side_by_side(&sections, 60, &theme);
        assert_eq!(sbs.len() - 6, expected_rows);
    }
}
