use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::diff::{DiffLine, FileSection};
use crate::theme::Theme;

use super::{fit_width, hunk_label_line, section_header_lines};

const SEPARATOR: &str = "\u{2502}";

/// Column widths, fixed for a whole render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub old_gutter: usize,
    pub new_gutter: usize,
    pub left: usize,
    pub right: usize,
}

impl Columns {
    /// Gutter widths come from the highest line number any hunk header can
    /// reach; the remaining width splits into two content columns, left
    /// floor-divided, right taking the remainder.
    pub fn compute(sections: &[FileSection], width: usize) -> Self {
        let mut max_old = 1;
        let mut max_new = 1;
        for section in sections {
            let (old, new) = section.max_line_numbers();
            max_old = max_old.max(old);
            max_new = max_new.max(new);
        }
        let old_gutter = digits(max_old);
        let new_gutter = digits(max_new);
        // One space after each gutter plus the separator glyph.
        let content = width.saturating_sub(old_gutter + new_gutter + 3);
        let left = content / 2;
        let right = content - left;
        Self {
            old_gutter,
            new_gutter,
            left,
            right,
        }
    }

    pub fn total(&self) -> usize {
        self.old_gutter + 1 + self.left + 1 + self.new_gutter + 1 + self.right
    }
}

fn digits(n: usize) -> usize {
    let mut n = n;
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

/// Flatten parsed sections into two-column display lines. Context rows carry
/// both line numbers; a removed run followed by an added run is paired
/// positionally, with blank gutter and content on the unmatched side.
pub fn format_side_by_side(
    sections: &[FileSection],
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let cols = Columns::compute(sections, width);
    let mut lines: Vec<Line<'static>> = Vec::new();

    for (idx, section) in sections.iter().enumerate() {
        lines.extend(section_header_lines(&section.path, width, idx == 0, theme));

        for hunk in &section.hunks {
            if let Some(label) = hunk_label_line(hunk, theme) {
                lines.push(label);
            }

            let mut old_no = hunk.old_start;
            let mut new_no = hunk.new_start;
            let items = &hunk.lines;
            let mut i = 0;
            while i < items.len() {
                match &items[i] {
                    DiffLine::Context(text) => {
                        lines.push(make_row(
                            &cols,
                            Some(old_no),
                            text,
                            Style::default().fg(theme.text),
                            Some(new_no),
                            text,
                            Style::default().fg(theme.text),
                            theme,
                        ));
                        old_no += 1;
                        new_no += 1;
                        i += 1;
                    }
                    DiffLine::Removed(_) | DiffLine::Added(_) => {
                        // Collect the removed run, then the added run that
                        // follows it, and zip them position by position.
                        let del_start = i;
                        while i < items.len() && matches!(items[i], DiffLine::Removed(_)) {
                            i += 1;
                        }
                        let add_start = i;
                        while i < items.len() && matches!(items[i], DiffLine::Added(_)) {
                            i += 1;
                        }
                        let dels = &items[del_start..add_start];
                        let adds = &items[add_start..i];
                        let max = dels.len().max(adds.len());

                        for j in 0..max {
                            let (old, left, left_style) = match dels.get(j) {
                                Some(line) => {
                                    let row = (
                                        Some(old_no),
                                        line.content(),
                                        Style::default()
                                            .fg(theme.diff_del_fg)
                                            .bg(theme.diff_del_bg),
                                    );
                                    old_no += 1;
                                    row
                                }
                                None => (None, "", Style::default()),
                            };
                            let (new, right, right_style) = match adds.get(j) {
                                Some(line) => {
                                    let row = (
                                        Some(new_no),
                                        line.content(),
                                        Style::default()
                                            .fg(theme.diff_add_fg)
                                            .bg(theme.diff_add_bg),
                                    );
                                    new_no += 1;
                                    row
                                }
                                None => (None, "", Style::default()),
                            };
                            lines.push(make_row(
                                &cols, old, left, left_style, new, right, right_style, theme,
                            ));
                        }
                    }
                }
            }
        }
    }

    lines
}

#[allow(clippy::too_many_arguments)]
fn make_row(
    cols: &Columns,
    old: Option<usize>,
    left: &str,
    left_style: Style,
    new: Option<usize>,
    right: &str,
    right_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let gutter_style = Style::default().fg(theme.gutter);
    let sep_style = Style::default().fg(theme.divider);

    Line::from(vec![
        Span::styled(format_lineno(old, cols.old_gutter), gutter_style),
        Span::raw(" "),
        Span::styled(fit_width(left, cols.left), left_style),
        Span::styled(SEPARATOR.to_string(), sep_style),
        Span::styled(format_lineno(new, cols.new_gutter), gutter_style),
        Span::raw(" "),
        Span::styled(fit_width(right, cols.right), right_style),
    ])
}

fn format_lineno(n: Option<usize>, width: usize) -> String {
    match n {
        Some(n) => format!("{n:>width$}"),
        None => " ".repeat(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::parse_diff;
    use crate::render::line_text;

    const SAMPLE: &str = "\
diff --git a/f.rs b/f.rs
@@ -1,2 +1,2 @@
 ctx
-old
+new
";

    fn theme() -> Theme {
        Theme::from_name("one-dark")
    }

    #[test]
    fn test_columns_sum_to_width() {
        let sections = parse_diff(SAMPLE);
        for width in [20, 21, 40, 79, 80, 120, 121] {
            let cols = Columns::compute(&sections, width);
            assert_eq!(cols.total(), width, "width {width}");
        }
    }

    #[test]
    fn test_content_rows_fill_width_exactly() {
        let sections = parse_diff(SAMPLE);
        for width in [30, 31, 80] {
            let lines = format_side_by_side(&sections, width, &theme());
            // skip divider/header rows; content rows are the last two+one
            for line in &lines[2..] {
                assert_eq!(line_text(line).chars().count(), width);
            }
        }
    }

    #[test]
    fn test_canonical_fixture_pairs_on_one_row() {
        let sections = parse_diff(SAMPLE);
        let lines = format_side_by_side(&sections, 24, &theme());
        // divider, header, then 2 rows: ctx/ctx and old/new paired
        assert_eq!(lines.len(), 4);
        let ctx = line_text(&lines[2]);
        assert!(ctx.starts_with("1 ctx"));
        assert!(ctx.contains("\u{2502}1 ctx"));
        let pair = line_text(&lines[3]);
        assert!(pair.starts_with("2 old"));
        assert!(pair.contains("\u{2502}2 new"));
    }

    #[test]
    fn test_unmatched_removed_leaves_right_blank() {
        let raw = "diff --git a/f b/f\n@@ -1,2 +1,1 @@\n-gone\n-also\n+kept\n";
        let sections = parse_diff(raw);
        let lines = format_side_by_side(&sections, 30, &theme());
        let cols = Columns::compute(&sections, 30);
        let second = line_text(&lines[3]);
        assert!(second.starts_with("2 also"));
        // right side: blank gutter and blank content
        let right: String = second
            .chars()
            .skip(cols.old_gutter + 1 + cols.left + 1)
            .collect();
        assert!(right.trim().is_empty());
    }

    #[test]
    fn test_line_numbers_strictly_increase() {
        let raw = "diff --git a/f b/f\n@@ -10,4 +20,4 @@\n a\n-b\n+c\n d\n e\n";
        let sections = parse_diff(raw);
        let lines = format_side_by_side(&sections, 40, &theme());
        let nums: Vec<usize> = lines[2..]
            .iter()
            .filter_map(|l| line_text(l).split_whitespace().next()?.parse().ok())
            .collect();
        assert_eq!(nums, vec![10, 11, 12, 13]);
        // first row matches the declared start
        assert!(line_text(&lines[2]).contains("\u{2502}20 "));
    }

    #[test]
    fn test_gutter_width_from_max_reachable_line() {
        let raw = "diff --git a/f b/f\n@@ -998,5 +1,2 @@\n x\n";
        let sections = parse_diff(raw);
        let cols = Columns::compute(&sections, 40);
        assert_eq!(cols.old_gutter, 4); // 998 + 5 = 1003
        assert_eq!(cols.new_gutter, 1);
    }

    #[test]
    fn test_long_content_truncated_not_wrapped() {
        let long = "x".repeat(200);
        let raw = format!("diff --git a/f b/f\n@@ -1 +1 @@\n {long}\n");
        let sections = parse_diff(&raw);
        let lines = format_side_by_side(&sections, 30, &theme());
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[2]).chars().count(), 30);
    }
}
