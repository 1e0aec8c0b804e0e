use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::diff::{DiffLine, FileSection};
use crate::theme::Theme;

use super::{hunk_label_line, section_header_lines};

/// Flatten parsed sections into display lines, in input order, with no
/// line-number columns. Removed/added lines keep their one-character
/// diff prefix so columns line up the way raw diff output does.
pub fn format_inline(sections: &[FileSection], width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for (idx, section) in sections.iter().enumerate() {
        lines.extend(section_header_lines(&section.path, width, idx == 0, theme));

        for hunk in &section.hunks {
            if let Some(label) = hunk_label_line(hunk, theme) {
                lines.push(label);
            }
            for line in &hunk.lines {
                lines.push(match line {
                    DiffLine::Context(text) => Line::from(Span::styled(
                        format!(" {text}"),
                        Style::default().fg(theme.text),
                    )),
                    DiffLine::Removed(text) => Line::from(Span::styled(
                        format!("-{text}"),
                        Style::default().fg(theme.diff_del_fg).bg(theme.diff_del_bg),
                    )),
                    DiffLine::Added(text) => Line::from(Span::styled(
                        format!("+{text}"),
                        Style::default().fg(theme.diff_add_fg).bg(theme.diff_add_bg),
                    )),
                });
            }
        }
    }

    lines
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

    #[test]
    fn test_canonical_fixture_order() {
        let sections = parse_diff(SAMPLE);
        let theme = Theme::from_name("one-dark");
        let lines = format_inline(&sections, 40, &theme);
        // divider + header, then the three content lines
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts[1], "f.rs");
        assert_eq!(&texts[2..], &[" ctx", "-old", "+new"]);
    }

    #[test]
    fn test_first_section_has_no_leading_blank() {
        let sections = parse_diff(SAMPLE);
        let theme = Theme::from_name("one-dark");
        let lines = format_inline(&sections, 10, &theme);
        assert_eq!(line_text(&lines[0]), "\u{2500}".repeat(10));
    }

    #[test]
    fn test_later_sections_get_blank_divider_header() {
        let raw = format!("{SAMPLE}diff --git a/g.rs b/g.rs\n@@ -1 +1 @@\n ctx2\n");
        let sections = parse_diff(&raw);
        let theme = Theme::from_name("one-dark");
        let lines = format_inline(&sections, 10, &theme);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        let blank = texts.iter().position(|t| t.is_empty()).unwrap();
        assert_eq!(texts[blank + 1], "\u{2500}".repeat(10));
        assert_eq!(texts[blank + 2], "g.rs");
        assert_eq!(texts[blank + 3], " ctx2");
    }

    #[test]
    fn test_empty_hunk_marker_suppressed() {
        let sections = parse_diff(SAMPLE);
        let theme = Theme::from_name("one-dark");
        let lines = format_inline(&sections, 40, &theme);
        assert!(lines.iter().all(|l| !line_text(l).starts_with("@@")));
    }

    #[test]
    fn test_hunk_context_kept() {
        let raw = "diff --git a/f.rs b/f.rs\n@@ -1 +1 @@ fn main()\n ctx\n";
        let sections = parse_diff(raw);
        let theme = Theme::from_name("one-dark");
        let lines = format_inline(&sections, 40, &theme);
        assert!(lines.iter().any(|l| line_text(l) == "@@ fn main()"));
    }
}
