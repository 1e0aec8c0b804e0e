use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::theme::Theme;

/// One path segment. A file leaf with the same name as a directory is a
/// distinct node, so `a` (dir) and `a` (file) never merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub is_file: bool,
    pub children: Vec<TreeNode>,
}

/// Build the root-level siblings for the given changed-file paths.
/// Children are sorted lexicographically at every level, directories and
/// files together by name.
pub fn build_tree(paths: &[String]) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();

    for path in paths {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        insert(&mut roots, &segments);
    }

    sort_children(&mut roots);
    roots
}

fn insert(nodes: &mut Vec<TreeNode>, segments: &[&str]) {
    let Some((name, rest)) = segments.split_first() else {
        return;
    };
    let is_file = rest.is_empty();
    let idx = match nodes
        .iter()
        .position(|n| n.name == *name && n.is_file == is_file)
    {
        Some(idx) => idx,
        None => {
            nodes.push(TreeNode {
                name: name.to_string(),
                is_file,
                children: Vec::new(),
            });
            nodes.len() - 1
        }
    };
    insert(&mut nodes[idx].children, rest);
}

fn sort_children(nodes: &mut Vec<TreeNode>) {
    nodes.sort_by(|a, b| a.name.cmp(&b.name).then(a.is_file.cmp(&b.is_file)));
    for node in nodes.iter_mut() {
        sort_children(&mut node.children);
    }
}

/// Render the tree depth-first with an explicit stack. The prefix carried
/// per frame accumulates the ancestors' last-sibling status: a vertical
/// guide continues under non-last ancestors, blank indentation under last
/// ones. Output is capped at `max_rows`; trailing rows are dropped.
pub fn render_tree(roots: &[TreeNode], max_rows: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut rows: Vec<Line<'static>> = Vec::new();
    // (node, accumulated prefix, is last sibling), pushed in reverse so
    // siblings pop in order.
    let mut stack: Vec<(&TreeNode, String, bool)> = Vec::new();
    for (i, node) in roots.iter().enumerate().rev() {
        stack.push((node, String::new(), i + 1 == roots.len()));
    }

    while let Some((node, prefix, is_last)) = stack.pop() {
        if rows.len() >= max_rows {
            break;
        }
        let connector = if is_last { "\u{2514}\u{2500}\u{2500} " } else { "\u{251c}\u{2500}\u{2500} " };
        let style = if node.is_file {
            Style::default().fg(theme.text)
        } else {
            Style::default().fg(theme.heading)
        };
        rows.push(Line::from(vec![
            Span::styled(format!("{prefix}{connector}"), Style::default().fg(theme.text_muted)),
            Span::styled(node.name.clone(), style),
        ]));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}\u{2502}   ")
        };
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push((child, child_prefix.clone(), i + 1 == node.children.len()));
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::line_text;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_siblings_sorted_and_typed() {
        let roots = build_tree(&paths(&["a/b.txt", "a/c.txt", "d.txt"]));
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].name, "a");
        assert!(!roots[0].is_file);
        assert_eq!(roots[1].name, "d.txt");
        assert!(roots[1].is_file);
        let kids: Vec<&str> = roots[0].children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(kids, ["b.txt", "c.txt"]);
        assert!(roots[0].children.iter().all(|n| n.is_file));
    }

    #[test]
    fn test_connector_glyphs() {
        let theme = Theme::from_name("one-dark");
        let roots = build_tree(&paths(&["a/b.txt", "a/c.txt", "d.txt"]));
        let rows: Vec<String> = render_tree(&roots, 10, &theme).iter().map(line_text).collect();
        assert_eq!(
            rows,
            [
                "\u{251c}\u{2500}\u{2500} a",
                "\u{2502}   \u{251c}\u{2500}\u{2500} b.txt",
                "\u{2502}   \u{2514}\u{2500}\u{2500} c.txt",
                "\u{2514}\u{2500}\u{2500} d.txt",
            ]
        );
    }

    #[test]
    fn test_blank_indent_under_last_ancestor() {
        let theme = Theme::from_name("one-dark");
        let roots = build_tree(&paths(&["z/inner/file.rs"]));
        let rows: Vec<String> = render_tree(&roots, 10, &theme).iter().map(line_text).collect();
        assert_eq!(
            rows,
            [
                "\u{2514}\u{2500}\u{2500} z",
                "    \u{2514}\u{2500}\u{2500} inner",
                "        \u{2514}\u{2500}\u{2500} file.rs",
            ]
        );
    }

    #[test]
    fn test_row_cap_truncates_silently() {
        let theme = Theme::from_name("one-dark");
        let roots = build_tree(&paths(&["a.txt", "b.txt", "c.txt"]));
        let rows = render_tree(&roots, 2, &theme);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_file_and_dir_with_same_name_stay_distinct() {
        let roots = build_tree(&paths(&["x", "x/y.txt"]));
        assert_eq!(roots.len(), 2);
        let dir = roots.iter().find(|n| !n.is_file).unwrap();
        let file = roots.iter().find(|n| n.is_file).unwrap();
        assert_eq!(dir.name, "x");
        assert_eq!(file.name, "x");
        assert_eq!(dir.children.len(), 1);
    }

    #[test]
    fn test_first_seen_order_does_not_matter_for_output() {
        let a = build_tree(&paths(&["d.txt", "a/c.txt", "a/b.txt"]));
        let b = build_tree(&paths(&["a/b.txt", "a/c.txt", "d.txt"]));
        assert_eq!(a, b);
    }
}
