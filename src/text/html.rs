//! Flattening of rich-text editor markup into measurable text.
//!
//! Block elements become line breaks, list items get a bullet, table cells
//! are separated by tabs and rows by newlines. Inline tags are dropped and
//! entities are unescaped. Good enough for height estimation; exact
//! rendering is the host's job.

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "table", "thead",
    "tbody", "tr", "blockquote", "pre", "section", "figure", "figcaption",
];

/// Flatten HTML into plain text with pre-wrap line structure.
pub fn flatten(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        push_text(&mut out, &rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // Unterminated tag: treat the remainder as text.
            push_text(&mut out, &rest[open..]);
            rest = "";
            break;
        };
        apply_tag(&mut out, &after[..close]);
        rest = &after[close + 1..];
    }
    push_text(&mut out, rest);

    let trimmed = out.trim_end_matches('\n');
    trimmed.to_string()
}

/// Whether the markup contains a table, whose fit may not be monotonic in
/// font size.
pub fn contains_table(html: &str) -> bool {
    html.to_ascii_lowercase().contains("<table")
}

fn push_text(out: &mut String, raw: &str) {
    if raw.is_empty() {
        return;
    }
    out.push_str(&htmlize::unescape(raw));
}

fn ensure_line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn apply_tag(out: &mut String, tag: &str) {
    let tag = tag.trim();
    if tag.starts_with('!') || tag.starts_with('?') {
        return;
    }
    let closing = tag.starts_with('/');
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    match name.as_str() {
        "br" => out.push('\n'),
        "td" | "th" if closing => out.push('\t'),
        "li" if !closing => {
            ensure_line_break(out);
            out.push_str("\u{2022} ");
        }
        n if BLOCK_TAGS.contains(&n) => ensure_line_break(out),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(flatten("just text"), "just text");
    }

    #[test]
    fn test_paragraphs_become_lines() {
        assert_eq!(flatten("<p>One</p><p>Two</p>"), "One\nTwo");
    }

    #[test]
    fn test_inline_tags_dropped() {
        assert_eq!(
            flatten("<p>Some <strong>bold</strong> and <em>italic</em></p>"),
            "Some bold and italic"
        );
    }

    #[test]
    fn test_br_and_entities() {
        assert_eq!(flatten("a<br>b &amp; c<br/>&lt;d&gt;"), "a\nb & c\n<d>");
    }

    #[test]
    fn test_list_items_get_bullets() {
        assert_eq!(
            flatten("<ul><li>first</li><li>second</li></ul>"),
            "\u{2022} first\n\u{2022} second"
        );
    }

    #[test]
    fn test_table_rows_and_cells() {
        let flat = flatten("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>");
        assert_eq!(flat, "a\tb\t\nc\t");
    }

    #[test]
    fn test_contains_table_case_insensitive() {
        assert!(contains_table("<TABLE><tr></tr></TABLE>"));
        assert!(!contains_table("<p>tablet</p>"));
    }

    #[test]
    fn test_unterminated_tag_kept_as_text() {
        assert_eq!(flatten("a < b"), "a < b");
    }
}
