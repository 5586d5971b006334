use chrono::NaiveDate;

/// e.g. "January 30, 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Turns every line ending inside regular prose into a markdown hard break by
/// appending two trailing spaces, so a single newline in a letter renders as
/// a line break. Fenced code blocks are left untouched.
pub fn hard_line_breaks(md_text: &str) -> String {
    let mut res = String::with_capacity(md_text.len() + md_text.len() / 16);
    let mut in_fence = false;

    for line in md_text.lines() {
        let trimmed = line.trim_start();
        let is_fence = trimmed.starts_with("```") || trimmed.starts_with("~~~");
        if is_fence {
            in_fence = !in_fence;
        }

        res.push_str(line);
        if !in_fence && !is_fence && !line.trim().is_empty() && !line.ends_with("  ") {
            res.push_str("  ");
        }
        res.push('\n');
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 30).unwrap();
        assert_eq!(format_long_date(date), "January 30, 2026");
    }

    #[test]
    fn test_hard_line_breaks() {
        let md = "first line\nsecond line\n\nthird line\n";
        assert_eq!(
            hard_line_breaks(md),
            "first line  \nsecond line  \n\nthird line  \n"
        );
    }

    #[test]
    fn test_hard_line_breaks_keeps_existing_break() {
        let md = "already broken  \nnext\n";
        assert_eq!(hard_line_breaks(md), "already broken  \nnext  \n");
    }

    #[test]
    fn test_hard_line_breaks_skips_code_fences() {
        let md = "text\n```\nlet x = 1;\nlet y = 2;\n```\nafter\n";
        assert_eq!(
            hard_line_breaks(md),
            "text  \n```\nlet x = 1;\nlet y = 2;\n```\nafter  \n"
        );
    }
}
