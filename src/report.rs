use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use lazy_static::lazy_static;
use markdown::Options;
use regex::Regex;
use spdlog::warn;

use crate::text_utils::hard_line_breaks;
use crate::view::page_renderer::PageRenderer;

pub const BASE_TEMPLATE_FILE: &str = "report.html";

const FULL_DATE_PATTERN: &str = "%B %d, %Y at %I:%M %p";
const DATE_ONLY_PATTERN: &str = "%B %d, %Y";
const FALLBACK_ZONE: &str = "EST";

pub fn render_markdown(md_text: &str) -> io::Result<String> {
    let buf = hard_line_breaks(md_text);
    match markdown::to_html_with_options(buf.as_str(), &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

/// Finds the `**Date:** <value>` line the model was asked to emit and turns
/// it into the timestamp and display string of the report. A letter without
/// a parseable date is stamped with the current US Eastern wall clock.
pub fn extract_report_date(md_text: &str) -> (NaiveDateTime, String) {
    lazy_static! {
        static ref DATE_LINE_REGEX: Regex = Regex::new(r"\*\*Date:\*\*\s*(.+)").unwrap();
    }

    let extracted = DATE_LINE_REGEX
        .captures(md_text)
        .map(|caps| caps[1].trim().to_string());

    if let Some(extracted) = extracted {
        // Newer letters carry a time and a timezone abbreviation
        if let Some(date_time) = parse_full_date(&extracted) {
            return (date_time, extracted);
        }
        // Older letters carry the date only
        if let Ok(date) = NaiveDate::parse_from_str(&extracted, DATE_ONLY_PATTERN) {
            return (date.and_time(NaiveTime::MIN), extracted);
        }
    }

    let now = now_eastern();
    let display = format!("{} {}", now.format(FULL_DATE_PATTERN), FALLBACK_ZONE);
    (now, display)
}

fn parse_full_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, FULL_DATE_PATTERN) {
        return Some(date_time);
    }

    // chrono cannot parse a trailing zone abbreviation such as EST, so split
    // it off and keep the wall-clock time as-is
    let (head, tail) = value.rsplit_once(' ')?;
    if !(2..=5).contains(&tail.len()) || !tail.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    NaiveDateTime::parse_from_str(head, FULL_DATE_PATTERN).ok()
}

fn now_eastern() -> NaiveDateTime {
    let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
    Utc::now().with_timezone(&eastern).naive_local()
}

/// Renders one letter into a standalone HTML report. A missing base template
/// degrades to a bare inline wrapper, since a plain report still beats no
/// report at all.
pub fn render_report(md_text: &str, subreddit: &str, template_dir: &Path) -> io::Result<String> {
    let html_content = render_markdown(md_text)?;
    let (base_date, date_full) = extract_report_date(md_text);
    let date_ymd = base_date.format("%Y-%m-%d").to_string();

    let template_path = template_dir.join(BASE_TEMPLATE_FILE);
    let base_tpl_src = match fs::read_to_string(&template_path) {
        Ok(source) => source,
        Err(e) => {
            warn!(
                "Base template not available at {}: {}. Falling back to the inline wrapper",
                template_path.to_str().unwrap(),
                e
            );
            return Ok(inline_report(subreddit, &html_content));
        }
    };

    let renderer = PageRenderer::new(base_tpl_src)?;
    Ok(renderer.render(subreddit, &date_ymd, &date_full, &html_content))
}

fn inline_report(subreddit: &str, html_content: &str) -> String {
    format!(
        "<html><body><h1>r/{} daily letter</h1>{}</body></html>",
        subreddit, html_content
    )
}

#[cfg(test)]
mod tests {
    use crate::test_data::LETTER_MD;

    use super::*;

    #[test]
    fn test_render_markdown_single_newline_breaks() {
        let html = render_markdown("line one\nline two\n").unwrap();
        assert!(html.contains("<br"), "expected a hard break in {}", html);
    }

    #[test]
    fn test_render_markdown_gfm_table() {
        let md = "| Ticker | Move |\n| --- | --- |\n| GME | +12% |\n";
        let html = render_markdown(md).unwrap();
        assert!(html.contains("<table>"), "expected a table in {}", html);
        assert!(html.contains("<td>GME</td>"));
    }

    #[test]
    fn test_extract_report_date_full_format() {
        let (date_time, display) = extract_report_date(LETTER_MD);
        assert_eq!(display, "February 01, 2026 at 02:45 PM EST");
        assert_eq!(date_time.format("%Y-%m-%d %H:%M").to_string(), "2026-02-01 14:45");
    }

    #[test]
    fn test_extract_report_date_without_zone() {
        let md = "**Date:** March 03, 2026 at 09:30 AM\n";
        let (date_time, display) = extract_report_date(md);
        assert_eq!(display, "March 03, 2026 at 09:30 AM");
        assert_eq!(date_time.format("%Y-%m-%d %H:%M").to_string(), "2026-03-03 09:30");
    }

    #[test]
    fn test_extract_report_date_date_only() {
        let md = "some text\n**Date:** January 15, 2026\nmore text\n";
        let (date_time, display) = extract_report_date(md);
        assert_eq!(display, "January 15, 2026");
        assert_eq!(date_time.format("%Y-%m-%d %H:%M").to_string(), "2026-01-15 00:00");
    }

    #[test]
    fn test_extract_report_date_fallback() {
        let (_, display) = extract_report_date("no date line at all\n");
        assert!(display.ends_with(FALLBACK_ZONE));

        let (_, display) = extract_report_date("**Date:** not a real date\n");
        assert!(display.ends_with(FALLBACK_ZONE));
    }

    #[test]
    fn test_render_report_with_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(BASE_TEMPLATE_FILE),
            "[{{subreddit}}|{{date_ymd}}|{{date_full}}]{{{content}}}",
        )
        .unwrap();

        let html = render_report(LETTER_MD, "wallstreetbets", dir.path()).unwrap();
        assert!(html.starts_with(
            "[wallstreetbets|2026-02-01|February 01, 2026 at 02:45 PM EST]"
        ));
        assert!(html.contains("Bulls On Parade"));
    }

    #[test]
    fn test_render_report_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(BASE_TEMPLATE_FILE),
            "[{{date_ymd}}]{{{content}}}",
        )
        .unwrap();

        let first = render_report(LETTER_MD, "wallstreetbets", dir.path()).unwrap();
        let second = render_report(LETTER_MD, "wallstreetbets", dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_report_degrades_without_template() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_report(LETTER_MD, "wallstreetbets", dir.path()).unwrap();
        assert!(html.starts_with("<html><body><h1>r/wallstreetbets daily letter</h1>"));
        assert!(html.contains("Bulls On Parade"));
    }
}
