use std::path::{Path, PathBuf};
use std::{fs, io};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::text_utils::format_long_date;

pub const DEFAULT_TITLE: &str = "Market Summary";

/// One daily letter, loaded from `<markdown_dir>/YYYY-MM-DD.md`. The file is
/// the canonical record; everything rendered from it is disposable.
pub struct Letter {
    pub date: NaiveDate,
    pub file_name: PathBuf,
    pub markdown: String,
}

impl Letter {
    pub fn open(path: &Path, date: NaiveDate) -> io::Result<Letter> {
        let markdown = fs::read_to_string(path)?;
        Ok(Letter {
            date,
            file_name: path.to_path_buf(),
            markdown,
        })
    }

    /// The subject line the model was asked to emit, e.g.
    /// `**Subject:** Bulls On Parade`.
    pub fn title(&self) -> String {
        lazy_static! {
            static ref SUBJECT_REGEX: Regex = Regex::new(r"\*\*Subject:\*\*\s*(.*)").unwrap();
        }

        match SUBJECT_REGEX.captures(&self.markdown) {
            Some(caps) => {
                let subject = caps[1].trim();
                if subject.is_empty() {
                    DEFAULT_TITLE.to_string()
                } else {
                    subject.to_string()
                }
            }
            None => DEFAULT_TITLE.to_string(),
        }
    }

    pub fn display_date(&self) -> String {
        format_long_date(self.date)
    }

    pub fn output_name(&self) -> String {
        format!("{}.html", self.date.format("%Y-%m-%d"))
    }
}

/// Letters are named after their calendar day. Anything that is not exactly
/// `YYYY-MM-DD` does not belong to the archive.
pub fn parse_file_date(path: &Path) -> Option<NaiveDate> {
    lazy_static! {
        static ref DATE_NAME_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }

    let stem = path.file_stem()?.to_str()?;
    if !DATE_NAME_REGEX.is_match(stem) {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}
