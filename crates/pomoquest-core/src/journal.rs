//! Journal export: a dated heading and the entry text as markdown.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::JournalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    date: NaiveDate,
    text: String,
}

impl JournalEntry {
    pub fn new(date: NaiveDate, text: &str) -> Result<Self, JournalError> {
        if text.trim().is_empty() {
            return Err(JournalError::EmptyEntry);
        }
        Ok(Self {
            date,
            text: text.to_string(),
        })
    }

    /// Entry dated with the local calendar day.
    pub fn today(text: &str) -> Result<Self, JournalError> {
        Self::new(chrono::Local::now().date_naive(), text)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `Journal Entry: DD/MM/YY`
    pub fn heading(&self) -> String {
        format!("Journal Entry: {}", self.date.format("%d/%m/%y"))
    }

    pub fn file_name(&self) -> String {
        self.numbered_file_name(1)
    }

    /// `Journal-YYYY-MM-DD.md` for the first export of a day,
    /// `Journal-YYYY-MM-DD-N.md` after that.
    fn numbered_file_name(&self, n: u32) -> String {
        let day = self.date.format("%Y-%m-%d");
        if n <= 1 {
            format!("Journal-{day}.md")
        } else {
            format!("Journal-{day}-{n}.md")
        }
    }

    /// One paragraph per input line, blank lines included.
    pub fn render(&self) -> String {
        let mut out = format!("# {}\n", self.heading());
        for line in self.text.split('\n').map(str::trim_end) {
            out.push('\n');
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Write the entry into `dir`, creating it if needed. Returns the file path.
    ///
    /// Earlier exports are never replaced: a later entry for the same day
    /// gets the next free numbered name.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, JournalError> {
        std::fs::create_dir_all(dir).map_err(|source| JournalError::WriteFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut n = 1;
        loop {
            let path = dir.join(self.numbered_file_name(n));
            let write_failed = |source| JournalError::WriteFailed {
                path: path.clone(),
                source,
            };
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(self.render().as_bytes()).map_err(write_failed)?;
                    tracing::info!(path = %path.display(), "journal exported");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
                Err(e) => return Err(write_failed(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(
            JournalEntry::new(date(), " \n\t "),
            Err(JournalError::EmptyEntry)
        ));
    }

    #[test]
    fn heading_and_file_name_use_the_date() {
        let entry = JournalEntry::new(date(), "Finished chapter 3.").unwrap();
        assert_eq!(entry.heading(), "Journal Entry: 07/03/24");
        assert_eq!(entry.file_name(), "Journal-2024-03-07.md");
    }

    #[test]
    fn each_line_becomes_a_paragraph() {
        let entry = JournalEntry::new(date(), "first\n\nsecond  \nthird").unwrap();
        assert_eq!(
            entry.render(),
            "# Journal Entry: 07/03/24\n\nfirst\n\n\n\nsecond\n\nthird\n"
        );
    }

    #[test]
    fn export_writes_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("journals");
        let entry = JournalEntry::new(date(), "Good focus today.").unwrap();

        let path = entry.export(&target).unwrap();
        assert_eq!(path, target.join("Journal-2024-03-07.md"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Good focus today."));
    }

    #[test]
    fn same_day_exports_keep_earlier_entries() {
        let dir = tempfile::tempdir().unwrap();
        let morning = JournalEntry::new(date(), "Planned the day.").unwrap();
        let evening = JournalEntry::new(date(), "Shipped the parser.").unwrap();

        let first = morning.export(dir.path()).unwrap();
        let second = evening.export(dir.path()).unwrap();
        let third = evening.export(dir.path()).unwrap();

        assert_eq!(first, dir.path().join("Journal-2024-03-07.md"));
        assert_eq!(second, dir.path().join("Journal-2024-03-07-2.md"));
        assert_eq!(third, dir.path().join("Journal-2024-03-07-3.md"));
        assert!(std::fs::read_to_string(first).unwrap().contains("Planned the day."));
        assert!(std::fs::read_to_string(second).unwrap().contains("Shipped the parser."));
    }
}
