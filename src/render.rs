// src/render.rs

use crate::colors::{self, paint};
use crate::models::{Entry, Tag};
use chrono::{DateTime, Local, NaiveDate};

const TIME_FORMAT: &str = "%I:%M %p";
const TIME_WIDTH: usize = 8;
const DATE_FORMAT: &str = "%b %d, %Y";

/// Formats entries for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
}

/// Width of every tag glyph: the longest keyword plus a leading space.
pub fn glyph_width() -> usize {
    Tag::ALL.iter().map(|t| t.key().len()).max().unwrap_or(0) + 1
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Full glyph shows the keyword; the collapsed one only keeps the background.
    pub fn tag_glyph(&self, tag: Tag, collapsed: bool) -> String {
        let width = glyph_width();
        let label = if collapsed { "" } else { tag.key() };
        let padded = format!("{:>width$}", label, width = width);
        paint(&padded, &tag.colors(), self.color)
    }

    pub fn time(&self, ts: &DateTime<Local>) -> String {
        let t = format!("{:>width$}", ts.format(TIME_FORMAT).to_string(), width = TIME_WIDTH);
        paint(&t, &[colors::BRIGHT_BLACK], self.color)
    }

    pub fn date_header(&self, date: NaiveDate) -> String {
        let d = format!("[ {} ]", date.format(DATE_FORMAT));
        paint(&d, &[colors::BRIGHT_PURPLE], self.color)
    }

    pub fn entry_line(&self, entry: &Entry, collapsed: bool) -> String {
        format!(
            "{} {} {}",
            self.tag_glyph(entry.tag, collapsed),
            self.time(&entry.timestamp),
            entry.text
        )
    }

    /// Renders entries (oldest first) grouped by calendar day.
    ///
    /// A tag label is printed once per run of identical tags within a day;
    /// following entries of the run get the collapsed glyph. Every new day
    /// starts with a blank line and a header, and its first entry always
    /// shows the full label.
    pub fn render(&self, entries: &[Entry]) -> Vec<String> {
        let mut lines = Vec::with_capacity(entries.len() + 2);
        let Some(first) = entries.first() else {
            return lines;
        };

        let mut current_date = first.timestamp.date_naive();
        let mut current_tag: Option<Tag> = None;
        lines.push(self.date_header(current_date));

        for entry in entries {
            let date = entry.timestamp.date_naive();
            if date != current_date {
                current_date = date;
                current_tag = None;
                lines.push(String::new());
                lines.push(self.date_header(current_date));
            }

            if current_tag != Some(entry.tag) {
                current_tag = Some(entry.tag);
                lines.push(self.entry_line(entry, false));
            } else {
                lines.push(self.entry_line(entry, true));
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn entry(id: i64, day: u32, hour: u32, tag: Tag, text: &str) -> Entry {
        Entry {
            id,
            timestamp: Local.with_ymd_and_hms(2024, 5, day, hour, 30, 0).unwrap(),
            tag,
            text: text.to_string(),
        }
    }

    #[test]
    fn glyph_width_covers_every_tag() {
        assert_eq!(glyph_width(), 5);
        let plain = Renderer::new(false);
        for tag in Tag::ALL {
            assert_eq!(plain.tag_glyph(tag, false).len(), glyph_width());
            assert_eq!(plain.tag_glyph(tag, true).len(), glyph_width());
        }
    }

    #[test]
    fn groups_by_day_and_collapses_repeated_tags() {
        let entries = vec![
            entry(1, 1, 9, Tag::Win, "a"),
            entry(2, 1, 10, Tag::Win, "b"),
            entry(3, 1, 11, Tag::Fix, "c"),
            entry(4, 2, 9, Tag::Win, "d"),
        ];

        let lines = Renderer::new(false).render(&entries);
        assert_eq!(
            lines,
            vec![
                "[ May 01, 2024 ]",
                "  win 09:30 AM a",
                "      10:30 AM b",
                "  fix 11:30 AM c",
                "",
                "[ May 02, 2024 ]",
                "  win 09:30 AM d",
            ]
        );
    }

    #[test]
    fn same_day_number_in_different_months_starts_a_new_group() {
        let may = entry(1, 3, 9, Tag::Note, "may");
        let june = Entry {
            timestamp: Local.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap(),
            ..entry(2, 3, 9, Tag::Note, "june")
        };
        let lines = Renderer::new(false).render(&[may, june]);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "[ Jun 03, 2024 ]");
        assert_eq!(lines[4], " note 09:00 AM june");
    }

    #[test]
    fn collapsed_glyph_keeps_background_only() {
        let color = Renderer::new(true);
        let full = color.tag_glyph(Tag::Win, false);
        let collapsed = color.tag_glyph(Tag::Win, true);
        assert!(full.contains("win"));
        assert!(!collapsed.contains("win"));
        assert!(collapsed.starts_with(colors::BRIGHT_GREEN_BG));
        assert!(collapsed.contains("     "));
        assert!(collapsed.ends_with(colors::RESET));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(Renderer::new(true).render(&[]).is_empty());
    }
}
