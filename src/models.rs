// src/models.rs

use crate::colors;
use chrono::{DateTime, Local, LocalResult, Months, NaiveDate, TimeZone};

/// One journal entry as stored in the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub timestamp: DateTime<Local>, // persisted as UTC "YYYY-MM-DD HH:MM:SS"
    pub tag: Tag,
    pub text: String,
}

/// Entry category. The discriminant is the `msgtype` code written to disk,
/// so existing values must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Win = 1,
    Note = 2,
    Fix = 3,
    Task = 4,
    Url = 5,
    Work = 6,
}

impl Tag {
    pub const ALL: [Tag; 6] = [Tag::Win, Tag::Note, Tag::Fix, Tag::Task, Tag::Url, Tag::Work];

    pub fn key(self) -> &'static str {
        match self {
            Tag::Win => "win",
            Tag::Note => "note",
            Tag::Fix => "fix",
            Tag::Task => "task",
            Tag::Url => "url",
            Tag::Work => "work",
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Option<Tag> {
        Tag::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Case-insensitive lookup by keyword.
    pub fn parse(s: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|t| t.key().eq_ignore_ascii_case(s))
    }

    /// Background first, then the text style drawn on top of it.
    pub fn colors(self) -> [&'static str; 3] {
        match self {
            Tag::Win => [colors::BRIGHT_GREEN_BG, colors::BOLD, colors::WHITE],
            Tag::Note => [colors::CYAN_BG, colors::BOLD, colors::WHITE],
            Tag::Fix => [colors::BRIGHT_YELLOW_BG, colors::BOLD, colors::WHITE],
            Tag::Task => [colors::BRIGHT_PURPLE_BG, colors::BOLD, colors::WHITE],
            Tag::Url => [colors::BLACK_BG, colors::BOLD, colors::BLUE],
            Tag::Work => [colors::BRIGHT_WHITE_BG, colors::BOLD, colors::BLACK],
        }
    }
}

/// Relative time window for `view`. `Anytime` means no lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Range {
    #[default]
    Anytime,
    Today,
    Yesterday,
    Week,
    Month,
}

impl Range {
    pub const ALL: [Range; 4] = [Range::Today, Range::Yesterday, Range::Week, Range::Month];

    pub fn key(self) -> &'static str {
        match self {
            Range::Anytime => "anytime",
            Range::Today => "today",
            Range::Yesterday => "yesterday",
            Range::Week => "week",
            Range::Month => "month",
        }
    }

    /// Case-insensitive lookup by keyword. `anytime` is not a filter keyword.
    pub fn parse(s: &str) -> Option<Range> {
        Range::ALL.into_iter().find(|r| r.key().eq_ignore_ascii_case(s))
    }

    /// Inclusive lower bound relative to `now`: local midnight of the
    /// day the window starts on.
    pub fn cutoff(self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let today = now.date_naive();
        let start = match self {
            Range::Anytime => return None,
            Range::Today => Some(today),
            Range::Yesterday => today.pred_opt(),
            Range::Week => today.checked_sub_days(chrono::Days::new(7)),
            Range::Month => today.checked_sub_months(Months::new(1)),
        }?;
        Some(local_midnight(start))
    }
}

fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // midnight skipped by a DST jump
        LocalResult::None => Local.from_utc_datetime(&naive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn tag_codes_are_stable() {
        let codes: Vec<i64> = Tag::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(Tag::from_code(3), Some(Tag::Fix));
        assert_eq!(Tag::from_code(0), None);
    }

    #[test]
    fn tag_and_range_parse_ignore_case() {
        assert_eq!(Tag::parse("WiN"), Some(Tag::Win));
        assert_eq!(Range::parse("TODAY"), Some(Range::Today));
        assert_eq!(Range::parse("anytime"), None);
        assert_eq!(Tag::parse("today"), None);
    }

    #[test]
    fn cutoffs_are_local_midnights() {
        let now = Local::now();
        let today = Range::Today.cutoff(now).unwrap();
        assert_eq!(today.date_naive(), now.date_naive());
        assert_eq!((today.hour(), today.minute(), today.second()), (0, 0, 0));

        let week = Range::Week.cutoff(now).unwrap();
        assert_eq!(now.date_naive() - week.date_naive(), chrono::Duration::days(7));

        let yesterday = Range::Yesterday.cutoff(now).unwrap();
        assert_eq!(now.date_naive() - yesterday.date_naive(), chrono::Duration::days(1));

        assert_eq!(Range::Anytime.cutoff(now), None);
    }

    #[test]
    fn month_cutoff_clamps_to_month_end() {
        let now = Local.with_ymd_and_hms(2024, 3, 31, 15, 0, 0).unwrap();
        let month = Range::Month.cutoff(now).unwrap();
        assert_eq!((month.year(), month.month(), month.day()), (2024, 2, 29));
    }
}
