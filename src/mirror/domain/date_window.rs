use super::timestamp::{self, Timestamp};
use chrono::Duration;

/// Longest `lastMod` range the NVD API accepts in one query
pub const MAX_WINDOW_DAYS: u32 = 120;

/// A `[start, end]` range of last-modified timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    start: Timestamp,
    end: Timestamp,
}

impl DateWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    pub fn end(&self) -> &Timestamp {
        &self.end
    }

    /// `lastModStartDate` query value
    pub fn start_param(&self) -> String {
        timestamp::format_timestamp(&self.start)
    }

    /// `lastModEndDate` query value
    pub fn end_param(&self) -> String {
        timestamp::format_timestamp(&self.end)
    }

    /// Splits the window into consecutive windows of at most `max_days`
    ///
    /// Adjacent windows share their boundary. An empty or inverted window,
    /// or `max_days == 0`, yields the window unchanged.
    pub fn split(&self, max_days: u32) -> Vec<DateWindow> {
        if max_days == 0 || self.end <= self.start {
            return vec![self.clone()];
        }

        let step = Duration::days(i64::from(max_days));
        let mut windows = Vec::new();
        let mut cursor = self.start;

        while cursor < self.end {
            let next = match cursor.checked_add_signed(step) {
                Some(next) if next < self.end => next,
                _ => self.end,
            };
            windows.push(DateWindow::new(cursor, next));
            cursor = next;
        }

        windows
    }
}
