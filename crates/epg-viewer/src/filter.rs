//! Schedule filter: selected channel, selected date and the date window
//! the picker is allowed to move in.

use chrono::{Duration, NaiveDate};

/// Wire and `<input type="date">` format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[today - span, today + span]` window of selectable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    today: NaiveDate,
    span_days: i64,
}

impl DateWindow {
    pub fn new(today: NaiveDate, span_days: i64) -> Self {
        Self {
            today,
            span_days: span_days.max(0),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn min(&self) -> NaiveDate {
        self.today - Duration::days(self.span_days)
    }

    pub fn max(&self) -> NaiveDate {
        self.today + Duration::days(self.span_days)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min() <= date && date <= self.max()
    }

    /// Parse a picker value, accepting it only inside the window.
    pub fn parse(&self, raw: &str) -> Result<NaiveDate, DateRejected> {
        let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map_err(|_| DateRejected::Unparseable(raw.to_string()))?;
        if self.contains(date) {
            Ok(date)
        } else {
            Err(DateRejected::OutOfWindow {
                date,
                min: self.min(),
                max: self.max(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRejected {
    #[error("not a YYYY-MM-DD date: {0:?}")]
    Unparseable(String),
    #[error("{date} is outside {min}..={max}")]
    OutOfWindow {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
}

/// Current filter selection. An empty channel means all channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub channel: String,
    pub date: NaiveDate,
}

impl FilterState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            channel: String::new(),
            date,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn query(&self) -> ProgramQuery {
        ProgramQuery {
            channel: Some(self.channel.clone()).filter(|c| !c.is_empty()),
            date: Some(self.date_str()),
        }
    }
}

/// Query parameters of one schedule request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramQuery {
    pub channel: Option<String>,
    pub date: Option<String>,
}

/// Label shown for the empty channel value.
pub const ALL_CHANNELS: &str = "All Channels";

/// One entry of the channel dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOption {
    pub value: String,
    pub label: String,
}

/// `All Channels` followed by the derived channels in their given order.
pub fn channel_options(channels: &[String]) -> Vec<ChannelOption> {
    std::iter::once(ChannelOption {
        value: String::new(),
        label: ALL_CHANNELS.to_string(),
    })
    .chain(channels.iter().map(|ch| ChannelOption {
        value: ch.clone(),
        label: ch.clone(),
    }))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let w = DateWindow::new(day(2024, 3, 1), 7);
        assert_eq!(w.min(), day(2024, 2, 23));
        assert_eq!(w.max(), day(2024, 3, 8));
        assert!(w.contains(day(2024, 2, 23)));
        assert!(w.contains(day(2024, 3, 8)));
        assert!(!w.contains(day(2024, 2, 22)));
        assert!(!w.contains(day(2024, 3, 9)));
    }

    #[test]
    fn parse_rejects_outside_window() {
        let w = DateWindow::new(day(2024, 3, 1), 7);
        assert_eq!(w.parse("2024-03-05"), Ok(day(2024, 3, 5)));
        assert!(matches!(
            w.parse("2024-03-20"),
            Err(DateRejected::OutOfWindow { .. })
        ));
        assert!(matches!(w.parse(""), Err(DateRejected::Unparseable(_))));
        assert!(matches!(w.parse("03/05/2024"), Err(DateRejected::Unparseable(_))));
    }

    #[test]
    fn query_omits_all_channels() {
        let mut f = FilterState::new(day(2024, 1, 1));
        assert_eq!(
            f.query(),
            ProgramQuery {
                channel: None,
                date: Some("2024-01-01".into())
            }
        );
        f.channel = "BBC1".into();
        assert_eq!(f.query().channel.as_deref(), Some("BBC1"));
    }

    #[test]
    fn options_start_with_all_channels() {
        let opts = channel_options(&["BBC1".to_string(), "ITV".to_string()]);
        let labels: Vec<&str> = opts.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["All Channels", "BBC1", "ITV"]);
        assert_eq!(opts[0].value, "");
        assert_eq!(opts[2].value, "ITV");
    }
}
