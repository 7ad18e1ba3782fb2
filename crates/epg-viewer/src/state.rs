//! Schedule page state.
//!
//! Plain data plus the transitions the page drives: start a load, apply a
//! load result, change a filter, open and close the details dialog. The
//! reactive wiring in `lib.rs` holds one `GuideState` in a signal and calls
//! these methods; nothing here touches the DOM or the network.

use chrono::{Local, NaiveDate};
use indexmap::IndexSet;

use crate::api::ApiResult;
use crate::components::program_table::TableView;
use crate::filter::{DateRejected, DateWindow, FilterState, ProgramQuery};
use crate::types::Program;

/// Error text used when a failed load carries no message.
pub const FALLBACK_ERROR: &str = "Failed to fetch program schedule.";

/// Handle for one issued request. Only the most recently issued ticket may
/// apply its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    query: ProgramQuery,
}

impl LoadTicket {
    pub fn query(&self) -> &ProgramQuery {
        &self.query
    }
}

#[derive(Debug, Clone)]
pub struct GuideState {
    programs: Vec<Program>,
    channels: Vec<String>,
    filter: FilterState,
    window: DateWindow,
    loading: bool,
    error: Option<String>,
    details: Option<Program>,
    issued: u64,
}

impl GuideState {
    /// Fresh page state: today's date, all channels, loading until the
    /// first request completes.
    pub fn new(today: NaiveDate, window_days: i64) -> Self {
        Self {
            programs: Vec::new(),
            channels: Vec::new(),
            filter: FilterState::new(today),
            window: DateWindow::new(today, window_days),
            loading: true,
            error: None,
            details: None,
            issued: 0,
        }
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Mark the page as loading and issue a ticket for the current filter.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        LoadTicket {
            seq: self.issued,
            query: self.filter.query(),
        }
    }

    /// Apply a finished request. Returns `false` when a newer request has
    /// been issued since, in which case the result is dropped.
    pub fn complete_load(&mut self, ticket: &LoadTicket, result: ApiResult<Vec<Program>>) -> bool {
        if ticket.seq != self.issued {
            log::debug!(
                "dropping stale schedule response #{} (latest #{})",
                ticket.seq,
                self.issued
            );
            return false;
        }

        match result {
            Ok(programs) => {
                self.channels = derive_channels(&programs);
                self.programs = programs;
                self.error = None;
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                });
                // Channel list is left as is.
                self.programs.clear();
            }
        }
        self.loading = false;
        true
    }

    // ── Filters ─────────────────────────────────────────────────────

    /// Returns `true` if the selection changed.
    pub fn select_channel(&mut self, channel: String) -> bool {
        if self.filter.channel == channel {
            return false;
        }
        self.filter.channel = channel;
        true
    }

    /// Commit a picker value. Values outside the window are rejected and
    /// leave the selection untouched.
    pub fn select_date(&mut self, raw: &str) -> Result<bool, DateRejected> {
        let date = self.window.parse(raw)?;
        if self.filter.date == date {
            return Ok(false);
        }
        self.filter.date = date;
        Ok(true)
    }

    // ── Details dialog ──────────────────────────────────────────────

    pub fn open_details(&mut self, program: Program) {
        self.details = Some(program);
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }

    pub fn show_details(&self) -> bool {
        self.details.is_some()
    }

    pub fn selected_program(&self) -> Option<&Program> {
        self.details.as_ref()
    }

    /// Table contents in the browser's local zone.
    pub fn table_view(&self) -> TableView {
        TableView::build(self.loading, self.error(), &self.programs, &Local)
    }
}

/// Unique non-empty channels in order of first appearance.
pub fn derive_channels(programs: &[Program]) -> Vec<String> {
    programs
        .iter()
        .filter_map(Program::channel_name)
        .map(str::to_string)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::components::details_dialog::DetailsView;
    use crate::filter::channel_options;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn program(id: i64, title: &str, channel: Option<&str>) -> Program {
        Program {
            id: Some(crate::types::ProgramId::Number(id.into())),
            title: title.into(),
            start_time: "2024-01-01T08:00:00Z".into(),
            end_time: "2024-01-01T08:30:00Z".into(),
            channel: channel.map(str::to_string),
            genre: None,
            description: None,
        }
    }

    fn loaded(programs: Vec<Program>) -> GuideState {
        let mut state = GuideState::new(today(), 7);
        let ticket = state.begin_load();
        assert!(state.complete_load(&ticket, Ok(programs)));
        state
    }

    #[test]
    fn starts_loading_with_today_and_all_channels() {
        let state = GuideState::new(today(), 7);
        assert!(state.is_loading());
        assert_eq!(state.filter().channel, "");
        assert_eq!(state.filter().date_str(), "2024-01-01");
        assert_eq!(state.table_view(), TableView::Loading);
    }

    #[test]
    fn success_derives_channels_in_first_seen_order() {
        let state = loaded(vec![
            program(1, "News", Some("BBC1")),
            program(2, "Quiz", Some("ITV")),
            program(3, "Weather", Some("BBC1")),
            program(4, "Filler", None),
        ]);
        assert!(!state.is_loading());
        assert_eq!(state.channels(), ["BBC1", "ITV"]);

        let labels: Vec<String> = channel_options(state.channels())
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, ["All Channels", "BBC1", "ITV"]);
    }

    #[test]
    fn failure_clears_programs_and_shows_error() {
        let mut state = loaded(vec![
            program(1, "News", Some("BBC1")),
            program(2, "Quiz", Some("ITV")),
        ]);
        let ticket = state.begin_load();
        assert!(state.complete_load(&ticket, Err(FetchError::from_status(500, "boom"))));

        assert!(state.programs().is_empty());
        assert_eq!(state.error(), Some("boom"));
        assert!(!state.is_loading());
        assert_eq!(state.table_view(), TableView::Error("boom".into()));
        // Filter options survive the failure.
        assert_eq!(state.channels(), ["BBC1", "ITV"]);
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let mut state = GuideState::new(today(), 7);
        let ticket = state.begin_load();
        state.complete_load(&ticket, Err(FetchError::Network(String::new())));
        assert_eq!(state.error(), Some(FALLBACK_ERROR));
    }

    #[test]
    fn begin_load_clears_previous_error() {
        let mut state = GuideState::new(today(), 7);
        let ticket = state.begin_load();
        state.complete_load(&ticket, Err(FetchError::Network("offline".into())));
        assert!(state.error().is_some());

        state.begin_load();
        assert!(state.error().is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn empty_success_shows_empty_state() {
        let state = loaded(vec![]);
        assert_eq!(state.table_view(), TableView::Empty);
        assert!(state.channels().is_empty());
    }

    #[test]
    fn channel_change_is_carried_by_next_request() {
        let mut state = loaded(vec![program(1, "News", Some("BBC1"))]);
        let date_before = state.filter().date;

        assert!(state.select_channel("BBC1".into()));
        let ticket = state.begin_load();
        assert_eq!(ticket.query().channel.as_deref(), Some("BBC1"));
        assert_eq!(ticket.query().date.as_deref(), Some("2024-01-01"));
        assert_eq!(state.filter().date, date_before);

        assert!(!state.select_channel("BBC1".into()));
    }

    #[test]
    fn date_change_is_bounded_by_window() {
        let mut state = GuideState::new(today(), 7);
        assert_eq!(state.select_date("2024-01-08"), Ok(true));
        assert_eq!(state.select_date("2024-01-08"), Ok(false));
        assert!(state.select_date("2024-01-09").is_err());
        assert!(state.select_date("").is_err());
        assert_eq!(state.filter().date_str(), "2024-01-08");
        assert_eq!(state.begin_load().query().date.as_deref(), Some("2024-01-08"));
    }

    #[test]
    fn rejected_date_keeps_committed_filter() {
        let mut state = loaded(vec![program(1, "News", Some("BBC1"))]);
        assert_eq!(state.select_date("2024-01-03"), Ok(true));

        for raw in ["", "not a date", "2023-12-24", "2024-01-09"] {
            assert!(state.select_date(raw).is_err(), "{raw:?} accepted");
            assert_eq!(state.filter().date_str(), "2024-01-03");
        }
        assert_eq!(state.begin_load().query().date.as_deref(), Some("2024-01-03"));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut state = GuideState::new(today(), 7);
        let first = state.begin_load();
        state.select_channel("ITV".into());
        let second = state.begin_load();

        assert!(state.complete_load(&second, Ok(vec![program(2, "Quiz", Some("ITV"))])));
        assert!(!state.complete_load(&first, Ok(vec![program(1, "News", Some("BBC1"))])));

        assert_eq!(state.programs().len(), 1);
        assert_eq!(state.programs()[0].title, "Quiz");
        assert_eq!(state.channels(), ["ITV"]);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut state = GuideState::new(today(), 7);
        let first = state.begin_load();
        let _second = state.begin_load();

        assert!(!state.complete_load(&first, Err(FetchError::Network("late".into()))));
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn details_open_and_close() {
        let news = program(1, "News", Some("BBC1"));
        let mut state = loaded(vec![news.clone(), program(2, "Quiz", Some("ITV"))]);

        state.open_details(news.clone());
        assert!(state.show_details());
        let view = DetailsView::build(state.selected_program().unwrap(), &Utc);
        assert_eq!(view.title, "News");
        assert_eq!(view.schedule, "08:00 - 08:30 (30 min)");

        state.close_details();
        assert!(!state.show_details());
        assert!(state.selected_program().is_none());
    }

    #[test]
    fn derive_channels_skips_blank_names() {
        let programs = vec![
            program(1, "A", Some("")),
            program(2, "B", Some("ITV")),
            program(3, "C", None),
        ];
        assert_eq!(derive_channels(&programs), ["ITV"]);
    }
}
