//! Program schedule table.

use std::fmt::Display;

use chrono::TimeZone;
use leptos::prelude::*;

use crate::format::{duration_str_in, time_range_in, MISSING};
use crate::types::Program;

pub const EMPTY_MESSAGE: &str = "No programs scheduled for selected filters.";

/// What the table area shows. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Loading,
    Error(String),
    Empty,
    Rows(Vec<ProgramRow>),
}

/// One rendered row plus the program it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRow {
    pub key: String,
    pub title: String,
    pub time_range: String,
    pub duration: String,
    pub channel: String,
    pub genre: String,
    pub program: Program,
}

impl ProgramRow {
    pub fn build<Tz>(index: usize, program: &Program, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            key: program.row_key(index),
            title: program.title.clone(),
            time_range: time_range_in(&program.start_time, &program.end_time, tz),
            duration: duration_str_in(&program.start_time, &program.end_time, tz),
            channel: program.channel.clone().unwrap_or_default(),
            genre: program.genre_name().unwrap_or(MISSING).to_string(),
            program: program.clone(),
        }
    }
}

impl TableView {
    pub fn build<Tz>(loading: bool, error: Option<&str>, programs: &[Program], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if loading {
            return TableView::Loading;
        }
        if let Some(e) = error.filter(|e| !e.is_empty()) {
            return TableView::Error(e.to_string());
        }
        if programs.is_empty() {
            return TableView::Empty;
        }
        TableView::Rows(
            programs
                .iter()
                .enumerate()
                .map(|(i, p)| ProgramRow::build(i, p, tz))
                .collect(),
        )
    }
}

/// Renders the schedule, or the spinner / error / empty banner in its place.
#[component]
pub fn ProgramScheduleTable(
    #[prop(into)] table: Signal<TableView>,
    on_show_details: Callback<Program>,
) -> impl IntoView {
    let body = move || match table.get() {
        TableView::Loading => view! {
            <div class="table-status">
                <span class="spinner" aria-label="Loading"></span>
            </div>
        }
        .into_any(),
        TableView::Error(e) => view! {
            <div class="alert alert-error">{e}</div>
        }
        .into_any(),
        TableView::Empty => view! {
            <div class="alert alert-info">{EMPTY_MESSAGE}</div>
        }
        .into_any(),
        TableView::Rows(rows) => view! {
            <div class="table-container">
                <table class="table" aria-label="EPG Program Table">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"Time"</th>
                            <th>"Duration"</th>
                            <th>"Channel"</th>
                            <th>"Genre"</th>
                            <th>"More Info"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.clone()
                            key=|row| row.key.clone()
                            children=move |row| {
                                let program = row.program.clone();
                                view! {
                                    <tr>
                                        <td>{row.title}</td>
                                        <td class="mono">{row.time_range}</td>
                                        <td>{row.duration}</td>
                                        <td>{row.channel}</td>
                                        <td>{row.genre}</td>
                                        <td>
                                            <button
                                                class="btn btn-icon"
                                                aria-label="Show Info"
                                                on:click=move |_| on_show_details.run(program.clone())
                                            >
                                                "ⓘ"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        }
        .into_any(),
    };

    view! { <section class="schedule">{body}</section> }
}
