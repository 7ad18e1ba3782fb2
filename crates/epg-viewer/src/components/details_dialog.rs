//! Modal with the full metadata of one program.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use leptos::prelude::*;

use crate::format::{duration_str_in, time_range_in};
use crate::types::Program;

pub const NO_DESCRIPTION: &str = "No description available.";

/// Text content of the dialog for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub title: String,
    /// `08:00 - 08:30 (30 min)`
    pub schedule: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub channel: Option<String>,
}

impl DetailsView {
    pub fn build<Tz>(program: &Program, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            title: program.title.clone(),
            schedule: format!(
                "{} ({})",
                time_range_in(&program.start_time, &program.end_time, tz),
                duration_str_in(&program.start_time, &program.end_time, tz)
            ),
            description: program.description.clone().filter(|d| !d.is_empty()),
            genre: program.genre_name().map(str::to_string),
            channel: program.channel_name().map(str::to_string),
        }
    }
}

#[component]
pub fn ProgramDetailsDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] program: Signal<Option<Program>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let handle = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    move || {
        open.get().then(|| {
            let content = match program.get() {
                Some(p) => {
                    let d = DetailsView::build(&p, &Local);
                    view! {
                        <div class="details">
                            <h4 class="details-title">{d.title}</h4>
                            <p class="details-schedule">{d.schedule}</p>
                            <p class="details-description">
                                {match d.description {
                                    Some(text) => view! { <span>{text}</span> }.into_any(),
                                    None => view! { <em>{NO_DESCRIPTION}</em> }.into_any(),
                                }}
                            </p>
                            {d.genre.map(|g| view! { <p class="details-meta">"Genre: " {g}</p> })}
                            {d.channel.map(|c| view! { <p class="details-meta">"Channel: " {c}</p> })}
                        </div>
                    }
                    .into_any()
                }
                None => view! { <span>"No data"</span> }.into_any(),
            };

            view! {
                <div class="modal-backdrop" on:click=move |_| on_close.run(())>
                    <div
                        class="modal"
                        role="dialog"
                        aria-modal="true"
                        on:click=move |ev| ev.stop_propagation()
                    >
                        <h3>"Program Details"</h3>
                        {content}
                        <div class="modal-actions">
                            <button class="btn btn-primary" on:click=move |_| on_close.run(())>
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
