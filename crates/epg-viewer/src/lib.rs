//! EPG Viewer — Leptos CSR WASM application.
//!
//! Single-page TV program guide. Fetches the schedule for the selected
//! channel and date from the EPG REST API and renders it as a table, with
//! a details dialog per program.

pub mod api;
pub mod components;
pub mod config;
pub mod filter;
pub mod format;
pub mod state;
pub mod types;

use leptos::prelude::*;

use components::details_dialog::ProgramDetailsDialog;
use components::filter_bar::FilterBar;
use components::program_table::ProgramScheduleTable;
use config::GuideConfig;
use state::GuideState;
use types::Program;

const PROJECT_URL: &str = "https://github.com/";

// ── Guide Controller ────────────────────────────────────────────────

/// Owns the page state and the endpoint, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct GuideController {
    pub state: RwSignal<GuideState>,
    config: StoredValue<GuideConfig>,
}

impl GuideController {
    fn new(config: GuideConfig) -> Self {
        let state = RwSignal::new(GuideState::new(config::today(), config.window_days));
        Self {
            state,
            config: StoredValue::new(config),
        }
    }

    /// Request the schedule for the current filter. Overlapping requests are
    /// not aborted; only the last one issued is applied.
    pub fn load(&self) {
        let Some(ticket) = self.state.try_update(GuideState::begin_load) else {
            return;
        };
        let api_url = self.config.with_value(|c| c.api_url.clone());
        let state = self.state;
        leptos::task::spawn_local(async move {
            let result = api::fetch_programs(&api_url, ticket.query()).await;
            if let Err(e) = &result {
                log::warn!("schedule request failed: {e}");
            }
            state.update(|s| {
                s.complete_load(&ticket, result);
            });
        });
    }

    pub fn select_channel(&self, channel: String) {
        self.state.update(|s| {
            s.select_channel(channel);
        });
    }

    /// Returns the date the filter holds afterwards, which is the previous
    /// one when `raw` is rejected.
    pub fn select_date(&self, raw: String) -> String {
        self.state
            .try_update(|s| {
                if let Err(e) = s.select_date(&raw) {
                    log::warn!("ignoring date filter: {e}");
                }
                s.filter().date_str()
            })
            .unwrap_or(raw)
    }

    pub fn show_details(&self, program: Program) {
        self.state.update(|s| s.open_details(program));
    }

    pub fn close_details(&self) {
        self.state.update(GuideState::close_details);
    }
}

// ── App Root ────────────────────────────────────────────────────────

/// Leptos application root.
#[component]
pub fn App() -> impl IntoView {
    let config = GuideConfig::from_document();
    log::info!("schedule endpoint: {}", config.api_url);

    let guide = GuideController::new(config);
    provide_context(guide);

    view! {
        <header class="app-bar">
            <span class="app-title">"EPG Viewer"</span>
            <a
                class="btn btn-primary"
                href=PROJECT_URL
                target="_blank"
                rel="noopener noreferrer"
            >
                "GitHub"
            </a>
        </header>
        <main class="container">
            <SchedulePage />
        </main>
    }
}

// ── Schedule Page ───────────────────────────────────────────────────

#[component]
fn SchedulePage() -> impl IntoView {
    let guide = expect_context::<GuideController>();
    let state = guide.state;

    // Re-fetch on mount and whenever the filter changes.
    let filter = Memo::new(move |_| state.with(|s| s.filter().clone()));
    Effect::new(move || {
        filter.track();
        guide.load();
    });

    let window = state.with_untracked(|s| s.window());
    let channels = Memo::new(move |_| state.with(|s| s.channels().to_vec()));
    let selected_channel = Signal::derive(move || filter.get().channel);
    let selected_date = Signal::derive(move || filter.get().date_str());
    let table = Memo::new(move |_| state.with(|s| s.table_view()));
    let show_details = Signal::derive(move || state.with(|s| s.show_details()));
    let selected_program = Signal::derive(move || state.with(|s| s.selected_program().cloned()));

    view! {
        <div class="page">
            <p class="eyebrow">"Electronic Program Guide"</p>
            <h1>"TV Program Schedule"</h1>
            <p class="subtitle">
                "Browse your TV program schedule, filter by channel or date, and get all information about programs!"
            </p>

            <FilterBar
                channels=channels
                selected_channel=selected_channel
                selected_date=selected_date
                window=window
                on_channel=Callback::new(move |ch| guide.select_channel(ch))
                on_date=Callback::new(move |date| guide.select_date(date))
                on_refresh=Callback::new(move |_| guide.load())
            />
            <ProgramScheduleTable
                table=table
                on_show_details=Callback::new(move |p| guide.show_details(p))
            />
            <ProgramDetailsDialog
                open=show_details
                program=selected_program
                on_close=Callback::new(move |_| guide.close_details())
            />
        </div>
    }
}

// ── WASM entry point ────────────────────────────────────────────────

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("EPG Viewer starting");
    leptos::mount::mount_to_body(App);
}
