//! Channel / date filter controls.

use leptos::prelude::*;
use web_sys::HtmlInputElement;

use crate::filter::{channel_options, DateWindow, DATE_FORMAT};

/// Channel dropdown, date picker and refresh button. Every change is
/// forwarded straight to the page state.
///
/// `on_date` returns the date the state committed; the picker is reset to it
/// so a rejected value never stays on screen.
#[component]
pub fn FilterBar(
    #[prop(into)] channels: Signal<Vec<String>>,
    #[prop(into)] selected_channel: Signal<String>,
    #[prop(into)] selected_date: Signal<String>,
    window: DateWindow,
    on_channel: Callback<String>,
    on_date: Callback<String, String>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    let min = window.min().format(DATE_FORMAT).to_string();
    let max = window.max().format(DATE_FORMAT).to_string();

    view! {
        <div class="filter-bar">
            <span class="filter-label">"Filter by:"</span>
            <fieldset class="fieldset">
                <label class="fieldset-label" for="channel-filter">"Channel"</label>
                <select
                    id="channel-filter"
                    class="select"
                    data-testid="channel-filter"
                    on:change=move |ev| on_channel.run(event_target_value(&ev))
                >
                    {move || {
                        channel_options(&channels.get())
                            .into_iter()
                            .map(|opt| {
                                let value = opt.value.clone();
                                view! {
                                    <option
                                        value=opt.value
                                        selected=move || selected_channel.get() == value
                                    >
                                        {opt.label}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </fieldset>
            <fieldset class="fieldset">
                <label class="fieldset-label" for="date-filter">"Date"</label>
                <input
                    id="date-filter"
                    class="input"
                    type="date"
                    data-testid="date-filter"
                    min=min
                    max=max
                    prop:value=move || selected_date.get()
                    on:change=move |ev| {
                        let input = event_target::<HtmlInputElement>(&ev);
                        let committed = on_date.run(input.value());
                        if input.value() != committed {
                            input.set_value(&committed);
                        }
                    }
                />
            </fieldset>
            <button
                class="btn btn-icon"
                data-testid="refresh-btn"
                title="Refresh"
                on:click=move |_| on_refresh.run(())
            >
                "⟳"
            </button>
        </div>
    }
}
