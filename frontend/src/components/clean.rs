//! Cleaning options, report and download

use leptos::*;

use crate::services::{clean_data, download_csv, save_file};
use crate::state::AppState;
use crate::types::CleanOptions;
use crate::{LogLevel, BACKEND_URL, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};

#[component]
pub fn CleanPanel(state: AppState) -> impl IntoView {
    let remove_duplicates = create_rw_signal(true);
    let fill_missing = create_rw_signal(true);

    let on_clean = move |_| {
        let Some(session_id) = state.session_id() else {
            return;
        };
        let options = CleanOptions {
            remove_duplicates: remove_duplicates.get_untracked(),
            fill_missing: fill_missing.get_untracked(),
        };

        spawn_local(async move {
            state.busy.set(true);
            state.add_log(LogLevel::Info, "🧹 Cleaning data...");

            match clean_data(BACKEND_URL, &session_id, options).await {
                Ok(result) => {
                    state.add_log(
                        LogLevel::Success,
                        format!(
                            "✅ Removed {} duplicate rows, filled {} missing cells",
                            result.report.removed_duplicates, result.report.filled_missing
                        ),
                    );
                    state.set_cleaned(result);
                }
                Err(e) => state.add_log(LogLevel::Error, format!("❌ Cleaning failed: {}", e)),
            }

            state.busy.set(false);
        });
    };

    let on_download = move |_| {
        let Some(session_id) = state.session_id() else {
            return;
        };

        spawn_local(async move {
            let saved = match download_csv(BACKEND_URL, &session_id).await {
                Ok(body) => save_file(EXPORT_FILE_NAME, &body, EXPORT_CONTENT_TYPE),
                Err(e) => Err(e),
            };

            match saved {
                Ok(()) => state.add_log(LogLevel::Success, format!("💾 Saved {}", EXPORT_FILE_NAME)),
                Err(e) => state.add_log(LogLevel::Error, format!("❌ Download failed: {}", e)),
            }
        });
    };

    view! {
        <div class="clean-panel">
            <div class="clean-options">
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || remove_duplicates.get()
                        on:change=move |ev| remove_duplicates.set(event_target_checked(&ev))
                    />
                    " Remove duplicate rows"
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || fill_missing.get()
                        on:change=move |ev| fill_missing.set(event_target_checked(&ev))
                    />
                    " Fill missing numbers with the column average"
                </label>
            </div>

            <div class="clean-actions">
                <button class="btn" disabled=move || !state.can_clean() on:click=on_clean>
                    "Clean Data"
                </button>
                <button class="btn btn-secondary" disabled=move || !state.can_download() on:click=on_download>
                    "Download Cleaned CSV"
                </button>
            </div>

            {move || {
                state.cleaned.get().map(|result| {
                    view! {
                        <div class="report">
                            {result
                                .report_lines
                                .into_iter()
                                .map(|line| view! { <div>{line}</div> })
                                .collect_view()}
                        </div>
                    }
                })
            }}
        </div>
    }
}
