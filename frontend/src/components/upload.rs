//! CSV file picker.
//!
//! Checks the extension locally, then uploads the file. Only a successful
//! upload replaces the current one in [`AppState`] and closes its backend
//! session; a rejected file leaves the loaded data in place.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use crate::services::{close_session, upload_csv};
use crate::state::AppState;
use crate::{LogLevel, BACKEND_URL};

/// Message shown when the picked file is not a CSV.
pub const NOT_CSV_MESSAGE: &str = "Please upload a CSV file.";

/// Same rule as the backend: name ends in `.csv`, any case.
pub fn is_csv_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".csv")
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn UploadSection(state: AppState) -> impl IntoView {
    let (error, set_error) = create_signal(None::<String>);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // allow picking the same file again
        input.set_value("");

        if !is_csv_file_name(&file.name()) {
            alert(NOT_CSV_MESSAGE);
            return;
        }

        set_error.set(None);

        spawn_local(async move {
            state.busy.set(true);
            state.add_log(LogLevel::Info, format!("📤 Uploading {}...", file.name()));

            match upload_csv(file, BACKEND_URL).await {
                Ok(response) => {
                    state.add_log(
                        LogLevel::Success,
                        format!(
                            "✅ Loaded {} ({} rows, {} columns)",
                            response.file_name, response.stats.row_count, response.stats.col_count
                        ),
                    );
                    let previous = state.replace_upload(response);
                    if let Some(id) = previous {
                        if let Err(e) = close_session(BACKEND_URL, &id).await {
                            log::warn!("Failed to close session {}: {}", id, e);
                        }
                    }
                }
                Err(e) => {
                    // the previously loaded file stays usable
                    state.add_log(LogLevel::Error, format!("❌ Upload failed: {}", e));
                    alert(&e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }

            state.busy.set(false);
        });
    };

    let trigger_file_input = move |_| {
        let input = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("fileInput"));
        if let Some(input) = input.as_ref().and_then(|i| i.dyn_ref::<HtmlInputElement>()) {
            input.click();
        }
    };

    view! {
        <div class="upload-section" id="uploadZone">
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || match state.upload.get() {
                    Some(upload) => format!("Loaded: {}", upload.file_name),
                    None if state.busy.get() => "⏳ Uploading...".to_string(),
                    None => "Choose a CSV file to get started".to_string(),
                }}
            </div>

            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <input
                type="file"
                id="fileInput"
                accept=".csv"
                style="display:none"
                on:change=on_file_change
            />

            <button
                class="upload-button"
                disabled=move || state.busy.get()
                on:click=trigger_file_input
            >
                "Choose CSV file"
            </button>
        </div>
    }
}
