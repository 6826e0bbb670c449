//! Loaded file details

use leptos::*;

use crate::types::UploadResponse;

/// File name, detected encoding, columns and any renamed headers.
#[component]
pub fn DataInfo(upload: Signal<Option<UploadResponse>>) -> impl IntoView {
    move || {
        upload.get().map(|upload| {
            let renamed = upload
                .renamed_columns
                .iter()
                .map(|r| format!("{} → {}", r.original, r.renamed))
                .collect::<Vec<_>>();

            view! {
                <div class="data-info">
                    <div><strong>"File: "</strong>{upload.file_name.clone()}</div>
                    <div><strong>"Encoding: "</strong>{upload.encoding.clone()}</div>
                    <div><strong>"Columns: "</strong>{upload.columns.join(", ")}</div>
                    {(!renamed.is_empty()).then(|| view! {
                        <div class="warning-message">
                            "Renamed duplicate headers: " {renamed.join(", ")}
                        </div>
                    })}
                </div>
            }
        })
    }
}
