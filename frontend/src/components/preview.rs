//! Data preview table

use leptos::*;

use crate::types::Preview;

/// First rows of the current data. Missing cells render as an emphasised
/// "empty" placeholder.
#[component]
pub fn PreviewTable(preview: Signal<Preview>) -> impl IntoView {
    view! {
        <div class="preview-section">
            <div class="preview-title">"📋 Data preview"</div>
            <table class="preview-table">
                <thead>
                    <tr>
                        <For
                            each=move || preview.get().columns.into_iter().enumerate()
                            key=|(i, name)| (*i, name.clone())
                            children=|(_, name)| view! { <th>{name}</th> }
                        />
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        preview
                            .get()
                            .rows
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <tr>
                                        {row
                                            .into_iter()
                                            .map(|cell| {
                                                if cell.missing {
                                                    view! { <td class="missing"><em>"empty"</em></td> }
                                                } else {
                                                    view! { <td>{cell.value}</td> }
                                                }
                                            })
                                            .collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
