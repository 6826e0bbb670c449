//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"csvtidy"</h1>
            <p class="subtitle">
                "Load a CSV file, check its quality, remove duplicate rows "
                "and fill missing numbers with the column average."
            </p>
        </div>
    }
}
