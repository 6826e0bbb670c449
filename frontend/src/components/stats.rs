//! Summary statistic cards

use leptos::*;

use crate::types::Stats;

#[component]
pub fn StatsCards(stats: Signal<Stats>) -> impl IntoView {
    view! {
        <div class="stats-grid">
            <StatCard label="Rows" value=Signal::derive(move || stats.get().row_count)/>
            <StatCard label="Columns" value=Signal::derive(move || stats.get().col_count)/>
            <StatCard label="Missing values" value=Signal::derive(move || stats.get().missing_count)/>
            <StatCard label="Duplicate rows" value=Signal::derive(move || stats.get().duplicate_count)/>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-value">{move || value.get()}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}
