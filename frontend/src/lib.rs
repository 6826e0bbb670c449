//! csvtidy - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for loading a CSV file, inspecting its quality,
//! cleaning it on the backend and saving the result.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  MainContent                                                │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (file picker)                            │
//! │  ├── DataInfo + StatsCards + PreviewTable (when loaded)     │
//! │  ├── CleanPanel (options, report, download)                 │
//! │  └── LogsPanel (SSE)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - API and log types
//! - [`state`] - Page state shared by components
//! - [`components`] - UI components
//! - [`services`] - Backend communication and file saving

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use types::{
    AppError, AppResult, CleanOptions, CleanResponse, CleaningReport, LogEntry, LogLevel, Preview,
    PreviewCell, Stats, UploadResponse,
};

pub use state::AppState;

pub use components::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let state = AppState::new();

    // one SSE connection for the page lifetime
    components::init_sse_logs(state.logs);

    view! {
        <div class="container">
            <Hero/>

            <UploadSection state=state/>

            <Show when=move || state.upload.with(Option::is_some) fallback=|| ()>
                <DataInfo upload=state.upload.into()/>
                <StatsCards stats=state.stats.into()/>
                <PreviewTable preview=state.preview.into()/>
            </Show>

            <CleanPanel state=state/>

            <LogsPanel logs=state.logs/>
        </div>

        <Footer/>
    }
}
