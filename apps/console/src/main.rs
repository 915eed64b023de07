#![allow(non_snake_case)]

mod config;
mod data;
mod error;
mod fixtures;
mod hooks;
mod models;
mod reveal;
mod state;
mod ui;
mod views;

use anyhow::Context;
use config::AppConfig;
use data::{console, ConsoleData, StaticConsoleData};
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use models::ConsoleView;
use once_cell::sync::OnceCell;
use state::{use_app_actions, use_app_state, AppState};
use tracing::{error, info};
use ui::csr::CsrWorkspace;
use ui::desktop::AgentDesktop;
use ui::lifecycle::LifecycleQueue;
use ui::notifications::NotificationCenter;
use ui::supervisor::SupervisorDashboard;

pub(crate) static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();
pub(crate) static CONSOLE_DATA: OnceCell<Box<dyn ConsoleData + Send + Sync>> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    init_logging(config.profile.log_level());
    bootstrap_infrastructure(config);
    launch(App);
}

fn init_logging(level: tracing::Level) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(level);
    });
}

fn bootstrap_infrastructure(config: AppConfig) {
    info!(
        profile = ?config.profile,
        cadence_ms = config.reveal_settings().cadence_ms(),
        persona = %config.default_persona,
        "console configured"
    );
    let _ = APP_CONFIG.set(config);

    match load_console_data() {
        Ok(data) => {
            let _ = CONSOLE_DATA.set(Box::new(data));
            info!("console data loaded");
        }
        Err(err) => {
            error!(error = ?err, "console data unavailable; rendering empty views");
        }
    }
}

fn load_console_data() -> anyhow::Result<StaticConsoleData> {
    fixtures::demo_console_data().context("failed to load bundled console fixture")
}

#[component]
fn App() -> Element {
    let app_state = use_signal(|| {
        let config = APP_CONFIG.get().cloned().unwrap_or_default();
        AppState::seed(console(), &config)
    });

    use_context_provider(|| app_state);

    rsx! {
        div { class: "relative",
            Router::<Route> {}
            NotificationCenter {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Console {},
}

#[component]
fn Console() -> Element {
    let actions = use_app_actions();
    let view = use_app_state().read().view;
    let agent_name = APP_CONFIG
        .get()
        .map(|config| config.agent_name.clone())
        .unwrap_or_default();

    let body = match view {
        ConsoleView::CsrWorkspace => rsx! { CsrWorkspace {} },
        ConsoleView::Supervisor => rsx! { SupervisorDashboard {} },
        ConsoleView::AgentDesktop => rsx! { AgentDesktop {} },
        ConsoleView::Lifecycle => rsx! { LifecycleQueue {} },
    };

    rsx! {
        div { class: "app-shell space-y-4",
            header { class: "flex flex-wrap items-center justify-between gap-3 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                div {
                    h1 { class: "text-xl font-semibold text-slate-900", "Engagement console" }
                    p { class: "text-xs text-slate-500", "Signed in as {agent_name}" }
                }
                nav { class: "flex flex-wrap gap-1",
                    for tab in ConsoleView::ALL {
                        button {
                            key: "{tab:?}",
                            class: if tab == view {
                                "rounded bg-slate-900 px-3 py-1 text-xs text-white"
                            } else {
                                "rounded px-3 py-1 text-xs text-slate-600 hover:bg-slate-100"
                            },
                            onclick: move |_| actions.set_view(tab),
                            {tab.label()}
                        }
                    }
                }
            }
            {body}
        }
    }
}
