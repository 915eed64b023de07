use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::data::{console, ConsoleData};
use crate::hooks::call_clock::use_call_clock;
use crate::models::{
    AlertSeverity, CustomerProfile, NextBestAction, RiskLevel, ScenarioAlert, ScenarioId,
};
use crate::state::{use_app_actions, use_app_state, AppActions};
use crate::ui::modal::Modal;
use crate::ui::transcript::LiveTranscript;
use crate::views::{format_clock, format_premium};

const DISPOSITIONS: [&str; 5] = [
    "Resolved",
    "Escalated to supervisor",
    "Callback scheduled",
    "Transferred",
    "Customer disconnected",
];

#[component]
pub fn CsrWorkspace() -> Element {
    let state = use_app_state();
    let scenario = use_memo(move || state.read().csr.scenario);
    let on_hold = use_memo(move || state.read().csr.on_hold);
    let elapsed = use_call_clock(scenario, on_hold);

    let csr = state.read().csr.clone();
    let active = scenario();

    let body = match console().scenario(active) {
        Ok(content) => rsx! {
            div { class: "grid gap-4 lg:grid-cols-3",
                div { class: "space-y-4",
                    CustomerCard { customer: content.customer.clone() }
                    AlertList { alerts: content.alerts.clone() }
                }
                div { class: "space-y-4",
                    CallControls { elapsed: elapsed(), on_hold: csr.on_hold, summary: content.summary.clone() }
                    LiveTranscript { scenario: active }
                }
                div { class: "space-y-4",
                    ActionList { actions: content.actions.clone(), completed: csr.completed_actions.clone() }
                    TalkingPoints { points: content.talking_points.clone() }
                }
            }
        },
        Err(err) => rsx! {
            p { class: "text-xs text-red-500", "Conversation data unavailable: {err}" }
        },
    };

    rsx! {
        section { class: "space-y-4",
            ScenarioChooser { active }
            {body}
            if csr.wrap_up_open {
                WrapUpModal {}
            }
        }
    }
}

#[component]
fn ScenarioChooser(active: ScenarioId) -> Element {
    let actions = use_app_actions();
    let data = console();

    rsx! {
        nav { class: "flex flex-wrap gap-2",
            for scenario in ScenarioId::ALL {
                button {
                    key: "{scenario}",
                    class: if scenario == active {
                        "rounded-full border border-slate-900 bg-slate-900 px-3 py-1 text-xs text-white"
                    } else {
                        "rounded-full border border-slate-300 px-3 py-1 text-xs text-slate-600 hover:bg-slate-100"
                    },
                    onclick: move |_| actions.select_scenario(scenario),
                    {scenario_label(data, scenario)}
                }
            }
        }
    }
}

fn scenario_label(data: &dyn ConsoleData, scenario: ScenarioId) -> String {
    data.scenario(scenario)
        .map(|content| content.label.clone())
        .unwrap_or_else(|_| scenario.to_string())
}

fn risk_classes(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "bg-emerald-100 text-emerald-700",
        RiskLevel::Medium => "bg-amber-100 text-amber-700",
        RiskLevel::High => "bg-red-100 text-red-700",
    }
}

#[component]
fn CustomerCard(customer: CustomerProfile) -> Element {
    let risk = customer.churn_risk.label();
    let policies = customer
        .policies
        .iter()
        .map(|policy| {
            (
                policy.policy_number.clone(),
                format!("{} ({})", policy.product, policy.policy_number),
                format!("{}/mo · {}", format_premium(policy.monthly_premium_cents), policy.status),
            )
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "space-y-3 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
            header { class: "flex items-start justify-between",
                div {
                    h3 { class: "text-sm font-semibold text-slate-900", "{customer.name}" }
                    p { class: "text-[11px] text-slate-500",
                        "{customer.customer_id} · {customer.tier} · {customer.tenure_years} yrs"
                    }
                }
                span { class: format!("rounded px-2 py-0.5 text-[11px] {}", risk_classes(customer.churn_risk)),
                    "Churn risk: {risk}"
                }
            }
            ul { class: "space-y-1 text-xs text-slate-600",
                for (number, product, premium) in policies {
                    li { key: "{number}", class: "flex justify-between",
                        span { "{product}" }
                        span { class: "font-mono", "{premium}" }
                    }
                }
            }
        }
    }
}

fn alert_classes(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Info => "border-sky-300 bg-sky-50 text-sky-800",
        AlertSeverity::Warning => "border-amber-300 bg-amber-50 text-amber-800",
        AlertSeverity::Critical => "border-red-400 bg-red-50 text-red-800",
    }
}

#[component]
fn AlertList(alerts: Vec<ScenarioAlert>) -> Element {
    let mut sorted = alerts;
    sorted.sort_by(|a, b| b.severity.cmp(&a.severity));

    rsx! {
        div { class: "space-y-2",
            h4 { class: "text-sm font-semibold text-slate-800", "Alerts" }
            if sorted.is_empty() {
                p { class: "text-xs text-slate-500", "No alerts for this customer." }
            }
            for (idx, alert) in sorted.into_iter().enumerate() {
                div { key: "{idx}", class: format!("rounded border-l-4 px-3 py-2 text-xs {}", alert_classes(alert.severity)),
                    p { class: "font-semibold", "{alert.title}" }
                    if !alert.detail.is_empty() {
                        p { "{alert.detail}" }
                    }
                }
            }
        }
    }
}

#[component]
fn CallControls(elapsed: u64, on_hold: bool, summary: String) -> Element {
    let actions = use_app_actions();
    let clock = format_clock(elapsed);

    rsx! {
        div { class: "space-y-2 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
            div { class: "flex items-center justify-between",
                div {
                    p { class: "text-[11px] uppercase tracking-wide text-slate-500", "Call time" }
                    p { class: "font-mono text-xl text-slate-900", "{clock}" }
                }
                div { class: "flex gap-2",
                    button {
                        class: if on_hold {
                            "rounded bg-amber-500 px-3 py-1 text-xs text-white"
                        } else {
                            "rounded border border-slate-300 px-3 py-1 text-xs text-slate-700 hover:bg-slate-100"
                        },
                        onclick: move |_| actions.toggle_hold(),
                        if on_hold { "Resume" } else { "Hold" }
                    }
                    button {
                        class: "rounded bg-slate-900 px-3 py-1 text-xs text-white hover:bg-slate-700",
                        onclick: move |_| actions.set_wrap_up_open(true),
                        "Wrap up"
                    }
                }
            }
            if !summary.is_empty() {
                p { class: "text-xs text-slate-600", "{summary}" }
            }
        }
    }
}

#[component]
fn ActionList(actions: Vec<NextBestAction>, completed: BTreeSet<String>) -> Element {
    rsx! {
        div { class: "space-y-2",
            h4 { class: "text-sm font-semibold text-slate-800", "Next best actions" }
            for action in actions.iter() {
                ActionItem {
                    key: "{action.action_id}",
                    done: completed.contains(&action.action_id),
                    action: action.clone(),
                }
            }
        }
    }
}

#[component]
fn ActionItem(action: NextBestAction, done: bool) -> Element {
    let app_actions = use_app_actions();
    let action_id = action.action_id.clone();

    rsx! {
        label { class: "flex cursor-pointer gap-2 rounded border border-slate-200 bg-white px-3 py-2 text-xs",
            input {
                r#type: "checkbox",
                checked: done,
                onchange: move |_| app_actions.toggle_action(&action_id),
            }
            div { class: "space-y-0.5",
                p { class: if done { "font-medium text-slate-400 line-through" } else { "font-medium text-slate-800" },
                    "{action.title}"
                }
                if !action.rationale.is_empty() {
                    p { class: "text-slate-500", "{action.rationale}" }
                }
                if let Some(impact) = action.impact.as_ref() {
                    p { class: "text-[11px] text-emerald-700", "Impact: {impact}" }
                }
            }
        }
    }
}

#[component]
fn TalkingPoints(points: Vec<String>) -> Element {
    rsx! {
        div { class: "space-y-2",
            h4 { class: "text-sm font-semibold text-slate-800", "Talking points" }
            ul { class: "space-y-1",
                for (idx, point) in points.into_iter().enumerate() {
                    TalkingPoint { key: "{idx}", point }
                }
            }
        }
    }
}

#[component]
fn TalkingPoint(point: String) -> Element {
    let actions = use_app_actions();
    let copied = point.clone();

    rsx! {
        li { class: "flex items-start justify-between gap-2 text-xs text-slate-700",
            span { "{point}" }
            button {
                class: "shrink-0 rounded px-2 py-0.5 text-[11px] text-sky-700 hover:bg-sky-50",
                onclick: move |_| copy_text_to_clipboard(actions, "Talking point", copied.clone()),
                "Copy"
            }
        }
    }
}

#[component]
fn WrapUpModal() -> Element {
    let actions = use_app_actions();
    let mut disposition = use_signal(String::new);
    let mut notes = use_signal(String::new);

    rsx! {
        Modal {
            title: "Wrap up call",
            on_close: move |_| actions.set_wrap_up_open(false),
            div { class: "space-y-3 text-xs text-slate-600",
                label { class: "flex flex-col gap-1",
                    span { "Disposition" }
                    select {
                        class: "rounded border border-slate-300 px-2 py-1",
                        value: "{disposition}",
                        onchange: move |evt| disposition.set(evt.value()),
                        option { value: "", "Choose a disposition" }
                        for label in DISPOSITIONS {
                            option { key: "{label}", value: "{label}", "{label}" }
                        }
                    }
                }
                label { class: "flex flex-col gap-1",
                    span { "Notes" }
                    textarea {
                        class: "h-24 rounded border border-slate-300 px-2 py-1",
                        value: "{notes}",
                        oninput: move |evt| notes.set(evt.value()),
                    }
                }
                div { class: "flex justify-end gap-2",
                    button {
                        class: "rounded border border-slate-300 px-3 py-1 hover:bg-slate-100",
                        onclick: move |_| actions.set_wrap_up_open(false),
                        "Cancel"
                    }
                    button {
                        class: "rounded bg-slate-900 px-3 py-1 text-white hover:bg-slate-700",
                        onclick: move |_| actions.submit_wrap_up(&disposition.read(), &notes.read()),
                        "Save wrap-up"
                    }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn copy_text_to_clipboard(actions: AppActions, label: &str, content: String) {
    let label_text = label.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        let result = async {
            let window = web_sys::window().ok_or(())?;
            let clipboard = window.navigator().clipboard();
            let promise = clipboard.write_text(&content);
            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|_| ())
        }
        .await;

        match result {
            Ok(_) => actions.set_operation_success(format!("{label_text} copied")),
            Err(_) => actions.set_operation_error(format!("Could not copy {label_text}")),
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn copy_text_to_clipboard(actions: AppActions, label: &str, _content: String) {
    actions.set_operation_success(format!("{label} copied (simulated)"));
}
