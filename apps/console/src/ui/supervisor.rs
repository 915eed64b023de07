use dioxus::prelude::*;

use crate::data::console;
use crate::models::{AgentRecord, AgentStatus, Sentiment};
use crate::state::{use_app_actions, use_app_state, RosterSort};
use crate::ui::modal::Modal;
use crate::ui::transcript::LiveTranscript;
use crate::views::{format_clock, kpi_tiles, roster_view, KpiTile, KpiTone, RosterSummary};

#[component]
pub fn SupervisorDashboard() -> Element {
    let actions = use_app_actions();
    let supervisor = use_app_state().read().supervisor.clone();
    let agents = console().agents();

    let tiles = kpi_tiles(&RosterSummary::from_agents(agents));
    let rows = roster_view(agents, supervisor.status_filter, supervisor.sort)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let monitored = supervisor
        .monitored_agent
        .as_ref()
        .and_then(|id| agents.iter().find(|agent| &agent.agent_id == id))
        .cloned();

    let status_value = supervisor
        .status_filter
        .map(|status| status.slug())
        .unwrap_or("");

    rsx! {
        section { class: "space-y-4",
            div { class: "grid gap-3 sm:grid-cols-3 lg:grid-cols-6",
                for tile in tiles.iter() {
                    KpiCard { key: "{tile.label}", tile: tile.clone() }
                }
            }

            div { class: "space-y-2 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                header { class: "flex flex-wrap items-center justify-between gap-2",
                    h3 { class: "text-sm font-semibold text-slate-800", "Team roster" }
                    div { class: "flex gap-2 text-xs",
                        select {
                            class: "rounded border border-slate-300 px-2 py-1",
                            value: "{status_value}",
                            onchange: move |evt| actions.set_roster_filter(AgentStatus::from_slug(&evt.value())),
                            option { value: "", "All statuses" }
                            for status in AgentStatus::ALL {
                                option { value: status.slug(), {status.label()} }
                            }
                        }
                        select {
                            class: "rounded border border-slate-300 px-2 py-1",
                            onchange: move |evt| {
                                let chosen = RosterSort::ALL
                                    .into_iter()
                                    .find(|sort| sort.label() == evt.value())
                                    .unwrap_or_default();
                                actions.set_roster_sort(chosen);
                            },
                            for sort in RosterSort::ALL {
                                option {
                                    value: sort.label(),
                                    selected: sort == supervisor.sort,
                                    {sort.label()}
                                }
                            }
                        }
                    }
                }
                if rows.is_empty() {
                    p { class: "text-xs italic text-slate-500", "No agents match this filter." }
                } else {
                    table { class: "w-full text-left text-xs",
                        thead { class: "text-[11px] uppercase text-slate-500",
                            tr {
                                th { class: "py-1", "Agent" }
                                th { "Team" }
                                th { "Status" }
                                th { "Handled" }
                                th { "AHT" }
                                th { "CSAT" }
                                th { "Sentiment" }
                                th {}
                            }
                        }
                        tbody {
                            for agent in rows.iter() {
                                AgentRow { key: "{agent.agent_id}", agent: agent.clone() }
                            }
                        }
                    }
                }
            }

            if let Some(agent) = monitored {
                MonitorModal { agent }
            }
        }
    }
}

fn tone_classes(tone: KpiTone) -> &'static str {
    match tone {
        KpiTone::Neutral => "border-slate-200",
        KpiTone::Good => "border-emerald-300",
        KpiTone::Alert => "border-red-300",
    }
}

#[component]
fn KpiCard(tile: KpiTile) -> Element {
    rsx! {
        div { class: format!("rounded-lg border bg-white p-3 shadow-sm {}", tone_classes(tile.tone)),
            p { class: "text-[11px] uppercase tracking-wide text-slate-500", "{tile.label}" }
            p { class: "text-xl font-semibold text-slate-900", "{tile.value}" }
            if let Some(hint) = tile.hint.as_ref() {
                p { class: "text-[11px] text-slate-500", "{hint}" }
            }
        }
    }
}

fn sentiment_dot(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "bg-emerald-500",
        Sentiment::Neutral => "bg-slate-400",
        Sentiment::Negative => "bg-red-500",
    }
}

#[component]
fn AgentRow(agent: AgentRecord) -> Element {
    let actions = use_app_actions();
    let status = agent.status.label();
    let sentiment = agent.sentiment.label();
    let aht = format_clock(u64::from(agent.avg_handle_secs));
    let csat = if agent.handled_today > 0 {
        format!("{:.1}", agent.csat)
    } else {
        "--".to_string()
    };
    let monitor_id = agent
        .active_scenario
        .map(|_| agent.agent_id.clone());

    rsx! {
        tr { class: "border-t border-slate-100",
            td { class: "py-1.5 font-medium text-slate-800", "{agent.name}" }
            td { "{agent.team}" }
            td { "{status}" }
            td { "{agent.handled_today}" }
            td { class: "font-mono", "{aht}" }
            td { "{csat}" }
            td {
                span { class: "flex items-center gap-1",
                    span { class: format!("inline-block h-2 w-2 rounded-full {}", sentiment_dot(agent.sentiment)) }
                    "{sentiment}"
                }
            }
            td { class: "text-right",
                if let Some(agent_id) = monitor_id {
                    button {
                        class: "rounded px-2 py-0.5 text-[11px] text-sky-700 hover:bg-sky-50",
                        onclick: move |_| actions.monitor_agent(Some(agent_id.clone())),
                        "Monitor"
                    }
                }
            }
        }
    }
}

#[component]
fn MonitorModal(agent: AgentRecord) -> Element {
    let actions = use_app_actions();
    let Some(scenario) = agent.active_scenario else {
        return rsx! { Fragment {} };
    };
    let label = console()
        .scenario(scenario)
        .map(|content| content.label.clone())
        .unwrap_or_else(|_| scenario.to_string());
    let whisper_name = agent.name.clone();
    let barge_name = agent.name.clone();

    rsx! {
        Modal {
            title: format!("Monitoring {} · {}", agent.name, label),
            on_close: move |_| actions.monitor_agent(None),
            LiveTranscript { scenario }
            div { class: "flex justify-end gap-2 text-xs",
                button {
                    class: "rounded border border-slate-300 px-3 py-1 hover:bg-slate-100",
                    onclick: move |_| actions.record_supervisor_action("Whisper", &whisper_name),
                    "Whisper"
                }
                button {
                    class: "rounded bg-red-600 px-3 py-1 text-white hover:bg-red-500",
                    onclick: move |_| actions.record_supervisor_action("Barge-in", &barge_name),
                    "Barge in"
                }
            }
        }
    }
}
