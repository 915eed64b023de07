use dioxus::prelude::*;
use time::{Date, OffsetDateTime};

use crate::models::{CaseStatus, LifecycleStage, OutreachCase, Priority};
use crate::state::{use_app_actions, use_app_state, QueueSort};
use crate::ui::modal::Modal;
use crate::views::{is_overdue, queue_view, stage_counts};

const CHIP_BASE_CLASS: &str = "px-3 py-1 rounded-full border text-xs transition-colors";
const CHIP_ACTIVE_CLASS: &str = "bg-slate-900 text-white border-slate-900";
const CHIP_IDLE_CLASS: &str = "border-slate-300 text-slate-600 hover:bg-slate-100";

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn priority_classes(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "bg-slate-100 text-slate-600",
        Priority::Medium => "bg-sky-100 text-sky-700",
        Priority::High => "bg-amber-100 text-amber-700",
        Priority::Critical => "bg-red-100 text-red-700",
    }
}

#[component]
pub fn LifecycleQueue() -> Element {
    let actions = use_app_actions();
    let queue = use_app_state().read().queue.clone();

    let counts = stage_counts(&queue.cases);
    let rows = queue_view(&queue.cases, &queue.filter, queue.sort)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let detail = queue
        .open_case
        .as_deref()
        .and_then(|case_id| queue.case(case_id))
        .cloned();
    let status_value = queue.filter.status.map(|status| status.slug()).unwrap_or("");
    let search_value = queue.filter.search.clone();
    let filters_active = !queue.filter.is_empty();

    rsx! {
        section { class: "space-y-4",
            div { class: "flex flex-wrap gap-2",
                for stage in LifecycleStage::ALL {
                    StageChip {
                        key: "{stage:?}",
                        stage,
                        count: counts.get(&stage).copied().unwrap_or(0),
                        active: queue.filter.stages.contains(&stage),
                    }
                }
            }

            div { class: "flex flex-wrap items-center gap-2 text-xs",
                input {
                    class: "w-56 rounded border border-slate-300 px-2 py-1",
                    placeholder: "Search customer, case or reason",
                    value: "{search_value}",
                    oninput: move |evt| actions.set_search(evt.value()),
                }
                select {
                    class: "rounded border border-slate-300 px-2 py-1",
                    value: "{status_value}",
                    onchange: move |evt| actions.set_status_filter(CaseStatus::from_slug(&evt.value())),
                    option { value: "", "All statuses" }
                    for status in CaseStatus::ALL {
                        option { value: status.slug(), {status.label()} }
                    }
                }
                select {
                    class: "rounded border border-slate-300 px-2 py-1",
                    onchange: move |evt| {
                        let chosen = QueueSort::ALL
                            .into_iter()
                            .find(|sort| sort.label() == evt.value())
                            .unwrap_or_default();
                        actions.set_queue_sort(chosen);
                    },
                    for sort in QueueSort::ALL {
                        option { value: sort.label(), selected: sort == queue.sort, {sort.label()} }
                    }
                }
                if filters_active {
                    button {
                        class: "rounded px-2 py-1 text-slate-500 hover:bg-slate-100",
                        onclick: move |_| actions.clear_queue_filters(),
                        "Clear filters"
                    }
                }
            }

            if rows.is_empty() {
                p { class: "text-xs italic text-slate-500", "No cases match the current filters." }
            } else {
                table { class: "w-full rounded-lg bg-white text-left text-xs shadow-sm",
                    thead { class: "text-[11px] uppercase text-slate-500",
                        tr {
                            th { class: "px-3 py-2", "Case" }
                            th { "Customer" }
                            th { "Stage" }
                            th { "Channel" }
                            th { "Priority" }
                            th { "Status" }
                            th { "Due" }
                            th { "Owner" }
                        }
                    }
                    tbody {
                        for case in rows.iter() {
                            CaseRow { key: "{case.case_id}", case: case.clone() }
                        }
                    }
                }
            }

            if let Some(case) = detail {
                CaseDetail { case }
            }
        }
    }
}

#[component]
fn StageChip(stage: LifecycleStage, count: usize, active: bool) -> Element {
    let actions = use_app_actions();
    let label = stage.label();
    let class = format!(
        "{CHIP_BASE_CLASS} {}",
        if active { CHIP_ACTIVE_CLASS } else { CHIP_IDLE_CLASS }
    );

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| actions.toggle_stage(stage),
            "{label} · {count}"
        }
    }
}

#[component]
fn CaseRow(case: OutreachCase) -> Element {
    let actions = use_app_actions();
    let overdue = is_overdue(&case, today());
    let case_id = case.case_id.clone();
    let stage = case.stage.label();
    let channel = case.channel.label();
    let priority = case.priority.label();
    let status = case.status.label();
    let owner = case.owner.clone().unwrap_or_else(|| "Unassigned".into());

    rsx! {
        tr {
            class: "cursor-pointer border-t border-slate-100 hover:bg-slate-50",
            onclick: move |_| actions.open_case(Some(case_id.clone())),
            td { class: "px-3 py-2 font-mono", "{case.case_id}" }
            td { class: "font-medium text-slate-800", "{case.customer_name}" }
            td { "{stage}" }
            td { "{channel}" }
            td {
                span { class: format!("rounded px-1.5 py-0.5 {}", priority_classes(case.priority)), "{priority}" }
            }
            td { "{status}" }
            td { class: if overdue { "font-semibold text-red-600" } else { "text-slate-600" },
                "{case.due}"
                if overdue {
                    span { class: "ml-1 text-[10px] uppercase", "overdue" }
                }
            }
            td { class: "text-slate-600", "{owner}" }
        }
    }
}

#[component]
fn CaseDetail(case: OutreachCase) -> Element {
    let actions = use_app_actions();
    let status = case.status;
    let status_label = status.label();
    let stage = case.stage.label();
    let channel = case.channel.label();
    let priority = case.priority.label();
    let owner = case.owner.clone().unwrap_or_else(|| "Unassigned".into());
    let linked = case.scenario.is_some();

    let assign_id = case.case_id.clone();
    let snooze_id = case.case_id.clone();
    let wake_id = case.case_id.clone();
    let close_id = case.case_id.clone();
    let reopen_id = case.case_id.clone();
    let workspace_id = case.case_id.clone();

    rsx! {
        Modal {
            title: format!("{} · {}", case.case_id, case.customer_name),
            on_close: move |_| actions.open_case(None),
            dl { class: "grid grid-cols-2 gap-2 text-xs text-slate-600",
                dt { class: "font-medium", "Stage" }
                dd { "{stage}" }
                dt { class: "font-medium", "Channel" }
                dd { "{channel}" }
                dt { class: "font-medium", "Priority" }
                dd { "{priority}" }
                dt { class: "font-medium", "Status" }
                dd { "{status_label}" }
                dt { class: "font-medium", "Due" }
                dd { "{case.due}" }
                dt { class: "font-medium", "Owner" }
                dd { "{owner}" }
            }
            if !case.reason.is_empty() {
                p { class: "rounded bg-slate-50 px-3 py-2 text-xs text-slate-700", "{case.reason}" }
            }
            div { class: "flex flex-wrap justify-end gap-2 text-xs",
                if status.can_transition(CaseStatus::InProgress) {
                    button {
                        class: "rounded bg-slate-900 px-3 py-1 text-white hover:bg-slate-700",
                        onclick: move |_| actions.assign_case_to_me(&assign_id),
                        "Assign to me"
                    }
                }
                if status.can_transition(CaseStatus::Snoozed) {
                    button {
                        class: "rounded border border-slate-300 px-3 py-1 hover:bg-slate-100",
                        onclick: move |_| actions.move_case(&snooze_id, CaseStatus::Snoozed),
                        "Snooze"
                    }
                }
                if status == CaseStatus::Snoozed {
                    button {
                        class: "rounded border border-slate-300 px-3 py-1 hover:bg-slate-100",
                        onclick: move |_| actions.move_case(&wake_id, CaseStatus::Open),
                        "Wake"
                    }
                }
                if status.can_transition(CaseStatus::Closed) {
                    button {
                        class: "rounded border border-emerald-400 px-3 py-1 text-emerald-700 hover:bg-emerald-50",
                        onclick: move |_| actions.move_case(&close_id, CaseStatus::Closed),
                        "Close"
                    }
                }
                if status == CaseStatus::Closed {
                    button {
                        class: "rounded border border-slate-300 px-3 py-1 hover:bg-slate-100",
                        onclick: move |_| actions.move_case(&reopen_id, CaseStatus::Open),
                        "Reopen"
                    }
                }
                if linked {
                    button {
                        class: "rounded bg-sky-600 px-3 py-1 text-white hover:bg-sky-500",
                        onclick: move |_| actions.open_case_in_workspace(&workspace_id),
                        "Open in workspace"
                    }
                }
            }
        }
    }
}
