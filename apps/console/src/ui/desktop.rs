use dioxus::prelude::*;

use crate::data::console;
use crate::models::{Persona, PersonaId};
use crate::state::{use_app_actions, use_app_state};
use crate::views::open_cases_in_stages;

#[component]
pub fn AgentDesktop() -> Element {
    let state = use_app_state();
    let active = state.read().persona;
    let personas = console().personas().to_vec();

    if personas.is_empty() {
        return rsx! {
            p { class: "text-xs italic text-slate-500", "No personas configured." }
        };
    }

    let current = personas
        .iter()
        .find(|persona| persona.persona_id == active)
        .cloned();

    rsx! {
        section { class: "space-y-4",
            div { class: "grid gap-3 md:grid-cols-2 lg:grid-cols-4",
                for persona in personas.iter() {
                    PersonaCard {
                        key: "{persona.persona_id}",
                        active: persona.persona_id == active,
                        persona: persona.clone(),
                    }
                }
            }
            if let Some(persona) = current {
                Workbench { persona }
            }
        }
    }
}

#[component]
fn PersonaCard(persona: Persona, active: bool) -> Element {
    let actions = use_app_actions();
    let persona_id: PersonaId = persona.persona_id;

    rsx! {
        button {
            class: if active {
                "space-y-1 rounded-lg border-2 border-slate-900 bg-white p-4 text-left shadow-sm"
            } else {
                "space-y-1 rounded-lg border border-slate-200 bg-white p-4 text-left shadow-sm hover:border-slate-400"
            },
            onclick: move |_| actions.switch_persona(persona_id),
            p { class: "text-sm font-semibold text-slate-900", "{persona.label}" }
            p { class: "text-[11px] text-slate-500", "{persona.description}" }
            if active {
                span { class: "inline-block rounded bg-slate-900 px-2 py-0.5 text-[10px] text-white", "Active" }
            }
        }
    }
}

#[component]
fn Workbench(persona: Persona) -> Element {
    let actions = use_app_actions();
    let state = use_app_state();
    let open_cases = open_cases_in_stages(&state.read().queue.cases, &persona.queue_stages);
    let home = persona.home_view;
    let home_label = home.label();
    let stages = if persona.queue_stages.is_empty() {
        "all stages".to_string()
    } else {
        persona
            .queue_stages
            .iter()
            .map(|stage| stage.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    rsx! {
        div { class: "space-y-3 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
            header { class: "flex items-center justify-between",
                h3 { class: "text-sm font-semibold text-slate-800", "{persona.label} workbench" }
                button {
                    class: "rounded bg-slate-900 px-3 py-1 text-xs text-white hover:bg-slate-700",
                    onclick: move |_| actions.set_view(home),
                    "Go to {home_label}"
                }
            }
            div { class: "flex flex-wrap gap-4 text-xs text-slate-600",
                span { "Open cases: {open_cases}" }
                span { "Queue focus: {stages}" }
            }
            div { class: "flex flex-wrap gap-2",
                for skill in persona.skills.iter() {
                    span { key: "{skill}", class: "rounded-full bg-slate-100 px-2 py-0.5 text-[11px] text-slate-600", "{skill}" }
                }
            }
        }
    }
}
