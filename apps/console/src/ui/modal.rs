use dioxus::prelude::*;

#[component]
pub fn Modal(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "fixed inset-0 z-40 flex items-center justify-center bg-slate-900/40",
            onclick: move |_| on_close.call(()),
            div { class: "w-full max-w-xl space-y-4 rounded-lg bg-white p-5 shadow-xl",
                onclick: move |evt| evt.stop_propagation(),
                header { class: "flex items-center justify-between",
                    h3 { class: "text-base font-semibold text-slate-900", "{title}" }
                    button {
                        class: "rounded px-2 py-1 text-xs text-slate-500 hover:bg-slate-100",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                {children}
            }
        }
    }
}
