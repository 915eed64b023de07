use dioxus::prelude::*;

use crate::hooks::reveal::use_transcript_reveal;
use crate::models::{ScenarioId, Sentiment, Speaker, TranscriptLine};
use crate::reveal::RevealView;
use crate::views::SentimentBreakdown;

fn speaker_classes(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::Agent => "border-sky-200 bg-sky-50",
        Speaker::Customer => "border-slate-200 bg-white",
        Speaker::AutomatedSystem => "border-dashed border-slate-300 bg-slate-50 italic",
    }
}

fn sentiment_classes(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "bg-emerald-100 text-emerald-700",
        Sentiment::Neutral => "bg-slate-100 text-slate-600",
        Sentiment::Negative => "bg-red-100 text-red-700",
    }
}

/// Scripted conversation for `scenario`, revealed a line at a time.
#[component]
pub fn LiveTranscript(scenario: ReadOnlySignal<ScenarioId>) -> Element {
    let RevealView { lines, total, live } = use_transcript_reveal(scenario);
    let shown = lines.len();

    let breakdown = SentimentBreakdown::from_lines(&lines);

    rsx! {
        section { class: "space-y-3 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
            header { class: "flex items-center justify-between",
                h3 { class: "text-sm font-semibold text-slate-800", "Conversation" }
                div { class: "flex items-center gap-2 text-[11px] text-slate-500",
                    span { "{shown}/{total} lines" }
                    if live {
                        span { class: "rounded-full bg-red-500 px-2 py-0.5 font-semibold text-white animate-pulse", "LIVE" }
                    } else {
                        span { class: "rounded-full bg-slate-200 px-2 py-0.5 text-slate-600", "Ended" }
                    }
                }
            }
            SentimentBar { breakdown }
            if lines.is_empty() {
                p { class: "text-xs italic text-slate-500", "No transcript for this conversation." }
            } else {
                ol { class: "space-y-2",
                    for (idx, line) in lines.into_iter().enumerate() {
                        TranscriptRow { key: "{idx}", line }
                    }
                }
            }
        }
    }
}

#[component]
fn TranscriptRow(line: TranscriptLine) -> Element {
    let speaker = line.speaker.label();
    let sentiment = line.sentiment.label();

    rsx! {
        li { class: format!("rounded border px-3 py-2 text-xs {}", speaker_classes(line.speaker)),
            div { class: "mb-1 flex items-center justify-between text-[11px] text-slate-500",
                span { class: "font-medium text-slate-700", "{speaker}" }
                div { class: "flex items-center gap-2",
                    span { class: format!("rounded px-1.5 py-0.5 {}", sentiment_classes(line.sentiment)),
                        "{sentiment}"
                    }
                    span { class: "font-mono", "{line.timestamp}" }
                }
            }
            p { class: "text-slate-800", "{line.text}" }
        }
    }
}

#[component]
fn SentimentBar(breakdown: SentimentBreakdown) -> Element {
    if breakdown.total() == 0 {
        return rsx! { Fragment {} };
    }

    let positive = breakdown.percent(Sentiment::Positive);
    let neutral = breakdown.percent(Sentiment::Neutral);
    let negative = breakdown.percent(Sentiment::Negative);

    rsx! {
        div { class: "space-y-1",
            div { class: "flex h-2 overflow-hidden rounded-full bg-slate-100",
                div { class: "bg-emerald-400", style: "width: {positive}%" }
                div { class: "bg-slate-300", style: "width: {neutral}%" }
                div { class: "bg-red-400", style: "width: {negative}%" }
            }
            p { class: "text-[11px] text-slate-500",
                "{breakdown.positive} positive · {breakdown.neutral} neutral · {breakdown.negative} negative"
            }
        }
    }
}
