//! Read-only projections over the mock tables: KPI tiles, sorted roster and
//! queue slices, sentiment counts and display formatting.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use time::Date;

use crate::models::{
    AgentRecord, AgentStatus, CaseStatus, LifecycleStage, OutreachCase, Sentiment,
    TranscriptLine,
};
use crate::state::{QueueFilter, QueueSort, RosterSort};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterSummary {
    pub total: usize,
    pub by_status: BTreeMap<AgentStatus, usize>,
    pub handled_today: u64,
    pub avg_handle_secs: Option<u32>,
    pub avg_csat: Option<f32>,
    pub negative_sentiment: usize,
}

impl RosterSummary {
    pub fn from_agents(agents: &[AgentRecord]) -> Self {
        let mut summary = Self {
            total: agents.len(),
            ..Self::default()
        };

        let mut weighted_handle: u64 = 0;
        let mut csat_sum = 0.0f32;
        let mut rated = 0usize;

        for agent in agents {
            *summary.by_status.entry(agent.status).or_default() += 1;
            summary.handled_today += u64::from(agent.handled_today);
            weighted_handle += u64::from(agent.avg_handle_secs) * u64::from(agent.handled_today);

            // Agents without calls today have no meaningful CSAT.
            if agent.handled_today > 0 {
                csat_sum += agent.csat;
                rated += 1;
            }

            if agent.status != AgentStatus::Offline && agent.sentiment == Sentiment::Negative {
                summary.negative_sentiment += 1;
            }
        }

        if summary.handled_today > 0 {
            let avg = weighted_handle / summary.handled_today;
            summary.avg_handle_secs = Some(u32::try_from(avg).unwrap_or(u32::MAX));
        }
        if rated > 0 {
            summary.avg_csat = Some(csat_sum / rated as f32);
        }

        summary
    }

    pub fn count(&self, status: AgentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KpiTone {
    Neutral,
    Good,
    Alert,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: String,
    pub hint: Option<String>,
    pub tone: KpiTone,
}

pub fn kpi_tiles(summary: &RosterSummary) -> Vec<KpiTile> {
    let staffed = summary.total - summary.count(AgentStatus::Offline);
    vec![
        KpiTile {
            label: "Agents staffed",
            value: format!("{staffed}/{}", summary.total),
            hint: Some(format!("{} available", summary.count(AgentStatus::Available))),
            tone: KpiTone::Neutral,
        },
        KpiTile {
            label: "Live calls",
            value: summary.count(AgentStatus::OnCall).to_string(),
            hint: Some(format!(
                "{} in after-call work",
                summary.count(AgentStatus::AfterCallWork)
            )),
            tone: KpiTone::Neutral,
        },
        KpiTile {
            label: "Handled today",
            value: summary.handled_today.to_string(),
            hint: None,
            tone: KpiTone::Good,
        },
        KpiTile {
            label: "Avg handle time",
            value: summary
                .avg_handle_secs
                .map(|secs| format_clock(u64::from(secs)))
                .unwrap_or_else(|| "--".into()),
            hint: None,
            tone: KpiTone::Neutral,
        },
        KpiTile {
            label: "Avg CSAT",
            value: summary
                .avg_csat
                .map(|csat| format!("{csat:.1}"))
                .unwrap_or_else(|| "--".into()),
            hint: Some("out of 5".into()),
            tone: match summary.avg_csat {
                Some(csat) if csat < 4.0 => KpiTone::Alert,
                Some(_) => KpiTone::Good,
                None => KpiTone::Neutral,
            },
        },
        KpiTile {
            label: "Negative sentiment",
            value: summary.negative_sentiment.to_string(),
            hint: Some("live conversations".into()),
            tone: if summary.negative_sentiment > 0 {
                KpiTone::Alert
            } else {
                KpiTone::Good
            },
        },
    ]
}

pub fn roster_view<'a>(
    agents: &'a [AgentRecord],
    status: Option<AgentStatus>,
    sort: RosterSort,
) -> Vec<&'a AgentRecord> {
    let mut rows = agents
        .iter()
        .filter(|agent| status.map_or(true, |wanted| agent.status == wanted))
        .collect::<Vec<_>>();

    match sort {
        RosterSort::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        RosterSort::Handled => rows.sort_by_key(|agent| Reverse(agent.handled_today)),
        RosterSort::Csat => rows.sort_by(|a, b| b.csat.total_cmp(&a.csat)),
        RosterSort::HandleTime => rows.sort_by_key(|agent| agent.avg_handle_secs),
    }

    rows
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentBreakdown {
    pub fn from_lines(lines: &[TranscriptLine]) -> Self {
        lines.iter().fold(Self::default(), |mut acc, line| {
            match line.sentiment {
                Sentiment::Positive => acc.positive += 1,
                Sentiment::Neutral => acc.neutral += 1,
                Sentiment::Negative => acc.negative += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    pub fn percent(&self, sentiment: Sentiment) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let count = match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        };
        ((count * 100 + total / 2) / total) as u8
    }
}

pub fn queue_view<'a>(
    cases: &'a [OutreachCase],
    filter: &QueueFilter,
    sort: QueueSort,
) -> Vec<&'a OutreachCase> {
    let mut rows = cases
        .iter()
        .filter(|case| filter.matches(case))
        .collect::<Vec<_>>();

    match sort {
        QueueSort::Priority => rows.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.due.cmp(&b.due))
                .then_with(|| a.case_id.cmp(&b.case_id))
        }),
        QueueSort::DueDate => rows.sort_by(|a, b| {
            a.due
                .cmp(&b.due)
                .then(b.priority.cmp(&a.priority))
                .then_with(|| a.case_id.cmp(&b.case_id))
        }),
        QueueSort::Customer => rows.sort_by(|a, b| {
            a.customer_name
                .to_lowercase()
                .cmp(&b.customer_name.to_lowercase())
                .then_with(|| a.case_id.cmp(&b.case_id))
        }),
    }

    rows
}

/// Count of non-closed cases per stage; every stage is present.
pub fn stage_counts(cases: &[OutreachCase]) -> BTreeMap<LifecycleStage, usize> {
    let mut counts = LifecycleStage::ALL
        .into_iter()
        .map(|stage| (stage, 0))
        .collect::<BTreeMap<_, _>>();
    for case in cases.iter().filter(|case| case.status != CaseStatus::Closed) {
        *counts.entry(case.stage).or_default() += 1;
    }
    counts
}

pub fn open_cases_in_stages(cases: &[OutreachCase], stages: &[LifecycleStage]) -> usize {
    cases
        .iter()
        .filter(|case| case.status != CaseStatus::Closed)
        .filter(|case| stages.is_empty() || stages.contains(&case.stage))
        .count()
}

pub fn is_overdue(case: &OutreachCase, today: Date) -> bool {
    case.status != CaseStatus::Closed && case.due < today
}

/// `mm:ss`, or `h:mm:ss` past the hour.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

pub fn format_premium(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (idx, ch) in dollars.chars().enumerate() {
        if idx > 0 && (dollars.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}
