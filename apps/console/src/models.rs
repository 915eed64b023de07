use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    #[default]
    Escalation,
    Friction,
    Renewal,
    NewClaim,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 4] = [
        ScenarioId::Escalation,
        ScenarioId::Friction,
        ScenarioId::Renewal,
        ScenarioId::NewClaim,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Escalation => "escalation",
            Self::Friction => "friction",
            Self::Renewal => "renewal",
            Self::NewClaim => "new-claim",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Speaker {
    Agent,
    Customer,
    AutomatedSystem,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Customer => "Customer",
            Self::AutomatedSystem => "System",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriptLine {
    pub timestamp: String,
    pub speaker: Speaker,
    pub text: String,
    pub sentiment: Sentiment,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScenarioAlert {
    pub severity: AlertSeverity,
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NextBestAction {
    pub action_id: String,
    pub title: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PolicySummary {
    pub policy_number: String,
    pub product: String,
    pub monthly_premium_cents: u64,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerProfile {
    pub customer_id: String,
    pub name: String,
    pub tier: String,
    pub tenure_years: u32,
    pub churn_risk: RiskLevel,
    #[serde(default)]
    pub policies: Vec<PolicySummary>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScenarioContent {
    pub label: String,
    #[serde(default)]
    pub summary: String,
    pub customer: CustomerProfile,
    #[serde(default)]
    pub alerts: Vec<ScenarioAlert>,
    #[serde(default)]
    pub actions: Vec<NextBestAction>,
    #[serde(default)]
    pub talking_points: Vec<String>,
    #[serde(default)]
    pub transcript: Vec<TranscriptLine>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AgentStatus {
    Available,
    OnCall,
    AfterCallWork,
    Offline,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 4] = [
        AgentStatus::Available,
        AgentStatus::OnCall,
        AgentStatus::AfterCallWork,
        AgentStatus::Offline,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OnCall => "On call",
            Self::AfterCallWork => "After-call work",
            Self::Offline => "Offline",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OnCall => "on-call",
            Self::AfterCallWork => "after-call-work",
            Self::Offline => "offline",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.slug() == value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentRecord {
    pub agent_id: String,
    pub name: String,
    #[serde(default)]
    pub team: String,
    pub status: AgentStatus,
    #[serde(default)]
    pub handled_today: u32,
    #[serde(default)]
    pub avg_handle_secs: u32,
    #[serde(default)]
    pub csat: f32,
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_scenario: Option<ScenarioId>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleStage {
    Onboarding,
    Renewal,
    LapseRisk,
    WinBack,
    ClaimFollowUp,
}

impl LifecycleStage {
    pub const ALL: [LifecycleStage; 5] = [
        LifecycleStage::Onboarding,
        LifecycleStage::Renewal,
        LifecycleStage::LapseRisk,
        LifecycleStage::WinBack,
        LifecycleStage::ClaimFollowUp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Onboarding => "Onboarding",
            Self::Renewal => "Renewal",
            Self::LapseRisk => "Lapse risk",
            Self::WinBack => "Win-back",
            Self::ClaimFollowUp => "Claim follow-up",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutreachChannel {
    Phone,
    Email,
    Sms,
}

impl OutreachChannel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Sms => "SMS",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    Open,
    InProgress,
    Snoozed,
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 4] = [
        CaseStatus::Open,
        CaseStatus::InProgress,
        CaseStatus::Snoozed,
        CaseStatus::Closed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In progress",
            Self::Snoozed => "Snoozed",
            Self::Closed => "Closed",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Snoozed => "snoozed",
            Self::Closed => "closed",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.slug() == value)
    }

    /// Allowed moves in the outreach queue. Staying in place is never a transition.
    pub fn can_transition(self, to: CaseStatus) -> bool {
        use CaseStatus::*;
        matches!(
            (self, to),
            (Open, InProgress)
                | (Open, Snoozed)
                | (InProgress, Snoozed)
                | (Snoozed, Open)
                | (Open, Closed)
                | (InProgress, Closed)
                | (Snoozed, Closed)
                | (Closed, Open)
        )
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OutreachCase {
    pub case_id: String,
    pub customer_name: String,
    pub stage: LifecycleStage,
    pub channel: OutreachChannel,
    pub priority: Priority,
    pub status: CaseStatus,
    pub due: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioId>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ConsoleView {
    #[default]
    CsrWorkspace,
    Supervisor,
    AgentDesktop,
    Lifecycle,
}

impl ConsoleView {
    pub const ALL: [ConsoleView; 4] = [
        ConsoleView::CsrWorkspace,
        ConsoleView::Supervisor,
        ConsoleView::AgentDesktop,
        ConsoleView::Lifecycle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CsrWorkspace => "CSR workspace",
            Self::Supervisor => "Supervisor",
            Self::AgentDesktop => "Agent desktop",
            Self::Lifecycle => "Lifecycle queue",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaId {
    #[default]
    FrontlineCsr,
    Supervisor,
    RetentionSpecialist,
    ClaimsAdvocate,
}

impl PersonaId {
    pub const ALL: [PersonaId; 4] = [
        PersonaId::FrontlineCsr,
        PersonaId::Supervisor,
        PersonaId::RetentionSpecialist,
        PersonaId::ClaimsAdvocate,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::FrontlineCsr => "frontline-csr",
            Self::Supervisor => "supervisor",
            Self::RetentionSpecialist => "retention-specialist",
            Self::ClaimsAdvocate => "claims-advocate",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|persona| persona.slug() == value.trim())
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Persona {
    pub persona_id: PersonaId,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub home_view: ConsoleView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scenario: Option<ScenarioId>,
    #[serde(default)]
    pub queue_stages: Vec<LifecycleStage>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_frontline_workspace() {
        assert_eq!(ScenarioId::default(), ScenarioId::Escalation);
        assert_eq!(ConsoleView::default(), ConsoleView::CsrWorkspace);
        assert_eq!(PersonaId::default(), PersonaId::FrontlineCsr);
    }

    #[test]
    fn staying_in_place_is_not_a_transition() {
        for status in CaseStatus::ALL {
            assert!(!status.can_transition(status), "{status}");
        }
        assert!(CaseStatus::Closed.can_transition(CaseStatus::Open));
        assert!(!CaseStatus::Snoozed.can_transition(CaseStatus::InProgress));
    }
}
