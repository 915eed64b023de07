use dioxus::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::data::{console, ConsoleData};
use crate::error::{CaseError, WrapUpError};
use crate::models::{
    AgentStatus, CaseStatus, ConsoleView, LifecycleStage, OutreachCase, Persona, PersonaId,
    ScenarioId,
};
use crate::APP_CONFIG;

pub type AppSignal = Signal<AppState>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CsrState {
    pub scenario: ScenarioId,
    pub on_hold: bool,
    #[serde(default)]
    pub completed_actions: BTreeSet<String>,
    pub wrap_up_open: bool,
}

impl CsrState {
    /// Returns `false` when the scenario is already active.
    pub fn select_scenario(&mut self, scenario: ScenarioId) -> bool {
        if self.scenario == scenario {
            return false;
        }
        self.scenario = scenario;
        self.on_hold = false;
        self.wrap_up_open = false;
        self.completed_actions.clear();
        true
    }

    pub fn toggle_action(&mut self, action_id: &str) {
        if !self.completed_actions.remove(action_id) {
            self.completed_actions.insert(action_id.to_string());
        }
    }

    /// Ends the call. The modal stays open when no disposition was chosen.
    pub fn wrap_up(&mut self, disposition: &str) -> Result<ScenarioId, WrapUpError> {
        if disposition.trim().is_empty() {
            return Err(WrapUpError::MissingDisposition);
        }
        self.wrap_up_open = false;
        self.on_hold = false;
        Ok(self.scenario)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RosterSort {
    #[default]
    Name,
    Handled,
    Csat,
    HandleTime,
}

impl RosterSort {
    pub const ALL: [RosterSort; 4] = [
        RosterSort::Name,
        RosterSort::Handled,
        RosterSort::Csat,
        RosterSort::HandleTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Handled => "Handled today",
            Self::Csat => "CSAT",
            Self::HandleTime => "Handle time",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SupervisorState {
    pub status_filter: Option<AgentStatus>,
    pub sort: RosterSort,
    pub monitored_agent: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueueSort {
    #[default]
    Priority,
    DueDate,
    Customer,
}

impl QueueSort {
    pub const ALL: [QueueSort; 3] = [QueueSort::Priority, QueueSort::DueDate, QueueSort::Customer];

    pub fn label(self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::DueDate => "Due date",
            Self::Customer => "Customer",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QueueFilter {
    #[serde(default)]
    pub stages: BTreeSet<LifecycleStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub search: String,
}

impl QueueFilter {
    pub fn clear(&mut self) {
        self.stages.clear();
        self.status = None;
        self.search.clear();
    }

    pub fn toggle_stage(&mut self, stage: LifecycleStage) {
        if !self.stages.insert(stage) {
            self.stages.remove(&stage);
        }
    }

    pub fn matches(&self, case: &OutreachCase) -> bool {
        if !self.stages.is_empty() && !self.stages.contains(&case.stage) {
            return false;
        }

        if let Some(status) = self.status {
            if case.status != status {
                return false;
            }
        }

        let needle = normalize_filter_value(&self.search);
        if !needle.is_empty() {
            let haystacks = [&case.customer_name, &case.case_id, &case.reason];
            if !haystacks
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty() && self.status.is_none() && self.search.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QueueState {
    pub cases: Vec<OutreachCase>,
    #[serde(default)]
    pub filter: QueueFilter,
    #[serde(default)]
    pub sort: QueueSort,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_case: Option<String>,
}

impl QueueState {
    pub fn case(&self, case_id: &str) -> Option<&OutreachCase> {
        self.cases.iter().find(|case| case.case_id == case_id)
    }

    /// Moves a case to `to`, returning the status it left.
    pub fn transition(&mut self, case_id: &str, to: CaseStatus) -> Result<CaseStatus, CaseError> {
        let case = self
            .cases
            .iter_mut()
            .find(|case| case.case_id == case_id)
            .ok_or_else(|| CaseError::UnknownCase(case_id.to_string()))?;

        let from = case.status;
        if !from.can_transition(to) {
            return Err(CaseError::InvalidTransition {
                case_id: case_id.to_string(),
                from,
                to,
            });
        }

        case.status = to;
        Ok(from)
    }

    pub fn assign(&mut self, case_id: &str, owner: &str) -> Result<CaseStatus, CaseError> {
        let from = self.transition(case_id, CaseStatus::InProgress)?;
        if let Some(case) = self.cases.iter_mut().find(|case| case.case_id == case_id) {
            case.owner = Some(owner.to_string());
        }
        Ok(from)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OperationState {
    pub last_message: Option<String>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    pub view: ConsoleView,
    pub persona: PersonaId,
    pub csr: CsrState,
    pub supervisor: SupervisorState,
    pub queue: QueueState,
    pub operation: OperationState,
}

impl AppState {
    pub fn seed(data: &dyn ConsoleData, config: &AppConfig) -> Self {
        let mut state = Self {
            queue: QueueState {
                cases: data.cases().to_vec(),
                ..QueueState::default()
            },
            ..Self::default()
        };

        match data.persona(config.default_persona) {
            Ok(persona) => state.apply_persona(persona),
            Err(err) => debug!(%err, "starting without a persona preset"),
        }

        state
    }

    /// Switching persona changes the landing view, the scenario preset and the
    /// queue slice; everything else is left alone.
    pub fn apply_persona(&mut self, persona: &Persona) {
        self.persona = persona.persona_id;
        self.view = persona.home_view;
        if let Some(scenario) = persona.default_scenario {
            self.csr.select_scenario(scenario);
        }
        self.queue.filter.stages = persona.queue_stages.iter().copied().collect();
        self.queue.open_case = None;
        self.supervisor.monitored_agent = None;
    }

    /// "Assign to me": the configured agent takes an open case.
    pub fn assign_case(&mut self, case_id: &str, config: &AppConfig) -> Result<CaseStatus, CaseError> {
        self.queue.assign(case_id, &config.agent_name)
    }

    /// Jumps to the CSR workspace on the conversation linked to `case_id`.
    pub fn open_case_in_workspace(&mut self, case_id: &str) -> Result<ScenarioId, CaseError> {
        let case = self
            .queue
            .case(case_id)
            .ok_or_else(|| CaseError::UnknownCase(case_id.to_string()))?;
        let scenario = case
            .scenario
            .ok_or_else(|| CaseError::NoLinkedScenario(case_id.to_string()))?;

        self.csr.select_scenario(scenario);
        self.queue.open_case = None;
        self.view = ConsoleView::CsrWorkspace;
        Ok(scenario)
    }
}

#[derive(Clone, Copy)]
pub struct AppActions {
    state: AppSignal,
}

impl AppActions {
    pub fn set_view(&self, view: ConsoleView) {
        let mut signal = self.state;
        signal.write().view = view;
    }

    pub fn select_scenario(&self, scenario: ScenarioId) {
        let mut signal = self.state;
        if signal.write().csr.select_scenario(scenario) {
            debug!(%scenario, "scenario selected");
        }
    }

    pub fn toggle_hold(&self) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.csr.on_hold = !state.csr.on_hold;
    }

    pub fn toggle_action(&self, action_id: &str) {
        let mut signal = self.state;
        signal.write().csr.toggle_action(action_id);
    }

    pub fn set_wrap_up_open(&self, open: bool) {
        let mut signal = self.state;
        signal.write().csr.wrap_up_open = open;
    }

    pub fn submit_wrap_up(&self, disposition: &str, notes: &str) {
        let result = {
            let mut signal = self.state;
            let mut state = signal.write();
            state.csr.wrap_up(disposition)
        };
        let scenario = match result {
            Ok(scenario) => scenario,
            Err(err) => {
                self.set_operation_error(err.to_string());
                return;
            }
        };

        let disposition = disposition.trim();
        let customer = console()
            .scenario(scenario)
            .map(|content| content.customer.name.clone())
            .unwrap_or_else(|_| scenario.to_string());

        info!(%scenario, %disposition, notes_len = notes.trim().len(), "call wrapped up");
        self.set_operation_message(
            "Wrap-up saved",
            format!("{customer}: {disposition}"),
        );
    }

    pub fn set_roster_filter(&self, status: Option<AgentStatus>) {
        let mut signal = self.state;
        signal.write().supervisor.status_filter = status;
    }

    pub fn set_roster_sort(&self, sort: RosterSort) {
        let mut signal = self.state;
        signal.write().supervisor.sort = sort;
    }

    pub fn monitor_agent(&self, agent_id: Option<String>) {
        let mut signal = self.state;
        signal.write().supervisor.monitored_agent = agent_id;
    }

    pub fn record_supervisor_action(&self, action: &str, agent_name: &str) {
        info!(%action, agent = %agent_name, "supervisor intervention");
        self.set_operation_message("Supervisor", format!("{action} sent to {agent_name}"));
    }

    pub fn switch_persona(&self, persona_id: PersonaId) {
        match console().persona(persona_id) {
            Ok(persona) => {
                let mut signal = self.state;
                signal.write().apply_persona(persona);
                info!(persona = %persona_id, "persona switched");
            }
            Err(err) => self.set_operation_error(err.to_string()),
        }
    }

    pub fn toggle_stage(&self, stage: LifecycleStage) {
        let mut signal = self.state;
        signal.write().queue.filter.toggle_stage(stage);
    }

    pub fn set_status_filter(&self, status: Option<CaseStatus>) {
        let mut signal = self.state;
        signal.write().queue.filter.status = status;
    }

    pub fn set_search(&self, search: String) {
        let mut signal = self.state;
        signal.write().queue.filter.search = search;
    }

    pub fn clear_queue_filters(&self) {
        let mut signal = self.state;
        signal.write().queue.filter.clear();
    }

    pub fn set_queue_sort(&self, sort: QueueSort) {
        let mut signal = self.state;
        signal.write().queue.sort = sort;
    }

    pub fn open_case(&self, case_id: Option<String>) {
        let mut signal = self.state;
        signal.write().queue.open_case = case_id;
    }

    pub fn assign_case_to_me(&self, case_id: &str) {
        let fallback = AppConfig::default();
        let config = APP_CONFIG.get().unwrap_or(&fallback);
        let result = {
            let mut signal = self.state;
            let mut state = signal.write();
            state.assign_case(case_id, config)
        };
        self.report_case_result(case_id, CaseStatus::InProgress, result);
    }

    pub fn move_case(&self, case_id: &str, to: CaseStatus) {
        let result = {
            let mut signal = self.state;
            let mut state = signal.write();
            state.queue.transition(case_id, to)
        };
        self.report_case_result(case_id, to, result);
    }

    pub fn open_case_in_workspace(&self, case_id: &str) {
        let result = {
            let mut signal = self.state;
            let mut state = signal.write();
            state.open_case_in_workspace(case_id)
        };
        match result {
            Ok(scenario) => debug!(%case_id, %scenario, "case opened in workspace"),
            Err(err) => self.set_operation_error(err.to_string()),
        }
    }

    fn report_case_result(
        &self,
        case_id: &str,
        to: CaseStatus,
        result: Result<CaseStatus, CaseError>,
    ) {
        match result {
            Ok(from) => {
                info!(%case_id, %from, %to, "case moved");
                self.set_operation_message("Outreach queue", format!("{case_id} is now {}", to.label()));
            }
            Err(err) => self.set_operation_error(err.to_string()),
        }
    }

    fn set_operation_message(&self, context: &str, message: String) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.operation.last_message = Some(message);
        state.operation.error = None;
        state.operation.context = Some(context.to_string());
    }

    pub fn set_operation_success(&self, message: String) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.operation.last_message = Some(message);
        state.operation.error = None;
        state.operation.context = None;
    }

    pub fn set_operation_error(&self, message: String) {
        let mut signal = self.state;
        let mut state = signal.write();
        state.operation.error = Some(message);
        state.operation.last_message = None;
        state.operation.context = None;
    }

    pub fn clear_operation_status(&self) {
        let mut signal = self.state;
        signal.write().operation = OperationState::default();
    }
}

pub(crate) fn normalize_filter_value(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn use_app_state() -> AppSignal {
    use_context::<AppSignal>()
}

pub fn use_app_actions() -> AppActions {
    let state = use_app_state();
    AppActions { state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticConsoleData;
    use crate::fixtures::demo_console_data;
    use crate::models::{OutreachChannel, Priority};
    use time::macros::date;

    fn case(case_id: &str, stage: LifecycleStage, status: CaseStatus) -> OutreachCase {
        OutreachCase {
            case_id: case_id.into(),
            customer_name: format!("Customer {case_id}"),
            stage,
            channel: OutreachChannel::Phone,
            priority: Priority::Medium,
            status,
            due: date!(2026 - 10 - 20),
            owner: None,
            reason: "Renewal quote follow-up".into(),
            scenario: None,
        }
    }

    #[test]
    fn selecting_a_new_scenario_clears_call_state() {
        let mut csr = CsrState {
            scenario: ScenarioId::Escalation,
            on_hold: true,
            wrap_up_open: true,
            ..CsrState::default()
        };
        csr.toggle_action("esc-own");

        assert!(!csr.select_scenario(ScenarioId::Escalation));
        assert!(csr.on_hold);

        assert!(csr.select_scenario(ScenarioId::Friction));
        assert_eq!(csr.scenario, ScenarioId::Friction);
        assert!(!csr.on_hold);
        assert!(!csr.wrap_up_open);
        assert!(csr.completed_actions.is_empty());
    }

    #[test]
    fn toggling_an_action_twice_undoes_it() {
        let mut csr = CsrState::default();
        csr.toggle_action("fr-waive");
        assert!(csr.completed_actions.contains("fr-waive"));
        csr.toggle_action("fr-waive");
        assert!(csr.completed_actions.is_empty());
    }

    #[test]
    fn queue_filter_combines_stage_status_and_search() {
        let renewal = case("LC-1", LifecycleStage::Renewal, CaseStatus::Open);
        let lapse = case("LC-2", LifecycleStage::LapseRisk, CaseStatus::Snoozed);

        let mut filter = QueueFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&renewal) && filter.matches(&lapse));

        filter.toggle_stage(LifecycleStage::Renewal);
        assert!(filter.matches(&renewal));
        assert!(!filter.matches(&lapse));

        filter.toggle_stage(LifecycleStage::Renewal);
        filter.status = Some(CaseStatus::Snoozed);
        assert!(!filter.matches(&renewal));
        assert!(filter.matches(&lapse));

        filter.status = None;
        filter.search = "  lc-2 ".into();
        assert!(filter.matches(&lapse));
        assert!(!filter.matches(&renewal));

        filter.search = "QUOTE".into();
        assert!(filter.matches(&renewal) && filter.matches(&lapse));

        filter.clear();
        assert!(filter.is_empty());
    }

    #[test]
    fn case_transitions_follow_the_allowed_table() {
        let mut queue = QueueState {
            cases: vec![case("LC-1", LifecycleStage::Renewal, CaseStatus::Open)],
            ..QueueState::default()
        };

        assert_eq!(queue.assign("LC-1", "Dana"), Ok(CaseStatus::Open));
        let assigned = queue.case("LC-1").expect("case present");
        assert_eq!(assigned.status, CaseStatus::InProgress);
        assert_eq!(assigned.owner.as_deref(), Some("Dana"));

        assert_eq!(
            queue.transition("LC-1", CaseStatus::Open),
            Err(CaseError::InvalidTransition {
                case_id: "LC-1".into(),
                from: CaseStatus::InProgress,
                to: CaseStatus::Open,
            })
        );

        assert_eq!(
            queue.transition("LC-1", CaseStatus::Snoozed),
            Ok(CaseStatus::InProgress)
        );
        assert_eq!(
            queue.transition("LC-1", CaseStatus::Open),
            Ok(CaseStatus::Snoozed)
        );
        assert_eq!(
            queue.transition("LC-1", CaseStatus::Closed),
            Ok(CaseStatus::Open)
        );
        assert!(queue.assign("LC-1", "Dana").is_err());
        assert_eq!(
            queue.transition("LC-1", CaseStatus::Open),
            Ok(CaseStatus::Closed)
        );
    }

    #[test]
    fn unknown_case_is_reported() {
        let mut queue = QueueState::default();
        assert_eq!(
            queue.transition("LC-404", CaseStatus::Closed),
            Err(CaseError::UnknownCase("LC-404".into()))
        );
    }

    #[test]
    fn seed_applies_the_configured_persona() {
        let data = demo_console_data().expect("fixture parses");
        let config = AppConfig {
            default_persona: PersonaId::RetentionSpecialist,
            ..AppConfig::default()
        };

        let state = AppState::seed(&data, &config);
        assert_eq!(state.persona, PersonaId::RetentionSpecialist);
        assert_eq!(state.view, ConsoleView::Lifecycle);
        assert_eq!(state.csr.scenario, ScenarioId::Renewal);
        assert!(state.queue.filter.stages.contains(&LifecycleStage::WinBack));
        assert_eq!(state.queue.cases.len(), data.cases().len());
    }

    #[test]
    fn seed_without_personas_uses_defaults() {
        let data = StaticConsoleData::empty()
            .with_cases(vec![case("LC-9", LifecycleStage::Onboarding, CaseStatus::Open)]);
        let state = AppState::seed(&data, &AppConfig::default());
        assert_eq!(state.persona, PersonaId::FrontlineCsr);
        assert_eq!(state.view, ConsoleView::CsrWorkspace);
        assert_eq!(state.queue.cases.len(), 1);
    }

    #[test]
    fn applying_a_persona_resets_queue_slice_and_modals() {
        let data = demo_console_data().expect("fixture parses");
        let mut state = AppState::seed(&data, &AppConfig::default());
        state.queue.open_case = Some("LC-1001".into());
        state.supervisor.monitored_agent = Some("AG-01".into());

        let supervisor = data.persona(PersonaId::Supervisor).expect("persona");
        state.apply_persona(supervisor);

        assert_eq!(state.view, ConsoleView::Supervisor);
        assert_eq!(state.csr.scenario, ScenarioId::Escalation);
        assert!(state.queue.filter.stages.is_empty());
        assert!(state.queue.open_case.is_none());
        assert!(state.supervisor.monitored_agent.is_none());
    }

    #[test]
    fn wrap_up_requires_a_disposition() {
        let mut csr = CsrState {
            scenario: ScenarioId::Friction,
            on_hold: true,
            wrap_up_open: true,
            ..CsrState::default()
        };

        assert_eq!(csr.wrap_up("   "), Err(WrapUpError::MissingDisposition));
        assert!(csr.wrap_up_open);
        assert!(csr.on_hold);

        assert_eq!(csr.wrap_up("Resolved"), Ok(ScenarioId::Friction));
        assert!(!csr.wrap_up_open);
        assert!(!csr.on_hold);
    }

    #[test]
    fn assign_to_me_uses_the_configured_agent_name() {
        let config = AppConfig::from_lookup(|key| {
            (key == "CONSOLE_AGENT_NAME").then(|| "Priya".to_string())
        });
        let mut state = AppState::default();
        state.queue.cases = vec![case("LC-5", LifecycleStage::LapseRisk, CaseStatus::Open)];

        assert_eq!(state.assign_case("LC-5", &config), Ok(CaseStatus::Open));
        let assigned = state.queue.case("LC-5").expect("case present");
        assert_eq!(assigned.owner.as_deref(), Some("Priya"));
        assert_eq!(assigned.status, CaseStatus::InProgress);
    }

    #[test]
    fn opening_a_linked_case_jumps_to_its_conversation() {
        let mut linked = case("LC-1", LifecycleStage::ClaimFollowUp, CaseStatus::Open);
        linked.scenario = Some(ScenarioId::NewClaim);
        let mut state = AppState {
            view: ConsoleView::Lifecycle,
            ..AppState::default()
        };
        state.csr.on_hold = true;
        state.queue.cases = vec![linked];
        state.queue.open_case = Some("LC-1".into());

        assert_eq!(state.open_case_in_workspace("LC-1"), Ok(ScenarioId::NewClaim));
        assert_eq!(state.view, ConsoleView::CsrWorkspace);
        assert_eq!(state.csr.scenario, ScenarioId::NewClaim);
        assert!(!state.csr.on_hold);
        assert!(state.queue.open_case.is_none());
    }

    #[test]
    fn opening_an_unlinked_case_leaves_the_queue_in_place() {
        let mut state = AppState {
            view: ConsoleView::Lifecycle,
            ..AppState::default()
        };
        state.queue.cases = vec![case("LC-2", LifecycleStage::Renewal, CaseStatus::Open)];
        state.queue.open_case = Some("LC-2".into());

        assert_eq!(
            state.open_case_in_workspace("LC-2"),
            Err(CaseError::NoLinkedScenario("LC-2".into()))
        );
        assert_eq!(
            state.open_case_in_workspace("LC-404"),
            Err(CaseError::UnknownCase("LC-404".into()))
        );
        assert_eq!(state.view, ConsoleView::Lifecycle);
        assert_eq!(state.queue.open_case.as_deref(), Some("LC-2"));
    }
}
