//! Data provider seam. Views and hooks read mock tables through
//! [`ConsoleData`] so they can be exercised against small synthetic sets.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::error::DataError;
use crate::models::{
    AgentRecord, OutreachCase, Persona, PersonaId, ScenarioContent, ScenarioId,
};
use crate::reveal::Script;

static EMPTY_DATA: StaticConsoleData = StaticConsoleData::empty();

/// The installed provider, or an empty one if bootstrap could not load data.
pub fn console() -> &'static dyn ConsoleData {
    match crate::CONSOLE_DATA.get() {
        Some(data) => &**data,
        None => &EMPTY_DATA,
    }
}

pub trait ConsoleData {
    fn scenario(&self, id: ScenarioId) -> Result<&ScenarioContent, DataError>;
    fn agents(&self) -> &[AgentRecord];
    fn cases(&self) -> &[OutreachCase];
    fn personas(&self) -> &[Persona];

    fn persona(&self, id: PersonaId) -> Result<&Persona, DataError> {
        self.personas()
            .iter()
            .find(|persona| persona.persona_id == id)
            .ok_or(DataError::UnknownPersona(id))
    }

    /// Transcript for a scenario; an unconfigured scenario plays as empty.
    fn script(&self, id: ScenarioId) -> Script {
        match self.scenario(id) {
            Ok(content) => Script::new(id, content.transcript.clone()),
            Err(_) => Script::empty(id),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StaticConsoleData {
    #[serde(default)]
    scenarios: BTreeMap<ScenarioId, ScenarioContent>,
    #[serde(default)]
    agents: Vec<AgentRecord>,
    #[serde(default)]
    cases: Vec<OutreachCase>,
    #[serde(default)]
    personas: Vec<Persona>,
}

impl StaticConsoleData {
    pub const fn empty() -> Self {
        Self {
            scenarios: BTreeMap::new(),
            agents: Vec::new(),
            cases: Vec::new(),
            personas: Vec::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        let data: Self = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    /// Every scenario id must have content and ids must be unique.
    pub fn validate(&self) -> Result<(), DataError> {
        if let Some(missing) = ScenarioId::ALL
            .into_iter()
            .find(|id| !self.scenarios.contains_key(id))
        {
            return Err(DataError::MissingScenario(missing));
        }

        let mut case_ids = HashSet::new();
        for case in &self.cases {
            if !case_ids.insert(case.case_id.as_str()) {
                return Err(DataError::DuplicateCase(case.case_id.clone()));
            }
        }

        let mut persona_ids = HashSet::new();
        for persona in &self.personas {
            if !persona_ids.insert(persona.persona_id) {
                return Err(DataError::DuplicatePersona(persona.persona_id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
impl StaticConsoleData {
    pub fn with_scenario(mut self, id: ScenarioId, content: ScenarioContent) -> Self {
        self.scenarios.insert(id, content);
        self
    }

    pub fn with_cases(mut self, cases: Vec<OutreachCase>) -> Self {
        self.cases = cases;
        self
    }

    pub fn with_personas(mut self, personas: Vec<Persona>) -> Self {
        self.personas = personas;
        self
    }
}

impl ConsoleData for StaticConsoleData {
    fn scenario(&self, id: ScenarioId) -> Result<&ScenarioContent, DataError> {
        self.scenarios.get(&id).ok_or(DataError::MissingScenario(id))
    }

    fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    fn cases(&self) -> &[OutreachCase] {
        &self.cases
    }

    fn personas(&self) -> &[Persona] {
        &self.personas
    }
}
