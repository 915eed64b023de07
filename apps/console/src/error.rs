use thiserror::Error;

use crate::models::{CaseStatus, PersonaId, ScenarioId};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("console data is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no content configured for scenario `{0}`")]
    MissingScenario(ScenarioId),
    #[error("persona `{0}` is not configured")]
    UnknownPersona(PersonaId),
    #[error("case id `{0}` appears more than once")]
    DuplicateCase(String),
    #[error("persona `{0}` appears more than once")]
    DuplicatePersona(PersonaId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CaseError {
    #[error("case `{0}` is not in the queue")]
    UnknownCase(String),
    #[error("case `{case_id}` cannot move from {from} to {to}")]
    InvalidTransition {
        case_id: String,
        from: CaseStatus,
        to: CaseStatus,
    },
    #[error("case `{0}` has no linked conversation")]
    NoLinkedScenario(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WrapUpError {
    #[error("choose a disposition before wrapping up")]
    MissingDisposition,
}
