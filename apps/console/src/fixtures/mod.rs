use crate::data::StaticConsoleData;
use crate::error::DataError;

const CONSOLE_FIXTURE: &str = include_str!("console.json");

/// Demo dataset bundled with the console so the UI renders without a backend.
pub fn demo_console_data() -> Result<StaticConsoleData, DataError> {
    StaticConsoleData::from_json(CONSOLE_FIXTURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ConsoleData;
    use crate::models::{CaseStatus, PersonaId, ScenarioId, Speaker};
    use time::macros::date;

    #[test]
    fn bundled_fixture_is_valid() {
        let data = demo_console_data().expect("fixture parses");
        for id in ScenarioId::ALL {
            let content = data.scenario(id).expect("scenario present");
            assert!(!content.transcript.is_empty(), "{id} has a transcript");
            assert!(!content.customer.name.is_empty());
        }
        for id in PersonaId::ALL {
            assert!(data.persona(id).is_ok(), "{id} configured");
        }
    }

    #[test]
    fn escalation_and_friction_transcripts_have_expected_lengths() {
        let data = demo_console_data().expect("fixture parses");
        assert_eq!(data.script(ScenarioId::Escalation).len(), 12);
        assert_eq!(data.script(ScenarioId::Friction).len(), 9);
        assert_eq!(data.script(ScenarioId::Renewal).len(), 8);
    }

    #[test]
    fn transcript_speakers_use_the_closed_role_set() {
        let data = demo_console_data().expect("fixture parses");
        let escalation = data.script(ScenarioId::Escalation);
        assert_eq!(escalation.lines()[0].speaker, Speaker::AutomatedSystem);
        assert!(escalation
            .lines()
            .iter()
            .any(|line| line.speaker == Speaker::Customer));
    }

    #[test]
    fn case_due_dates_parse_as_calendar_dates() {
        let data = demo_console_data().expect("fixture parses");
        let first = data
            .cases()
            .iter()
            .find(|case| case.case_id == "LC-1001")
            .expect("LC-1001 present");
        assert_eq!(first.due, date!(2026 - 10 - 14));
        assert_eq!(first.status, CaseStatus::Open);
        assert_eq!(first.scenario, Some(ScenarioId::Escalation));
    }
}
