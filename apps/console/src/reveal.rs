//! Scripted transcript playback.
//!
//! A [`TranscriptRevealer`] shows a growing prefix of a scenario script. Pending
//! advances are represented by [`RevealTicket`]s stamped with the epoch that
//! issued them; every reset bumps the epoch, so a ticket issued before a
//! scenario switch can never move the cursor afterwards.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::models::{ScenarioId, TranscriptLine};

pub const DEFAULT_INITIAL_VISIBLE: usize = 2;
pub const DEFAULT_CADENCE: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealSettings {
    pub initial_visible: usize,
    pub cadence: Duration,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            initial_visible: DEFAULT_INITIAL_VISIBLE,
            cadence: DEFAULT_CADENCE,
        }
    }
}

impl RevealSettings {
    pub fn cadence_ms(&self) -> u32 {
        u32::try_from(self.cadence.as_millis()).unwrap_or(u32::MAX)
    }
}

/// Immutable dialogue for one scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    scenario: ScenarioId,
    lines: Rc<[TranscriptLine]>,
}

impl Script {
    pub fn new(scenario: ScenarioId, lines: impl Into<Rc<[TranscriptLine]>>) -> Self {
        Self {
            scenario,
            lines: lines.into(),
        }
    }

    pub fn empty(scenario: ScenarioId) -> Self {
        Self::new(scenario, Vec::new())
    }

    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Revealing,
    Complete,
}

/// Permission for exactly one pending advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTicket {
    scenario: ScenarioId,
    epoch: u64,
}

impl RevealTicket {
    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }
}

/// Result of lining the revealer up with the host's active scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Follow {
    Unchanged,
    /// A new script was installed. Carries its first ticket unless it starts
    /// complete.
    Switched(Option<RevealTicket>),
}

/// Render snapshot of a revealer.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealView {
    pub lines: Vec<TranscriptLine>,
    pub total: usize,
    pub live: bool,
}

#[derive(Clone, Debug)]
pub struct TranscriptRevealer {
    script: Script,
    cursor: usize,
    epoch: u64,
    initial_visible: usize,
}

impl TranscriptRevealer {
    pub fn new(script: Script, initial_visible: usize) -> Self {
        let cursor = initial_visible.min(script.len());
        Self {
            script,
            cursor,
            epoch: 0,
            initial_visible,
        }
    }

    pub fn scenario(&self) -> ScenarioId {
        self.script.scenario()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.script.len()
    }

    pub fn state(&self) -> RevealState {
        if self.cursor >= self.script.len() {
            RevealState::Complete
        } else {
            RevealState::Revealing
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == RevealState::Complete
    }

    /// The "live" badge: shown while lines are still arriving.
    pub fn is_live(&self) -> bool {
        !self.is_complete()
    }

    pub fn visible(&self) -> &[TranscriptLine] {
        &self.script.lines()[..self.cursor]
    }

    /// Reveals one more line. Returns `false` once the script is complete.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.script.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Rewinds to the initial prefix and invalidates every outstanding ticket.
    pub fn reset(&mut self) {
        self.cursor = self.initial_visible.min(self.script.len());
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Installs a new script, resets, and returns the first ticket if there
    /// is anything left to reveal.
    pub fn switch_to(&mut self, script: Script) -> Option<RevealTicket> {
        self.script = script;
        self.reset();
        self.ticket()
    }

    /// Switches to `active` if it is not the loaded scenario. Runs before
    /// anything reads the revealer, so a render never shows the previous
    /// script under a new identity.
    pub fn follow(
        &mut self,
        active: ScenarioId,
        load: impl FnOnce(ScenarioId) -> Script,
    ) -> Follow {
        if self.scenario() == active {
            return Follow::Unchanged;
        }
        Follow::Switched(self.switch_to(load(active)))
    }

    pub fn view(&self) -> RevealView {
        RevealView {
            lines: self.visible().to_vec(),
            total: self.total(),
            live: self.is_live(),
        }
    }

    pub fn ticket(&self) -> Option<RevealTicket> {
        if self.is_complete() {
            return None;
        }
        Some(RevealTicket {
            scenario: self.script.scenario(),
            epoch: self.epoch,
        })
    }

    /// Applies the advance a ticket was issued for and hands out the next one.
    /// Tickets from an earlier epoch or another scenario are ignored.
    pub fn fire(&mut self, ticket: RevealTicket) -> Option<RevealTicket> {
        if ticket.epoch != self.epoch || ticket.scenario != self.script.scenario() {
            debug!(
                stale = %ticket.scenario,
                active = %self.script.scenario(),
                "dropping stale reveal ticket"
            );
            return None;
        }

        self.advance();
        self.ticket()
    }
}

/// Sleeps one cadence, fires, and repeats until the revealer stops issuing
/// tickets. Returns the number of firings.
pub async fn drive_reveal<Fire, Sleep, Fut>(
    first: RevealTicket,
    mut fire: Fire,
    mut sleep: Sleep,
) -> usize
where
    Fire: FnMut(RevealTicket) -> Option<RevealTicket>,
    Sleep: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut fired = 0;
    let mut pending = Some(first);
    while let Some(ticket) = pending {
        sleep().await;
        pending = fire(ticket);
        fired += 1;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sentiment, Speaker};
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn script(scenario: ScenarioId, len: usize) -> Script {
        let lines = (0..len)
            .map(|idx| TranscriptLine {
                timestamp: format!("00:{idx:02}"),
                speaker: if idx % 2 == 0 {
                    Speaker::Customer
                } else {
                    Speaker::Agent
                },
                text: format!("line {idx}"),
                sentiment: Sentiment::Neutral,
            })
            .collect::<Vec<_>>();
        Script::new(scenario, lines)
    }

    fn fire_n(revealer: &mut TranscriptRevealer, n: usize) -> Option<RevealTicket> {
        let mut ticket = revealer.ticket();
        for _ in 0..n {
            ticket = ticket.and_then(|t| revealer.fire(t));
        }
        ticket
    }

    #[test]
    fn eight_line_script_completes_after_six_firings() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Renewal, 8), 2);
        assert_eq!(revealer.cursor(), 2);
        assert_eq!(revealer.state(), RevealState::Revealing);

        let mut ticket = revealer.ticket();
        for expected in 3..=8 {
            ticket = revealer.fire(ticket.expect("ticket while revealing"));
            assert_eq!(revealer.cursor(), expected);
        }

        assert!(ticket.is_none());
        assert!(revealer.is_complete());
        assert!(!revealer.is_live());

        // A seventh advance does nothing.
        assert!(!revealer.advance());
        assert_eq!(revealer.cursor(), 8);
    }

    #[test]
    fn advances_to_complete_equal_length_minus_initial() {
        for len in 0..15 {
            let mut revealer = TranscriptRevealer::new(script(ScenarioId::Friction, len), 2);
            let mut advances = 0;
            while revealer.advance() {
                advances += 1;
            }
            assert_eq!(advances, len.saturating_sub(2), "len {len}");
            assert_eq!(revealer.cursor(), len);
        }
    }

    #[test]
    fn short_scripts_start_complete() {
        for len in 0..=2 {
            let revealer = TranscriptRevealer::new(script(ScenarioId::NewClaim, len), 2);
            assert_eq!(revealer.cursor(), len);
            assert_eq!(revealer.state(), RevealState::Complete);
            assert!(revealer.ticket().is_none());
            assert_eq!(revealer.visible().len(), len);
        }
    }

    #[test]
    fn cursor_never_decreases_within_a_script() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2);
        let mut observed = vec![revealer.cursor()];
        let mut ticket = revealer.ticket();
        while let Some(t) = ticket {
            ticket = revealer.fire(t);
            observed.push(revealer.cursor());
        }

        assert!(observed.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(observed.last().copied(), Some(12));
    }

    #[test]
    fn switching_mid_reveal_resets_to_initial_prefix() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2);
        fire_n(&mut revealer, 3);
        assert_eq!(revealer.cursor(), 5);

        let ticket = revealer.switch_to(script(ScenarioId::Friction, 9));
        assert_eq!(revealer.scenario(), ScenarioId::Friction);
        assert_eq!(revealer.cursor(), 2);
        assert_eq!(ticket.map(|t| t.scenario()), Some(ScenarioId::Friction));
    }

    #[test]
    fn switching_to_a_short_script_clamps_the_cursor() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2);
        fire_n(&mut revealer, 4);

        let ticket = revealer.switch_to(script(ScenarioId::NewClaim, 1));
        assert_eq!(revealer.cursor(), 1);
        assert!(revealer.is_complete());
        assert!(ticket.is_none());
    }

    #[test]
    fn stale_ticket_after_switch_is_ignored() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2);
        let stale = fire_n(&mut revealer, 3).expect("escalation still revealing");

        revealer.switch_to(script(ScenarioId::Friction, 9));
        assert_eq!(revealer.fire(stale), None);
        assert_eq!(revealer.cursor(), 2);
    }

    #[test]
    fn stale_ticket_for_the_same_scenario_is_ignored_after_reset() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Renewal, 8), 2);
        let stale = revealer.ticket().expect("revealing");

        revealer.switch_to(script(ScenarioId::Renewal, 8));
        assert!(revealer.fire(stale).is_none());
        assert_eq!(revealer.cursor(), 2);

        let fresh = revealer.ticket().expect("revealing");
        assert!(revealer.fire(fresh).is_some());
        assert_eq!(revealer.cursor(), 3);
    }

    #[test]
    fn visible_prefix_tracks_cursor() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Renewal, 5), 2);
        assert_eq!(revealer.visible().len(), 2);
        revealer.advance();
        let texts = revealer
            .visible()
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["line 0", "line 1", "line 2"]);
    }

    #[test]
    fn custom_initial_visible_is_honoured() {
        let revealer = TranscriptRevealer::new(script(ScenarioId::Renewal, 8), 5);
        assert_eq!(revealer.cursor(), 5);
        let revealer = TranscriptRevealer::new(script(ScenarioId::Renewal, 8), 0);
        assert_eq!(revealer.cursor(), 0);
    }

    #[test]
    fn driver_fires_until_complete() {
        let revealer = RefCell::new(TranscriptRevealer::new(script(ScenarioId::Renewal, 8), 2));
        let first = revealer.borrow().ticket().expect("revealing");
        let mut sleeps = 0;

        let fired = block_on(drive_reveal(
            first,
            |ticket| revealer.borrow_mut().fire(ticket),
            || {
                sleeps += 1;
                futures::future::ready(())
            },
        ));

        assert_eq!(fired, 6);
        assert_eq!(sleeps, 6);
        assert_eq!(revealer.borrow().cursor(), 8);
        assert!(revealer.borrow().is_complete());
    }

    #[test]
    fn driver_for_old_script_stops_after_switch() {
        let revealer = RefCell::new(TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2));
        let first = revealer.borrow().ticket().expect("revealing");
        let mut sleeps = 0;

        let fired = block_on(drive_reveal(
            first,
            |ticket| revealer.borrow_mut().fire(ticket),
            || {
                sleeps += 1;
                if sleeps == 4 {
                    // The user switches scenario while the fourth timer is pending.
                    revealer
                        .borrow_mut()
                        .switch_to(script(ScenarioId::Friction, 9));
                }
                futures::future::ready(())
            },
        ));

        assert_eq!(fired, 4);
        let revealer = revealer.borrow();
        assert_eq!(revealer.scenario(), ScenarioId::Friction);
        assert_eq!(revealer.cursor(), 2);
    }

    #[test]
    fn cadence_converts_to_millis() {
        let settings = RevealSettings::default();
        assert_eq!(settings.cadence_ms(), 4_000);
        assert_eq!(settings.initial_visible, 2);
    }

    #[test]
    fn follow_is_a_no_op_for_the_loaded_scenario() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2);
        let ticket = fire_n(&mut revealer, 2).expect("revealing");

        let step = revealer.follow(ScenarioId::Escalation, |_| unreachable!("no reload"));
        assert_eq!(step, Follow::Unchanged);
        assert_eq!(revealer.cursor(), 4);
        assert!(revealer.fire(ticket).is_some());
    }

    #[test]
    fn follow_switches_before_the_next_read() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2);
        let stale = fire_n(&mut revealer, 3).expect("revealing");
        assert_eq!(revealer.view().lines.len(), 5);

        let step = revealer.follow(ScenarioId::Friction, |id| script(id, 9));
        let Follow::Switched(Some(first)) = step else {
            panic!("expected a fresh reveal, got {step:?}");
        };
        assert_eq!(first.scenario(), ScenarioId::Friction);

        let view = revealer.view();
        assert_eq!(revealer.scenario(), ScenarioId::Friction);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.total, 9);
        assert!(view.live);

        // The old driver's pending firing lands after the switch.
        assert!(revealer.fire(stale).is_none());
        assert_eq!(revealer.cursor(), 2);
        assert!(revealer.fire(first).is_some());
        assert_eq!(revealer.cursor(), 3);
    }

    #[test]
    fn follow_to_a_complete_script_issues_no_ticket() {
        let mut revealer = TranscriptRevealer::new(script(ScenarioId::Renewal, 8), 2);
        let step = revealer.follow(ScenarioId::NewClaim, |id| script(id, 2));
        assert_eq!(step, Follow::Switched(None));
        assert!(!revealer.view().live);
    }

    #[test]
    fn old_driver_cannot_advance_after_follow() {
        let revealer = RefCell::new(TranscriptRevealer::new(script(ScenarioId::Escalation, 12), 2));
        let first = revealer.borrow().ticket().expect("revealing");
        let mut sleeps = 0;
        let mut replacement = None;

        let fired = block_on(drive_reveal(
            first,
            |ticket| revealer.borrow_mut().fire(ticket),
            || {
                sleeps += 1;
                if sleeps == 2 {
                    // The host re-renders with a new scenario while the
                    // second timer is pending.
                    let step = revealer
                        .borrow_mut()
                        .follow(ScenarioId::Friction, |id| script(id, 9));
                    replacement = Some(step);
                }
                futures::future::ready(())
            },
        ));

        assert_eq!(fired, 2);
        assert!(matches!(replacement, Some(Follow::Switched(Some(_)))));
        let revealer = revealer.borrow();
        assert_eq!(revealer.scenario(), ScenarioId::Friction);
        assert_eq!(revealer.cursor(), 2);
    }
}
