use gonogo_core::{StimulusKind, TrialRecord};
use gonogo_timing::Timer;
use rand::Rng;

use crate::config::SessionConfig;
use crate::error::SessionError;

/// Observable phase of a session. Derived from the pending stimulus and
/// the done flag rather than stored separately, so it cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingStimulus,
    StimulusShown,
    Complete,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionPhase::AwaitingStimulus => "awaiting a stimulus",
            SessionPhase::StimulusShown => "showing a stimulus",
            SessionPhase::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingStimulus {
    kind: StimulusKind,
    shown_at_ns: u64,
}

/// Trial-loop state machine for one Go/No-Go session.
///
/// `next_stimulus` and `record_response` are deliberately separate steps:
/// the presentation layer renders the stimulus between them and the user
/// may take arbitrarily long to act, which is exactly the interval the
/// reaction-time stopwatch measures.
pub struct SessionStateMachine<T, R>
where
    T: Timer,
    R: Rng,
{
    config: SessionConfig,
    timer: T,
    rng: R,
    records: Vec<TrialRecord>,
    pending: Option<PendingStimulus>,
    done: bool,
}

impl<T, R> SessionStateMachine<T, R>
where
    T: Timer<Timestamp = u64>,
    R: Rng,
{
    pub fn new(config: SessionConfig, timer: T, rng: R) -> Self {
        let records = Vec::with_capacity(config.total_trials);
        Self {
            config,
            timer,
            rng,
            records,
            pending: None,
            done: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.done {
            SessionPhase::Complete
        } else if self.pending.is_some() {
            SessionPhase::StimulusShown
        } else {
            SessionPhase::AwaitingStimulus
        }
    }

    /// Draws the next stimulus and stamps its presentation time.
    ///
    /// Valid only while awaiting a stimulus; a no-op returning `None` when
    /// a stimulus is already shown or the session is complete.
    pub fn next_stimulus(&mut self) -> Option<StimulusKind> {
        if self.done || self.pending.is_some() {
            return None;
        }
        // random_bool panics outside [0, 1]; go_probability is a pub field.
        let p = self.config.go_probability.clamp(0.0, 1.0);
        let kind = if self.rng.random_bool(p) {
            StimulusKind::Go
        } else {
            StimulusKind::NoGo
        };
        self.pending = Some(PendingStimulus {
            kind,
            shown_at_ns: self.timer.now(),
        });
        Some(kind)
    }

    /// Records the user's action for the shown stimulus and advances the
    /// trial counter. Reaction time is measured only when `responded`.
    ///
    /// Calling this without a shown stimulus is a contract violation.
    pub fn record_response(&mut self, responded: bool) -> Result<TrialRecord, SessionError> {
        let Some(pending) = self.pending.take() else {
            return Err(SessionError::InvalidTransition {
                from: self.phase(),
                event: "record a response",
            });
        };

        let reaction_time = responded.then(|| {
            let elapsed_ns = self.timer.now().saturating_sub(pending.shown_at_ns);
            (elapsed_ns as f64 / 1_000_000.0).round() as u64
        });

        let record = TrialRecord::new(
            self.records.len() + 1,
            pending.kind,
            responded,
            reaction_time,
        );
        self.records.push(record.clone());

        if self.records.len() >= self.config.total_trials {
            self.done = true;
        }
        Ok(record)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Chronological record sequence, one entry per completed trial.
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn pending_stimulus(&self) -> Option<StimulusKind> {
        self.pending.map(|p| p.kind)
    }

    /// (current trial number, total trials). While a stimulus is shown the
    /// current number is the trial in progress.
    pub fn progress(&self) -> (usize, usize) {
        let current = self.records.len() + usize::from(self.pending.is_some());
        (current, self.config.total_trials)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gonogo_timing::ManualTimer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn machine(total_trials: usize) -> (SessionStateMachine<ManualTimer, StdRng>, ManualTimer) {
        let config = SessionConfig {
            total_trials,
            ..SessionConfig::default()
        };
        let timer = ManualTimer::new();
        let session = SessionStateMachine::new(config, timer.clone(), StdRng::seed_from_u64(17));
        (session, timer)
    }

    #[test]
    fn one_trial_round_trip() {
        let (mut session, timer) = machine(3);
        assert_eq!(session.phase(), SessionPhase::AwaitingStimulus);

        let kind = session.next_stimulus().unwrap();
        assert_eq!(session.phase(), SessionPhase::StimulusShown);
        assert_eq!(session.pending_stimulus(), Some(kind));
        assert_eq!(session.progress(), (1, 3));

        timer.advance_ms(200);
        let record = session.record_response(true).unwrap();
        assert_eq!(record.trial, 1);
        assert_eq!(record.stimulus, kind);
        assert!(record.responded);
        assert_eq!(record.reaction_time, Some(200));
        assert_eq!(record.correct, kind == StimulusKind::Go);
        assert_eq!(session.phase(), SessionPhase::AwaitingStimulus);
    }

    #[test]
    fn reaction_time_rounds_to_nearest_millisecond() {
        let (mut session, timer) = machine(1);
        session.next_stimulus().unwrap();
        timer.advance(std::time::Duration::from_micros(1500));
        let record = session.record_response(true).unwrap();
        assert_eq!(record.reaction_time, Some(2));
    }

    #[test]
    fn no_response_has_no_reaction_time() {
        let (mut session, timer) = machine(1);
        session.next_stimulus().unwrap();
        timer.advance_ms(500);
        let record = session.record_response(false).unwrap();
        assert!(!record.responded);
        assert_eq!(record.reaction_time, None);
    }

    #[test]
    fn next_stimulus_is_a_noop_while_one_is_shown() {
        let (mut session, _timer) = machine(2);
        let first = session.next_stimulus().unwrap();
        assert_eq!(session.next_stimulus(), None);
        assert_eq!(session.pending_stimulus(), Some(first));
    }

    #[test]
    fn responding_without_a_stimulus_is_an_invalid_transition() {
        let (mut session, _timer) = machine(2);
        assert_eq!(
            session.record_response(true),
            Err(SessionError::InvalidTransition {
                from: SessionPhase::AwaitingStimulus,
                event: "record a response",
            })
        );
    }

    #[test]
    fn session_completes_after_total_trials() {
        let (mut session, timer) = machine(5);
        for _ in 0..5 {
            assert!(!session.is_done());
            let kind = session.next_stimulus().unwrap();
            timer.advance_ms(150);
            session.record_response(kind.requires_response()).unwrap();
        }
        assert!(session.is_done());
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert_eq!(session.records().len(), 5);

        // Terminal state: drawing is a no-op, responding is an error.
        assert_eq!(session.next_stimulus(), None);
        assert_eq!(
            session.record_response(false),
            Err(SessionError::InvalidTransition {
                from: SessionPhase::Complete,
                event: "record a response",
            })
        );
    }

    #[test]
    fn records_are_sequential_and_chronological() {
        let (mut session, timer) = machine(10);
        let mut trial = 0;
        while !session.is_done() {
            session.next_stimulus().unwrap();
            timer.advance_ms(100);
            session.record_response(trial % 3 != 0).unwrap();
            trial += 1;
        }
        for (i, record) in session.records().iter().enumerate() {
            assert_eq!(record.trial, i + 1);
            assert_eq!(record.reaction_time.is_some(), record.responded);
            assert_eq!(
                record.correct,
                record.stimulus.requires_response() == record.responded
            );
        }
    }

    #[test]
    fn out_of_range_go_probability_is_clamped() {
        let config = SessionConfig {
            total_trials: 4,
            go_probability: 1.5,
            ..SessionConfig::default()
        };
        let timer = ManualTimer::new();
        let mut session = SessionStateMachine::new(config, timer, StdRng::seed_from_u64(11));
        while !session.is_done() {
            assert_eq!(session.next_stimulus(), Some(StimulusKind::Go));
            session.record_response(true).unwrap();
        }

        let config = SessionConfig {
            total_trials: 4,
            go_probability: -0.5,
            ..SessionConfig::default()
        };
        let timer = ManualTimer::new();
        let mut session = SessionStateMachine::new(config, timer, StdRng::seed_from_u64(11));
        while !session.is_done() {
            assert_eq!(session.next_stimulus(), Some(StimulusKind::NoGo));
            session.record_response(false).unwrap();
        }
    }

    #[test]
    fn go_probability_one_draws_only_go() {
        let config = SessionConfig {
            total_trials: 20,
            go_probability: 1.0,
            ..SessionConfig::default()
        };
        let timer = ManualTimer::new();
        let mut session = SessionStateMachine::new(config, timer, StdRng::seed_from_u64(3));
        while !session.is_done() {
            let kind = session.next_stimulus().unwrap();
            assert_eq!(kind, StimulusKind::Go);
            session.record_response(true).unwrap();
        }
    }
}
