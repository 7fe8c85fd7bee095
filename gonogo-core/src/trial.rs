use serde::{Deserialize, Serialize};

use crate::stimulus::StimulusKind;

/// Recorded result per trial. Immutable once created; the serialized form
/// is the raw-data export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based sequential trial number.
    pub trial: usize,
    pub stimulus: StimulusKind,
    pub responded: bool,
    /// Milliseconds, rounded to the nearest integer. Present iff `responded`.
    pub reaction_time: Option<u64>,
    pub correct: bool,
}

impl TrialRecord {
    /// Builds a record, deriving `correct`: a trial is correct iff the
    /// participant responded exactly when the stimulus required it.
    pub fn new(
        trial: usize,
        stimulus: StimulusKind,
        responded: bool,
        reaction_time: Option<u64>,
    ) -> Self {
        Self {
            trial,
            stimulus,
            responded,
            reaction_time,
            correct: stimulus.requires_response() == responded,
        }
    }
}
