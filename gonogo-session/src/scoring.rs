use gonogo_core::{StimulusKind, TrialRecord};
use serde::Serialize;

/// Summary of a finished session, derived from the record sequence on
/// demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub correct_go: usize,
    pub correct_nogo: usize,
    pub commission_errors: usize,
    pub omission_errors: usize,
    pub total_correct: usize,
    /// Mean over responded trials only; 0 when no trial was responded to.
    pub avg_reaction_time_ms: f64,
    /// Commission errors over NO-GO trials; 0 when no NO-GO trial occurred.
    pub commission_rate: f64,
    pub alert: bool,
}

/// Pure scoring pass over the trial records. An empty sequence yields
/// all-zero statistics with the alert off.
pub fn summarize(records: &[TrialRecord], threshold: f64) -> SummaryStats {
    let mut correct_go = 0;
    let mut correct_nogo = 0;
    let mut commission_errors = 0;
    let mut omission_errors = 0;
    let mut nogo_trials = 0;
    let mut rt_sum: u64 = 0;
    let mut rt_count = 0;

    for record in records {
        match (record.stimulus, record.responded) {
            (StimulusKind::Go, true) => correct_go += 1,
            (StimulusKind::Go, false) => omission_errors += 1,
            (StimulusKind::NoGo, true) => commission_errors += 1,
            (StimulusKind::NoGo, false) => correct_nogo += 1,
        }
        if record.stimulus == StimulusKind::NoGo {
            nogo_trials += 1;
        }
        if let Some(rt) = record.reaction_time {
            rt_sum += rt;
            rt_count += 1;
        }
    }

    let avg_reaction_time_ms = if rt_count > 0 {
        rt_sum as f64 / rt_count as f64
    } else {
        0.0
    };
    let commission_rate = if nogo_trials > 0 {
        commission_errors as f64 / nogo_trials as f64
    } else {
        0.0
    };

    SummaryStats {
        correct_go,
        correct_nogo,
        commission_errors,
        omission_errors,
        total_correct: correct_go + correct_nogo,
        avg_reaction_time_ms,
        commission_rate,
        alert: commission_rate > threshold,
    }
}
