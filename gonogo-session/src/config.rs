/// Session configuration, fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub total_trials: usize,
    /// Probability that a drawn stimulus is GO, clamped to [0, 1] at draw
    /// time. Drawn independently per trial, so runs of the same stimulus
    /// are expected.
    pub go_probability: f64,
    /// Commission-error rate above which the summary raises an alert.
    pub commission_alert_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_trials: 30,
            go_probability: 0.7,
            commission_alert_threshold: 0.25,
        }
    }
}
