use serde::{Deserialize, Serialize};

/// Binary stimulus kinds for the Go/No-Go task. The serde names are the
/// labels used in the exported raw data and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StimulusKind {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl StimulusKind {
    /// GO stimuli require a press; NO-GO stimuli require withholding one.
    pub fn requires_response(&self) -> bool {
        matches!(self, StimulusKind::Go)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StimulusKind::Go => "GO",
            StimulusKind::NoGo => "NO-GO",
        }
    }
}
