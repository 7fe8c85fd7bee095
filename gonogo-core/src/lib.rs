pub mod stimulus;
pub mod trial;

pub use stimulus::StimulusKind;
pub use trial::TrialRecord;
