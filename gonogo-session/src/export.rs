use gonogo_core::TrialRecord;

/// Default file name for the exported raw data.
pub const EXPORT_FILE_NAME: &str = "go_nogo_results.json";

/// Serializes the full record sequence as the raw-data artifact: a JSON
/// array of `{trial, stimulus, responded, reaction_time, correct}` objects
/// with `reaction_time` null for non-responses. The shape is stable.
pub fn to_json(records: &[TrialRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
