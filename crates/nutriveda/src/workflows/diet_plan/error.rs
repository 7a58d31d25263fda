use super::domain::DoshaAxis;

/// Failures raised by the scoring, classification and composition stages.
///
/// All of them are local and deterministic: retrying with the same input
/// produces the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("assessment contains no answered items")]
    EmptyAssessment,
    #[error("score vector sums to zero; percentages are undefined")]
    DegenerateScores,
    #[error("unknown dosha axis '{0}' (expected vata, pitta or kapha)")]
    UnknownAxis(String),
    #[error("{0} score exceeds the supported range")]
    ScoreOverflow(DoshaAxis),
    #[error("percentages must be finite, non-negative and sum to a positive total")]
    InvalidPercentages,
}
