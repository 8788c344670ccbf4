/// Promotion errors. In both cases the active configuration is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(
        "candidate '{candidate}' regressed: aggregate nUDCG {candidate_nudcg:.4} \
         < active {active_nudcg:.4}"
    )]
    Regression {
        candidate: String,
        candidate_nudcg: f64,
        active_nudcg: f64,
    },

    #[error("concurrent promotion detected: active version moved from {expected:?}")]
    Conflict { expected: Option<i64> },

    #[error("candidate configuration rejected by validation: {summary}")]
    InvalidCandidate { summary: String },
}
