use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Step kind not recognized: {0}")]
    UnrecognizedKind(String),

    #[error("Malformed step record: {0}")]
    MalformedRecord(String),

    #[error("Goto target {target} is invalid at step {position}: only strictly earlier steps may be jumped to")]
    InvalidGotoTarget { target: i64, position: usize },

    #[error("Target could not be resolved: {0}")]
    TargetUnresolved(String),

    #[error("Environment error: {0}")]
    Environment(String),
}
