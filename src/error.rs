use thiserror::Error;

/// Failures of the summary/annotation/chart pipeline itself.
///
/// Input and I/O failures travel as `anyhow` errors; these are the domain
/// conditions callers may want to match on (they can be recovered from an
/// `anyhow::Error` with `downcast_ref`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("no observations to summarize")]
    NoObservations,

    #[error("group '{group}' has no observations")]
    EmptyGroup { group: String },

    #[error("group '{group}' has non-finite response {value}")]
    NonFiniteResponse { group: String, value: f64 },

    #[error("group '{group}' mixes symbiont status '{first}' and '{second}'")]
    InconsistentSymbiont {
        group: String,
        first: String,
        second: String,
    },

    #[error("no significance letter supplied for group '{group}'")]
    MissingLetter { group: String },

    #[error("significance letters supplied for unknown group(s): {}", groups.join(", "))]
    UnknownLetterGroup { groups: Vec<String> },

    #[error("invalid chart config: {0}")]
    InvalidConfig(String),

    #[error("failed to render chart: {0}")]
    Render(String),
}
