use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The decision procedure could not be started.
    #[error("Solver unavailable: {0}")]
    Unavailable(String),
    #[error("Solver error: {0}")]
    Solver(String),
}

pub(crate) fn solver_error<E: std::fmt::Display>(err: E) -> EngineError {
    EngineError::Solver(err.to_string())
}
