//! The Errors that may occur within the crate.

use thiserror::Error;

pub type Result<T, E = crate::Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    // Construction Errors
    #[error("DFA state limit of {0} exceeded")]
    StateLimitExceeded(usize),
    #[error("Invalid state: {0}")]
    InvalidState(usize),
    #[error("Malformed character class on an edge of state {0}")]
    MalformedClass(usize),
    // Serialization Errors
    #[error("Failed to encode automaton: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("Failed to decode automaton: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

impl Error {
    pub fn is_state_limit(&self) -> bool {
        matches!(self, Self::StateLimitExceeded(_))
    }
}

#[cfg(feature = "python-bindings")]
impl From<Error> for pyo3::PyErr {
    fn from(e: Error) -> Self {
        use pyo3::exceptions::PyValueError;
        use pyo3::PyErr;
        PyErr::new::<PyValueError, _>(e.to_string())
    }
}
