/// Convenience result type used across drape.
pub type DrapeResult<T> = Result<T, DrapeError>;

/// Why a submission could not be assembled locally.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precondition {
    /// No decoded base image yet.
    #[error("base image is not loaded")]
    MissingBase,

    /// No decoded design image yet.
    #[error("design image is not loaded")]
    MissingDesign,

    /// The free-transform node has not been placed yet.
    #[error("design placement is not initialized")]
    PlacementUninitialized,

    /// Fewer than four corner picks.
    #[error("four corner points are required, {picked} picked")]
    IncompletePolygon {
        /// Points collected so far.
        picked: usize,
    },
}

/// Top-level error taxonomy used by stage and client APIs.
///
/// None of these are fatal: after any of them the stage is back to an interactive,
/// resubmittable state.
#[derive(thiserror::Error, Debug)]
pub enum DrapeError {
    /// Invalid user-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Submission blocked before any network call.
    #[error("precondition not met: {0}")]
    Precondition(Precondition),

    /// A submission is already in flight.
    #[error("a mockup request is already in flight")]
    Busy,

    /// The request finished after its assets were replaced; its result was dropped.
    #[error("result discarded: assets changed while the request was in flight")]
    Superseded,

    /// The compositing service answered with an explicit error message.
    #[error("service error: {0}")]
    Service(String),

    /// Network failure or unparseable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrapeError {
    /// Build a [`DrapeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DrapeError::Service`] value.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Build a [`DrapeError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`DrapeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// True for errors raised before any request was issued.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// True for network or response-parsing failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<Precondition> for DrapeError {
    fn from(value: Precondition) -> Self {
        Self::Precondition(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
