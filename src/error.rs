use std::fmt;

use thiserror::Error;

pub type MinichartResult<T> = Result<T, MinichartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MinichartError {
    #[error("bounds length mismatch: {bounds} bounds for {data} data values")]
    BoundsLengthMismatch { bounds: usize, data: usize },

    #[error("unsupported chart type: `{0}`")]
    UnsupportedChartType(String),

    #[error("invalid option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("invalid options json: {0}")]
    InvalidOptionsJson(String),

    #[error("overlay is already attached to a map")]
    AlreadyAttached,

    #[error("renderer failure: {0}")]
    Render(String),
}

impl MinichartError {
    pub(crate) fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by the overlay configuration itself.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::BoundsLengthMismatch { .. }
                | Self::UnsupportedChartType(_)
                | Self::InvalidOption { .. }
        )
    }
}

/// Failed `attach`: the container the host handed in comes back unmounted.
pub struct AttachError<C> {
    error: MinichartError,
    container: C,
}

impl<C> AttachError<C> {
    pub(crate) fn new(error: MinichartError, container: C) -> Self {
        Self { error, container }
    }

    #[must_use]
    pub fn error(&self) -> &MinichartError {
        &self.error
    }

    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    #[must_use]
    pub fn into_parts(self) -> (MinichartError, C) {
        (self.error, self.container)
    }
}

impl<C> From<AttachError<C>> for MinichartError {
    fn from(error: AttachError<C>) -> Self {
        error.error
    }
}

impl<C> fmt::Debug for AttachError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<C> fmt::Display for AttachError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attach failed: {}", self.error)
    }
}

impl<C> std::error::Error for AttachError<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
