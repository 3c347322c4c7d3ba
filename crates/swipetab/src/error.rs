//! Error types for the swipetab crate.

use std::path::PathBuf;

use thiserror::Error;

pub use swipetab_core::{CoreError, CoreResult};

/// Errors raised while starting or driving a tab transition.
///
/// Whenever one of these is returned, the transition context has already been
/// completed as cancelled, so the view stack is back in its pre-transition
/// state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The animator already has a transition in flight.
    #[error("animator already has a transition in flight")]
    AnimatorBusy,

    /// A view required by the transition is not available.
    #[error("view for tab {tab} is not available to the transition")]
    MissingView {
        /// Tab whose view was missing.
        tab: usize,
    },

    /// The transition context has already reported its outcome.
    #[error("transition has already completed")]
    AlreadyCompleted,
}

/// Errors raised when changing the selected tab.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The requested index does not name a tab.
    #[error("tab index {index} out of bounds for {count} tabs")]
    OutOfBounds { index: usize, count: usize },

    /// The container has no tabs.
    #[error("the container has no tabs")]
    NoTabs,

    /// A tap selection was refused because a transition is in flight.
    #[error("a transition is already in flight")]
    TransitionInFlight,

    /// The transition to the requested tab could not be started.
    #[error("transition failed: {0}")]
    Transition(#[from] TransitionError),
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration parsed but its values are inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SelectionError::OutOfBounds { index: 4, count: 3 };
        assert_eq!(err.to_string(), "tab index 4 out of bounds for 3 tabs");

        let err: SelectionError = TransitionError::AnimatorBusy.into();
        assert_eq!(
            err.to_string(),
            "transition failed: animator already has a transition in flight"
        );

        let err = ConfigError::Invalid("minimum_touches must be at least 1".into());
        assert!(err.to_string().contains("minimum_touches"));
    }
}
