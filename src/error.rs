//! Error types for the pit board plugin.
//!
//! Only genuine failures are errors: unreadable assets, malformed preference
//! files, host surface problems. Absent data (no player car yet, a sector not
//! crossed, a split that cannot be computed) is modeled as `Option` and never
//! reaches this module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pit board operations.
pub type Result<T, E = PitboardError> = std::result::Result<T, E>;

/// Main error type for pit board operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PitboardError {
    #[error("texture error: {path}")]
    Texture {
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("preferences file error: {path}")]
    Prefs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("host error: {operation}")]
    Host {
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PitboardError {
    /// Helper constructor for texture loading failures.
    pub fn texture_error(path: impl Into<PathBuf>) -> Self {
        PitboardError::Texture { path: path.into(), source: None }
    }

    /// Helper constructor for texture loading failures with a source.
    ///
    /// Intended for [`Gui`](crate::host::Gui) implementations that wrap a
    /// real host error behind `load_texture`.
    pub fn texture_error_with_source(
        path: impl Into<PathBuf>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        PitboardError::Texture { path: path.into(), source: Some(source) }
    }

    /// Helper constructor for preference file failures.
    pub fn prefs_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PitboardError::Prefs { path: path.into(), source }
    }

    /// Helper constructor for parse failures with context.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        PitboardError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for host surface failures.
    ///
    /// The crate itself never fails on the host surface; this is the
    /// constructor [`Gui`](crate::host::Gui) and
    /// [`Telemetry`](crate::host::Telemetry) implementations use to report
    /// their own problems through the shared error type.
    pub fn host_error(operation: impl Into<String>) -> Self {
        PitboardError::Host { operation: operation.into(), source: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn error_messages_contain_their_context(
            context in "\\w+",
            details in ".*",
            operation in "\\w+"
        ) {
            let parse = PitboardError::parse_error(context.clone(), details.clone());
            let msg = parse.to_string();
            prop_assert!(msg.contains(&context));
            prop_assert!(msg.contains(&details));

            let host = PitboardError::host_error(operation.clone());
            prop_assert!(host.to_string().contains(&operation));
        }
    }

    #[test]
    fn error_constructors_produce_expected_variants() {
        let tex = PitboardError::texture_error("/imgs/a_40_50.png");
        assert!(matches!(tex, PitboardError::Texture { .. }));

        let prefs = PitboardError::prefs_error(
            "/prefs.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(prefs, PitboardError::Prefs { .. }));
    }

    #[test]
    fn error_is_send_sync_static() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<PitboardError>();
    }
}
