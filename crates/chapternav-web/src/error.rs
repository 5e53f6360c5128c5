#![forbid(unsafe_code)]

use chapternav_core::ConfigError;

/// Errors surfaced to JS callers of the web frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebNavError {
    /// Options failed to parse or validate.
    Config(ConfigError),
    /// A DOM call threw, or a selector was rejected.
    Dom(String),
    /// The collaborators object is missing a required member.
    MissingCollaborator(&'static str),
    /// JS called back into the bar while one of its handlers was running.
    Reentrant,
}

impl core::fmt::Display for WebNavError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Dom(msg) => write!(f, "dom error: {msg}"),
            Self::MissingCollaborator(name) => write!(f, "collaborators.{name} is missing"),
            Self::Reentrant => write!(f, "chapter nav is busy handling another call"),
        }
    }
}

impl std::error::Error for WebNavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for WebNavError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_errors_keep_their_source() {
        let err = WebNavError::from(ConfigError::Parse("eof".into()));
        assert_eq!(err.to_string(), "invalid options: eof");
        assert!(err.source().is_some());
    }

    #[test]
    fn collaborator_message_names_member() {
        let err = WebNavError::MissingCollaborator("navigation");
        assert_eq!(err.to_string(), "collaborators.navigation is missing");
        assert!(err.source().is_none());
    }
}
