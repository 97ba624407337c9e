//! Error handling types
//!
//! Fatal errors (`CycleDetected`, `Instantiation`, `RuleProduction`) stop a
//! class run immediately. Feature hook failures are collected per phase into
//! an [`AggregatedFailure`]. `AssumptionViolated` is the skip signal: it is a
//! control signal, never aggregated.

use crate::value_objects::{Phase, RunState};
use std::fmt;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for rig
#[derive(Error, Debug)]
pub enum Error {
    /// A feature requires itself, directly or transitively
    #[error("Cycle detected in features dependencies of {feature}")]
    CycleDetected {
        /// Feature found on the active resolution path
        feature: String,
    },

    /// A feature could not be constructed
    #[error("Failed to instantiate feature {feature}: {source}")]
    Instantiation {
        /// Feature that failed
        feature: String,
        /// Construction error
        #[source]
        source: Box<Error>,
    },

    /// Skip signal: the test or run does not apply
    #[error("Assumption violated: {reason}")]
    AssumptionViolated {
        /// Why the test was skipped
        reason: String,
    },

    /// One or more feature hooks failed during a phase
    #[error(transparent)]
    Aggregated(#[from] AggregatedFailure),

    /// A rule-supplying member failed
    #[error("Errors in rules factory {member}: {source}")]
    RuleProduction {
        /// `Owner::member` that produced the rule
        member: String,
        /// Production or injection error
        #[source]
        source: Box<Error>,
    },

    /// A lifecycle entry point was called out of order
    #[error("Cannot run {phase} while the run is {state}")]
    InvalidState {
        /// Requested phase
        phase: Phase,
        /// Current run state
        state: RunState,
    },

    /// Injection requested a type no scope binds
    #[error("No binding for {type_name} in {scope} scope")]
    UnsatisfiedDependency {
        /// Requested type
        type_name: &'static str,
        /// Scope the lookup started from
        scope: String,
    },

    /// A feature name is not registered
    #[error("Unknown feature '{name}'. Available features: {available:?}")]
    UnknownFeature {
        /// Requested name
        name: String,
        /// Registered names
        available: Vec<&'static str>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Infrastructure failure (with context)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Generic error from external sources
    #[error("Generic error: {0}")]
    Generic(#[from] BoxError),

    /// A failure raised after earlier failures of the same guaranteed-run block
    #[error("{error} ({} suppressed)", .suppressed.len())]
    WithSuppressed {
        /// The failure that is reported
        error: Box<Error>,
        /// Earlier failures, oldest first
        suppressed: Vec<Error>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into().into())
    }

    /// Create the skip signal
    pub fn skip<S: Into<String>>(reason: S) -> Self {
        Self::AssumptionViolated {
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

// Lifecycle error creation methods
impl Error {
    /// Wrap a construction failure of `feature`
    pub fn instantiation<S: Into<String>>(feature: S, source: Error) -> Self {
        Self::Instantiation {
            feature: feature.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a failure of the rule-supplying `member`
    pub fn rule_production<S: Into<String>>(member: S, source: Error) -> Self {
        Self::RuleProduction {
            member: member.into(),
            source: Box::new(source),
        }
    }

    /// Whether this is the skip signal
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::AssumptionViolated { .. })
    }

    /// Earlier failures attached to this one
    pub fn suppressed(&self) -> &[Error] {
        match self {
            Self::WithSuppressed { suppressed, .. } => suppressed,
            Self::Aggregated(aggregate) => aggregate.suppressed(),
            _ => &[],
        }
    }

    /// Attach an earlier failure to this one
    #[must_use]
    pub fn suppress(self, earlier: Error) -> Self {
        match self {
            Self::Aggregated(mut aggregate) => {
                aggregate.suppressed.push(earlier);
                Self::Aggregated(aggregate)
            }
            Self::WithSuppressed {
                error,
                mut suppressed,
            } => {
                suppressed.push(earlier);
                Self::WithSuppressed { error, suppressed }
            }
            other => Self::WithSuppressed {
                error: Box::new(other),
                suppressed: vec![earlier],
            },
        }
    }
}

/// Combine the outcomes of the steps of a guaranteed-run block
///
/// The last failure is returned; each earlier one is attached to it as
/// suppressed.
pub fn merge_outcomes<I>(outcomes: I) -> Result<()>
where
    I: IntoIterator<Item = Result<()>>,
{
    let mut failure: Option<Error> = None;
    for outcome in outcomes {
        if let Err(error) = outcome {
            failure = Some(match failure.take() {
                Some(earlier) => error.suppress(earlier),
                None => error,
            });
        }
    }
    failure.map_or(Ok(()), Err)
}

/// Failure of one feature's hook
#[derive(Debug)]
pub struct FeatureFailure {
    /// Feature whose hook failed
    pub feature: String,
    /// What the hook returned
    pub cause: Error,
}

/// Every hook failure captured during one phase dispatch, in visiting order
#[derive(Debug)]
pub struct AggregatedFailure {
    phase: Phase,
    failures: Vec<FeatureFailure>,
    suppressed: Vec<Error>,
}

impl AggregatedFailure {
    /// Build from the failures of one dispatch
    pub fn new(phase: Phase, failures: Vec<FeatureFailure>) -> Self {
        Self {
            phase,
            failures,
            suppressed: Vec::new(),
        }
    }

    /// Phase during which the failures happened
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Individual failures, in visiting order
    pub fn failures(&self) -> &[FeatureFailure] {
        &self.failures
    }

    /// Names of the features that failed
    pub fn features(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.feature.as_str()).collect()
    }

    /// Earlier failures of the same guaranteed-run block
    pub fn suppressed(&self) -> &[Error] {
        &self.suppressed
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for AggregatedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invoke on features error during {} ({} failure(s))",
            self.phase,
            self.failures.len()
        )?;
        for (i, failure) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{}: {}", failure.feature, failure.cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregatedFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|f| &f.cause as &(dyn std::error::Error + 'static))
    }
}
