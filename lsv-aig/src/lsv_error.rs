// SPDX-License-Identifier: Apache-2.0

/// A command was invoked in a way it cannot be honored: bad arguments, no
/// network, or a network in the wrong form. Detected before any traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// `-h` was given; the caller prints the usage text.
    HelpRequested,
    NoNetwork,
    NotStrashed(String),
    MissingArguments { expected: usize, got: usize },
    UnexpectedArgument(String),
    NotAnInteger { name: &'static str, value: String },
    OutOfRange {
        name: &'static str,
        value: i64,
        min: usize,
        max: usize,
    },
}

impl UsageError {
    /// Whether the command usage text should accompany this error.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            UsageError::HelpRequested
                | UsageError::MissingArguments { .. }
                | UsageError::UnexpectedArgument(_)
        )
    }
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageError::HelpRequested => write!(f, "help requested"),
            UsageError::NoNetwork => write!(f, "Empty network."),
            UsageError::NotStrashed(detail) => {
                write!(f, "Network must be a strashed AIG: {}", detail)
            }
            UsageError::MissingArguments { expected, got } => write!(
                f,
                "expected {} argument(s), got {}",
                expected, got
            ),
            UsageError::UnexpectedArgument(arg) => write!(f, "unexpected argument '{}'", arg),
            UsageError::NotAnInteger { name, value } => {
                write!(f, "{} must be an integer, got '{}'", name, value)
            }
            UsageError::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(
                f,
                "{} must be between {} and {}, got {}",
                name, min, max, value
            ),
        }
    }
}

impl std::error::Error for UsageError {}
