use std::fmt;

/// Machine-readable error codes for the lanes pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DatasetNotFound,
    DatasetUnreadable,
    ConfigParseError,
    ConfigUnreadable,
    ReportWriteFailed,
    PlotRenderFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DatasetNotFound => "E1001",
            Self::DatasetUnreadable => "E1002",
            Self::ConfigParseError => "E2001",
            Self::ConfigUnreadable => "E2002",
            Self::ReportWriteFailed => "E5001",
            Self::PlotRenderFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DatasetNotFound => "Survey dataset not found",
            Self::DatasetUnreadable => "Survey dataset could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::ConfigUnreadable => "Config file could not be read",
            Self::ReportWriteFailed => "Report write failed",
            Self::PlotRenderFailed => "Plot rendering failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DatasetNotFound => {
                Some("Place the survey at data/DataSet.txt or pass --data <FILE>.")
            }
            Self::DatasetUnreadable => Some("Check that the survey file is UTF-8 text."),
            Self::ConfigParseError => Some("Fix syntax in lanes.toml and retry."),
            Self::ConfigUnreadable => Some("Check read permissions on the config file."),
            Self::ReportWriteFailed | Self::PlotRenderFailed => {
                Some("Check disk space and write permissions on the output directories.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
