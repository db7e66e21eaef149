use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidConfigValue,
    JobNotFound,
    InvalidSortOrder,
    ValidationFailed,
    ServerRejected,
    TransportFailed,
    ResponseDecodeFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::InvalidConfigValue => "E1003",
            Self::JobNotFound => "E2001",
            Self::InvalidSortOrder => "E2005",
            Self::ValidationFailed => "E2006",
            Self::ServerRejected => "E4001",
            Self::TransportFailed => "E4002",
            Self::ResponseDecodeFailed => "E4003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfigValue => "Invalid configuration value",
            Self::JobNotFound => "Job not found",
            Self::InvalidSortOrder => "Invalid sort order",
            Self::ValidationFailed => "Required fields missing",
            Self::ServerRejected => "Server rejected the request",
            Self::TransportFailed => "Could not reach the jobs API",
            Self::ResponseDecodeFailed => "Unreadable response from the jobs API",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in ~/.config/jobdeck/config.toml and retry."),
            Self::InvalidConfigValue => Some("Run `jobdeck config` to inspect the effective settings."),
            Self::JobNotFound => Some("Run `jobdeck list` to find a valid job ID."),
            Self::InvalidSortOrder => Some(
                "Use one of posting_date_desc, posting_date_asc, company_asc, company_desc, title_asc, title_desc.",
            ),
            Self::ValidationFailed => Some("Provide --title, --company and --url."),
            Self::ServerRejected => None,
            Self::TransportFailed => {
                Some("Check that the backend is running and --api-url / JOBDECK_API_URL is correct.")
            }
            Self::ResponseDecodeFailed => Some("Check that the API URL points at a jobs backend."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
