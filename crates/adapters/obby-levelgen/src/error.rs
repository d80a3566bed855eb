/// Why a level could not be produced. The active level is never touched on error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The theme was empty or whitespace.
    EmptyTheme,
    /// The request never got a response.
    Http(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// The response was not a usable level description.
    Parse(String),
    /// The generator is not configured to make requests.
    Config(String),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTheme => write!(f, "theme must not be empty"),
            Self::Http(m) => write!(f, "request failed: {m}"),
            Self::Status(code) => write!(f, "level service returned status {code}"),
            Self::Parse(m) => write!(f, "invalid level: {m}"),
            Self::Config(m) => write!(f, "generator misconfigured: {m}"),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<serde_json::Error> for GenerateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
