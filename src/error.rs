//! Error types.
//!
//! - `FitError`: failures raised by the fitting engine (library level)
//! - `AppError`: what the binary reports, carrying a process exit code

/// Category of a fitting failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitErrorKind {
    /// Caller supplied unusable input or configuration.
    InvalidInput,
    /// The 2x2 alpha solve was (near-)singular or non-finite.
    IllConditioned,
    /// The iteration safety ceiling was exceeded.
    NonConvergence,
    /// A rejected chain's worst point sits on one of its own endpoints.
    RecursionDegenerate,
}

impl FitErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            FitErrorKind::InvalidInput => "invalid input",
            FitErrorKind::IllConditioned => "ill-conditioned",
            FitErrorKind::NonConvergence => "non-convergence",
            FitErrorKind::RecursionDegenerate => "degenerate split",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct FitError {
    kind: FitErrorKind,
    message: String,
}

impl FitError {
    pub fn new(kind: FitErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(FitErrorKind::InvalidInput, message)
    }

    pub fn kind(&self) -> FitErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl std::fmt::Debug for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for FitError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        // Bad arguments are a usage problem; everything else means the data could not be fit.
        let exit_code = match err.kind() {
            FitErrorKind::InvalidInput => 2,
            _ => 4,
        };
        AppError::new(exit_code, format!("Fit failed ({err})"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
