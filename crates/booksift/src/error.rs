pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Why a pipeline run stopped.
///
/// Every failure is fatal to the run: the [`ErrorKind`] says which step gave up, the optional
/// message says what it was doing and the source, when present, is the transport or filesystem
/// error underneath.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// The pipeline step an [`Error`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Searching failed: no connection, a timeout, a non-success status, or a body that is not a
    /// search response. Nothing has been written when this happens.
    Fetch,
    /// Creating or writing the CSV file failed. The file may be left partially written.
    Write,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fetch => "Fetch error",
            Self::Write => "Write error",
        })
    }
}

impl Error {
    /// An error with only a description, for failures that have no underlying cause.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// An error caused by `source`, which is reported as-is.
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// An error caused by `source` while doing what `message` describes.
    pub fn wrap_with<E, S>(kind: ErrorKind, message: S, source: E) -> Self
    where
        E: Into<DynError>,
        S: Into<String>,
    {
        Self {
            message: Some(message.into()),
            ..Self::wrap(kind, source)
        }
    }

    /// Which step failed.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

// Renders as "<kind>[: <message>][: caused by <source>]".
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}
