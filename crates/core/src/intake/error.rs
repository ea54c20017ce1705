use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Display};

/// Why a file was turned away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file is not a PDF, Word or Excel document.
    UnsupportedType,
    /// The file is over the size limit.
    TooLarge,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnsupportedType => {
                write!(f, "Please upload a PDF, DOCX, or Excel file.")
            }
            ErrorKind::TooLarge => {
                write!(f, "File size must be less than 50MB.")
            }
        }
    }
}

/// Describes a rejected upload.
///
/// `Display` gives the message shown to the visitor. The optional reason
/// carries detail for logs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
}

impl Error {
    /// Creates a new error with the `UnsupportedType` kind.
    #[inline]
    pub fn unsupported_type() -> Self {
        Self {
            kind: ErrorKind::UnsupportedType,
            reason: None,
        }
    }

    /// Creates a new error with the `TooLarge` kind.
    #[inline]
    pub fn too_large() -> Self {
        Self {
            kind: ErrorKind::TooLarge,
            reason: None,
        }
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl StdError for Error {}
