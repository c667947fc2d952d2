//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = YazarError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum YazarError {
    UnknownLabel(UnknownLabelError),
    InvalidId(InvalidIdError),
    InsufficientClasses(InsufficientClassesError),
    FeatureSpaceMismatch(FeatureSpaceMismatchError),
    InvalidArgument(InvalidArgumentError),
    Training(TrainingError),
    CastError(std::num::TryFromIntError),
    CsvError(csv::Error),
    IOError(std::io::Error),
}

impl YazarError {
    pub(crate) fn unknown_label<S>(label: S) -> Self
    where
        S: Into<String>,
    {
        Self::UnknownLabel(UnknownLabelError {
            label: label.into(),
        })
    }

    pub(crate) const fn invalid_id(id: u32, n_classes: usize) -> Self {
        Self::InvalidId(InvalidIdError { id, n_classes })
    }

    pub(crate) const fn insufficient_classes(n_classes: usize) -> Self {
        Self::InsufficientClasses(InsufficientClassesError { n_classes })
    }

    pub(crate) const fn feature_space_mismatch(expected: u64, actual: u64) -> Self {
        Self::FeatureSpaceMismatch(FeatureSpaceMismatchError { expected, actual })
    }

    pub(crate) fn training<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Training(TrainingError { msg: msg.into() })
    }

    /// Creates an [`InvalidArgumentError`]. Exposed for collaborator crates that validate their
    /// own inputs.
    pub fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for YazarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownLabel(e) => e.fmt(f),
            Self::InvalidId(e) => e.fmt(f),
            Self::InsufficientClasses(e) => e.fmt(f),
            Self::FeatureSpaceMismatch(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::Training(e) => e.fmt(f),
            Self::CastError(e) => e.fmt(f),
            Self::CsvError(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for YazarError {}

/// Error used when a label was not seen while fitting the label index.
#[derive(Debug)]
pub struct UnknownLabelError {
    /// The offending label.
    pub(crate) label: String,
}

impl fmt::Display for UnknownLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UnknownLabelError: {:?} is not in the label index", self.label)
    }
}

impl Error for UnknownLabelError {}

/// Error used when a class id is outside of the label index.
#[derive(Debug)]
pub struct InvalidIdError {
    /// The offending id.
    pub(crate) id: u32,

    /// Number of classes in the label index.
    pub(crate) n_classes: usize,
}

impl fmt::Display for InvalidIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "InvalidIdError: {} is out of range for {} classes",
            self.id, self.n_classes
        )
    }
}

impl Error for InvalidIdError {}

/// Error used when fewer than two classes reach the classifier.
#[derive(Debug)]
pub struct InsufficientClassesError {
    /// Number of distinct classes in the training subset.
    pub(crate) n_classes: usize,
}

impl fmt::Display for InsufficientClassesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "InsufficientClassesError: training requires at least 2 classes, got {}",
            self.n_classes
        )
    }
}

impl Error for InsufficientClassesError {}

/// Error used when a vector from one feature space is given to a model fitted on another.
#[derive(Debug)]
pub struct FeatureSpaceMismatchError {
    /// Fingerprint of the feature space the model was trained on.
    pub(crate) expected: u64,

    /// Fingerprint carried by the vector.
    pub(crate) actual: u64,
}

impl fmt::Display for FeatureSpaceMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FeatureSpaceMismatchError: expected feature space {:016x}, got {:016x}",
            self.expected, self.actual
        )
    }
}

impl Error for FeatureSpaceMismatchError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when the underlying solver fails.
#[derive(Debug)]
pub struct TrainingError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for TrainingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TrainingError: {}", self.msg)
    }
}

impl Error for TrainingError {}

impl From<std::num::TryFromIntError> for YazarError {
    fn from(error: std::num::TryFromIntError) -> Self {
        Self::CastError(error)
    }
}

impl From<csv::Error> for YazarError {
    fn from(error: csv::Error) -> Self {
        Self::CsvError(error)
    }
}

impl From<std::io::Error> for YazarError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
