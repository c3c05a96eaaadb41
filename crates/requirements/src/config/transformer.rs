//! Exception transformers.

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::error::{BoxError, ValidationError};

type TransformFn = dyn Fn(&ValidationError) -> Option<BoxError> + Send + Sync;

static IDENTITY: LazyLock<ExceptionTransformer> = LazyLock::new(|| ExceptionTransformer::new(|_| None));

static TO_ASSERTION: LazyLock<ExceptionTransformer> =
    LazyLock::new(|| ExceptionTransformer::new(|error| Some(Box::new(error.to_assertion()))));

/// Maps a failure's natural error to the error the caller wants returned.
///
/// The function receives the error produced by the failure. Returning `None`
/// keeps that error unchanged. Returning a [`ValidationError`] replaces it.
/// Any other error type is wrapped in an [`ErrorKind::Wrapped`] error whose
/// source is the returned error.
///
/// Transformers compare by identity: two transformers are equal only if they
/// share the same function.
///
/// [`ErrorKind::Wrapped`]: crate::ErrorKind::Wrapped
#[derive(Clone)]
pub struct ExceptionTransformer {
    function: Arc<TransformFn>,
}

impl ExceptionTransformer {
    /// Creates a transformer from a function.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&ValidationError) -> Option<BoxError> + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
        }
    }

    /// Returns the transformer that leaves errors unchanged.
    pub fn identity() -> Self {
        IDENTITY.clone()
    }

    /// Returns the transformer that converts every error into an assertion
    /// error, preserving its message, cause and suppressed errors.
    pub fn to_assertion() -> Self {
        TO_ASSERTION.clone()
    }

    /// Applies the transformer to `error`.
    pub fn apply(&self, error: ValidationError) -> ValidationError {
        let Some(replacement) = (self.function)(&error) else {
            return error;
        };
        match replacement.downcast::<ValidationError>() {
            Ok(replacement) => *replacement,
            Err(foreign) => {
                let wrapped = ValidationError::wrapped(foreign);
                match error.location() {
                    Some(location) => wrapped.at(location),
                    None => wrapped,
                }
            }
        }
    }
}

impl Default for ExceptionTransformer {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for ExceptionTransformer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.function, &other.function)
    }
}

impl Eq for ExceptionTransformer {}

impl fmt::Debug for ExceptionTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if *self == *IDENTITY {
            "identity"
        } else if *self == *TO_ASSERTION {
            "to_assertion"
        } else {
            "custom"
        };
        f.debug_tuple("ExceptionTransformer").field(&label).finish()
    }
}
