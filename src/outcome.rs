//! The payload of the rendezvous channel.

use_prelude!();

/// What the producer hands over at each rendezvous: exactly one of a value or
/// a failure.
pub
enum Outcome<T> {
    /// A value the producer yielded.
    Value(T),

    /// The failure the producer ended with.
    Failure(BoxError),
}

impl<T> Outcome<T> {
    /// Unwraps the outcome the way a pull does: values are returned, failures
    /// are wrapped into [`GeneratorError::Interrupted`].
    pub
    fn into_result (self: Self)
      -> Result<T, GeneratorError>
    {
        match self {
            | Self::Value(value) => Ok(value),
            | Self::Failure(cause) => Err(GeneratorError::Interrupted(cause)),
        }
    }

    /// The failure, if any, discarding a value.
    pub
    fn into_failure (self: Self)
      -> Option<BoxError>
    {
        match self {
            | Self::Value(_) => None,
            | Self::Failure(cause) => Some(cause),
        }
    }
}

impl<T : fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        match *self {
            | Self::Value(ref value) => {
                f   .debug_tuple("Value")
                    .field(value)
                    .finish()
            },
            | Self::Failure(ref cause) => {
                f   .debug_tuple("Failure")
                    .field(&format_args!("{}", cause))
                    .finish()
            },
        }
    }
}
