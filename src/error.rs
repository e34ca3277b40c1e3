//! Failures crossing the producer / consumer boundary.
//!
//! | Side | Type | Meaning |
//! |------|------|---------|
//! | consumer | [`GeneratorError`] | what a pull can report |
//! | producer | [`YieldError`] | what a yield can report |
//! | producer | [`Panicked`] | the cause recorded for a panicking producer |

use ::std::{error::Error, io};
use ::thiserror::Error;

/// The failure type producer logic reports to its generator.
///
/// Any `E : Error + Send + Sync + 'static` converts into it through `?`.
pub
type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Error reported to the consumer by [`Generator::pull`] and friends.
///
/// [`Generator::pull`]: crate::Generator::pull
#[derive(Debug, Error)]
pub
enum GeneratorError {
    /// The producer failed (returned an error or panicked).
    ///
    /// The original failure is preserved as the [`source()`][Error::source]
    /// and can be recovered with [`GeneratorError::downcast_cause`].
    #[error("generator interrupted by '{0}'")]
    Interrupted(#[source] BoxError),

    /// The generator has already surfaced a failure and cannot be resumed.
    #[error("generator already failed and cannot be resumed")]
    Terminated,

    /// The producer returned normally: there are no more values.
    #[error("generator has no more values")]
    Exhausted,

    /// The execution context could not be started.
    #[error("failed to spawn the generator's execution context")]
    Spawn(#[source] io::Error),

    /// The execution context went away without reporting how it ended.
    #[error("generator's execution context exited without reporting an outcome")]
    ContextLost,
}

impl GeneratorError {
    /// The original producer failure, if this is an
    /// [`Interrupted`][GeneratorError::Interrupted] error.
    pub
    fn cause (self: &'_ Self)
      -> Option<&'_ (dyn Error + Send + Sync + 'static)>
    {
        match *self {
            | Self::Interrupted(ref cause) => Some(&**cause),
            | _ => None,
        }
    }

    /// Downcasts the original producer failure to a concrete type.
    ///
    /// ```rust
    /// use ::threaded_gen::{Generator, GeneratorError};
    ///
    /// #[derive(Debug)]
    /// struct Kaboom;
    /// impl ::std::fmt::Display for Kaboom {
    ///     fn fmt (&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
    ///         f.write_str("Kaboom!")
    ///     }
    /// }
    /// impl ::std::error::Error for Kaboom {}
    ///
    /// let mut generator = Generator::<u8>::new(|_| Err(Kaboom.into()));
    /// let err: GeneratorError = generator.pull().unwrap_err();
    /// assert!(err.downcast_cause::<Kaboom>().is_some());
    /// assert_eq!(err.to_string(), "generator interrupted by 'Kaboom!'");
    /// ```
    pub
    fn downcast_cause<E : Error + 'static> (self: &'_ Self)
      -> Option<&'_ E>
    {
        self.cause()?.downcast_ref::<E>()
    }

    /// Whether this error carries a producer failure.
    #[inline]
    pub
    fn is_interrupted (self: &'_ Self)
      -> bool
    {
        matches!(*self, Self::Interrupted(_))
    }
}

/// Error reported to producer logic by a yield.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub
enum YieldError {
    /// The consumer dropped the generator: nobody will ever pull again.
    ///
    /// Producer logic should stop; propagating this error with `?` is the
    /// expected way to do so, and is not reported as a failure.
    #[error("the consumer dropped the generator")]
    Cancelled,

    /// The implicit `yield_` was called from a thread that is not running
    /// any generator's producer logic.
    #[error("`yield_` called outside of any generator's producer logic")]
    NoContext,

    /// The implicit `yield_` was called with a value whose type is not the
    /// item type of the calling generator.
    #[error("cannot yield a `{offered}` from a generator of `{expected}`")]
    ItemMismatch {
        /// Item type of the generator owning the calling context.
        expected: &'static str,
        /// Type of the value that was offered.
        offered: &'static str,
    },
}

/// The cause recorded when producer logic panics.
#[derive(Debug, Clone, Error)]
#[error("producer panicked: {message}")]
pub
struct Panicked {
    message: String,
}

impl Panicked {
    pub(in crate)
    fn new (message: String)
      -> Self
    {
        Self { message }
    }

    /// The panic message, when the payload was a string.
    pub
    fn message (self: &'_ Self)
      -> &'_ str
    {
        &self.message
    }
}
