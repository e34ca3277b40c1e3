//! Producers as types: implement [`Producer`] once, get a [`Generator`] per
//! instance.

use_prelude!();

/// Producer logic packaged as a type.
///
/// [`run`][`Producer::run`] is ordinary sequential code (loops, early
/// returns, `?`) that hands values over through the [`Yielder`] it is given.
/// It is meant to yield any number of times and may never return.
///
/// # Example
///
/// ```rust
/// use ::threaded_gen::{BoxError, Producer, ProducerExt as _, Yielder};
///
/// struct Squares;
///
/// impl Producer for Squares {
///     type Item = u32;
///
///     fn run (self, co: &Yielder<u32>)
///       -> Result<(), BoxError>
///     {
///         for n in 1 .. {
///             co.yield_(n * n)?;
///         }
///         Ok(())
///     }
/// }
///
/// let mut squares = Squares.into_generator();
/// assert_eq!(squares.pull().unwrap(), 1);
/// assert_eq!(squares.pull().unwrap(), 4);
/// assert_eq!(squares.pull().unwrap(), 9);
/// ```
#[cfg_attr(feature = "better-docs", doc(notable_trait))]
pub
trait Producer : Send + 'static {
    /// The type of the values this producer yields.
    type Item : Send + 'static;

    /// The producer logic. Runs on the generator's own execution context.
    ///
    /// Returning an error (or panicking) fails the generator: the consumer
    /// gets it, wrapped, on its next pull.
    fn run (self: Self, co: &'_ Yielder<Self::Item>)
      -> Result<(), BoxError>
    where
        Self : Sized,
    ;
}

/// Extension trait with some convenience methods for [`Producer`]s.
pub
trait ProducerExt
:
    Producer +
    Sized +
{
    /// Wraps this producer into a (not yet started) [`Generator`].
    #[inline]
    fn into_generator (self: Self)
      -> Generator<Self::Item>
    {
        Generator::from_producer(self)
    }
}

impl<P : Producer> ProducerExt for P {}
