use_prelude!();

use ::core::iter::FusedIterator;

/// A [`Generator`] is an iterator over the results of its pulls.
///
///   - While the producer runs, every `next()` blocks until it yields: the
///     sequence never ends on its own, so it is up to the consumer to stop
///     (`take`, `break`, …).
///
///   - A producer failure shows up exactly once, as `Some(Err(_))`
///     ([`GeneratorError::Interrupted`]), after which the iterator is over.
///
///   - A producer returning normally ends the iteration.
///
/// The sequence is not restartable: iterating again (_e.g._, through
/// `&mut generator` or [`Generator::iter`]) resumes where the previous
/// iteration stopped.
///
/// ```rust
/// use ::threaded_gen::Generator;
///
/// let mut naturals = Generator::<u32>::new(|co| {
///     for n in 0 .. {
///         co.yield_(n)?;
///     }
///     Ok(())
/// });
/// let first: Vec<u32> = (&mut naturals).take(3).map(Result::unwrap).collect();
/// let next: Vec<u32> = (&mut naturals).take(3).map(Result::unwrap).collect();
/// assert_eq!(first, [0, 1, 2]);
/// assert_eq!(next, [3, 4, 5]);
/// ```
impl<T : Send + 'static> Iterator for Generator<T> {
    type Item = Result<T, GeneratorError>;

    fn next (self: &'_ mut Self)
      -> Option<Self::Item>
    {
        match self.resume() {
            | GeneratorState::Yielded(value) => Some(Ok(value)),
            | GeneratorState::Returned(Ok(())) => None,
            | GeneratorState::Returned(Err(GeneratorError::Terminated)) => None,
            | GeneratorState::Returned(Err(err)) => Some(Err(err)),
        }
    }
}

impl<T : Send + 'static> FusedIterator for Generator<T> {}

/// Borrowing iterator over a [`Generator`], see [`Generator::iter`].
#[derive(Debug)]
pub
struct Iter<'g, T> (
    &'g mut Generator<T>,
);

impl<T : Send + 'static> Iterator for Iter<'_, T> {
    type Item = Result<T, GeneratorError>;

    #[inline]
    fn next (self: &'_ mut Self)
      -> Option<Self::Item>
    {
        self.0.next()
    }
}

impl<T : Send + 'static> FusedIterator for Iter<'_, T> {}

impl<T : Send + 'static> Generator<T> {
    /// Iterates over this generator without consuming it.
    ///
    /// Dropping the iterator does not stop the producer: a later pull or
    /// iteration picks up right after the last value seen.
    #[inline]
    pub
    fn iter (self: &'_ mut Self)
      -> Iter<'_, T>
    {
        Iter(self)
    }
}
