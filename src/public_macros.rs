/// Yields a value from producer logic built with [`registry::build`].
///
/// `yield_!(value)` is sugar for `registry::yield_(value)?`: it must be used
/// within a body returning `Result<_, E>` with `E : From<YieldError>`
/// (such as [`BoxError`]), so that a cancelled or misplaced yield ends the
/// producer logic.
///
/// Within `#[generator]`-tagged functions, `yield_!` is redefined to use the
/// function's own explicit yield capability instead.
///
/// ```rust
/// use ::threaded_gen::prelude::*;
///
/// let mut letters = registry::build::<char, _>(|| {
///     for c in "abc".chars() {
///         yield_!(c);
///     }
///     Ok(())
/// });
/// assert_eq!(
///     letters.by_ref().collect::<Result<String, _>>().unwrap(),
///     "abc",
/// );
/// ```
///
/// [`registry::build`]: crate::registry::build
/// [`BoxError`]: crate::BoxError
/// [`YieldError`]: crate::YieldError
#[macro_export]
macro_rules! yield_ {(
    $value:expr $(,)?
) => (
    $crate::registry::yield_($value)?
)}
