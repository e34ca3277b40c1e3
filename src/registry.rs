//! Implicit yields: producer logic written as a plain closure, yielding with
//! the free-standing [`yield_`] function (or the [`yield_!`] macro).
//!
//! Each execution context started by [`build`] registers its yield
//! capability under its own [`ThreadId`] when it starts, and removes it when
//! it ends. A yield looks up the entry of the calling thread, so it can only
//! ever reach the generator that thread is running.
//!
//! ```rust
//! use ::threaded_gen::{registry, yield_};
//!
//! let mut evens = registry::build::<u32, _>(|| {
//!     for n in (0_u32 ..).step_by(2) {
//!         yield_!(n);
//!     }
//!     Ok(())
//! });
//! assert_eq!(evens.pull().unwrap(), 0);
//! assert_eq!(evens.pull().unwrap(), 2);
//! assert_eq!(evens.pull().unwrap(), 4);
//! ```
//!
//! [`yield_!`]: crate::yield_!

use_prelude!();

use ::std::{collections::HashMap, sync::OnceLock};

use crate::context::Builder;

struct Entry {
    item: &'static str,
    /// An `Arc<Yielder<T>>`, with `T` the item type.
    yielder: Arc<dyn Any + Send + Sync>,
}

fn contexts ()
  -> &'static RwLock<HashMap<ThreadId, Entry>>
{
    static CONTEXTS: OnceLock<RwLock<HashMap<ThreadId, Entry>>> = OnceLock::new();
    CONTEXTS.get_or_init(Default::default)
}

/// Registers the calling thread as the execution context of `yielder`'s
/// generator.
pub(in crate)
fn register<T : Send + 'static> (yielder: &'_ Arc<Yielder<T>>)
  -> ThreadId
{
    let thread_id = thread::current().id();
    let entry = Entry {
        item: type_name::<T>(),
        yielder: yielder.clone(),
    };
    let prev = contexts().write().insert(thread_id, entry);
    debug_assert!(prev.is_none(), "context registered twice");
    trace!(?thread_id, item = type_name::<T>(), "registered generator context");
    thread_id
}

pub(in crate)
fn unregister (thread_id: ThreadId)
{
    if contexts().write().remove(&thread_id).is_some() {
        trace!(?thread_id, "unregistered generator context");
    }
}

/// Whether `thread_id` currently runs the producer logic of a generator built
/// with [`build`].
pub
fn is_registered (thread_id: ThreadId)
  -> bool
{
    contexts().read().contains_key(&thread_id)
}

/// Whether the calling thread runs the producer logic of a generator built
/// with [`build`], i.e., whether [`yield_`] may be called from here.
pub
fn in_generator ()
  -> bool
{
    is_registered(thread::current().id())
}

/// Builds a generator out of a closure yielding through [`yield_`].
///
/// Same as [`Builder::new()`][`Builder::new`]`.build_implicit(producer)`.
pub
fn build<T, F> (producer: F)
  -> Generator<T>
where
    T : Send + 'static,
    F : FnOnce() -> Result<(), BoxError> + Send + 'static,
{
    Builder::new().build_implicit(producer)
}

/// Hands `value` over to the consumer of the generator whose producer logic
/// the calling thread runs.
///
/// # Errors
///
///   - [`YieldError::NoContext`] when called from outside of any producer
///     logic started by [`build`];
///
///   - [`YieldError::ItemMismatch`] when `T` is not the generator's item
///     type (beware of integer literals defaulting to `i32`);
///
///   - [`YieldError::Cancelled`] once the generator has been dropped.
pub
fn yield_<T : Send + 'static> (value: T)
  -> Result<(), YieldError>
{
    let thread_id = thread::current().id();
    let (item, yielder) = match contexts().read().get(&thread_id) {
        | Some(entry) => (entry.item, entry.yielder.clone()),
        | None => return Err(YieldError::NoContext),
    };
    // The lock is released before blocking on the handoff.
    let yielder: Arc<Yielder<T>> = yielder.downcast().map_err(|_| {
        YieldError::ItemMismatch {
            expected: item,
            offered: type_name::<T>(),
        }
    })?;
    yielder.yield_(value)
}

impl Builder {
    /// Builds a generator out of a closure yielding through the free
    /// [`yield_`] function.
    pub
    fn build_implicit<T, F> (mut self: Self, producer: F)
      -> Generator<T>
    where
        T : Send + 'static,
        F : FnOnce() -> Result<(), BoxError> + Send + 'static,
    {
        self.registered = true;
        self.or_named_after::<F>()
            .build(move |_: &Yielder<T>| producer())
    }
}
