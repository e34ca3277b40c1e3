//! Execution contexts: the dedicated thread each generator's producer runs
//! on, and the [`Builder`] configuring it.
//!
//! A context is spawned on the first pull, detached right away (its
//! `JoinHandle` is dropped), and lives until the producer returns, fails, or
//! notices that its consumer is gone. A producer parked on a yield whose
//! generator is dropped wakes up with [`YieldError::Cancelled`]; one that
//! never yields again stays around until the process exits, without keeping
//! the process alive.

use_prelude!();

use ::std::{
    io,
    panic::{self, AssertUnwindSafe},
};

use crate::producer::Producer;

/// The producer logic, type-erased.
pub(in crate)
type Body<T> = Box<dyn FnOnce(&Yielder<T>) -> Result<(), BoxError> + Send + 'static>;

/// How a context ended, as seen from the consumer side once the channel is
/// closed.
pub(in crate)
enum Exit {
    Completed,
    Failed(BoxError),
}

/// State shared between a generator and its context, besides the channel.
pub(in crate)
struct Shared {
    /// Written at most once, by the context, before it closes the channel.
    exit: Mutex<Option<Exit>>,
    /// Set when the generator is dropped.
    cancelled: AtomicBool,
}

impl Shared {
    pub(in crate)
    fn new ()
      -> Arc<Self>
    {
        Arc::new(Self {
            exit: Mutex::new(None),
            cancelled: AtomicBool::new(false),
        })
    }

    fn latch (self: &'_ Self, exit: Exit)
    {
        let mut slot = self.exit.lock();
        debug_assert!(slot.is_none(), "context exit latched twice");
        *slot = Some(exit);
    }

    pub(in crate)
    fn take_exit (self: &'_ Self)
      -> Option<Exit>
    {
        self.exit.lock().take()
    }

    pub(in crate)
    fn cancel (self: &'_ Self)
    {
        self.cancelled.store(true, Ordering::Release);
    }

    pub(in crate)
    fn is_cancelled (self: &'_ Self)
      -> bool
    {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Configuration of the execution context backing a [`Generator`].
///
/// Building a generator starts nothing: the thread is only spawned by the
/// first pull.
///
/// ```rust
/// use ::threaded_gen::Builder;
///
/// let mut countdown = Builder::new()
///     .name("countdown")
///     .stack_size(64 * 1024)
///     .build(|co| {
///         for i in (1 ..= 3).rev() {
///             co.yield_(i)?;
///         }
///         Ok(())
///     })
/// ;
/// assert_eq!(countdown.pull().unwrap(), 3);
/// assert_eq!(countdown.pull().unwrap(), 2);
/// assert_eq!(countdown.pull().unwrap(), 1);
/// assert!(countdown.pull().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub
struct Builder {
    name: Option<String>,
    stack_size: Option<usize>,
    pub(in crate)
    registered: bool,
}

impl Builder {
    /// A builder with the default configuration: a thread named after the
    /// producer's type, with the platform's default stack size.
    pub
    fn new ()
      -> Self
    {
        Self::default()
    }

    /// Names the context's thread (shows up in panic messages and logs).
    pub
    fn name (mut self: Self, name: impl Into<String>)
      -> Self
    {
        self.name = Some(name.into());
        self
    }

    /// Sets the stack size of the context's thread, in bytes.
    ///
    /// Every started generator holds a whole thread stack for as long as its
    /// producer runs; producers with shallow call stacks can get away with
    /// far less than the default.
    pub
    fn stack_size (mut self: Self, size: usize)
      -> Self
    {
        self.stack_size = Some(size);
        self
    }

    /// Builds a generator out of producer logic which yields through the
    /// [`Yielder`] it is handed.
    pub
    fn build<T, F> (self: Self, producer: F)
      -> Generator<T>
    where
        T : Send + 'static,
        F : FnOnce(&Yielder<T>) -> Result<(), BoxError> + Send + 'static,
    {
        let mut builder = self.or_named_after::<F>();
        let name = builder.name.take().unwrap_or_default();
        Generator::from_launch(|yielder| Launch {
            body: Box::new(producer),
            yielder,
            name,
            builder,
        })
    }

    /// Builds a generator out of a [`Producer`].
    pub
    fn build_producer<P : Producer> (self: Self, producer: P)
      -> Generator<P::Item>
    {
        self.or_named_after::<P>()
            .build(move |co| producer.run(co))
    }

    /// Unless a name has been set, names the thread after `Logic`.
    pub(in crate)
    fn or_named_after<Logic : ?Sized> (mut self: Self)
      -> Self
    {
        if self.name.is_none() {
            self.name = Some(format!("generator '{}'", type_name::<Logic>()));
        }
        self
    }
}

/// Everything needed to start a context, held by the generator until its
/// first pull.
pub(in crate)
struct Launch<T> {
    body: Body<T>,
    yielder: Yielder<T>,
    name: String,
    builder: Builder,
}

impl<T : Send + 'static> Launch<T> {
    /// Spawns the context thread and detaches it.
    pub(in crate)
    fn spawn (self: Self)
      -> Result<(), GeneratorError>
    {
        let Self { body, yielder, name, builder } = self;
        // `thread::Builder::spawn` panics on those.
        if name.contains('\0') {
            return Err(GeneratorError::Spawn(io::Error::new(
                io::ErrorKind::InvalidInput,
                "thread name contains an interior NUL byte",
            )));
        }
        let mut thread = thread::Builder::new().name(name);
        if let Some(size) = builder.stack_size {
            thread = thread.stack_size(size);
        }
        let registered = builder.registered;
        let handle =
            thread
                .spawn(move || run(body, yielder, registered))
                .map_err(GeneratorError::Spawn)?
        ;
        debug!(
            context = ?handle.thread().name(),
            registered,
            "spawned generator context",
        );
        // Detached: dropping the handle never waits for the producer.
        drop(handle);
        Ok(())
    }
}

/// The body of a context thread.
fn run<T : Send + 'static> (
    body: Body<T>,
    yielder: Yielder<T>,
    registered: bool,
)
{
    current_context!(context);
    let yielder = Arc::new(yielder);
    let registration = if registered {
        Some(crate::registry::register(&yielder))
    } else {
        None
    };
    ::unwind_safe::with_state(registration)
        .try_eval(|_| {
            let co: &Yielder<T> = &yielder;
            debug!(context, "running producer logic");
            let ended = panic::catch_unwind(AssertUnwindSafe(|| body(co)));
            match ended {
                | Ok(Ok(())) => {
                    debug!(context, "producer returned");
                    co.shared().latch(Exit::Completed);
                },
                | Ok(Err(cause)) if co.is_cancelled() => {
                    debug!(context, %cause, "consumer went away; producer stopped");
                },
                | Ok(Err(cause)) => {
                    debug!(context, %cause, "producer failed (to be wrapped)");
                    hand_over_failure(co, cause);
                },
                | Err(payload) => {
                    let cause = crate::error::Panicked::new(
                        crate::utils::panic_message(&*payload),
                    );
                    debug!(context, %cause, "producer panicked (to be wrapped)");
                    hand_over_failure(co, Box::new(cause));
                },
            }
        })
        .finally(|registration| if let Some(thread_id) = registration {
            crate::registry::unregister(thread_id);
        })
    ;
    // `yielder` (and thus the sending half of the channel) drops here, after
    // the exit has been latched and the registry entry removed.
}

/// Hands the failure to a consumer blocked on a pull if there is one, and
/// latches it otherwise, so that the next pull still observes it.
fn hand_over_failure<T> (yielder: &'_ Yielder<T>, cause: BoxError)
{
    use ::crossbeam::channel::TrySendError;

    match yielder.try_hand_over(Outcome::Failure(cause)) {
        | Ok(()) => trace!("failure handed over to a waiting consumer"),
        | Err(TrySendError::Full(outcome)) => {
            trace!("no consumer waiting; latching the failure");
            if let Some(cause) = outcome.into_failure() {
                yielder.shared().latch(Exit::Failed(cause));
            }
        },
        | Err(TrySendError::Disconnected(outcome)) => {
            if let Some(cause) = outcome.into_failure() {
                warn!(%cause, "generator dropped before its failure could be delivered");
            }
        },
    }
}
