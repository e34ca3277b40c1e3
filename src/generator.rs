//! The generator engine: a consumer-side handle pulling values out of a
//! producer running on its own execution context.

use_prelude!();

use crate::context::{Builder, Exit, Launch, Shared};
use crate::producer::Producer;

/// Value obtained when [resuming][`Generator::resume`] a [`Generator`].
///
/// This corresponds to:
///
///   - either a [suspension point][`GeneratorState::Yielded`],
///
///   - or a [termination point][`GeneratorState::Returned`].
#[derive(
    Debug,
    Clone, Copy,
    PartialOrd, Ord,
    PartialEq, Eq,
    Hash
)]
pub
enum GeneratorState<Yield, Return = ()> {
    /// The producer suspended with a value.
    ///
    /// This corresponds to a yield: the producer stays parked until the next
    /// resumption.
    Yielded(Yield),

    /// The producer is done, with the provided value.
    ///
    /// For a [`Generator`], that value tells a normal return (`Ok(())`) from a
    /// failure (`Err(_)`).
    Returned(Return),
}

/// Where a [`Generator`] stands, from the consumer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub
enum Status {
    /// Never pulled: no execution context exists yet.
    Idle,

    /// The execution context has been started and has not reported an end.
    Running,

    /// The producer returned normally.
    Completed,

    /// A failure has been surfaced. Terminal.
    Failed,
}

enum Phase<T> {
    Idle(Launch<T>),
    Running,
    Completed,
    Failed,
}

/// The yield capability handed to producer logic.
///
/// It only ever exists on the producer's execution context, and only by
/// reference, so that it cannot outlive the producer.
pub
struct Yielder<T> {
    handoff: Sender<Outcome<T>>,
    shared: Arc<Shared>,
}

impl<T> Yielder<T> {
    /// Hands `value` over to the consumer.
    ///
    /// Blocks until the consumer pulls it: this is the producer's only
    /// suspension point.
    ///
    /// # Errors
    ///
    /// [`YieldError::Cancelled`] once the generator has been dropped. Producer
    /// logic is expected to stop then, typically by propagating it with `?`.
    pub
    fn yield_ (self: &'_ Self, value: T)
      -> Result<(), YieldError>
    {
        if self.is_cancelled() {
            return Err(YieldError::Cancelled);
        }
        self.handoff
            .send(Outcome::Value(value))
            .map_err(|_| YieldError::Cancelled)
    }

    /// Whether the consumer dropped the generator.
    ///
    /// Long computations between two yields may poll this to stop early.
    #[inline]
    pub
    fn is_cancelled (self: &'_ Self)
      -> bool
    {
        self.shared.is_cancelled()
    }

    pub(in crate)
    fn shared (self: &'_ Self)
      -> &'_ Shared
    {
        &self.shared
    }

    /// Non-blocking handoff, for the last outcome a context ever produces.
    pub(in crate)
    fn try_hand_over (self: &'_ Self, outcome: Outcome<T>)
      -> Result<(), ::crossbeam::channel::TrySendError<Outcome<T>>>
    {
        self.handoff.try_send(outcome)
    }
}

impl<T> fmt::Debug for Yielder<T> {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f   .debug_struct("Yielder")
            .field("item", &type_name::<T>())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// A lazily computed, pull-driven sequence of `T`s, whose producer runs on a
/// dedicated thread and is suspended between two pulls.
///
/// The producer and the consumer meet on a zero-capacity channel: each value
/// is handed over only when the consumer asks for it, so the producer never
/// runs more than one value ahead.
///
/// # Example
///
/// ```rust
/// use ::threaded_gen::Generator;
///
/// let fibonacci = Generator::<u64>::new(|co| {
///     co.yield_(0)?;
///     let (mut i, mut j) = (0, 1);
///     loop {
///         co.yield_(j)?;
///         let next = i + j;
///         i = j;
///         j = next;
///     }
/// });
///
/// let first: Vec<u64> =
///     fibonacci
///         .take(9)
///         .collect::<Result<_, _>>()
///         .unwrap()
/// ;
/// assert_eq!(first, [0, 1, 1, 2, 3, 5, 8, 13, 21]);
/// ```
///
/// # Failures
///
/// When the producer returns an error or panics, the next pull reports
/// [`GeneratorError::Interrupted`], wrapping the original cause. Every pull
/// after that reports [`GeneratorError::Terminated`].
///
/// # Cost
///
/// Each started generator owns a whole thread until its producer ends. A
/// generator dropped while its producer is parked on a yield wakes that
/// producer up with [`YieldError::Cancelled`]; see [`Builder::stack_size`]
/// to trim the per-generator footprint.
pub
struct Generator<T> {
    phase: Phase<T>,
    handoff: Receiver<Outcome<T>>,
    shared: Arc<Shared>,
}

impl<T : Send + 'static> Generator<T> {
    /// Builds a generator out of producer logic which yields through the
    /// [`Yielder`] it is handed. Nothing runs until the first pull.
    ///
    /// Same as [`Builder::new()`][`Builder::new`]`.build(producer)`.
    pub
    fn new<F> (producer: F)
      -> Self
    where
        F : FnOnce(&Yielder<T>) -> Result<(), BoxError> + Send + 'static,
    {
        Builder::new().build(producer)
    }

    /// Builds a generator out of a [`Producer`].
    pub
    fn from_producer<P> (producer: P)
      -> Self
    where
        P : Producer<Item = T>,
    {
        Builder::new().build_producer(producer)
    }

    pub(in crate)
    fn from_launch (mk_launch: impl FnOnce(Yielder<T>) -> Launch<T>)
      -> Self
    {
        let (tx, rx) = ::crossbeam::channel::bounded(0);
        let shared = Shared::new();
        let yielder = Yielder { handoff: tx, shared: shared.clone() };
        Self {
            phase: Phase::Idle(mk_launch(yielder)),
            handoff: rx,
            shared,
        }
    }

    /// Resumes the producer until it yields or ends.
    ///
    /// The first call starts the execution context. Blocks until the producer
    /// hands a value over.
    ///
    ///   - `Yielded(value)`: the next value;
    ///
    ///   - `Returned(Ok(()))`: the producer returned normally (and will keep
    ///     being reported on further calls);
    ///
    ///   - `Returned(Err(_))`: the generator failed. The first such error is
    ///     the [`Interrupted`][`GeneratorError::Interrupted`] one carrying
    ///     the cause; later calls get
    ///     [`Terminated`][`GeneratorError::Terminated`].
    pub
    fn resume (self: &'_ mut Self)
      -> GeneratorState<T, Result<(), GeneratorError>>
    {
        match self.phase {
            | Phase::Idle(_) => if let Err(err) = self.start() {
                self.phase = Phase::Failed;
                return GeneratorState::Returned(Err(err));
            },
            | Phase::Running => {},
            | Phase::Completed => return GeneratorState::Returned(Ok(())),
            | Phase::Failed => {
                return GeneratorState::Returned(Err(GeneratorError::Terminated));
            },
        }
        match self.handoff.recv() {
            | Ok(outcome) => match outcome.into_result() {
                | Ok(value) => GeneratorState::Yielded(value),
                | Err(err) => self.fail(err),
            },
            // The context closed the channel: find out how it ended.
            | Err(_) => match self.shared.take_exit() {
                | Some(Exit::Completed) => {
                    self.phase = Phase::Completed;
                    GeneratorState::Returned(Ok(()))
                },
                | Some(Exit::Failed(cause)) => {
                    self.fail(GeneratorError::Interrupted(cause))
                },
                | None => {
                    error!(
                        item = type_name::<T>(),
                        "generator context exited without reporting an outcome",
                    );
                    self.phase = Phase::Failed;
                    GeneratorState::Returned(Err(GeneratorError::ContextLost))
                },
            },
        }
    }

    /// Pulls the next value.
    ///
    /// # Errors
    ///
    ///   - [`GeneratorError::Interrupted`] the first time after the producer
    ///     failed, carrying its cause;
    ///
    ///   - [`GeneratorError::Terminated`] on any pull after that;
    ///
    ///   - [`GeneratorError::Exhausted`] once the producer returned normally.
    pub
    fn pull (self: &'_ mut Self)
      -> Result<T, GeneratorError>
    {
        match self.resume() {
            | GeneratorState::Yielded(value) => Ok(value),
            | GeneratorState::Returned(Ok(())) => Err(GeneratorError::Exhausted),
            | GeneratorState::Returned(Err(err)) => Err(err),
        }
    }

    fn start (self: &'_ mut Self)
      -> Result<(), GeneratorError>
    {
        match ::core::mem::replace(&mut self.phase, Phase::Running) {
            | Phase::Idle(launch) => launch.spawn(),
            | phase => {
                self.phase = phase;
                Ok(())
            },
        }
    }

    fn fail (self: &'_ mut Self, err: GeneratorError)
      -> GeneratorState<T, Result<(), GeneratorError>>
    {
        debug!(%err, "re-raising producer failure, wrapped");
        self.phase = Phase::Failed;
        GeneratorState::Returned(Err(err))
    }
}

impl<T> Generator<T> {
    /// Where this generator stands.
    pub
    fn status (self: &'_ Self)
      -> Status
    {
        match self.phase {
            | Phase::Idle(_) => Status::Idle,
            | Phase::Running => Status::Running,
            | Phase::Completed => Status::Completed,
            | Phase::Failed => Status::Failed,
        }
    }
}

impl<T> Drop for Generator<T> {
    fn drop (self: &'_ mut Self)
    {
        self.shared.cancel();
        if let Phase::Running = self.phase {
            debug!(
                item = type_name::<T>(),
                "generator dropped; its producer stops at its next yield",
            );
        }
        // The receiving half drops right after, waking a parked producer up.
    }
}

impl<T> fmt::Debug for Generator<T> {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f   .debug_struct("Generator")
            .field("item", &type_name::<T>())
            .field("status", &self.status())
            .finish()
    }
}
