//! Generators on stable Rust, backed by one thread per generator.
//!
//! A [`Generator`] runs its producer logic on a dedicated execution context
//! (a detached thread), and meets its consumer on a zero-capacity
//! (rendezvous) channel: each yield blocks until the consumer pulls, each pull
//! blocks until the producer yields. The producer is thus suspended between
//! two values, just like with a native `yield`, and can be written as plain
//! sequential code.
//!
//! ```rust
//! use ::threaded_gen::prelude::*;
//!
//! #[generator(yield(u64))]
//! fn fibonacci ()
//! {
//!     yield_!(0);
//!     let (mut i, mut j) = (0, 1);
//!     loop {
//!         yield_!(j);
//!         let next = i + j;
//!         i = j;
//!         j = next;
//!     }
//! }
//!
//! let first: Vec<u64> = fibonacci().take(9).map(Result::unwrap).collect();
//! assert_eq!(first, [0, 1, 1, 2, 3, 5, 8, 13, 21]);
//! ```
//!
//! # Flavors
//!
//! All of them produce a [`Generator`]:
//!
//!   - [`Generator::new`] / [`Builder::build`]: a closure handed an explicit
//!     [`Yielder`];
//!
//!   - [`#[generator]`][`generator`]: the same, as an attribute on a `fn`,
//!     whose body yields with `yield_!`;
//!
//!   - [`Producer`]: a type whose [`run`][`Producer::run`] method yields;
//!
//!   - [`registry::build`]: a closure with no parameters, yielding through
//!     the free [`registry::yield_`] function (or the [`yield_!`] macro),
//!     resolved by the identity of the calling thread.
//!
//! # Failures
//!
//! A producer returning an error or panicking fails its generator: the next
//! pull reports [`GeneratorError::Interrupted`], whose
//! [`source()`][::std::error::Error::source] is the original failure. That
//! failure is never lost while the generator is alive, even if nobody was
//! pulling when it happened.
//!
//! # Logging
//!
//! The lifecycle of execution contexts is reported through [`tracing`]
//! events (mostly at `DEBUG` / `TRACE` level). No subscriber is installed by
//! this crate.
//!
//! [`tracing`]: https://docs.rs/tracing

#![warn(
    future_incompatible,
    rust_2018_compatibility,
    missing_docs,
    clippy::cargo,
    clippy::pedantic,
)]
#![deny(
    unused_must_use,
)]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(feature = "better-docs",
    feature(doc_notable_trait),
)]

#[macro_use]
mod utils;

#[path = "public_prelude.rs"]
pub
mod prelude;

mod public_macros;

pub use self::context::Builder;
mod context;

pub use self::error::{BoxError, GeneratorError, Panicked, YieldError};
mod error;

pub use self::generator::{Generator, GeneratorState, Status, Yielder};
mod generator;

pub use self::iter::Iter;
mod iter;

pub use self::outcome::Outcome;
mod outcome;

pub use self::producer::{Producer, ProducerExt};
mod producer;

pub mod registry;

pub use ::threaded_gen_proc_macros::generator;
