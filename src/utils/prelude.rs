pub(in crate)
use {
    ::std::{
        any::{Any, type_name},
        fmt,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        thread::{self, ThreadId},
    },
    ::crossbeam::channel::{
        Receiver,
        Sender,
    },
    ::parking_lot::{
        Mutex,
        RwLock,
    },
    ::tracing::{
        debug,
        error,
        trace,
        warn,
    },
    crate::{
        error::{
            BoxError,
            GeneratorError,
            YieldError,
        },
        generator::{
            Generator,
            GeneratorState,
            Yielder,
        },
        outcome::Outcome,
    },
};
