//! The crate prelude: reexport the most essential utilities so that blob
//! `use`-ing them should enable the most straight-forward usage.

pub use {
    ::threaded_gen_proc_macros::{
        generator,
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
        producer::{
            Producer,
            ProducerExt as _,
        },
        registry,
        yield_,
    },
};
