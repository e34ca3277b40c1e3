macro_rules! use_prelude {() => (
    #[allow(unused_imports)]
    use crate::utils::prelude::*;
)}

/// Binds `$name` to the thread name of the current execution context, for
/// log fields.
macro_rules! current_context {(
    $name:ident
) => (
    let __thread__ = ::std::thread::current();
    let $name = __thread__.name().unwrap_or("<unnamed>");
)}
