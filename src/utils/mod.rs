#[macro_use]
pub(in crate)
mod macros;

pub(in crate)
mod prelude;

use ::std::any::Any;

/// Best-effort extraction of the message carried by a panic payload.
pub(in crate)
fn panic_message (payload: &'_ (dyn Any + Send))
  -> String
{
    if let Some(&msg) = payload.downcast_ref::<&'static str>() {
        msg.to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "Box<dyn Any>".to_owned()
    }
}
