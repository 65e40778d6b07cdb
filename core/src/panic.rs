use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

/// Extracts the message carried by a panic payload
pub fn payload_message(payload: &(dyn Any + Send)) -> String {
    match payload.downcast_ref::<&str>() {
        Some(s) => s.to_string(),
        None => match payload.downcast_ref::<String>() {
            Some(s) => s.clone(),
            None => "Box<dyn Any>".to_string(),
        },
    }
}

/// Runs `f`, converting a panic into an `Err` holding the panic message.
///
/// The default panic hook still runs and reports the panic on stderr.
pub fn catch_panic<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| payload_message(payload.as_ref()))
}
