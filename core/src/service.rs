use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("service {0} was already started")]
    AlreadyStarted(&'static str),

    #[error("service {0} was never started")]
    NotStarted(&'static str),

    #[error("service {0} was already stopped")]
    AlreadyStopped(&'static str),

    #[error("service {0} failed: {1}")]
    Failed(&'static str, String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// A long-lived component owning its own worker threads.
///
/// `start` and `stop` may each succeed only once. `wait_for_stop` blocks until all the
/// worker threads of the service have exited and returns immediately if it was never started.
pub trait Service: Send + Sync {
    fn ident(&self) -> &'static str;
    fn start(&self) -> ServiceResult<()>;
    fn stop(&self) -> ServiceResult<()>;
    fn wait_for_stop(&self);
}

/// Start/stop bookkeeping shared by service implementations
#[derive(Debug, Default)]
pub struct ServiceState {
    started: AtomicBool,
    stopped: AtomicBool,
}

impl ServiceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the service as started, failing if it already was
    pub fn begin_start(&self, ident: &'static str) -> ServiceResult<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(ServiceError::AlreadyStarted(ident));
        }
        Ok(())
    }

    /// Marks the service as stopped, failing if it is not running
    pub fn begin_stop(&self, ident: &'static str) -> ServiceResult<()> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(ServiceError::NotStarted(ident));
        }
        if self.stopped.swap(true, Ordering::SeqCst) {
            return Err(ServiceError::AlreadyStopped(ident));
        }
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst) && !self.stopped.load(Ordering::SeqCst)
    }
}
