pub use triggered::{Listener, Trigger};

/// Wrapper containing a single Trigger instance
#[derive(Debug, Clone)]
pub struct SingleTrigger {
    pub trigger: Trigger,
    pub listener: Listener,
}

impl SingleTrigger {
    pub fn new() -> SingleTrigger {
        let (trigger, listener) = triggered::trigger();
        SingleTrigger { trigger, listener }
    }

    pub fn is_triggered(&self) -> bool {
        self.listener.is_triggered()
    }

    /// Blocks the current thread until the trigger fires. Returns immediately if it already did.
    pub fn wait(&self) {
        self.listener.wait()
    }
}

impl Default for SingleTrigger {
    fn default() -> Self {
        Self::new()
    }
}
