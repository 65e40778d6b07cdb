use std::{
    fmt::Display,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

/// Milliseconds since the unix epoch. A clock set before the epoch reads as 0.
#[inline]
pub fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|since| since.as_millis() as u64).unwrap_or_default()
}

/// Times an operation and reports it on drop if it ran past `threshold`
pub struct Stopwatch {
    operation: &'static str,
    subject: Option<String>,
    threshold: Duration,
    start: Instant,
}

impl Stopwatch {
    pub fn new(operation: &'static str, threshold: Duration) -> Self {
        Self { operation, subject: None, threshold, start: Instant::now() }
    }

    /// Names the item the operation works on, e.g. a block hash
    pub fn with_subject(mut self, subject: impl Display) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn exceeded(&self) -> bool {
        self.elapsed() > self.threshold
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        if !self.exceeded() {
            return;
        }
        match &self.subject {
            Some(subject) => crate::debug!("[{}] slow on {}: {:?}", self.operation, subject, self.elapsed()),
            None => crate::debug!("[{}] slow: {:?}", self.operation, self.elapsed()),
        }
    }
}
