use crate::service::{Service, ServiceResult};
use crate::{info, trace, warn};
use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Owns the node services and drives their lifecycle: started in binding order,
/// stopped in reverse order.
pub struct Core {
    keep_running: AtomicBool,
    services: Mutex<Vec<Arc<dyn Service>>>,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    pub fn new() -> Core {
        Core { keep_running: AtomicBool::new(true), services: Mutex::new(Vec::new()) }
    }

    pub fn bind<T>(&self, service: Arc<T>)
    where
        T: Service + 'static,
    {
        self.services.lock().push(service);
    }

    pub fn keep_running(&self) -> bool {
        self.keep_running.load(Ordering::SeqCst)
    }

    /// Starts every bound service. If one fails to start, the services started before
    /// it are stopped again and the error is returned.
    pub fn start(&self) -> ServiceResult<()> {
        let services = self.services.lock().clone();
        for (i, service) in services.iter().enumerate() {
            trace!("starting service {}", service.ident());
            if let Err(err) = service.start() {
                warn!("service {} failed to start: {}", service.ident(), err);
                for started in services[..i].iter().rev() {
                    Self::stop_service(started.as_ref());
                }
                self.keep_running.store(false, Ordering::SeqCst);
                return Err(err);
            }
        }
        info!("core started {} service(s)", services.len());
        Ok(())
    }

    /// Stops all services and blocks until each of them has fully exited. Subsequent calls are no-ops.
    pub fn shutdown(&self) {
        if !self.keep_running.swap(false, Ordering::SeqCst) {
            return;
        }
        trace!("signaling core shutdown...");
        let services = self.services.lock().clone();
        for service in services.iter().rev() {
            Self::stop_service(service.as_ref());
        }
        info!("core is shut down");
    }

    fn stop_service(service: &dyn Service) {
        trace!("shutting down: {}", service.ident());
        if let Err(err) = service.stop() {
            warn!("error while stopping {}: {}", service.ident(), err);
        }
        service.wait_for_stop();
    }
}
