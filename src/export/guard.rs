//! In-flight export guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Allows one export at a time
#[derive(Debug, Default)]
pub struct ExportGuard {
    in_flight: AtomicBool,
}

/// Held for the duration of an export; releases the guard on drop
#[derive(Debug)]
pub struct ExportTicket {
    guard: Arc<ExportGuard>,
}

impl ExportGuard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `None` while another export holds a ticket
    pub fn try_begin(self: &Arc<Self>) -> Option<ExportTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportTicket {
                guard: Arc::clone(self),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}
