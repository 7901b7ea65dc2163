//! Single-outstanding-request guard.
//!
//! A module instance talks to storage for one request at a time. A request
//! arriving while another is in flight is rejected, not queued.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InteractorError {
    #[error("request `{0}` rejected: another request is still in flight")]
    RequestInFlight(&'static str),
}

#[derive(Debug, Default)]
pub struct RequestGuard {
    in_flight: AtomicBool,
}

/// Held for the duration of a request; releases the guard on drop
#[derive(Debug)]
pub struct RequestPermit<'a> {
    guard: &'a RequestGuard,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, request: &'static str) -> Result<RequestPermit<'_>, InteractorError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Rejecting {}: a request is already in flight", request);
            return Err(InteractorError::RequestInFlight(request));
        }
        log::debug!("Request {} started", request);
        Ok(RequestPermit { guard: self })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for RequestPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_request_rejected_until_permit_dropped() {
        let guard = RequestGuard::new();
        let permit = guard.try_begin("first").unwrap();
        assert!(guard.is_busy());
        assert_eq!(
            guard.try_begin("second").unwrap_err(),
            InteractorError::RequestInFlight("second")
        );

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_begin("third").is_ok());
    }
}
