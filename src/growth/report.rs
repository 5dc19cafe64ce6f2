//! Fault reporting sink
//!
//! Unexpected faults never propagate out of the controller. They are handed
//! to a `FaultReporter` and the trigger falls back to default growth.

use std::cell::RefCell;

use crate::core::error::OverrideError;

pub trait FaultReporter {
    fn report(&self, fault: &OverrideError);
}

/// Logs faults through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FaultReporter for TracingReporter {
    fn report(&self, fault: &OverrideError) {
        tracing::error!("Sapling override fault: {}", fault);
    }
}

/// Keeps every reported fault, for inspection in tests and tools
#[derive(Debug, Default)]
pub struct RecordingReporter {
    faults: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn faults(&self) -> Vec<String> {
        self.faults.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.borrow().is_empty()
    }
}

impl FaultReporter for RecordingReporter {
    fn report(&self, fault: &OverrideError) {
        tracing::error!("Sapling override fault: {}", fault);
        self.faults.borrow_mut().push(fault.to_string());
    }
}
