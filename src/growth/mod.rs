//! Sapling growth override
//!
//! The controller consumes growth triggers from the host and either hands
//! them back to default growth or replaces them with a configured structure.
//! Follow-up notifications go through the scheduler and event bus.

pub mod controller;
pub mod events;
pub mod report;
pub mod scheduler;
pub mod trigger;

pub use controller::GrowthController;
pub use events::{EventBus, GrowthObserver, StructureGrownEvent};
pub use report::{FaultReporter, RecordingReporter, TracingReporter};
pub use scheduler::SyncScheduler;
pub use trigger::{DeferReason, GrowthOutcome, GrowthTrigger};
