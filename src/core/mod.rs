//! Runtime core: orchestration and lifecycle.
//!
//! The only public API from this module is [`Supervisor`] and the
//! [`ReadinessWaiter`] it gates launches on.
//!
//! Internal modules:
//! - [`supervisor`]: launch order, conditional activation, blocking run loop;
//! - [`launcher`]: starts one subsystem, stop-once-and-escalate on failure;
//! - [`readiness`]: bounded fixed-delay dependency polling;
//! - [`stop`]: single-slot send-or-drop shutdown signal;
//! - [`shutdown`]: cross-platform termination-signal handling.

mod launcher;
mod readiness;
mod shutdown;
mod stop;
mod supervisor;

pub use readiness::ReadinessWaiter;
pub use supervisor::Supervisor;
