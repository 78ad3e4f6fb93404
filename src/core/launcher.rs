//! # Launch a single subsystem.
//!
//! [`launch`] starts one named [`Subsystem`] and converts a startup failure
//! into a fatal [`SupervisorError`], guaranteeing the subsystem's `stop` is
//! invoked exactly once for best-effort cleanup before the error propagates.
//!
//! On the success path the subsystem keeps running and its handle stays with
//! the caller; `launch` never stops a subsystem that started cleanly.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::SupervisorError;
use crate::metrics;
use crate::subsystem::Subsystem;

/// Starts `subsystem`; on failure stops it once and escalates fatally.
pub async fn launch(subsystem: &Arc<dyn Subsystem>) -> Result<(), SupervisorError> {
    let name = subsystem.name().to_string();
    info!(subsystem = %name, "starting subsystem");

    match subsystem.start().await {
        Ok(()) => {
            metrics::record_subsystem_launch(&name, true);
            info!(subsystem = %name, "subsystem started");
            Ok(())
        }
        Err(err) => {
            metrics::record_subsystem_launch(&name, false);
            error!(subsystem = %name, error = %err, "subsystem failed to start");
            subsystem.stop().await;
            Err(SupervisorError::SubsystemStart {
                name,
                reason: err.to_string(),
            })
        }
    }
}
