//! # Cross-platform termination signal handling.
//!
//! [`wait_for_termination_signal`] completes when the process receives a
//! shutdown request from the operating system. Used by
//! [`Supervisor::run`](crate::Supervisor::run) to translate OS signals into
//! a single [`Supervisor::stop`](crate::Supervisor::stop) call.
//!
//! **Unix:** `SIGINT`, `SIGTERM`, `SIGQUIT`. **Elsewhere:** Ctrl-C via
//! [`tokio::signal::ctrl_c`].

/// Waits for a termination signal.
///
/// Each call registers independent listeners. Returns `Ok(())` when any
/// signal is received, or `Err` if listener registration fails.
#[cfg(unix)]
pub async fn wait_for_termination_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
        _ = sigquit.recv() => {}
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Each call registers independent listeners. Returns `Ok(())` when any
/// signal is received, or `Err` if listener registration fails.
#[cfg(not(unix))]
pub async fn wait_for_termination_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
