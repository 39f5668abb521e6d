//! ---
//! mv_section: "03-logging"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Structured logging context and lifecycle events."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Grid-aware logging helpers. Every event emitted through the `mv_*` macros
//! carries the cell coordinates, entity kind and walk phase as structured
//! fields so that JSON logs can be filtered per cell.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

#[doc(hidden)]
pub use tracing as __tracing;

/// Initialise a baseline subscriber for tests and ad-hoc tools.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_test_writer())
        .try_init();
}

/// Structured context attached to log events by the convenience macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogContext<'a> {
    /// Zero-based grid row.
    pub row: Option<usize>,
    /// Zero-based grid column.
    pub column: Option<usize>,
    /// Entity kind (`polyanet`, `soloon`, `cometh`).
    pub entity: Option<&'a str>,
    /// Walk phase (`apply`, `reset`, `plan`).
    pub phase: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cell position.
    pub fn with_cell(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    /// Attach an entity kind.
    pub fn with_entity(mut self, entity: &'a str) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Attach a walk phase.
    pub fn with_phase(mut self, phase: &'a str) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// Outcome attached to lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation completed but some items failed.
    Partial,
    /// The operation failed or was aborted.
    Fault,
}

impl SystemEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            SystemEventOutcome::Success => "success",
            SystemEventOutcome::Partial => "partial",
            SystemEventOutcome::Fault => "fault",
        }
    }

}

/// Emit a standardised lifecycle event (`walk.start`, `goal.fetch`, ...).
pub fn log_system_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: SystemEventOutcome,
) {
    let ctx = context.copied().unwrap_or_default();
    // `tracing::event!` needs a constant level, hence the dispatch.
    macro_rules! emit {
        ($level:expr) => {
            tracing::event!(
                $level,
                event,
                outcome = outcome.as_str(),
                row = ctx.row,
                column = ctx.column,
                entity = ctx.entity,
                phase = ctx.phase,
                message = %message
            )
        };
    }
    match outcome {
        SystemEventOutcome::Success => emit!(Level::INFO),
        SystemEventOutcome::Partial => emit!(Level::WARN),
        SystemEventOutcome::Fault => emit!(Level::ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_emit_without_panic() {
        init();
        let ctx = LogContext::new().with_cell(2, 3).with_entity("soloon");
        mv_info!(context = ctx, "created soloon");
        mv_debug!("debug message");
        mv_warn!(context = ctx.with_phase("apply"), "unrecognised cell");
        mv_error!(context = ctx, "status code: {}", 429);
    }

    #[test]
    fn context_builder_sets_fields() {
        let ctx = LogContext::new()
            .with_cell(1, 4)
            .with_entity("cometh")
            .with_phase("reset");
        assert_eq!(ctx.row, Some(1));
        assert_eq!(ctx.column, Some(4));
        assert_eq!(ctx.entity, Some("cometh"));
        assert_eq!(ctx.phase, Some("reset"));
    }

    #[test]
    fn system_event_helper_emits() {
        init();
        let ctx = LogContext::new().with_phase("apply");
        log_system_event(
            Some(&ctx),
            "walk.complete",
            "walk finished",
            SystemEventOutcome::Success,
        );
        log_system_event(
            None,
            "walk.complete",
            "some cells failed",
            SystemEventOutcome::Partial,
        );
        log_system_event(
            None,
            "goal.fetch",
            "goal map unavailable",
            SystemEventOutcome::Fault,
        );
    }
}
