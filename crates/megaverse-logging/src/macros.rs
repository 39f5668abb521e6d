//! ---
//! mv_section: "03-logging"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Structured logging context and lifecycle events."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
//! Logging macros that attach a [`LogContext`](crate::LogContext).

#[doc(hidden)]
#[macro_export]
macro_rules! __mv_event {
    ($level:expr, context = $ctx:expr, $($arg:tt)+) => {{
        let ctx: $crate::LogContext<'_> = $ctx;
        $crate::__tracing::event!(
            $level,
            row = ctx.row,
            column = ctx.column,
            entity = ctx.entity,
            phase = ctx.phase,
            message = %format_args!($($arg)+)
        );
    }};
    ($level:expr, $($arg:tt)+) => {{
        $crate::__tracing::event!($level, message = %format_args!($($arg)+));
    }};
}

/// Emit an informational log enriched with cell context.
#[macro_export]
macro_rules! mv_info {
    ($($arg:tt)+) => { $crate::__mv_event!($crate::__tracing::Level::INFO, $($arg)+) };
}

/// Emit a debug log enriched with cell context.
#[macro_export]
macro_rules! mv_debug {
    ($($arg:tt)+) => { $crate::__mv_event!($crate::__tracing::Level::DEBUG, $($arg)+) };
}

/// Emit a warning enriched with cell context.
#[macro_export]
macro_rules! mv_warn {
    ($($arg:tt)+) => { $crate::__mv_event!($crate::__tracing::Level::WARN, $($arg)+) };
}

/// Emit an error log enriched with cell context.
#[macro_export]
macro_rules! mv_error {
    ($($arg:tt)+) => { $crate::__mv_event!($crate::__tracing::Level::ERROR, $($arg)+) };
}
