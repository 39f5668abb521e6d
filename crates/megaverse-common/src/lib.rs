//! ---
//! mv_section: "01-core-functionality"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Shared primitives and utilities for the Megaverse client."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
//! Shared primitives for the Megaverse workspace.
//! This crate exposes configuration loading, tracing initialisation and
//! version metadata consumed by the client crates and the CLI.

pub mod config;
pub mod logging;
pub mod version;

pub use config::{ApiConfig, AppConfig, ConfigOverrides, LoadedAppConfig, LoggingConfig};
pub use logging::{init_tracing, LogFormat};
pub use version::VersionInfo;
