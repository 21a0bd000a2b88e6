//! Runtime diagnostics for glwrap.
//!
//! Everything here is advisory. Driver errors and binding mistakes are
//! formatted and handed to a printer; the GL call that caused them has
//! already happened and is never prevented.
//!
//! A [`DebugOutput`] is built explicitly and installed on the thread that
//! owns the GL context:
//!
//! ```no_run
//! use glwrap_debug::{DebugConfig, DebugOutput};
//!
//! glwrap_debug::logging::init();
//! let config = DebugConfig::from_env().unwrap_or_default();
//! glwrap_debug::install(DebugOutput::new(config));
//! ```
//!
//! With nothing installed, reports are still logged through `tracing`.

pub mod bind_check;
pub mod config;
pub mod gl_error;
pub mod knowledge_base;
pub mod logging;
pub mod output;

pub use config::{DebugConfig, LimitAction};
pub use gl_error::GlError;
pub use knowledge_base::KnowledgeBase;
pub use output::{
    check_error, install, is_installed, last_error, print_if_error, report, take_last_error,
    uninstall, with_installed, DebugOutput, ErrorMessage, Printer,
};
