//! Printing macros for [`Message`](super::Message)s.
//!
//! Each macro prints through `tracing` when debug output is requested
//! (`ONCALL_DEBUG` or `RUST_LOG` set), so messages interleave with log
//! events, and through plain `println!`/`eprintln!` otherwise. Tables are
//! never printed through these macros; they always go to stdout.
//!
//! - `msg_print!`: plain line on stdout
//! - `msg_info!`: informational line on stdout
//! - `msg_warning!`: warning on stderr
//! - `msg_error!`: error on stderr
//!
//! ```rust
//! use oncall::libs::messages::Message;
//! use oncall::{msg_print, msg_warning};
//!
//! msg_print!(Message::ScheduleFor("Jane Doe".to_string()));
//! msg_warning!(Message::PartialReport { skipped: 1 });
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether messages are routed through `tracing`. Checked once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var(crate::libs::logging::DEBUG_ENV).is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            eprintln!("⚠️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}
