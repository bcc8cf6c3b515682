//! Top-level halt guard
//!
//! Generated entry points wrap the program body in [`catch_halt`]. A fault
//! (or any other panic) that reaches it is reported as
//! `[Program halted] <message>` instead of a raw panic trace.

use crate::config::{HaltOutput, RuntimeConfig};
use dafny_core::{clear_fault, format_panic_payload, take_last_fault};
use std::io::Write;
use std::panic::{self, UnwindSafe};

/// Run `body`, reporting a halt to the configured stream.
///
/// Returns `None` if `body` panicked.
pub fn catch_halt<R>(body: impl FnOnce() -> R + UnwindSafe) -> Option<R> {
    let config = RuntimeConfig::from_env();
    match config.halt_output {
        HaltOutput::Stdout => catch_halt_to(&mut std::io::stdout(), body),
        HaltOutput::Stderr => catch_halt_to(&mut std::io::stderr(), body),
    }
}

/// [`catch_halt`], writing the halt message to `out`
pub fn catch_halt_to<R, W: Write>(
    out: &mut W,
    body: impl FnOnce() -> R + UnwindSafe,
) -> Option<R> {
    // A fault caught and handled earlier on this thread is not this halt's cause
    clear_fault();
    match panic::catch_unwind(body) {
        Ok(result) => Some(result),
        Err(payload) => {
            let message = match take_last_fault() {
                Some(fault) => fault.to_string(),
                None => format_panic_payload(payload.as_ref()),
            };
            tracing::error!(%message, "program halted");
            if let Err(e) = writeln!(out, "[Program halted] {}", message).and_then(|_| out.flush())
            {
                tracing::warn!(error = %e, "failed to report halt");
            }
            None
        }
    }
}
