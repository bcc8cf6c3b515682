//! Runtime Faults
//!
//! Generated code is assumed to be well typed, so every contract violation
//! detected by the runtime is unrecoverable. A fault is recorded in a
//! thread-local slot (so a top-level guard can report it precisely) and the
//! current thread then panics with the fault's message.
//!
//! # Usage
//!
//! ```ignore
//! if ix >= len {
//!     fault(Fault::IndexOutOfRange { index: ix.to_string(), len });
//! }
//! ```
//!
//! A halt guard can inspect what went wrong after unwinding:
//! ```ignore
//! if has_fault() {
//!     let fault = take_last_fault();
//!     // Report...
//! }
//! ```

use std::cell::RefCell;
use std::fmt;

thread_local! {
    /// Thread-local storage for the most recent fault
    static LAST_FAULT: RefCell<Option<Fault>> = const { RefCell::new(None) };
}

/// Every way a runtime operation can refuse to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Sequence, array, or tuple access outside its bounds
    IndexOutOfRange { index: String, len: usize },
    /// Wrong number of indices for an array, or a one-dimensional-only
    /// operation applied to a multi-dimensional array
    RankMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Malformed literal text handed to a parser
    ParseError { kind: &'static str, text: String },
    /// No conversion path from a value's runtime type to the requested one
    UnsupportedConversion { target: &'static str, found: String },
    /// A non-iterable value used where an iteration source was required
    NotIterable(String),
    /// Integer, real, or native division by zero
    DivisionByZero { operation: &'static str },
    /// The absent Int/Real (an open range bound) used as a number
    AbsentValue { operation: &'static str },
    /// A multiset multiplicity set below zero
    NegativeMultiplicity(String),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::IndexOutOfRange { index, len } => {
                write!(f, "index out of range: {} (length {})", index, len)
            }
            Fault::RankMismatch {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "{}: expected {} indices but got {}",
                operation, expected, actual
            ),
            Fault::ParseError { kind, text } => {
                write!(f, "unable to parse string as {}: \"{}\"", kind, text)
            }
            Fault::UnsupportedConversion { target, found } => {
                write!(f, "unexpected type for conversion to {}: {}", target, found)
            }
            Fault::NotIterable(what) => write!(f, "not iterable: {}", what),
            Fault::DivisionByZero { operation } => {
                write!(f, "{}: division by zero", operation)
            }
            Fault::AbsentValue { operation } => {
                write!(f, "{}: absent value used as a number", operation)
            }
            Fault::NegativeMultiplicity(count) => {
                write!(f, "multiset multiplicity must be non-negative, got {}", count)
            }
        }
    }
}

impl std::error::Error for Fault {}

/// Record `fault` for this thread and unwind.
///
/// Never returns; the caller's operation is abandoned with no partial result.
#[track_caller]
pub fn fault(fault: Fault) -> ! {
    tracing::debug!(%fault, "runtime fault");
    let message = fault.to_string();
    LAST_FAULT.with(|slot| *slot.borrow_mut() = Some(fault));
    panic!("{}", message);
}

/// Take (and clear) the last fault recorded on this thread
pub fn take_last_fault() -> Option<Fault> {
    LAST_FAULT.with(|slot| slot.borrow_mut().take())
}

/// Check if a fault has been recorded on this thread and not yet taken
pub fn has_fault() -> bool {
    LAST_FAULT.with(|slot| slot.borrow().is_some())
}

/// Forget any recorded fault
pub fn clear_fault() {
    LAST_FAULT.with(|slot| *slot.borrow_mut() = None);
}

/// Format a panic payload into an error message
pub fn format_panic_payload(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(f) = payload.downcast_ref::<Fault>() {
        f.to_string()
    } else {
        "unknown panic".to_string()
    }
}
