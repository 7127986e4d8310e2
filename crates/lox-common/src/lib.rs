pub mod errors;
pub mod span;

pub use errors::{Diagnostic, DiagnosticBag, Severity};
pub use span::{Position, Span};
