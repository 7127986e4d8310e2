use thiserror::Error;

/// The lexical errors the scanner can detect.
///
/// Neither aborts the scan: the offending input is skipped and scanning
/// resumes with the next character. The kinds are formatted into
/// diagnostic messages via their `Display` impls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that starts no valid lexeme, e.g. `@` or `#`.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A string literal whose closing quote is missing at end of input.
    #[error("unterminated string")]
    UnterminatedString,
}
