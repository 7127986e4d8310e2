pub mod cursor;
pub mod error;
pub mod token;

mod scanner;

pub use error::LexErrorKind;
pub use scanner::Lexer;
pub use token::{Literal, Token, TokenKind};
