pub mod block;
pub mod chain;
pub mod detector;
pub mod dialects;

pub use chain::ParserChain;
pub use dialects::{DialectParser, MultipleChoiceParser, TrueFalseParser, WhoAmIParser};
