pub mod tokenizer;
pub mod vocabulary;

pub use tokenizer::Tokenizer;
pub use vocabulary::Vocabulary;
