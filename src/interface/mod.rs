mod fetcher;
mod messenger;
mod parser;

pub use fetcher::*;
pub use messenger::*;
pub use parser::*;
