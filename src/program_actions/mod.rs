mod rewrite_docs;

pub use rewrite_docs::*;
