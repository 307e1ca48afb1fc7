//! Converters from deck configurations to documents, and from documents to previews.

pub mod deck;
pub mod markdown;
pub mod svg;
