//! Data model: the authored deck description (input) and the assembled document (output).

pub mod chart;
pub mod common;
pub mod deck;
pub mod elements;
pub mod presentation;
pub mod shape;
pub mod text;
