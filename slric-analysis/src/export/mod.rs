//! Flat export of result graphs.

pub mod writer;

pub use writer::RowWriter;
