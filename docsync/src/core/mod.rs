//! Deterministic, pure logic shared by the docsync tools.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod change_set;
pub mod doc_path;
