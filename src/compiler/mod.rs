//! Compile-unit driver for the compiler front end.
//!
//! This module owns the per-file compilation flow. It handles:
//!
//! - Opening the input file and wiring it to a character source
//! - Running the lexical pass and keeping its token sequence
//! - Reporting the pass outcome as a status value
//! - Non-fatal warning diagnostics
//!
//! Parsing and code generation slot in behind the same driver once they
//! are built.

pub mod compiler;
