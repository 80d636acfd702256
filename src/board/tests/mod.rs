//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts of the legal move tree
//! - `movegen.rs` - Piece rules, legality and mate detection
//! - `make_unmake.rs` - Make/undo correctness
//! - `repetition.rs` - Repetition, perpetual check and perpetual chase
//! - `eval.rs` - Static evaluation and score constants
//! - `search.rs` - Search engine behaviour and ordering tables
//! - `proptest.rs` - Property-based tests over random playouts

mod eval;
mod movegen;
mod perft;
mod repetition;
