//! Unit tests for `lintel-syntax`.

mod lowering_tests;
mod tree_tests;
