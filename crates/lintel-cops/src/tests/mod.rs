//! Unit tests for `lintel_cops`.

mod support;
