//! End-to-end tests for the geometry Model/Data layer.
//!
//! The tests live in the `integration` test target; this library is empty.
