//! Integration test suite entry point.

mod mocks;

mod explorer;
