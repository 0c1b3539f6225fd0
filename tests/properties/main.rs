//! Property-based test suite entry point.

mod currency;
