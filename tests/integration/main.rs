//! Integration tests for recsync

mod cli_test;
mod helpers;
mod properties_test;
mod session_test;
