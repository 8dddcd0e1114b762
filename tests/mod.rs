//! Integration tests for ReelTUI
//!
//! Tests are organized by component:
//! - scroll_test: Nav bar visibility controller (hysteresis, springs, publishing)
//! - search_test: Title filter and debounced last-query-wins search
//! - ui_test: Full-frame rendering through the ratatui TestBackend
//! - cli_test: Argument parsing, command handlers, JSON output
//! - e2e_test: End-to-end flows (Home -> Search -> Detail -> Player)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
