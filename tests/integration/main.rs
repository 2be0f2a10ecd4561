//! Integration test modules.

mod persistence_test;
mod tracker_flow_test;
mod view_mock;
