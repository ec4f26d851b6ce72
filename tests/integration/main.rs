//! Integration tests for Fragment-Scout
//!
//! These tests use wiremock to stand in for the marketplace and exercise the
//! full fetch → classify → collect pipeline end-to-end, plus the HTTP API.

mod check_tests;
