//! Test Module
//!
//! Cross-module test suite for the portfolio assistant backend.
//!
//! ## Test Categories
//! - `mocks`: Mock model actor, scripted classifiers and fixtures
//! - `routing_tests`: Tier ordering, delegation, timeouts and the scan window
//! - `fallback_tests`: Category precedence and the no-match reply
//! - `chat_tests`: Chat service degradation, caching and job-fit extraction
//! - `server_tests`: HTTP surface over a real listener

pub mod mocks;

mod routing_tests;
