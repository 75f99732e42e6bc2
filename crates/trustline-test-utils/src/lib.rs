// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Trustline integration tests.
//!
//! Provides mock backends and a harness for fast, deterministic,
//! CI-runnable conversation tests without external services.
//!
//! # Components
//!
//! - [`MockGenerator`] - scripted text-generation backend with call capture
//! - [`MockRetriever`] - fixed-snippet retrieval backend
//! - [`TestHarness`] - temp-dir stores, seeded orders, and a live session

pub mod harness;
pub mod mock_generator;
pub mod mock_retriever;

pub use harness::TestHarness;
pub use mock_generator::MockGenerator;
pub use mock_retriever::MockRetriever;
