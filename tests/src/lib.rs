//! # Game-Channel Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per crate
//! │   ├── relay.rs
//! │   └── signatures.rs
//! │
//! └── integration/      # Cross-crate flows over a live relay
//!     ├── relay_flows.rs
//!     └── signing_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p channel-tests
//! cargo test -p channel-tests integration::signing_flows
//! cargo bench -p channel-tests
//! ```

pub mod integration;
