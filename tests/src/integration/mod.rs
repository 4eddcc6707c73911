//! # Integration Flows
//!
//! End-to-end tests against a relay bound to an ephemeral port.

pub mod relay_flows;
