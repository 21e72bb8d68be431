// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Library half of `gitbelld`: the reconciliation engine, alert dispatch,
//! scheduling and the IPC server. The binary wires these together.

pub mod alert;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod scheduler;
pub mod server;

#[cfg(test)]
mod test_support;

pub use engine::{Engine, PassResult, ResourceOutcome};
pub use error::{Error, Result};
