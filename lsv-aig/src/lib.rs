// SPDX-License-Identifier: Apache-2.0

//! Cut analysis over and-inverter graphs: k-feasible cut enumeration and
//! multi-output cut aggregation, plus the network arena, loaders and command
//! entry points around them.

pub mod commands;
pub mod cuts;
pub mod lsv_error;
pub mod network;
pub mod serdes;
pub mod test_utils;

pub use lsv_error::UsageError;
