// SPDX-License-Identifier: Apache-2.0

pub mod builder;
pub mod node;
pub mod sim;
pub mod topo;

pub use crate::network::builder::{BuilderOptions, NetworkBuilder};
pub use crate::network::node::{Network, NetworkKind, Node, NodeRef, Operand, Output};
