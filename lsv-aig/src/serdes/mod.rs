// SPDX-License-Identifier: Apache-2.0

pub mod load_aiger;
pub mod load_aiger_binary;
pub mod load_blif;
pub mod load_network_auto;
