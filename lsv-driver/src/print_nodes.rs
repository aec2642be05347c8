// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;
use lsv_aig::commands::run_print_nodes;

use crate::config::{load_network_or_exit, LsvConfig};

pub fn handle_print_nodes(matches: &ArgMatches, config: &Option<LsvConfig>) -> i32 {
    let network = load_network_or_exit(matches, config, "print-nodes");
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_print_nodes(Some(&network), &[], &mut stdout.lock(), &mut stderr.lock())
}
