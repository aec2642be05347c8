// SPDX-License-Identifier: Apache-2.0

//! Command line driver for cut analysis of combinational networks.
//!
//! Sample usage:
//!
//! ```shell
//! $ cargo run -- print-nodes ../lsv-aig/tests/data/full_adder.blif
//! $ cargo run -- print-multi-output-cuts ../lsv-aig/tests/data/shared_fanin.aag 3 2
//! $ cargo run -- --config=lsv-config.toml \
//!     print-multi-output-cuts ../lsv-aig/tests/data/shared_fanin.aag 4 2 --json=true
//! ```

mod config;
mod print_multi_output_cuts;
mod print_nodes;
mod report_cli_error;

use clap::{Arg, ArgAction};
use report_cli_error::report_cli_error_and_exit;

trait AppExt {
    fn add_network_input_arg(self) -> Self;
    fn add_bool_arg(self, long: &'static str, help: &'static str) -> Self;
    fn add_load_args(self) -> Self;
}

impl AppExt for clap::Command {
    fn add_network_input_arg(self) -> Self {
        (self as clap::Command).arg(
            Arg::new("network_input_file")
                .help("The input network file (ASCII/binary AIGER or BLIF)")
                .required(true)
                .index(1),
        )
    }

    fn add_bool_arg(self, long: &'static str, help: &'static str) -> Self {
        (self as clap::Command).arg(
            Arg::new(long)
                .long(long)
                .value_name("BOOL")
                .action(ArgAction::Set)
                .value_parser(["true", "false"])
                .num_args(1)
                .help(help),
        )
    }

    fn add_load_args(self) -> Self {
        (self as clap::Command)
            .add_bool_arg("fold", "Fold constants while loading AIGER inputs")
            .add_bool_arg("hash", "Structurally hash AND nodes while loading AIGER inputs")
    }
}

fn main() {
    let _ = env_logger::try_init();

    log::info!("lsv-driver starting; version: {}", env!("CARGO_PKG_VERSION"));

    let matches = clap::Command::new("lsv-driver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command line driver for k-feasible and multi-output cut analysis")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("CONFIG")
                .help("Path to an lsv-config.toml file")
                .action(ArgAction::Set),
        )
        .subcommand(clap::Command::new("version").about("Prints the version of the driver"))
        .subcommand(
            clap::Command::new("print-nodes")
                .about("Prints every internal node with its fanins (and SOP, if any)")
                .add_network_input_arg()
                .add_load_args(),
        )
        .subcommand(
            clap::Command::new("print-multi-output-cuts")
                .about("Prints the k-feasible cuts shared by at least l nodes")
                .add_network_input_arg()
                .arg(
                    Arg::new("k")
                        .help("Maximum number of leaves per cut, 3 to 6")
                        .index(2)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("l")
                        .help("Minimum number of nodes sharing a cut, 1 to 4")
                        .index(3)
                        .allow_hyphen_values(true),
                )
                .add_load_args()
                .add_bool_arg("json", "Emit the report as JSON"),
        )
        .get_matches();

    let config_path = config::find_config_path(
        matches.get_one::<String>("config").map(|s| s.as_str()),
    );
    let config = config_path.map(|path| match config::load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            let path_text = path.display().to_string();
            let error_text = format!("{:#}", e);
            report_cli_error_and_exit(
                "could not load config",
                None,
                &[("path", path_text.as_str()), ("error", error_text.as_str())],
            )
        }
    });

    let exit_code = if let Some(matches) = matches.subcommand_matches("print-nodes") {
        print_nodes::handle_print_nodes(matches, &config)
    } else if let Some(matches) = matches.subcommand_matches("print-multi-output-cuts") {
        print_multi_output_cuts::handle_print_multi_output_cuts(matches, &config)
    } else if let Some(_matches) = matches.subcommand_matches("version") {
        println!("{}", env!("CARGO_PKG_VERSION"));
        0
    } else {
        report_cli_error_and_exit("No valid subcommand provided.", None, &[])
    };
    std::process::exit(exit_code);
}
