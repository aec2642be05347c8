// SPDX-License-Identifier: Apache-2.0

//! Reads a network file and prints its multi-output cuts, as text or as a
//! JSON report.

use clap::ArgMatches;
use lsv_aig::commands::{
    check_multi_output_cut_request, report_usage_error, run_print_multi_output_cuts,
    PRINT_MULTI_OUTPUT_CUTS_USAGE,
};
use lsv_aig::cuts::multi_output_cuts;

use crate::config::{get_bool, load_network_or_exit, LsvConfig};
use crate::report_cli_error::report_cli_error_and_exit;

const SUBCOMMAND: &str = "print-multi-output-cuts";

pub fn handle_print_multi_output_cuts(matches: &ArgMatches, config: &Option<LsvConfig>) -> i32 {
    let args: Vec<&str> = ["k", "l"]
        .iter()
        .filter_map(|name| matches.get_one::<String>(name).map(|s| s.as_str()))
        .collect();
    let json = get_bool(matches, "json", config.as_ref().and_then(|c| c.json), false);
    let network = load_network_or_exit(matches, config, SUBCOMMAND);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    if !json {
        return run_print_multi_output_cuts(
            Some(&network),
            &args,
            &mut stdout.lock(),
            &mut stderr.lock(),
        );
    }

    let (network, params) = match check_multi_output_cut_request(Some(&network), &args) {
        Ok(checked) => checked,
        Err(e) => {
            report_usage_error(&e, PRINT_MULTI_OUTPUT_CUTS_USAGE, &mut stderr.lock());
            return 1;
        }
    };
    let report = multi_output_cuts(network, &params);
    match report.to_json() {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => report_cli_error_and_exit(&e, Some(SUBCOMMAND), &[]),
    }
}
