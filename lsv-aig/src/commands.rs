// SPDX-License-Identifier: Apache-2.0

//! The `print_nodes` and `print_multi_output_cuts` commands.
//!
//! The `run_*` functions take raw string arguments and report to
//! caller-supplied streams, returning a process-style exit code. The typed
//! entry points underneath are what the driver and tests call directly.

use std::io::Write;

use crate::cuts::multi_output::{multi_output_cuts, MultiOutputCutParams, MultiOutputCutReport};
use crate::lsv_error::UsageError;
use crate::network::node::{Network, Node};

pub const PRINT_NODES_USAGE: &str = "usage: print_nodes [-h]\n\
\t        prints the nodes in the network\n\
\t-h    : print the command usage\n";

pub const PRINT_MULTI_OUTPUT_CUTS_USAGE: &str = "usage: print_multi_output_cuts [-h] <k> <l>\n\
\t        prints the k-feasible cuts shared by at least l nodes\n\
\t<k>   : maximum number of leaves per cut, 3 to 6\n\
\t<l>   : minimum number of nodes sharing a cut, 1 to 4\n\
\t-h    : print the command usage\n";

/// Prints every internal node with its fanins, plus its SOP cover when the
/// network carries covers.
pub fn print_nodes(network: &Network, out: &mut dyn Write) -> std::io::Result<()> {
    for node_ref in network.internal_nodes() {
        writeln!(
            out,
            "Object Id = {}, name = {}",
            node_ref.id,
            network.node_name(node_ref)
        )?;
        let node = network.get(node_ref);
        for (j, fanin) in node.get_fanins().into_iter().enumerate() {
            writeln!(
                out,
                "  Fanin-{}: Id = {}, name = {}",
                j,
                fanin.id,
                network.node_name(fanin)
            )?;
        }
        if network.has_sop() {
            if let Node::Logic { sop, .. } = node {
                write!(out, "The SOP of this node:\n{}", sop)?;
            }
        }
    }
    Ok(())
}

/// Computes and prints the multi-output cuts of `network`, returning the
/// report that was printed.
///
/// `network` must already have passed `Network::check_strashed_aig`.
pub fn print_multi_output_cuts(
    network: &Network,
    params: &MultiOutputCutParams,
    out: &mut dyn Write,
) -> std::io::Result<MultiOutputCutReport> {
    let report = multi_output_cuts(network, params);
    report.write_text(out)?;
    Ok(report)
}

/// Checks, in order, that a network is loaded, that it is a strashed AIG,
/// that two arguments are present, and that `k` then `l` are in range.
pub fn check_multi_output_cut_request<'a>(
    network: Option<&'a Network>,
    args: &[&str],
) -> Result<(&'a Network, MultiOutputCutParams), UsageError> {
    if args.iter().any(|arg| *arg == "-h") {
        return Err(UsageError::HelpRequested);
    }
    let network = network.ok_or(UsageError::NoNetwork)?;
    network
        .check_strashed_aig()
        .map_err(UsageError::NotStrashed)?;
    match args {
        [k, l] => Ok((network, MultiOutputCutParams::parse(k, l)?)),
        [_, _, extra, ..] => Err(UsageError::UnexpectedArgument(extra.to_string())),
        _ => Err(UsageError::MissingArguments {
            expected: 2,
            got: args.len(),
        }),
    }
}

/// Writes `error` (and, when it calls for it, the command usage) to `err`.
pub fn report_usage_error(error: &UsageError, usage: &str, err: &mut dyn Write) {
    // Failing to write a diagnostic leaves nothing better to do.
    if !matches!(error, UsageError::HelpRequested) {
        let _ = writeln!(err, "{}", error);
    }
    if error.shows_usage() {
        let _ = write!(err, "{}", usage);
    }
}

pub fn run_print_nodes(
    network: Option<&Network>,
    args: &[&str],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let checked = match args.first() {
        Some(&"-h") => Err(UsageError::HelpRequested),
        Some(arg) => Err(UsageError::UnexpectedArgument(arg.to_string())),
        None => network.ok_or(UsageError::NoNetwork),
    };
    let network = match checked {
        Ok(network) => network,
        Err(e) => {
            report_usage_error(&e, PRINT_NODES_USAGE, err);
            return 1;
        }
    };
    match print_nodes(network, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "print_nodes: failed to write output: {}", e);
            1
        }
    }
}

pub fn run_print_multi_output_cuts(
    network: Option<&Network>,
    args: &[&str],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let (network, params) = match check_multi_output_cut_request(network, args) {
        Ok(checked) => checked,
        Err(e) => {
            report_usage_error(&e, PRINT_MULTI_OUTPUT_CUTS_USAGE, err);
            return 1;
        }
    };
    log::debug!(
        "print_multi_output_cuts: network={} k={} l={}",
        network.name,
        params.k(),
        params.l()
    );
    match print_multi_output_cuts(network, &params, out) {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(err, "print_multi_output_cuts: failed to write output: {}", e);
            1
        }
    }
}
