// SPDX-License-Identifier: Apache-2.0

//! Fatal, user-facing driver errors: a red headline on stderr followed by
//! indented `key: value` context lines, then exit code 1.

use colored::Colorize;

fn render_cli_error(message: &str, subcommand: Option<&str>, details: &[(&str, &str)]) -> String {
    let mut text = String::from("lsv-driver: ");
    if let Some(subcommand) = subcommand {
        text.push_str(subcommand);
        text.push_str(": ");
    }
    text.push_str(&message.red().bold().to_string());
    text.push('\n');
    for (key, value) in details {
        text.push_str(&format!("  {}: {}\n", key, value));
    }
    text
}

pub fn report_cli_error_and_exit(
    message: &str,
    subcommand: Option<&str>,
    details: &[(&str, &str)],
) -> ! {
    eprint!("{}", render_cli_error(message, subcommand, details));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_with_subcommand_and_details() {
        colored::control::set_override(false);
        let text = render_cli_error(
            "could not load network",
            Some("print-nodes"),
            &[("path", "x.aag"), ("error", "failed to read x.aag")],
        );
        assert_eq!(
            text,
            "lsv-driver: print-nodes: could not load network\n  path: x.aag\n  error: failed to read x.aag\n"
        );
        assert_eq!(render_cli_error("bad", None, &[]), "lsv-driver: bad\n");
    }
}
