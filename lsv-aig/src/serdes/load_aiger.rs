// SPDX-License-Identifier: Apache-2.0

//! Loads an ASCII AIGER ("aag") file into a `Network`.
//!
//! Only purely combinational files (L == 0) are supported. The parser is
//! strict: an AND line may only reference variables defined above it, and
//! any structural inconsistency is an error.

use std::collections::HashMap;

use crate::network::builder::{BuilderOptions, NetworkBuilder};
use crate::network::node::{Network, Operand};

/// The loaded network together with the mapping from AIGER variable index to
/// operand (useful for diagnostics).
#[derive(Debug)]
pub struct LoadAigerResult {
    pub network: Network,
    pub var_to_operand: HashMap<u32, Operand>,
}

/// Counts from an AIGER header line `<kind> M I L O A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AigerHeader {
    pub inputs: u32,
    pub outputs: u32,
    pub ands: u32,
}

pub(crate) fn parse_header(header_line: &str, expected_kind: &str) -> Result<AigerHeader, String> {
    let header_tokens: Vec<&str> = header_line.split_whitespace().collect();
    if header_tokens.len() != 6 {
        return Err(format!(
            "expected 6 tokens in AIGER header, got {} (\"{}\")",
            header_tokens.len(),
            header_line
        ));
    }
    if header_tokens[0] != expected_kind {
        return Err(format!(
            "expected AIGER header kind '{}'; got '{}'",
            expected_kind, header_tokens[0]
        ));
    }
    let parse_u32 = |s: &str, field: &str| -> Result<u32, String> {
        s.parse::<u32>()
            .map_err(|e| format!("invalid {} value '{}': {}", field, s, e))
    };
    let m = parse_u32(header_tokens[1], "M")?;
    let inputs = parse_u32(header_tokens[2], "I")?;
    let latches = parse_u32(header_tokens[3], "L")?;
    let outputs = parse_u32(header_tokens[4], "O")?;
    let ands = parse_u32(header_tokens[5], "A")?;
    if latches != 0 {
        return Err("latch count (L) must be zero; sequential AIGER is not supported".to_string());
    }
    if u64::from(inputs) + u64::from(ands) > u64::from(m) {
        return Err(format!(
            "header declares I + A = {} variables but M = {}",
            u64::from(inputs) + u64::from(ands),
            m
        ));
    }
    Ok(AigerHeader {
        inputs,
        outputs,
        ands,
    })
}

pub(crate) fn lit_to_operand(
    lit: u32,
    nb: &mut NetworkBuilder,
    var_to_operand: &HashMap<u32, Operand>,
) -> Result<Operand, String> {
    let var = lit >> 1;
    let base = var_to_operand
        .get(&var)
        .copied()
        .ok_or_else(|| format!("referenced undefined variable {} (literal {})", var, lit))?;
    Ok(if lit & 1 == 1 { nb.add_not(base) } else { base })
}

/// Applies the optional symbol table (`i<n> name` / `o<n> name` lines, up to
/// the `c` comment marker) and then creates the outputs.
pub(crate) fn finish_with_symbol_table<'a>(
    symbol_lines: impl Iterator<Item = &'a str>,
    nb: &mut NetworkBuilder,
    var_to_operand: &HashMap<u32, Operand>,
    output_literals: &[u32],
) -> Result<(), String> {
    let mut sym_input_names: HashMap<usize, String> = HashMap::new();
    let mut sym_output_names: HashMap<usize, String> = HashMap::new();
    for line in symbol_lines {
        if line.starts_with('c') {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let mut chars = line.chars();
        let kind = chars.next();
        let rest = chars.as_str();
        let names = match kind {
            Some('i') => &mut sym_input_names,
            Some('o') => &mut sym_output_names,
            // Latch and justice symbols have no counterpart here.
            _ => continue,
        };
        let mut parts = rest.splitn(2, ' ');
        let idx: usize = parts
            .next()
            .unwrap_or_default()
            .parse()
            .map_err(|e| format!("invalid symbol index in '{}': {}", line, e))?;
        let name = parts
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| format!("malformed symbol '{}': missing name", line))?;
        names.insert(idx, name.to_string());
    }

    for (idx, name) in sym_input_names {
        let input = *nb
            .inputs
            .get(idx)
            .ok_or_else(|| format!("symbol for input {} but only {} inputs", idx, nb.inputs.len()))?;
        nb.set_name(input, name);
    }

    for (out_idx, lit) in output_literals.iter().enumerate() {
        let operand = lit_to_operand(*lit, nb, var_to_operand)?;
        let name = sym_output_names
            .remove(&out_idx)
            .unwrap_or_else(|| format!("o{}", out_idx));
        nb.add_output(name, operand);
    }
    Ok(())
}

/// Parses ASCII-AIGER text and builds a network with the supplied options.
pub fn load_aiger(src: &str, options: BuilderOptions) -> Result<LoadAigerResult, String> {
    let mut lines = src.lines();
    let header_line = lines
        .next()
        .ok_or_else(|| "empty AIGER input".to_string())?;
    let header = parse_header(header_line, "aag")?;

    fn next_non_empty_line<'a>(iter: &mut std::str::Lines<'a>) -> Option<&'a str> {
        iter.find(|line| !line.trim().is_empty())
    }

    let mut nb = NetworkBuilder::new_aig("loaded_aiger".to_string(), options);
    let mut var_to_operand: HashMap<u32, Operand> = HashMap::new();
    var_to_operand.insert(0, nb.get_false());

    for idx in 0..header.inputs {
        let line = next_non_empty_line(&mut lines)
            .ok_or_else(|| format!("expected {} input lines but found fewer", header.inputs))?;
        let lit: u32 = line
            .trim()
            .parse()
            .map_err(|e| format!("invalid input literal '{}': {}", line, e))?;
        if lit & 1 != 0 {
            return Err(format!(
                "input literal must be positive, got negated literal {}",
                lit
            ));
        }
        let var = lit >> 1;
        if var == 0 {
            return Err("input literal refers to constant false (0)".to_string());
        }
        if var_to_operand.contains_key(&var) {
            return Err(format!("duplicate input variable index {}", var));
        }
        let operand = nb.add_input(format!("i{}", idx));
        var_to_operand.insert(var, operand);
    }

    let mut output_literals: Vec<u32> = Vec::with_capacity(header.outputs as usize);
    for _ in 0..header.outputs {
        let line = next_non_empty_line(&mut lines)
            .ok_or_else(|| format!("expected {} output lines but found fewer", header.outputs))?;
        let lit: u32 = line
            .trim()
            .parse()
            .map_err(|e| format!("invalid output literal '{}': {}", line, e))?;
        output_literals.push(lit);
    }

    for _ in 0..header.ands {
        let line = next_non_empty_line(&mut lines)
            .ok_or_else(|| format!("expected {} AND lines but found fewer", header.ands))?;
        let toks: Vec<&str> = line.split_whitespace().collect();
        if toks.len() != 3 {
            return Err(format!("AND line should have 3 fields, got '{}'", line));
        }
        let parse_lit = |tok: &str, what: &str| -> Result<u32, String> {
            tok.parse()
                .map_err(|e| format!("invalid AND {} '{}': {}", what, tok, e))
        };
        let lhs = parse_lit(toks[0], "lhs")?;
        let rhs0 = parse_lit(toks[1], "rhs")?;
        let rhs1 = parse_lit(toks[2], "rhs")?;
        if lhs & 1 != 0 {
            return Err(format!("AND lhs literal {} must be positive (even)", lhs));
        }
        let lhs_var = lhs >> 1;
        if var_to_operand.contains_key(&lhs_var) {
            return Err(format!("variable {} already defined", lhs_var));
        }
        let rhs0 = lit_to_operand(rhs0, &mut nb, &var_to_operand)?;
        let rhs1 = lit_to_operand(rhs1, &mut nb, &var_to_operand)?;
        let and_op = nb.add_and_binary(rhs0, rhs1);
        var_to_operand.insert(lhs_var, and_op);
    }

    finish_with_symbol_table(lines, &mut nb, &var_to_operand, &output_literals)?;
    let network = nb.build();
    log::debug!(
        "load_aiger: inputs={} outputs={} ands_read={} and_nodes={}",
        network.inputs.len(),
        network.outputs.len(),
        header.ands,
        network.and_count()
    );
    Ok(LoadAigerResult {
        network,
        var_to_operand,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::node::{NetworkKind, Node, NodeRef};
    use crate::network::sim::eval;
    use pretty_assertions::assert_eq;

    const TWO_GATES: &str = "aag 5 3 0 2 2\n2\n4\n6\n8\n10\n8 2 4\n10 2 6\ni0 a\ni1 b\ni2 c\no0 g1\no1 g2\nc\nhand written\n";

    #[test]
    fn test_load_two_gates_keeps_aiger_numbering() {
        let loaded = load_aiger(TWO_GATES, BuilderOptions::opt()).unwrap();
        let g = &loaded.network;
        assert_eq!(g.kind, NetworkKind::Strash);
        assert_eq!(g.node_name(NodeRef { id: 1 }), "a");
        assert_eq!(g.node_name(NodeRef { id: 3 }), "c");
        assert_eq!(g.outputs[1].name, "g2");
        assert_eq!(loaded.var_to_operand[&5].node, NodeRef { id: 5 });
        match g.get(NodeRef { id: 5 }) {
            Node::And2 { a, b, .. } => {
                assert_eq!((a.node.id, b.node.id), (1, 3));
            }
            other => panic!("expected AND, got {:?}", other),
        }
    }

    #[test]
    fn test_load_negated_literals_simulate() {
        // o = !(a & !b)
        let src = "aag 3 2 0 1 1\n2\n4\n7\n6 2 5\n";
        let loaded = load_aiger(src, BuilderOptions::opt()).unwrap();
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(eval(&loaded.network, &[a, b]), vec![!(a && !b)]);
            }
        }
    }

    #[test]
    fn test_duplicate_and_is_hashed_only_with_opt() {
        let src = "aag 4 2 0 2 2\n2\n4\n6\n8\n6 2 4\n8 4 2\n";
        let hashed = load_aiger(src, BuilderOptions::opt()).unwrap();
        assert_eq!(hashed.network.and_count(), 1);
        let raw = load_aiger(src, BuilderOptions::no_opt()).unwrap();
        assert_eq!(raw.network.and_count(), 2);
        assert!(raw.network.check_strashed_aig().is_err());
    }

    #[test]
    fn test_rejects_latches() {
        let err = load_aiger("aag 1 0 1 0 0\n2 3\n", BuilderOptions::opt()).unwrap_err();
        assert!(err.contains("latch"), "{}", err);
    }

    #[test]
    fn test_rejects_forward_reference() {
        let err = load_aiger("aag 3 1 0 1 2\n2\n6\n6 2 4\n4 2 2\n", BuilderOptions::opt())
            .unwrap_err();
        assert!(err.contains("undefined variable 2"), "{}", err);
    }

    #[test]
    fn test_symbol_table_ignores_non_ascii_kind() {
        // Only `i` and `o` symbols are applied; any other leading character
        // (multi-byte ones included) names a section we skip.
        let loaded = load_aiger("aag 1 1 0 1 0\n2\n2\n\u{e9}0 x\ni0 a\n", BuilderOptions::opt())
            .unwrap();
        assert_eq!(loaded.network.node_name(NodeRef { id: 1 }), "a");
        assert_eq!(loaded.network.outputs[0].name, "o0");
    }

    #[test]
    fn test_rejects_non_ascii_symbol_index() {
        let err = load_aiger("aag 1 1 0 0 0\n2\ni\u{e9} x\n", BuilderOptions::opt()).unwrap_err();
        assert!(err.contains("invalid symbol index"), "{}", err);
    }

    #[test]
    fn test_rejects_short_file() {
        let err = load_aiger("aag 2 2 0 0 0\n2\n", BuilderOptions::opt()).unwrap_err();
        assert!(err.contains("input lines"), "{}", err);
    }
}
