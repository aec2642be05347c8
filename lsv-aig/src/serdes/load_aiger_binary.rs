// SPDX-License-Identifier: Apache-2.0

//! Loads a binary AIGER ("aig") file into a `Network`.
//!
//! Only purely combinational files (L == 0) are supported. AND gates are
//! implicitly numbered after the inputs and stored as two LEB128-style
//! deltas each.

use std::collections::HashMap;

use crate::network::builder::{BuilderOptions, NetworkBuilder};
use crate::network::node::Operand;
use crate::serdes::load_aiger::{
    finish_with_symbol_table, lit_to_operand, parse_header, LoadAigerResult,
};

/// Parses binary-AIGER bytes and builds a network with the supplied options.
pub fn load_aiger_binary(src: &[u8], options: BuilderOptions) -> Result<LoadAigerResult, String> {
    let (header_line, mut cursor) = read_ascii_line(src, 0)?;
    let header = parse_header(&header_line, "aig")?;

    let mut nb = NetworkBuilder::new_aig("loaded_aiger".to_string(), options);
    let mut var_to_operand: HashMap<u32, Operand> = HashMap::new();
    var_to_operand.insert(0, nb.get_false());
    for idx in 0..header.inputs {
        let operand = nb.add_input(format!("i{}", idx));
        var_to_operand.insert(idx + 1, operand);
    }

    let mut output_literals: Vec<u32> = Vec::with_capacity(header.outputs as usize);
    for _ in 0..header.outputs {
        let (line, next_cursor) = read_ascii_line(src, cursor)?;
        cursor = next_cursor;
        let lit: u32 = line
            .trim()
            .parse()
            .map_err(|e| format!("invalid output literal '{}': {}", line, e))?;
        output_literals.push(lit);
    }

    for and_idx in 0..header.ands {
        let delta0 = decode_u32_varint(src, &mut cursor)?;
        let delta1 = decode_u32_varint(src, &mut cursor)?;
        let lhs_var = header.inputs + and_idx + 1;
        let lhs_lit = lhs_var << 1;
        let rhs0 = lhs_lit
            .checked_sub(delta0)
            .ok_or_else(|| format!("invalid AIGER delta0 {} for lhs {}", delta0, lhs_lit))?;
        let rhs1 = rhs0
            .checked_sub(delta1)
            .ok_or_else(|| format!("invalid AIGER delta1 {} for rhs0 {}", delta1, rhs0))?;
        let rhs0_op = lit_to_operand(rhs0, &mut nb, &var_to_operand)?;
        let rhs1_op = lit_to_operand(rhs1, &mut nb, &var_to_operand)?;
        let and_op = nb.add_and_binary(rhs0_op, rhs1_op);
        var_to_operand.insert(lhs_var, and_op);
    }

    let tail = std::str::from_utf8(&src[cursor..])
        .map_err(|e| format!("invalid UTF-8 in symbol/comment tail: {}", e))?;
    finish_with_symbol_table(tail.lines(), &mut nb, &var_to_operand, &output_literals)?;
    let network = nb.build();
    log::debug!(
        "load_aiger_binary: inputs={} outputs={} ands_read={} and_nodes={}",
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

fn read_ascii_line(src: &[u8], start: usize) -> Result<(String, usize), String> {
    if start >= src.len() {
        return Err("unexpected EOF while reading ASCII line".to_string());
    }
    let end = src[start..]
        .iter()
        .position(|b| *b == b'\n')
        .ok_or_else(|| "unterminated ASCII line in AIGER input".to_string())?;
    let line = std::str::from_utf8(&src[start..start + end])
        .map_err(|e| format!("invalid UTF-8 in AIGER line: {}", e))?;
    Ok((line.to_string(), start + end + 1))
}

fn decode_u32_varint(src: &[u8], cursor: &mut usize) -> Result<u32, String> {
    let mut shift = 0u32;
    let mut acc = 0u32;
    loop {
        let byte = *src
            .get(*cursor)
            .ok_or_else(|| "unexpected EOF while reading AIGER varint".to_string())?;
        *cursor += 1;
        acc |= ((byte & 0x7f) as u32) << shift;
        if byte & 0x80 == 0 {
            return Ok(acc);
        }
        shift += 7;
        if shift >= 32 {
            return Err("AIGER varint overflow".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::node::NodeRef;
    use crate::network::sim::eval;
    use crate::serdes::load_aiger::load_aiger;
    use pretty_assertions::assert_eq;

    fn encode_varint(mut value: u32, out: &mut Vec<u8>) {
        while value >= 0x80 {
            out.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        out.push(value as u8);
    }

    /// Binary form of `aag 5 3 0 2 2` with `8 = 4 & 2` and `10 = 6 & 2`.
    fn two_gates_binary(symbols: &str) -> Vec<u8> {
        let mut bytes = b"aig 5 3 0 2 2\n8\n10\n".to_vec();
        for (lhs, rhs0, rhs1) in [(8u32, 4u32, 2u32), (10, 6, 2)] {
            encode_varint(lhs - rhs0, &mut bytes);
            encode_varint(rhs0 - rhs1, &mut bytes);
        }
        bytes.extend_from_slice(symbols.as_bytes());
        bytes
    }

    #[test]
    fn test_varint_multi_byte() {
        let mut bytes = Vec::new();
        encode_varint(300, &mut bytes);
        assert_eq!(bytes, vec![0xac, 0x02]);
        let mut cursor = 0;
        assert_eq!(decode_u32_varint(&bytes, &mut cursor), Ok(300));
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_binary_matches_ascii() {
        let binary = load_aiger_binary(&two_gates_binary("i0 a\no1 g2\n"), BuilderOptions::opt())
            .unwrap()
            .network;
        let ascii = load_aiger(
            "aag 5 3 0 2 2\n2\n4\n6\n8\n10\n8 4 2\n10 6 2\ni0 a\no1 g2\n",
            BuilderOptions::opt(),
        )
        .unwrap()
        .network;
        assert_eq!(binary.nodes, ascii.nodes);
        assert_eq!(binary.node_name(NodeRef { id: 1 }), "a");
        assert_eq!(binary.outputs[0].name, "o0");
        assert_eq!(binary.outputs[1].name, "g2");
        for bits in 0..8u32 {
            let inputs: Vec<bool> = (0..3).map(|i| (bits >> i) & 1 == 1).collect();
            assert_eq!(eval(&binary, &inputs), eval(&ascii, &inputs));
        }
    }

    #[test]
    fn test_truncated_and_section() {
        let mut bytes = two_gates_binary("");
        bytes.truncate(bytes.len() - 1);
        let err = load_aiger_binary(&bytes, BuilderOptions::opt()).unwrap_err();
        assert!(err.contains("EOF"), "{}", err);
    }
}
