// SPDX-License-Identifier: Apache-2.0

//! Single-pattern evaluation of a `Network`.

use crate::network::node::{Network, Node};

/// Evaluates a single-output SOP cover on the given fanin values.
///
/// Each line is `<cube> <bit>` where the cube has one of `0`, `1`, `-` per
/// fanin. A cover whose output bit is `0` describes the off-set. A
/// constant node has cubes with no input part (`1` or `0`); an empty cover is
/// constant false.
pub fn eval_sop(sop: &str, fanin_values: &[bool]) -> bool {
    let mut on_set = true;
    let mut any_cube_matches = false;
    for line in sop.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (cube, out) = match tokens.as_slice() {
            [out] => ("", *out),
            [cube, out] => (*cube, *out),
            _ => continue,
        };
        on_set = out == "1";
        let matches = cube
            .chars()
            .zip(fanin_values.iter())
            .all(|(c, value)| match c {
                '1' => *value,
                '0' => !*value,
                _ => true,
            });
        if matches {
            any_cube_matches = true;
        }
    }
    if on_set {
        any_cube_matches
    } else {
        !any_cube_matches
    }
}

/// Evaluates every node of `network` for one input assignment (one value per
/// primary input, in input order) and returns the value of each node.
pub fn eval_nodes(network: &Network, inputs: &[bool]) -> Vec<bool> {
    assert_eq!(
        inputs.len(),
        network.inputs.len(),
        "eval_nodes: expected {} input values, got {}",
        network.inputs.len(),
        inputs.len()
    );
    let mut values = vec![false; network.nodes.len()];
    for (input, value) in network.inputs.iter().zip(inputs.iter()) {
        values[input.id] = *value;
    }
    // Fanins always precede their readers in the arena.
    for (id, node) in network.nodes.iter().enumerate() {
        match node {
            Node::Literal(value) => values[id] = *value,
            Node::Input { .. } => {}
            Node::And2 { a, b, .. } => {
                let a_value = values[a.node.id] ^ a.negated;
                let b_value = values[b.node.id] ^ b.negated;
                values[id] = a_value && b_value;
            }
            Node::Logic { fanins, sop, .. } => {
                let fanin_values: Vec<bool> = fanins.iter().map(|f| values[f.id]).collect();
                values[id] = eval_sop(sop, &fanin_values);
            }
        }
    }
    values
}

/// Evaluates the primary outputs of `network` for one input assignment.
pub fn eval(network: &Network, inputs: &[bool]) -> Vec<bool> {
    let values = eval_nodes(network, inputs);
    network
        .outputs
        .iter()
        .map(|output| values[output.operand.node.id] ^ output.operand.negated)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("11 1\n", &[true, true], true; "and on-set hit")]
    #[test_case("11 1\n", &[true, false], false; "and on-set miss")]
    #[test_case("1- 1\n-1 1\n", &[false, true], true; "or second cube")]
    #[test_case("00 0\n", &[false, false], false; "nor off-set hit")]
    #[test_case("00 0\n", &[true, false], true; "nor off-set miss")]
    #[test_case("1\n", &[], true; "constant one")]
    #[test_case("", &[], false; "empty cover")]
    fn test_eval_sop(sop: &str, values: &[bool], want: bool) {
        assert_eq!(eval_sop(sop, values), want);
    }
}
