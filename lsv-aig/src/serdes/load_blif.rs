// SPDX-License-Identifier: Apache-2.0

//! Loads a combinational BLIF model into a logic `Network`.
//!
//! Understood subset: `.model`, `.inputs`, `.outputs`, `.names` with a
//! single-output SOP cover, and `.end`. `#` starts a comment and a trailing
//! `\` continues a line. `.names` blocks may appear in any order; nodes are
//! created in dependency order.

use std::collections::HashMap;

use crate::network::builder::NetworkBuilder;
use crate::network::node::{Network, Node, NodeRef, Operand};
use crate::network::topo::topo_order_and_cycle_check;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamesBlock {
    pub inputs: Vec<String>,
    pub output: String,
    /// Cover lines as written, e.g. `11 1` or `1` for a constant.
    pub cubes: Vec<String>,
}

impl NamesBlock {
    /// The cover as newline-terminated text.
    pub fn sop(&self) -> String {
        self.cubes.iter().map(|cube| format!("{}\n", cube)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlifModel {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub names: Vec<NamesBlock>,
}

/// Joins `\`-continued lines and strips comments, yielding (line number,
/// text) for non-empty logical lines.
fn logical_lines(src: &str) -> Vec<(usize, String)> {
    let mut result = Vec::new();
    let mut pending = String::new();
    let mut pending_start = 0;
    for (i, raw) in src.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("");
        if pending.is_empty() {
            pending_start = i + 1;
        }
        if let Some(stripped) = line.trim_end().strip_suffix('\\') {
            pending.push_str(stripped);
            pending.push(' ');
            continue;
        }
        pending.push_str(line);
        let text = pending.trim().to_string();
        pending.clear();
        if !text.is_empty() {
            result.push((pending_start, text));
        }
    }
    let text = pending.trim().to_string();
    if !text.is_empty() {
        result.push((pending_start, text));
    }
    result
}

fn check_cube(lineno: usize, cube_line: &str, fanin_count: usize) -> Result<(), String> {
    let tokens: Vec<&str> = cube_line.split_whitespace().collect();
    let (cube, out) = match (fanin_count, tokens.as_slice()) {
        (0, [out]) => ("", *out),
        (n, [cube, out]) if n > 0 => (*cube, *out),
        _ => {
            return Err(format!(
                "line {}: malformed cover line '{}' for {} fanin(s)",
                lineno, cube_line, fanin_count
            ))
        }
    };
    if cube.len() != fanin_count || !cube.chars().all(|c| matches!(c, '0' | '1' | '-')) {
        return Err(format!(
            "line {}: cube '{}' must have {} characters from 0, 1, -",
            lineno, cube, fanin_count
        ));
    }
    if out != "0" && out != "1" {
        return Err(format!(
            "line {}: cover output must be 0 or 1, got '{}'",
            lineno, out
        ));
    }
    Ok(())
}

/// Parses BLIF text into its model description without resolving signals.
pub fn parse_blif(src: &str) -> Result<BlifModel, String> {
    let mut model = BlifModel {
        name: String::new(),
        inputs: Vec::new(),
        outputs: Vec::new(),
        names: Vec::new(),
    };
    let mut current: Option<NamesBlock> = None;
    let mut seen_model = false;
    for (lineno, line) in logical_lines(src) {
        let mut tokens = line.split_whitespace();
        let first = tokens.next().unwrap_or_default();
        if !first.starts_with('.') {
            let block = current
                .as_mut()
                .ok_or_else(|| format!("line {}: cover line outside of .names", lineno))?;
            check_cube(lineno, &line, block.inputs.len())?;
            block.cubes.push(line.clone());
            continue;
        }
        if let Some(block) = current.take() {
            model.names.push(block);
        }
        match first {
            ".model" => {
                if seen_model {
                    return Err(format!(
                        "line {}: only a single .model per file is supported",
                        lineno
                    ));
                }
                seen_model = true;
                model.name = tokens.next().unwrap_or("blif").to_string();
            }
            ".inputs" => model.inputs.extend(tokens.map(str::to_string)),
            ".outputs" => model.outputs.extend(tokens.map(str::to_string)),
            ".names" => {
                let mut signals: Vec<String> = tokens.map(str::to_string).collect();
                let output = signals
                    .pop()
                    .ok_or_else(|| format!("line {}: .names without signals", lineno))?;
                current = Some(NamesBlock {
                    inputs: signals,
                    output,
                    cubes: Vec::new(),
                });
            }
            ".end" => break,
            other => {
                return Err(format!(
                    "line {}: unsupported BLIF construct '{}'",
                    lineno, other
                ))
            }
        }
    }
    if let Some(block) = current.take() {
        model.names.push(block);
    }
    if model.name.is_empty() {
        model.name = "blif".to_string();
    }
    Ok(model)
}

/// Resolves the model's signals and builds a logic network. Inputs take ids
/// `1..=inputs.len()`; `.names` nodes follow in dependency order.
pub fn build_network(model: &BlifModel) -> Result<Network, String> {
    // Provisional ids: 0 constant, then inputs, then `.names` blocks in file
    // order (fanins may point forward).
    let mut provisional: HashMap<&str, usize> = HashMap::new();
    for (i, input) in model.inputs.iter().enumerate() {
        if provisional.insert(input.as_str(), i + 1).is_some() {
            return Err(format!("input '{}' declared twice", input));
        }
    }
    let first_block_id = model.inputs.len() + 1;
    for (i, block) in model.names.iter().enumerate() {
        if provisional
            .insert(block.output.as_str(), first_block_id + i)
            .is_some()
        {
            return Err(format!("signal '{}' is driven more than once", block.output));
        }
    }
    let resolve = |name: &str| -> Result<usize, String> {
        provisional
            .get(name)
            .copied()
            .ok_or_else(|| format!("signal '{}' is used but never defined", name))
    };

    let mut nodes: Vec<Node> = vec![Node::Literal(false)];
    for input in &model.inputs {
        nodes.push(Node::Input {
            name: input.clone(),
        });
    }
    for block in &model.names {
        let fanins = block
            .inputs
            .iter()
            .map(|name| resolve(name).map(|id| NodeRef { id }))
            .collect::<Result<Vec<_>, _>>()?;
        nodes.push(Node::Logic {
            fanins,
            sop: block.sop(),
            name: Some(block.output.clone()),
        });
    }

    let (order, cycle) = topo_order_and_cycle_check(&nodes);
    if let Some(not_visited) = cycle {
        let on_cycle: Vec<&str> = not_visited
            .iter()
            .filter_map(|id| nodes[*id].get_name())
            .collect();
        return Err(format!(
            "combinational cycle through signal(s): {}",
            on_cycle.join(", ")
        ));
    }

    let mut nb = NetworkBuilder::new_logic(model.name.clone());
    let mut final_ids: Vec<NodeRef> = vec![NodeRef { id: 0 }; nodes.len()];
    for provisional_ref in order {
        match &nodes[provisional_ref.id] {
            Node::Literal(_) => {}
            Node::Input { name } => {
                final_ids[provisional_ref.id] = nb.add_input(name.clone()).node;
            }
            Node::Logic { fanins, sop, name } => {
                let fanins = fanins.iter().map(|f| final_ids[f.id]).collect();
                let node_ref = nb.add_logic_node(fanins, sop.clone());
                if let Some(name) = name {
                    nb.set_name(node_ref, name.clone());
                }
                final_ids[provisional_ref.id] = node_ref;
            }
            Node::And2 { .. } => unreachable!("BLIF models only produce logic nodes"),
        }
    }
    for output in &model.outputs {
        let id = resolve(output)?;
        nb.add_output(output.clone(), Operand::from(final_ids[id]));
    }
    Ok(nb.build())
}

/// Parses BLIF text into a logic network.
pub fn load_blif(src: &str) -> Result<Network, String> {
    let model = parse_blif(src)?;
    let network = build_network(&model)?;
    log::debug!(
        "load_blif: model={} inputs={} outputs={} nodes={}",
        network.name,
        network.inputs.len(),
        network.outputs.len(),
        network.internal_nodes().count()
    );
    Ok(network)
}
