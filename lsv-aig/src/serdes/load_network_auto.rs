// SPDX-License-Identifier: Apache-2.0

//! Loads a network from ASCII AIGER, binary AIGER or BLIF, dispatching on
//! the file contents rather than the extension.

use std::fs;
use std::path::Path;

use crate::network::builder::BuilderOptions;
use crate::network::node::Network;
use crate::serdes::load_aiger::load_aiger;
use crate::serdes::load_aiger_binary::load_aiger_binary;
use crate::serdes::load_blif::load_blif;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFormat {
    AsciiAiger,
    BinaryAiger,
    Blif,
}

/// Classifies `src` by its first token: `aag` and `aig` headers are AIGER,
/// anything else is treated as BLIF.
pub fn detect_format(src: &[u8]) -> NetworkFormat {
    let first_line_end = src.iter().position(|b| *b == b'\n').unwrap_or(src.len());
    let first_token = src[..first_line_end]
        .split(|b| b.is_ascii_whitespace())
        .find(|token| !token.is_empty());
    match first_token {
        Some(b"aag") => NetworkFormat::AsciiAiger,
        Some(b"aig") => NetworkFormat::BinaryAiger,
        _ => NetworkFormat::Blif,
    }
}

/// Parses network bytes of any supported format. `options` controls folding
/// and hashing for AIGER inputs; BLIF always yields a logic network.
pub fn load_network_auto(src: &[u8], options: BuilderOptions) -> Result<Network, String> {
    match detect_format(src) {
        NetworkFormat::AsciiAiger => {
            let text = std::str::from_utf8(src)
                .map_err(|e| format!("invalid UTF-8 in ASCII AIGER input: {}", e))?;
            load_aiger(text, options).map(|result| result.network)
        }
        NetworkFormat::BinaryAiger => load_aiger_binary(src, options).map(|result| result.network),
        NetworkFormat::Blif => {
            let text = std::str::from_utf8(src)
                .map_err(|e| format!("invalid UTF-8 in BLIF input: {}", e))?;
            load_blif(text)
        }
    }
}

/// Reads and parses a network file. AIGER networks are named after the file
/// stem since the format carries no model name.
pub fn load_network_from_path(path: &Path, options: BuilderOptions) -> Result<Network, String> {
    let contents =
        fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let mut network = load_network_auto(&contents, options)
        .map_err(|e| format!("failed to load {}: {}", path.display(), e))?;
    if detect_format(&contents) != NetworkFormat::Blif {
        if let Some(stem) = path.file_stem() {
            network.name = stem.to_string_lossy().into_owned();
        }
    }
    log::info!(
        "loaded {} ({:?}): {} input(s), {} output(s), {} internal node(s)",
        path.display(),
        network.kind,
        network.inputs.len(),
        network.outputs.len(),
        network.internal_nodes().count()
    );
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::node::NetworkKind;
    use std::io::Write;
    use test_case::test_case;

    #[test_case(b"aag 0 0 0 0 0\n", NetworkFormat::AsciiAiger)]
    #[test_case(b"aig 0 0 0 0 0\n", NetworkFormat::BinaryAiger)]
    #[test_case(b".model m\n.end\n", NetworkFormat::Blif)]
    #[test_case(b"", NetworkFormat::Blif)]
    fn test_detect_format(src: &[u8], want: NetworkFormat) {
        assert_eq!(detect_format(src), want);
    }

    #[test]
    fn test_load_from_path_names_aiger_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("and2.aag");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"aag 3 2 0 1 1\n2\n4\n6\n6 2 4\n").unwrap();
        drop(file);
        let g = load_network_from_path(&path, BuilderOptions::opt()).unwrap();
        assert_eq!(g.name, "and2");
        assert_eq!(g.kind, NetworkKind::Strash);
    }

    #[test]
    fn test_non_ascii_symbol_lines_do_not_panic() {
        let g = load_network_auto("aag 1 1 0 0 0\n2\n\u{e9}0 x\n".as_bytes(), BuilderOptions::opt())
            .unwrap();
        assert_eq!(g.inputs.len(), 1);

        let mut binary = b"aig 1 1 0 0 0\n".to_vec();
        binary.extend_from_slice("o\u{e9} x\n".as_bytes());
        let err = load_network_auto(&binary, BuilderOptions::opt()).unwrap_err();
        assert!(err.contains("invalid symbol index"), "{}", err);
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = load_network_from_path(Path::new("/nonexistent/x.aag"), BuilderOptions::opt())
            .unwrap_err();
        assert!(err.starts_with("failed to read"), "{}", err);
    }
}
