// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extraction and measurement tools built from the system shell

use isosweep::harness::ToolConfig;
use std::path::{Path, PathBuf};

/// Writes `echo numEdges <n>` into the line file: 3 for `lnd2` meshes, 5 otherwise
const EDGE_SCRIPT: &str = r#"case "$1" in
  *_lnd2.off) n=3 ;;
  *) n=5 ;;
esac
printf 'echo numEdges %s\n' "$n" > "${1%.off}.line"
"#;

/// `true` extracts, `sh <script> <mesh>` writes the line file and
/// `bash -fp <line>` runs it as the measurement.
pub fn shell_tools(dir: &Path) -> ToolConfig {
    let script = dir.join("findedge.sh");
    std::fs::write(&script, EDGE_SCRIPT).unwrap();
    ToolConfig {
        extract: "true".to_string(),
        edge: "sh".to_string(),
        measure: "bash".to_string(),
        edge_param: script.canonicalize().unwrap().to_string_lossy().into_owned(),
    }
}

pub fn find_program(name: &str) -> PathBuf {
    let path = std::env::var_os("PATH").unwrap_or_default();
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| panic!("{} not found on PATH", name))
}
