// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scripted stand-in for the external extraction and measurement tools

#![allow(dead_code)]

#[cfg(unix)]
pub mod shell;

use isosweep::harness::{CommandExecutor, CommandSpec, ProcessOutput};
use isosweep::{HarnessError, Result};
use std::cell::RefCell;

/// What the fake measurement tool reports for one extraction
pub enum Outcome {
    Metric(i64),
    Garbage,
    ExtractFails,
    Hangs,
}

/// Answers extraction, edge and measurement commands from a table of outcomes.
///
/// The outcome is chosen from the last extraction command's first flag,
/// isovalue and position, mirroring the fixed order the runner uses.
pub struct FakeTools<F> {
    outcome: F,
    pending: RefCell<Option<Outcome>>,
    pub calls: RefCell<Vec<CommandSpec>>,
}

impl<F> FakeTools<F>
where
    F: Fn(&str, &str, &str) -> Outcome,
{
    pub fn new(outcome: F) -> Self {
        Self {
            outcome,
            pending: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Programs invoked, in order
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }
}

fn ok(stdout: String) -> ProcessOutput {
    ProcessOutput {
        code: Some(0),
        stdout,
        stderr: String::new(),
    }
}

impl<F> CommandExecutor for FakeTools<F>
where
    F: Fn(&str, &str, &str) -> Outcome,
{
    fn execute(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(spec.clone());
        match spec.program.as_str() {
            "isodual3D" => {
                let args = &spec.args;
                let position = args
                    .iter()
                    .position(|a| a == "-position")
                    .expect("extraction command has -position");
                let policy = &args[position + 1];
                let isovalue = &args[args.len() - 2];
                let outcome = (self.outcome)(args[0].as_str(), isovalue.as_str(), policy.as_str());
                if matches!(outcome, Outcome::ExtractFails) {
                    return Ok(ProcessOutput {
                        code: Some(1),
                        stdout: String::new(),
                        stderr: "isodual3D: unable to read nrrd file".to_string(),
                    });
                }
                if matches!(outcome, Outcome::Hangs) {
                    return Err(HarnessError::TimedOut {
                        program: spec.program.clone(),
                        timeout: std::time::Duration::from_secs(1),
                    });
                }
                *self.pending.borrow_mut() = Some(outcome);
                Ok(ok(String::new()))
            }
            "findedge" => Ok(ok(String::new())),
            "findEdgeCount" => match self.pending.borrow_mut().take() {
                Some(Outcome::Metric(m)) => Ok(ok(format!("numEdges {} \n", m))),
                _ => Ok(ok("no edges found".to_string())),
            },
            other => Err(HarnessError::LaunchFailed {
                program: other.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            }),
        }
    }
}
