// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for scripting kubectl invocations.

use crate::constants::flags;
use crate::error::Result;
use crate::kubectl::{CommandRunner, InvocationResult};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One call made against the mock, as the process would have seen it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
    /// Whether the `--kubeconfig` file existed while the call ran
    pub kubeconfig_existed: Option<bool>,
}

impl RecordedInvocation {
    /// Value following `flag`, if present
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Arguments after the credential prefix
    pub fn command_args(&self) -> Vec<&str> {
        let mut rest = self.args.as_slice();
        while let [flag, _, tail @ ..] = rest {
            if flag == flags::KUBECONFIG || flag == flags::CONTEXT {
                rest = tail;
            } else {
                break;
            }
        }
        rest.iter().map(String::as_str).collect()
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.command_args().first().copied()
    }
}

/// A mock runner that returns predefined results keyed by subcommand.
///
/// Results queued for the same subcommand are handed out in order; the last
/// one keeps being returned. Unmatched calls succeed with empty output.
#[derive(Clone, Default)]
pub struct MockRunner {
    responses: Arc<Mutex<HashMap<String, VecDeque<InvocationResult>>>>,
    invocations: Arc<Mutex<Vec<RecordedInvocation>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for calls whose subcommand is `subcommand`
    pub fn on(self, subcommand: &str, result: InvocationResult) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(subcommand.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn invocations(&self) -> Vec<RecordedInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    fn next_response(&self, subcommand: Option<&str>) -> InvocationResult {
        let mut responses = self.responses.lock().unwrap();
        let Some(queue) = subcommand.and_then(|s| responses.get_mut(s)) else {
            return success("");
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_default()
        } else {
            queue.front().cloned().unwrap_or_default()
        }
    }
}

impl CommandRunner for MockRunner {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> Result<InvocationResult> {
        let mut invocation = RecordedInvocation {
            program: program.to_string(),
            args: args.to_vec(),
            stdin: stdin.map(<[u8]>::to_vec),
            kubeconfig_existed: None,
        };
        invocation.kubeconfig_existed = invocation
            .flag_value(flags::KUBECONFIG)
            .map(|path| Path::new(path).exists());

        let response = self.next_response(invocation.subcommand());
        self.invocations.lock().unwrap().push(invocation);
        Ok(response)
    }
}

/// Successful exit with `stdout`
pub fn success(stdout: &str) -> InvocationResult {
    InvocationResult {
        exit_code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Failed exit with `code` and `stderr`
pub fn failure(code: i32, stderr: &str) -> InvocationResult {
    InvocationResult {
        exit_code: Some(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// `kubectl get -o json` output listing the given self-links
pub fn item_list_json(self_links: &[&str]) -> String {
    let items: Vec<_> = self_links
        .iter()
        .map(|link| {
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "ConfigMap",
                "metadata": {
                    "name": link.rsplit('/').next().unwrap_or_default(),
                    "selfLink": link,
                }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": items,
        "metadata": { "resourceVersion": "" }
    })
    .to_string()
}
