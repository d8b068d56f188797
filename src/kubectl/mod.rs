// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! kubectl invocation: process runner, credential arguments and the subcommands used.

pub mod credentials;
pub mod runner;

pub use credentials::{resolve, ResolvedCredentials};
pub use runner::{command_line, CommandRunner, InvocationResult, ProcessRunner};

use crate::constants::flags;
use crate::error::Result;
use crate::types::{Manifest, ResourceReference};

/// kubectl bound to one operation's credentials
pub struct Kubectl<'a, R: CommandRunner> {
    runner: &'a R,
    program: &'a str,
    credentials: &'a ResolvedCredentials,
}

impl<'a, R: CommandRunner> Kubectl<'a, R> {
    pub fn new(runner: &'a R, program: &'a str, credentials: &'a ResolvedCredentials) -> Self {
        Self {
            runner,
            program,
            credentials,
        }
    }

    /// Full argument list: credential prefix first, then `args`
    pub fn args<S: AsRef<str>>(&self, args: &[S]) -> Vec<String> {
        self.credentials
            .args()
            .iter()
            .cloned()
            .chain(args.iter().map(|a| a.as_ref().to_string()))
            .collect()
    }

    /// Run one subcommand, failing on a nonzero exit
    pub async fn run<S: AsRef<str>>(&self, args: &[S], stdin: Option<&[u8]>) -> Result<InvocationResult> {
        let args = self.args(args);
        let result = self.runner.execute(self.program, &args, stdin).await?;
        result.into_result(&command_line(self.program, &args))
    }

    /// `apply -f -` with the manifest on stdin
    pub async fn apply(&self, manifest: &Manifest) -> Result<InvocationResult> {
        self.run(&["apply", "-f", "-"], Some(manifest.as_bytes())).await
    }

    /// `get -f - -o json` with the manifest on stdin as selector
    pub async fn get_json(&self, manifest: &Manifest) -> Result<InvocationResult> {
        self.run(&["get", "-f", "-", "-o", "json"], Some(manifest.as_bytes()))
            .await
    }

    /// `get --ignore-not-found <kind/name> [-n <namespace>]`
    pub async fn get_ignore_not_found(&self, reference: &ResourceReference) -> Result<InvocationResult> {
        let mut args = vec!["get".to_string(), flags::IGNORE_NOT_FOUND.to_string()];
        args.extend(reference.args());
        self.run(args.as_slice(), None).await
    }

    /// `delete <kind/name> [-n <namespace>]`
    pub async fn delete(&self, reference: &ResourceReference) -> Result<InvocationResult> {
        let mut args = vec!["delete".to_string()];
        args.extend(reference.args());
        self.run(args.as_slice(), None).await
    }
}
