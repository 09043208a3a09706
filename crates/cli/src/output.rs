// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use azp_core::ContainerId;
use azp_pool::BuildContext;
use clap::ValueEnum;
use serde::Serialize;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One agent container that came up healthy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchedAgent {
    pub name: String,
    pub id: ContainerId,
}

/// Text line for a launched agent: the full container ID, nothing else.
pub fn launched_line(agent: &LaunchedAgent) -> String {
    agent.id.to_string()
}

pub fn launched_json(agents: &[LaunchedAgent]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(agents)?)
}

/// Human summary of a freshly written build context.
pub fn build_ctx_text(ctx: &BuildContext, image: &str) -> String {
    let root = ctx.root.display().to_string();
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", color::header("Build context:"), color::literal(&root)));
    for path in [&ctx.dockerfile, &ctx.script] {
        out.push_str(&format!("  {}\n", path.display()));
    }
    out.push_str(&format!(
        "\n{}\n  {}\n",
        color::context("Build the agent image with:"),
        color::literal(&format!("docker build -t {} {}", image, root))
    ));
    out
}

pub fn build_ctx_json(ctx: &BuildContext) -> anyhow::Result<String> {
    let obj = serde_json::json!({
        "root": ctx.root,
        "dockerfile": ctx.dockerfile,
        "script": ctx.script,
    });
    Ok(serde_json::to_string_pretty(&obj)?)
}
