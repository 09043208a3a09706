// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `azpool start`: launch agent containers and wait for each to come up.

use std::time::Duration;

use anyhow::Result;
use azp_adapters::{resolve_token, DockerEngine};
use azp_core::AgentConfig;
use azp_pool::{numbered_configs, PoolLauncher};
use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::exit_error::ExitError;
use crate::output::{self, LaunchedAgent, OutputFormat};

#[derive(Args)]
pub struct StartArgs {
    /// Organization URL, e.g. https://dev.azure.com/contoso [env: AZP_URL]
    #[arg(long)]
    pub url: Option<String>,

    /// Personal access token [env: AZP_TOKEN, AZP_TOKEN_FILE]
    #[arg(long)]
    pub token: Option<String>,

    /// Agent pool to join [env: AZP_POOL]
    #[arg(long)]
    pub pool: Option<String>,

    /// Container and agent name [env: AZP_AGENT_NAME]
    #[arg(long)]
    pub name: Option<String>,

    /// Number of agents; more than one suffixes names with -1, -2, ...
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Agent image [env: AZPOOL_IMAGE]
    #[arg(long)]
    pub image: Option<String>,

    /// Seconds between health probes [env: AZPOOL_POLL_INTERVAL_MS]
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Give up on the health check after this many seconds [env: AZPOOL_HEALTH_TIMEOUT_MS]
    #[arg(long, value_name = "SECS")]
    pub health_timeout: Option<u64>,

    /// Force-remove every created container if a launch fails
    #[arg(long)]
    pub rm_on_failure: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub async fn handle(args: StartArgs, cancel: CancellationToken) -> Result<()> {
    let base = agent_config(&args)?;

    let mut policy = azp_pool::env::health_policy();
    if let Some(secs) = args.poll_interval {
        policy = policy.with_interval(Duration::from_secs(secs));
    }
    if let Some(secs) = args.health_timeout {
        policy = policy.with_deadline(Some(Duration::from_secs(secs)));
    }

    let image = args.image.clone().unwrap_or_else(azp_pool::env::image);
    let launcher = PoolLauncher::new(DockerEngine::new())
        .with_image(image)
        .with_health_policy(policy)
        .with_cancellation(cancel);

    let mut launched = Vec::new();
    let mut failure = None;
    for config in numbered_configs(&base, args.count) {
        match launcher.start_agent_pool(&config).await {
            Ok(id) => {
                let agent = LaunchedAgent { name: config.container_name().to_string(), id };
                if args.format == OutputFormat::Text {
                    println!("{}", output::launched_line(&agent));
                }
                launched.push(agent);
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    if args.format == OutputFormat::Json {
        println!("{}", output::launched_json(&launched)?);
    }

    let Some(err) = failure else {
        return Ok(());
    };

    if args.rm_on_failure {
        let failed = launcher.teardown().await;
        if !failed.is_empty() {
            tracing::warn!(count = failed.len(), "some agent containers could not be removed");
        }
    } else if let Some(id) = err.container_id() {
        tracing::info!(container_id = %id, "container left in place for inspection");
    }

    Err(ExitError::from(&err).into())
}

/// Build the base agent config from flags, falling back to the environment.
pub(crate) fn agent_config(args: &StartArgs) -> Result<AgentConfig, ExitError> {
    let url = args
        .url
        .clone()
        .or_else(azp_pool::env::organization_url)
        .ok_or_else(|| ExitError::usage("missing organization URL: pass --url or set AZP_URL"))?;
    let (token, source) = resolve_token(args.token.as_deref()).ok_or_else(|| {
        ExitError::usage("missing access token: pass --token or set AZP_TOKEN or AZP_TOKEN_FILE")
    })?;
    tracing::debug!(%source, "resolved access token");
    let pool = args
        .pool
        .clone()
        .or_else(azp_pool::env::pool_name)
        .ok_or_else(|| ExitError::usage("missing agent pool: pass --pool or set AZP_POOL"))?;
    let name = args
        .name
        .clone()
        .or_else(azp_pool::env::agent_name)
        .ok_or_else(|| ExitError::usage("missing agent name: pass --name or set AZP_AGENT_NAME"))?;

    Ok(AgentConfig::new(token, url, pool, name))
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
