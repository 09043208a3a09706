// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `azpool init`: write the agent image build context.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct InitArgs {
    /// Directory to create; must not exist yet
    #[arg(default_value = "azp-agent")]
    pub path: PathBuf,

    /// Image tag shown in the build hint
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: InitArgs) -> Result<()> {
    let ctx = azp_pool::create_build_ctx(&args.path)
        .map_err(|e| ExitError::failure(format!("build context: {}", e)))?;

    match args.format {
        OutputFormat::Text => {
            let image = args.image.unwrap_or_else(azp_pool::env::image);
            print!("{}", output::build_ctx_text(&ctx, &image));
        }
        OutputFormat::Json => println!("{}", output::build_ctx_json(&ctx)?),
    }
    Ok(())
}
