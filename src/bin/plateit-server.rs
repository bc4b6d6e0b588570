// ABOUTME: PlateIt server binary: loads configuration, restores state, and serves the REST API
// ABOUTME: Command-line flags override the port and storage directory from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

//! # PlateIt Server Binary

use anyhow::Result;
use clap::Parser;
use plateit_server::{
    config::ServerConfig, logging, resources::ServerResourcesBuilder, server,
    services::subscription,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "plateit-server")]
#[command(about = "PlateIt - recipes, shopping lists, and Pro subscriptions over REST")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Store documents as files in this directory
    #[arg(long)]
    storage_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = ServerConfig::from_env()?.with_overrides(args.http_port, args.storage_dir);
    info!("Starting PlateIt server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResourcesBuilder::new().with_config(config).build().await?);

    let status = subscription::startup_sync(&resources).await;
    info!(
        is_pro = status.is_pro,
        entitlement = ?status.entitlement,
        "Subscription state restored"
    );

    server::run(resources).await
}
