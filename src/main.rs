// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Regdash CLI entrypoint.
//!
//! By default this loads a dataset folder and serves MCP over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp` until interrupted.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool integrations).

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;
const LOG_ENV: &str = "REGDASH_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<data-dir>] [--mesh-dir <dir>] [--http-port <port>]\n  {program} [--data <dir>] [--mesh-dir <dir>] [--http-port <port>]\n  {program} --demo [--mesh-dir <dir>] [--http-port <port>]\n  {program} [<data-dir>] [--mesh-dir <dir>] --mcp\n  {program} --demo --mcp\n\nBy default MCP is served over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\nIf data-dir/--data is omitted, the current working directory is used.\n--demo uses a built-in synthetic dataset and cannot be combined with data-dir/--data.\n--mesh-dir overrides the mesh directory named in regdash.meta.json.\n\nEnvironment: {LOG_ENV} (log filter, default info), REGDASH_PALETTE (11 comma-separated colors)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp: bool,
    demo: bool,
    data_dir: Option<String>,
    mesh_dir: Option<String>,
    http_port: Option<u16>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--data" => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                options.data_dir = Some(args.next().ok_or(())?);
            }
            "--mesh-dir" => {
                if options.mesh_dir.is_some() {
                    return Err(());
                }
                options.mesh_dir = Some(args.next().ok_or(())?);
            }
            "--http-port" => {
                if options.http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.http_port = Some(raw.parse().map_err(|_| ())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                options.data_dir = Some(arg);
            }
        }
    }

    if options.demo && options.data_dir.is_some() {
        return Err(());
    }

    if options.mcp && options.http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn build_dashboard(options: &CliOptions) -> Result<regdash::sync::Dashboard, Box<dyn Error>> {
    let palette = regdash::render::Palette::from_env()?;
    let (dataset, meshes) = if options.demo {
        let dataset = regdash::demo::demo_dataset(regdash::demo::DEMO_PATIENTS)?;
        info!(patients = dataset.roster().len(), "using the synthetic demo dataset");
        (dataset, None)
    } else {
        let dir = options.data_dir.clone().unwrap_or_else(|| ".".to_owned());
        regdash::store::DatasetFolder::new(dir).load()?
    };
    let meshes = match &options.mesh_dir {
        Some(dir) => Some(regdash::geometry::MeshStore::new(dir)),
        None => meshes,
    };
    if meshes.is_none() {
        info!("no mesh directory; the 3D and slice views show placeholders");
    }

    Ok(regdash::sync::Dashboard::new(
        Arc::new(dataset),
        Arc::new(regdash::geometry::ObjGeometry::new()),
        meshes,
        palette,
    ))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "regdash".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();
        let mcp = regdash::mcp::RegdashMcp::new(build_dashboard(&options)?);
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.mcp {
            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        }

        let http_port = options.http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT);
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", http_port)).await?;
            info!(address = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service =
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    eprintln!("regdash: MCP HTTP server error: {err}");
                }
            });

            tokio::signal::ctrl_c().await?;
            info!("shutting down");
            shutdown_token.cancel();
            let _ = server_handle.await;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("regdash: {err}");
        std::process::exit(1);
    }
}
