//! # CLI Module
//!
//! Command-line shell around the router. It loads a configuration file and
//! either lists the route table or resolves a single request.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the route table in match order:
//!
//! ```bash
//! frontrouter routes --config site.yaml
//! ```
//!
//! ### `resolve`
//!
//! Normalize a request URI against the site root, dispatch it, and print the
//! content. Exits with status 1 when nothing is dispatched:
//!
//! ```bash
//! frontrouter resolve --config site.yaml --uri "/users/42?tab=posts" --method GET
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use serde::Serialize;
use tracing::debug;

use crate::config::FrontConfig;
use crate::logging;
use crate::router::Router;
use crate::url::{RequestContext, UrlResolver};

/// Command-line interface for frontrouter
#[derive(Parser)]
#[command(name = "frontrouter")]
#[command(about = "Regex front-controller router", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List registered routes in match order
    Routes {
        /// Path to the YAML configuration file
        #[arg(short, long, env = "FRONTROUTER_CONFIG")]
        config: PathBuf,

        /// Print the listing as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Resolve and dispatch one request
    Resolve {
        /// Path to the YAML configuration file
        #[arg(short, long, env = "FRONTROUTER_CONFIG")]
        config: PathBuf,

        /// Request target: path plus optional query
        #[arg(short, long)]
        uri: String,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Host header (defaults to the site root's host)
        #[arg(long)]
        host: Option<String>,

        /// Secure-transport indicator as the front server reports it
        #[arg(long)]
        https: Option<String>,

        /// Keep the query string in the path handed to the router
        #[arg(long, default_value_t = false)]
        include_query: bool,
    },
}

#[derive(Serialize)]
struct RouteListing<'a> {
    position: usize,
    pattern: &'a str,
    handler: &'static str,
}

/// Parse arguments and run the selected command
pub fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Routes { config, json } => {
            let config = load(&config)?;
            let router = Router::from_config(&config).context("Failed to build routes")?;
            print_routes(&router, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve {
            config,
            uri,
            method,
            host,
            https,
            include_query,
        } => {
            let config = load(&config)?;
            let router = Router::from_config(&config).context("Failed to build routes")?;

            let method = Method::from_bytes(method.as_bytes())
                .with_context(|| format!("Invalid request method '{method}'"))?;
            let host = host.unwrap_or_else(|| site_host(&config.site.site_url).to_owned());
            let mut request = RequestContext::new(method, host, uri);
            request.https = https;

            let path = UrlResolver::new(&config.site, &request).relative_page_url(include_query);
            debug!(path = %path, "Resolved request path");

            match router.try_dispatch(&request.method, &path) {
                Ok(dispatched) => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(dispatched.content.as_bytes())?;
                    stdout.flush()?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn load(path: &Path) -> Result<FrontConfig> {
    let config = FrontConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    logging::init_logging(&config.logging)?;
    Ok(config)
}

fn print_routes(router: &Router, json: bool) -> Result<()> {
    let listing: Vec<RouteListing<'_>> = router
        .registered_routes()
        .enumerate()
        .map(|(position, (pattern, handler))| RouteListing {
            position,
            pattern,
            handler: handler.kind(),
        })
        .collect();

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &listing)?;
        writeln!(stdout)?;
    } else {
        for entry in &listing {
            writeln!(stdout, "[route] {} {} -> {}", entry.position, entry.pattern, entry.handler)?;
        }
    }
    Ok(())
}

/// Host part of a site root such as `http://example.com/blog/`
fn site_host(site_url: &str) -> &str {
    let rest = site_url
        .split_once("//")
        .map_or(site_url, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest)
}
