// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Glow - resilient product catalog for the storefront.
//!
//! This is the binary entry point for the Glow service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod fetch;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glow_config::GlowConfig;

/// Glow - resilient product catalog for the storefront.
#[derive(Parser, Debug)]
#[command(name = "glow", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Query the catalog once and print the response as JSON.
    Fetch {
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        product_type: Option<String>,
        /// Free-text search over name, brand, and description.
        #[arg(long)]
        search: Option<String>,
        /// Print aggregate statistics instead of the product list.
        #[arg(long)]
        stats: bool,
    },
    /// Validate configuration and exit.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> GlowConfig {
    let loaded = match path {
        Some(path) => glow_config::load_and_validate_path(path),
        None => glow_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            glow_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Fetch {
            brand,
            category,
            product_type,
            search,
            stats,
        }) => {
            let filter = fetch::build_filter(brand, category, product_type, search);
            fetch::run_fetch(config, filter, stats).await
        }
        Some(Commands::CheckConfig) => {
            println!(
                "glow: config ok (upstream={}, listen={}:{})",
                config.upstream.url, config.server.host, config.server.port
            );
            Ok(())
        }
        None => {
            println!("glow: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("glow: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_fetch_filters() {
        let cli = Cli::try_parse_from([
            "glow",
            "fetch",
            "--brand",
            "nyx",
            "--product-type",
            "lipstick",
            "--stats",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Fetch {
                brand,
                product_type,
                category,
                stats,
                ..
            }) => {
                assert_eq!(brand.as_deref(), Some("nyx"));
                assert_eq!(product_type.as_deref(), Some("lipstick"));
                assert!(category.is_none());
                assert!(stats);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_accepts_global_config_path() {
        let cli =
            Cli::try_parse_from(["glow", "check-config", "--config", "/tmp/glow.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/glow.toml")));
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }
}
