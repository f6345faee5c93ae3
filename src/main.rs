//! route-optimizer CLI
//!
//! Price payment routes and query the assistants from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Local cost estimate, no model call
//! route-optimizer quote --from USA --to Germany --amount 50000
//!
//! # Full optimization through an OpenAI-compatible backend
//! ROUTE_OPTIMIZER_API_KEY=sk-... route-optimizer optimize --from USA --to Germany --amount 50000
//!
//! # Same, without network access
//! route-optimizer optimize --from USA --to India --amount 10000 --offline --format json
//!
//! # Ask the team assistant
//! route-optimizer chat --role team --offline "quarterly revenue?"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use route_optimizer::assistant::{ClientAssistant, TeamAssistant, Toolbox};
use route_optimizer::config::OptimizerConfig;
use route_optimizer::core::country::CorridorPolicy;
use route_optimizer::core::request::{parse_amount, OptimizationRequest};
use route_optimizer::generation::{OfflineGenerator, OpenAiCompatGenerator, StructuredGenerator};
use route_optimizer::optimization::orchestrator::{RouteEstimate, RouteOptimizer};
use rust_decimal::Decimal;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "route-optimizer")]
#[command(about = "Cross-border payment route estimation and optimization")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate route costs locally, without a model call
    Quote {
        #[command(flatten)]
        transfer: TransferArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Price all routes and have the model describe them
    Optimize {
        #[command(flatten)]
        transfer: TransferArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Use the deterministic offline generator
        #[arg(long)]
        offline: bool,
        /// Only accept the countries offered by the payment form
        #[arg(long)]
        supported_only: bool,
        /// Seconds to wait for the model
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        /// Accept model answers even if their figures differ from the computed ones
        #[arg(long)]
        no_verify: bool,
    },
    /// Ask the client or team assistant a question
    Chat {
        #[arg(long, value_enum, default_value_t = Role::Client)]
        role: Role,
        /// Use the deterministic offline generator
        #[arg(long)]
        offline: bool,
        message: String,
    },
}

#[derive(clap::Args)]
struct TransferArgs {
    /// Sending country
    #[arg(long)]
    from: String,
    /// Receiving country
    #[arg(long)]
    to: String,
    /// Amount in USD
    #[arg(long)]
    amount: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Role {
    Client,
    Team,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn amount_or_exit(raw: &str) -> Decimal {
    parse_amount(raw).unwrap_or_else(|e| fail(e))
}

fn generator(offline: bool) -> Arc<dyn StructuredGenerator> {
    if offline {
        return Arc::new(OfflineGenerator::new());
    }
    let generator = OpenAiCompatGenerator::from_env().unwrap_or_else(|e| fail(e));
    if generator.config().api_key.is_none() {
        log::warn!("no API key configured; set ROUTE_OPTIMIZER_API_KEY or use --offline");
    }
    Arc::new(generator)
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn cmd_quote(transfer: TransferArgs, format: Format) {
    let amount = amount_or_exit(&transfer.amount);
    let request =
        OptimizationRequest::new(&transfer.from, &transfer.to, amount, &CorridorPolicy::Open)
            .unwrap_or_else(|e| fail(e));

    let figures = RouteEstimate::for_amount(request.amount_usd()).unwrap_or_else(|e| fail(e));
    match format {
        Format::Json => print_json(&figures),
        Format::Text => print!("{}", figures.report(request.corridor(), request.amount_usd())),
    }
}

async fn cmd_optimize(
    transfer: TransferArgs,
    format: Format,
    offline: bool,
    supported_only: bool,
    timeout_secs: u64,
    no_verify: bool,
) {
    let amount = amount_or_exit(&transfer.amount);
    let policy = if supported_only {
        CorridorPolicy::dashboard()
    } else {
        CorridorPolicy::Open
    };
    let config = OptimizerConfig::default()
        .with_corridor_policy(policy)
        .with_generation_timeout(Duration::from_secs(timeout_secs))
        .with_verify_figures(!no_verify);
    let optimizer = RouteOptimizer::new(generator(offline), config);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    match optimizer
        .optimize_route_with_cancel(&transfer.from, &transfer.to, amount, &cancel)
        .await
    {
        Ok(result) => match format {
            Format::Json => print_json(&result),
            Format::Text => print!("{}", result),
        },
        Err(e) => {
            log::debug!("optimization failed: {}", e);
            fail(e.user_message());
        }
    }
}

async fn cmd_chat(role: Role, offline: bool, message: String) {
    let generator = generator(offline);
    match role {
        Role::Client => match ClientAssistant::new(generator).ask(&message).await {
            Ok(answer) => println!("{}", answer),
            Err(e) => {
                log::debug!("client assistant failed: {}", e);
                fail(e.user_message());
            }
        },
        Role::Team => match TeamAssistant::new(generator, Toolbox::sample()).ask(&message).await {
            Ok(reply) => {
                if let Some(tool) = &reply.tool {
                    log::info!("consulted {}", tool);
                }
                println!("{}", reply.answer);
            }
            Err(e) => {
                log::debug!("team assistant failed: {}", e);
                fail(e.user_message());
            }
        },
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Quote { transfer, format } => cmd_quote(transfer, format),
        Command::Optimize {
            transfer,
            format,
            offline,
            supported_only,
            timeout_secs,
            no_verify,
        } => {
            cmd_optimize(transfer, format, offline, supported_only, timeout_secs, no_verify).await
        }
        Command::Chat {
            role,
            offline,
            message,
        } => cmd_chat(role, offline, message).await,
    }
}
