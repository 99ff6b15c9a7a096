//! botgate command line.
//!
//! Validates bot list configuration and classifies single requests against it.

use anyhow::{Context, Result};
use botgate::config::{BotGateConfig, ConfigLoader, LogFormat};
use botgate::modules::bot_filter::{BotFilterMiddleware, ClassificationSignal, Classifier, Verdict};
use botgate::modules::http_handler::{MiddlewareChain, NoCacheMiddleware, Request, Response};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "botgate")]
#[command(author, version, about = "Request-level bot classification")]
struct Args {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable JSON logging format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and compile the configured lists
    Validate {
        /// Path to configuration file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Classify one set of request signals
    Classify {
        /// Path to configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// User-Agent header value
        #[arg(long)]
        user_agent: Option<String>,

        /// Client address
        #[arg(long)]
        ip: Option<String>,

        /// Referer or Origin header value
        #[arg(long)]
        referrer: Option<String>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a raw HTTP/1.x request file through the filter and print the response
    Replay {
        /// Path to configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// File holding the raw request
        #[arg(short, long)]
        request: PathBuf,

        /// Peer address the request came from
        #[arg(long)]
        peer: Option<String>,
    },
}

impl Command {
    fn config_path(&self) -> &Path {
        match self {
            Self::Validate { config }
            | Self::Classify { config, .. }
            | Self::Replay { config, .. } => config,
        }
    }
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    user_agent: Option<&'a str>,
    client_ip: Option<&'a str>,
    referrer: Option<&'a str>,
    #[serde(flatten)]
    verdict: Verdict,
    address_list: Option<&'static str>,
}

fn init_logging(json: bool, level: &str, format: LogFormat) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());
    let format = if json { LogFormat::Json } else { format };

    // Results go to stdout, logs to stderr.
    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.command.config_path().to_path_buf();

    // Logging settings live in the file itself; read them before the
    // subscriber exists, then load again with validation and logging on.
    let settings = ConfigLoader::new()
        .load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| settings.logging.level.to_string());
    init_logging(args.json_logs, &level, settings.logging.format);

    let config = ConfigLoader::with_defaults()
        .load(&config_path)
        .with_context(|| format!("invalid configuration in {}", config_path.display()))?;

    match args.command {
        Command::Validate { .. } => validate(&config),
        Command::Classify {
            user_agent,
            ip,
            referrer,
            json,
            ..
        } => {
            let mut signal = ClassificationSignal::new();
            signal.user_agent = user_agent;
            signal.client_ip = ip;
            signal.referrer = referrer;
            classify(&config, &signal, json)
        },
        Command::Replay { request, peer, .. } => replay(&config, &request, peer),
    }
}

fn validate(config: &BotGateConfig) -> Result<()> {
    let classifier = Classifier::from_config(&config.bot_filter)?;
    let bot_filter = &config.bot_filter;

    info!(
        enabled = bot_filter.enabled,
        address_lists = classifier.addresses().strategy_count(),
        "Bot lists compiled"
    );

    println!("configuration OK");
    println!("  enabled:           {}", bot_filter.enabled);
    println!("  generic crawlers:  {}", bot_filter.generic_crawlers);
    println!("  user agents:       {}", classifier.signatures().len());
    println!("  referrers:         {}", classifier.referrers().len());
    println!("  exact addresses:   {}", bot_filter.addresses.exact.len());
    println!("  address ranges:    {}", bot_filter.addresses.ranges.len());
    println!("  cidr blocks:       {}", bot_filter.addresses.cidrs.len());
    println!("  wildcards:         {}", bot_filter.addresses.wildcards.len());
    println!("  trusted proxies:   {}", bot_filter.trusted_proxies.len());
    Ok(())
}

fn classify(config: &BotGateConfig, signal: &ClassificationSignal, json: bool) -> Result<()> {
    let classifier = Classifier::from_config(&config.bot_filter)?;
    let verdict = classifier.classify(signal);
    let output = ClassifyOutput {
        user_agent: signal.user_agent.as_deref(),
        client_ip: signal.client_ip.as_deref(),
        referrer: signal.referrer.as_deref(),
        verdict,
        address_list: signal
            .client_ip
            .as_deref()
            .and_then(|ip| classifier.addresses().matching_strategy(ip)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(reason) = verdict.reason {
        println!("bot ({reason})");
    } else {
        println!("human");
    }
    Ok(())
}

fn replay(config: &BotGateConfig, path: &Path, peer: Option<String>) -> Result<()> {
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (mut request, _) = Request::parse(&raw)?;
    if let Some(peer) = peer {
        request.set_remote_addr(peer);
    }

    let chain = MiddlewareChain::new()
        .with(Arc::new(NoCacheMiddleware::new()))
        .with(Arc::new(BotFilterMiddleware::from_config(&config.bot_filter)?));

    let response = chain.dispatch(request, |_| Response::ok().text("OK").build())?;
    std::io::stdout().write_all(&response.serialize())?;
    Ok(())
}
