use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use roomwatch_core::MonitorConfig;
use roomwatch_extract::{
    extract_candidates_from_json, extract_from_body, is_blocked, parse_api_response,
    pick_preferred_json_price,
};

#[derive(Debug, Parser)]
#[command(name = "roomwatch-cli")]
#[command(about = "Price extraction over saved booking-page bodies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full extraction pipeline against a saved page body.
    Scan {
        /// Body file, or `-` for stdin.
        file: PathBuf,
        /// Page URL, used for host-strategy resolution.
        #[arg(long)]
        url: String,
        /// Explicit price regex (overrides every other path).
        #[arg(long)]
        regex: Option<String>,
        /// Room hint narrowing the regex search window.
        #[arg(long)]
        hint: Option<String>,
    },
    /// Parse a captured structured API response into room records.
    Rooms { file: PathBuf },
    /// List JSON price candidates and the preferred pick.
    Json { file: PathBuf },
    /// Check a body for anti-bot signal phrases.
    Blocked { file: PathBuf },
    /// Load and list the monitor configuration.
    Monitors {
        #[arg(long, default_value = "./config/monitors.yaml")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            file,
            url,
            regex,
            hint,
        } => scan(&file, &url, regex, hint),
        Commands::Rooms { file } => rooms(&file),
        Commands::Json { file } => json_candidates(&file),
        Commands::Blocked { file } => blocked(&file),
        Commands::Monitors { config } => monitors(&config),
    }
}

fn scan(
    file: &Path,
    url: &str,
    regex: Option<String>,
    hint: Option<String>,
) -> anyhow::Result<()> {
    let body = read_body(file)?;

    let monitor = regex.map(|pattern| MonitorConfig {
        name: "cli".to_string(),
        url: url.to_string(),
        price_regex: Some(pattern),
        room_hint: hint,
        notes: None,
    });

    if is_blocked(&body) {
        tracing::warn!(url, "body looks like a blocked/challenge page");
    }

    match extract_from_body(url, &body, monitor.as_ref())? {
        Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        None => println!("null"),
    }
    Ok(())
}

fn rooms(file: &Path) -> anyhow::Result<()> {
    let body = read_body(file)?;
    let rooms = parse_api_response(&body)?;
    println!("{}", serde_json::to_string_pretty(&rooms)?);
    Ok(())
}

fn json_candidates(file: &Path) -> anyhow::Result<()> {
    let body = read_body(file)?;
    let value: serde_json::Value = serde_json::from_str(&body).context("body is not JSON")?;

    let candidates = extract_candidates_from_json(&value);
    for candidate in &candidates {
        println!(
            "{}  {}  {}",
            candidate.path,
            candidate.value,
            candidate.currency.as_deref().unwrap_or("-")
        );
    }
    match pick_preferred_json_price(&candidates) {
        Some(picked) => println!("preferred: {} = {}", picked.path, picked.value),
        None => println!("preferred: none"),
    }
    Ok(())
}

fn blocked(file: &Path) -> anyhow::Result<()> {
    let body = read_body(file)?;
    println!("{}", is_blocked(&body));
    Ok(())
}

fn monitors(config: &Path) -> anyhow::Result<()> {
    let monitors_file = roomwatch_core::load_monitors(config)?;
    for monitor in &monitors_file.monitors {
        println!(
            "{}  {}  regex={}  hint={}",
            monitor.slug(),
            monitor.url,
            monitor.price_regex.as_deref().unwrap_or("-"),
            monitor.room_hint.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn read_body(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("reading stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
    }
}
