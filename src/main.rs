//! PHR On-Chain CLI
//!
//! Terminal front end for submitting health data:
//! - One-shot submission
//! - Interactive session with history charts
//! - Config file generation

use alloy_primitives::Address;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use phr_onchain::config::{generate_default_config, Config};
use phr_onchain::display::{steps_series, text, weight_series, ResultView};
use phr_onchain::platform::{Capabilities, RenderMode};
use phr_onchain::submission::{HttpSubmissionClient, Notifier, SubmissionForm};
use phr_onchain::wallet::WalletState;

const CHART_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "phr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Submit personal health records and anchor them on Base Sepolia")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config and PHR_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: PHR_CONFIG or the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit one set of measurements
    Submit {
        /// Connected wallet address
        #[arg(long)]
        wallet: String,
        /// Weight in kg
        #[arg(long)]
        weight: String,
        /// Blood pressure, e.g. 120/80
        #[arg(long)]
        blood_pressure: String,
        /// Steps today
        #[arg(long)]
        steps: String,
    },

    /// Interactive session: repeated submissions with history charts
    Session {
        /// Wallet address to submit from
        #[arg(long)]
        wallet: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Alerts go to stderr
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("⚠ {}", message);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load_with_env(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::load_default(),
    };
    phr_onchain::logging::init(&config.logging);

    match run(cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, mut config: Config) -> anyhow::Result<ExitCode> {
    if let Some(url) = cli.api_url {
        config.api.base_url = Some(url);
    }

    match cli.command {
        Commands::Submit {
            wallet,
            weight,
            blood_pressure,
            steps,
        } => {
            let wallet = parse_wallet(&wallet)?;
            let client = HttpSubmissionClient::new(config.api_base_url()?);

            let mut form = SubmissionForm::new();
            form.set_weight(weight);
            form.set_blood_pressure(blood_pressure);
            form.set_steps(steps);

            if form
                .submit(&wallet, &client, &TerminalNotifier, today())
                .await
                .is_err()
            {
                return Ok(ExitCode::FAILURE);
            }

            if let Some(result) = form.result() {
                print!("{}", text::render_result(&ResultView::from(result)));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Session { wallet } => {
            let wallet = match wallet {
                Some(address) => parse_wallet(&address)?,
                None => WalletState::disconnected(),
            };

            let caps = Capabilities {
                has_display: std::io::stdout().is_terminal(),
                has_input: std::io::stdin().is_terminal(),
                has_wallet_provider: wallet.is_connected(),
            };

            match RenderMode::detect(caps) {
                RenderMode::Interactive => {
                    let client = HttpSubmissionClient::new(config.api_base_url()?);
                    run_session(&wallet, &client).await?;
                }
                RenderMode::Static => {
                    let form = SubmissionForm::new();
                    print_charts(&form);
                    println!("Interactive submission needs a terminal and --wallet <ADDRESS>.");
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_session(wallet: &WalletState, client: &HttpSubmissionClient) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut form = SubmissionForm::new();

    println!(
        "Connected as {}. Empty weight or 'q' quits.",
        wallet.short_address().unwrap_or_default()
    );
    print_charts(&form);

    loop {
        let Some(weight) = prompt(&mut lines, "Weight (kg), e.g. 65.5")? else {
            break;
        };
        if weight.is_empty() || weight.eq_ignore_ascii_case("q") {
            break;
        }
        let blood_pressure = prompt(&mut lines, "Blood pressure, e.g. 120/80")?.unwrap_or_default();
        let steps = prompt(&mut lines, "Steps (today), e.g. 8200")?.unwrap_or_default();

        form.set_weight(weight);
        form.set_blood_pressure(blood_pressure);
        form.set_steps(steps);

        println!("{}", form.submit_label());
        if form
            .submit(wallet, client, &TerminalNotifier, today())
            .await
            .is_ok()
        {
            if let Some(result) = form.result() {
                println!("\n{}", text::render_result(&ResultView::from(result)));
            }
        }
        print_charts(&form);
    }

    Ok(())
}

fn prompt<B: BufRead>(
    lines: &mut std::io::Lines<B>,
    label: &str,
) -> anyhow::Result<Option<String>> {
    print!("{}: ", label);
    std::io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn print_charts(form: &SubmissionForm) {
    println!();
    print!("{}", text::render_series(&steps_series(form.history()), CHART_WIDTH));
    print!("{}", text::render_series(&weight_series(form.history()), CHART_WIDTH));
    println!();
}

/// Accept only well-formed addresses from the command line
fn parse_wallet(address: &str) -> anyhow::Result<WalletState> {
    let parsed: Address = address
        .trim()
        .parse()
        .with_context(|| format!("Invalid wallet address {:?}", address))?;
    Ok(WalletState::connected(parsed.to_string()))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
