use clap::{Parser, Subcommand};
use colored::Colorize;
use environment::{
    compose_environment, resolve_port_bindings, EnvironmentSettings, Localstack,
};
use futures_util::FutureExt;
use logging::{LogEntry, LogLevel};
use models::{PortBindingTable, ServiceRegistry, ServiceSelection};
use runtime::DockerRuntime;
use sessions::SessionConfig;
use std::time::Duration;
use tokio::sync::oneshot;

// Log lines shown behind a failed `up`
const TRAIL_LINES: usize = 20;

#[derive(Debug, Parser)]
#[command(
    name = "lstack",
    about = "Run a LocalStack emulator container for local development",
    version,
    long_about = "Provision a LocalStack container with the services you need.\n\nSelections are service names, optionally with a host port: `s3` or `s3:9000`.\nWith no selections every supported service is published on its default port.\n\nExamples:\n  lstack services                 # List supported services and their ports\n  lstack ports s3:9000 sqs        # Show the port bindings that would be used\n  lstack up s3 sqs                # Start LocalStack until Ctrl+C\n  lstack --debug up               # Start everything with image pull progress"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode with detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode with extensive execution details
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List supported services and their default ports
    Services,

    /// Print the port bindings and environment for a selection
    Ports {
        /// Services to run, as `name` or `name:port`
        selections: Vec<ServiceSelection>,
    },

    /// Print client endpoints for the selected services
    Endpoints {
        /// Services to show (defaults to all)
        selections: Vec<ServiceSelection>,
    },

    /// Create and start a LocalStack container, stopping it on Ctrl+C
    Up {
        /// Services to run, as `name` or `name:port` (defaults to all)
        selections: Vec<ServiceSelection>,

        /// Emulator image to run
        #[arg(long)]
        image: Option<String>,

        /// Seconds to wait after start and stop
        #[arg(long)]
        settle_secs: Option<u64>,
    },
}

fn render_bindings(table: &PortBindingTable) -> Vec<String> {
    table
        .iter()
        .flat_map(|(internal, bindings)| {
            bindings
                .iter()
                .map(move |b| format!("{} -> {}:{}", internal, b.host_ip, b.host_port))
        })
        .collect()
}

fn settings_from_args(image: Option<String>, settle_secs: Option<u64>) -> EnvironmentSettings {
    let mut settings = EnvironmentSettings::from_env();
    if let Some(image) = image {
        settings = settings.with_image(image);
    }
    if let Some(secs) = settle_secs {
        settings = settings.with_settle_delay(Duration::from_secs(secs));
    }
    settings
}

fn list_services() {
    println!("{}", "Supported services:".bold());
    for (service, port) in ServiceRegistry::standard().iter() {
        println!("  {:<16} {}", service.to_string(), port);
    }
}

fn show_ports(selections: &[ServiceSelection]) -> Result<(), String> {
    let table = resolve_port_bindings(selections).map_err(|e| e.to_string())?;

    println!("{}", "Port bindings:".bold());
    for line in render_bindings(&table) {
        println!("  {}", line);
    }

    let env = compose_environment(selections);
    println!("{}", "Environment:".bold());
    if env.is_empty() {
        println!("  {}", "(image default services)".dimmed());
    }
    for var in env {
        println!("  {}", var);
    }
    Ok(())
}

fn show_endpoints(selections: &[ServiceSelection]) -> Result<(), String> {
    let config = SessionConfig::default();
    let services = if selections.is_empty() {
        models::supported_services()
    } else {
        selections.iter().map(|s| s.service).collect()
    };

    for service in services {
        let session = sessions::session_for(service, &config).map_err(|e| e.to_string())?;
        println!(
            "  {:<16} {} ({})",
            service.to_string(),
            session.endpoint(),
            session.region()
        );
    }
    Ok(())
}

/// Starts listening for Ctrl+C. The handler is installed before this
/// returns, so an interrupt during setup is still seen once setup finishes.
fn listen_for_interrupt() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    let mut ctrl_c = Box::pin(tokio::signal::ctrl_c());
    let first_poll = (&mut ctrl_c).now_or_never();

    tokio::spawn(async move {
        let result = match first_poll {
            Some(result) => result,
            None => ctrl_c.await,
        };
        match result {
            Ok(()) => {
                let _ = tx.send(());
            }
            Err(e) => {
                logging::warning(&format!("Failed to listen for Ctrl+C: {}", e));
                // Holding the sender keeps the receiver pending forever
                std::future::pending::<()>().await;
            }
        }
    });

    rx
}

fn interrupt_pending(interrupt: &mut oneshot::Receiver<()>) -> bool {
    interrupt.try_recv().is_ok()
}

/// The most recent log lines that were kept from the console.
fn hidden_trail(entries: &[LogEntry], threshold: LogLevel) -> Vec<String> {
    let hidden: Vec<&LogEntry> = entries.iter().filter(|e| e.level < threshold).collect();
    let skip = hidden.len().saturating_sub(TRAIL_LINES);
    hidden.into_iter().skip(skip).map(LogEntry::formatted).collect()
}

fn print_failure_trail() {
    let trail = hidden_trail(
        &logging::entries_at_or_above(LogLevel::Debug),
        logging::get_log_level(),
    );
    if trail.is_empty() {
        return;
    }
    eprintln!("{}", "Recent activity:".bold());
    for line in trail {
        eprintln!("  {}", line);
    }
}

async fn run_up(selections: &[ServiceSelection], settings: EnvironmentSettings) -> Result<(), String> {
    let mut interrupt = listen_for_interrupt();

    let runtime = DockerRuntime::new().map_err(|e| e.to_string())?;
    let mut stack = Localstack::with_runtime(runtime, settings, selections)
        .await
        .map_err(|e| e.to_string())?;

    stack.start().await.map_err(|e| e.to_string())?;

    println!("{} LocalStack container {} is running", "✅".green(), stack.id());
    for (internal, bindings) in &stack.spec().port_bindings {
        for b in bindings {
            println!("  {} -> http://{}:{}", internal, b.host_ip, b.host_port);
        }
    }

    if !interrupt_pending(&mut interrupt) {
        println!("Press Ctrl+C to stop");
        let _ = (&mut interrupt).await;
    }

    println!("Stopping LocalStack container {}...", stack.id());
    stack.stop().await.map_err(|e| e.to_string())?;
    logging::info(&format!("Container is now {}", stack.state()));
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::set_log_level(LogLevel::from_flags(cli.verbose, cli.debug));
    logging::debug("Debug mode enabled - showing detailed logs");

    let result = match cli.command {
        Commands::Services => {
            list_services();
            Ok(())
        }
        Commands::Ports { selections } => show_ports(&selections),
        Commands::Endpoints { selections } => show_endpoints(&selections),
        Commands::Up {
            selections,
            image,
            settle_secs,
        } => {
            let result = run_up(&selections, settings_from_args(image, settle_secs)).await;
            if result.is_err() {
                print_failure_trail();
            }
            result
        }
    };

    if let Err(e) = result {
        logging::error(&e);
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}
