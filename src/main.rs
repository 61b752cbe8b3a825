//! LocWeb command line: run the site or try out domain suggestions

use anyhow::Context;
use clap::{Parser, Subcommand};
use locweb::domain::CandidateGenerator;
use locweb::{telemetry, AppConfig, AvailabilityResult, BusinessProfile, DomainChecker, LocwebError};
use std::process;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "locweb", version, about = "Checkout site for local-business websites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Interface to bind, overrides LOCWEB_HOST
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides LOCWEB_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Suggest domains for a business and check which look available
    Domains {
        /// Business name, e.g. "Joe's Pizza"
        name: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        street: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Only list candidates, skip DNS lookups
        #[arg(long)]
        no_check: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e.downcast_ref::<LocwebError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            telemetry::init(&config.telemetry)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            locweb::web::serve(config).await?;
        }
        Command::Domains {
            name,
            city,
            street,
            category,
            no_check,
        } => {
            let profile = BusinessProfile::new(name)
                .with_city(city)
                .with_street(street)
                .with_category(category);
            run_domains(&config, &profile, no_check).await;
        }
    }

    Ok(())
}

async fn run_domains(config: &AppConfig, profile: &BusinessProfile, no_check: bool) {
    if no_check {
        let candidates = CandidateGenerator::new().generate(profile);
        println!("🎯 Domain candidates for \"{}\" ({}):", profile.name, candidates.len());
        println!("═══════════════════════════════════");
        for candidate in &candidates {
            println!("   {}", candidate);
        }
        return;
    }

    println!("🔍 Checking domains for \"{}\"...", profile.name);
    println!("═══════════════════════════════════");
    println!();

    let checker = DomainChecker::with_config(config.check.clone());
    let started = Instant::now();
    let results = checker.suggest(profile).await;
    display_results(&results);

    let available = results.iter().filter(|r| r.available).count();
    println!("📈 Summary:");
    println!("   ✅ Likely available: {}", available);
    println!("   ❌ Taken: {}", results.len() - available);
    println!("   ⏱️  Total time: {:.2}s", started.elapsed().as_secs_f32());
}

fn display_results(results: &[AvailabilityResult]) {
    if results.is_empty() {
        println!("😔 No domain candidates could be built from that name.");
        println!();
        return;
    }

    for result in results {
        let icon = if result.available { "✅" } else { "❌" };
        println!("{} {}", icon, result);
    }
    println!();
}
