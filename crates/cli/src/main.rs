use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Operator tooling for the shelf GraphQL gateway.
#[derive(Debug, Parser)]
#[command(name = "shelf-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the gateway over HTTP (or on the Lambda runtime when present).
    Serve,
    /// Print the GraphQL schema in SDL form.
    PrintSchema,
    /// Print the resolved configuration as JSON.
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load gateway settings")?;

    match cli.command {
        Command::Serve => {
            shelf_telemetry::init(&settings.telemetry)?;
            shelf_gateway::run(settings).await
        }
        Command::PrintSchema => {
            let schema = shelf_gateway::gateway_schema(&settings);
            println!("{}", schema.sdl());
            Ok(())
        }
        Command::ShowConfig => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render configuration")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
