use crate::demo::{run_demo, run_plan_preview, DemoArgs, PlanPreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use extrataff::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ExtraTaff Staffing Marketplace",
    about = "Demonstrate and run the ExtraTaff staffing marketplace from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with mission plan spreadsheet exports
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Run an end-to-end CLI demo covering the feed and hiring workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    /// Import a mission plan CSV and preview the resulting feed
    Preview(PlanPreviewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the in-memory marketplace with demo missions and a talent
    #[arg(long)]
    pub(crate) seed_demo: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Plan {
            command: PlanCommand::Preview(args),
        } => run_plan_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}
