use crate::demo::{
    run_deal, run_demo, run_estimate, run_investment, run_location, run_risk, DealArgs,
    DemoArgs, EstimateArgs, InvestmentArgs, LocationArgs, RiskArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use estate_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Estate AI",
    about = "Serve or run the Estate AI valuation formulas from the command line",
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
    /// Estimate a property's sale price
    Estimate(EstimateArgs),
    /// Score an asking price against market value
    Deal(DealArgs),
    /// Compute rental yield metrics for a purchase
    Invest(InvestmentArgs),
    /// Grade purchase risks and suggest a strategy
    Risk(RiskArgs),
    /// Summarise a location from the configured catalog
    Location(LocationArgs),
    /// Run every valuation against a sample property
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Deal(args) => run_deal(args),
        Command::Invest(args) => run_investment(args),
        Command::Risk(args) => run_risk(args),
        Command::Location(args) => run_location(args),
        Command::Demo(args) => run_demo(args),
    }
}
