use crate::report::{run_profile_listing, run_staffing_analysis, AnalyzeArgs, ProfilesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use worship_staffing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Worship Staffing",
    about = "Check event rosters against staffing requirements and serve the analysis over HTTP",
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
    /// Inspect staffing requirements and analyze rosters
    Staffing {
        #[command(subcommand)]
        command: StaffingCommand,
    },
}

#[derive(Subcommand, Debug)]
enum StaffingCommand {
    /// Analyze a roster export against an event type's requirements
    Analyze(AnalyzeArgs),
    /// Print the requirement profiles in use
    Profiles(ProfilesArgs),
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
        Command::Staffing {
            command: StaffingCommand::Analyze(args),
        } => run_staffing_analysis(args),
        Command::Staffing {
            command: StaffingCommand::Profiles(args),
        } => run_profile_listing(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worship_staffing::workflows::staffing::EventType;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["worship-staffing-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_accepts_event_type_and_dates() {
        let cli = Cli::try_parse_from([
            "worship-staffing-api",
            "staffing",
            "analyze",
            "--event-type",
            "concert",
            "--event-date",
            "2025-10-12",
            "--today",
            "2025-10-01",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Staffing {
                command: StaffingCommand::Analyze(args),
            }) => {
                assert_eq!(args.event_type, EventType::Concert);
                assert_eq!(
                    args.event_date.map(|date| date.to_string()).as_deref(),
                    Some("2025-10-12")
                );
                assert!(args.roster_csv.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn analyze_rejects_unknown_event_type() {
        let result = Cli::try_parse_from([
            "worship-staffing-api",
            "staffing",
            "analyze",
            "--event-type",
            "gala",
        ]);
        assert!(result.is_err());
    }
}
