use crate::search::{run_search, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use therapist_finder::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Therapist Finder",
    about = "Serve or run mental-health provider lookups against the NPI Registry",
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
    /// Run a single lookup against the configured registry and print the results
    Search(SearchArgs),
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
        Command::Search(args) => run_search(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["therapist-finder"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_search_arguments() {
        let cli = Cli::try_parse_from([
            "therapist-finder",
            "search",
            "--zip",
            "60614",
            "--focus",
            "marriage",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Search(args)) => {
                assert_eq!(args.zip, "60614");
                assert_eq!(args.focus.as_deref(), Some("marriage"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["therapist-finder", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
