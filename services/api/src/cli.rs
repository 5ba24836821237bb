use crate::commands::{run_provinces, run_regencies, run_search, RegenciesArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use magang_scout::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "magang-scout",
    about = "Search internship vacancies by region and estimate the chance of acceptance",
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
    /// List provinces known to the region provider
    Provinces,
    /// List the regencies of one province
    Regencies(RegenciesArgs),
    /// Search vacancies and print them with their admission chance
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
        Command::Provinces => run_provinces().await,
        Command::Regencies(args) => run_regencies(args).await,
        Command::Search(args) => run_search(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magang_scout::filters::{OrderBy, OrderDirection};

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["magang-scout"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn search_flags_parse() {
        let cli = Cli::try_parse_from([
            "magang-scout",
            "search",
            "--keyword",
            "designer",
            "--order-by",
            "quota",
            "--direction",
            "DESC",
            "--limit",
            "5",
            "--province",
            "36",
            "--regency",
            "36.71",
        ])
        .expect("parses");

        let Some(Command::Search(args)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.keyword.as_deref(), Some("designer"));
        assert_eq!(args.order_by, OrderBy::QuotaCount);
        assert_eq!(args.direction, OrderDirection::Descending);
        assert_eq!(args.limit.as_deref(), Some("5"));
        assert_eq!(args.province.as_deref(), Some("36"));
        assert_eq!(args.regency.as_deref(), Some("36.71"));
    }

    #[test]
    fn search_rejects_unknown_sort_field() {
        let result = Cli::try_parse_from(["magang-scout", "search", "--order-by", "salary"]);
        assert!(result.is_err());
    }
}
