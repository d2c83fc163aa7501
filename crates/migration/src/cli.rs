use clap::Parser;
use sea_orm_cli::MigrateSubcommands;

/// Apply or roll back the zapshift database schema.
#[derive(Parser)]
#[clap(name = "zapshift-migrate")]
pub(crate) struct Cli {
    /// Migration command, `up` when omitted.
    #[clap(subcommand)]
    pub command: Option<MigrateSubcommands>,
}
