pub mod handlers;

use crate::presentation::cli::{Cli, Commands, FilesCommands};
use socpack_core::error::Result;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest {
            archive,
            user,
            employee_id,
            store,
            no_store,
            policy,
            filters,
            search,
            sort,
            preview,
            export,
            columns,
            format,
            scope,
            json,
        } => handlers::handle_ingest(handlers::IngestArgs {
            archive,
            user,
            employee_id,
            store: (!no_store).then_some(store),
            policy,
            filters,
            search,
            sort,
            preview,
            export,
            columns,
            format: format.into(),
            scope: scope.into(),
            json,
        }),
        Commands::Facets { archive, policy } => handlers::handle_facets(archive, policy),
        Commands::Files(cmd) => match cmd {
            FilesCommands::List { store, user } => handlers::handle_files_list(store, user),
            FilesCommands::Rm { date, store } => handlers::handle_files_rm(store, date),
        },
    }
}
