use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web front end.
    Serve(ServeArgs),
    /// Search the catalog and print matching titles.
    Search(SearchArgs),
    /// Print the details of one volume.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search keywords.
    pub query: String,

    /// Maximum number of results to request.
    #[arg(long, default_value_t = crate::catalog::DEFAULT_MAX_RESULTS)]
    pub max_results: u32,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Catalog id of the volume.
    pub id: String,
}
