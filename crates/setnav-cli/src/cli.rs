use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "setnav",
    about = "Workspace set navigation — enumerate top-level sets in an object-storage workspace",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Workspace service endpoint URL
    #[arg(long, global = true, default_value = "https://kbase.us/services/ws")]
    pub url: String,

    /// Authorization token (falls back to the SETNAV_TOKEN environment variable)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the top-level sets of a workspace
    ListSets(ListSetsArgs),
    /// Show metadata for a workspace
    WorkspaceInfo(WorkspaceInfoArgs),
}

#[derive(Args)]
pub struct ListSetsArgs {
    /// Workspace to search, by numeric id or by name
    pub workspace: String,

    /// Also fetch full metadata for every item of every top-level set
    #[arg(long)]
    pub item_info: bool,

    /// Set types to enumerate (repeatable); defaults to the built-in list
    #[arg(long = "set-type")]
    pub set_types: Vec<String>,
}

#[derive(Args)]
pub struct WorkspaceInfoArgs {
    /// Workspace to describe, by numeric id or by name
    pub workspace: String,
}
