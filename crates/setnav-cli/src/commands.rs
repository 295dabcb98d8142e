use anyhow::Context;
use colored::Colorize;
use setnav_navigator::{ListSetsParams, ListedSets, SetNavigator};
use setnav_types::{WorkspaceIdentity, WorkspaceInfo};
use setnav_workspace::{RpcWorkspace, WorkspaceClient};

use crate::cli::{Cli, Command, ListSetsArgs, OutputFormat, WorkspaceInfoArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("SETNAV_TOKEN").ok());
    let client = match token {
        Some(token) => RpcWorkspace::with_token(&cli.url, token),
        None => RpcWorkspace::new(&cli.url),
    }
    .context("failed to build workspace client")?;

    match &cli.command {
        Command::ListSets(args) => list_sets(&cli, client, args),
        Command::WorkspaceInfo(args) => workspace_info(&cli, client, args),
    }
}

fn list_sets(cli: &Cli, client: RpcWorkspace, args: &ListSetsArgs) -> anyhow::Result<()> {
    let navigator = if args.set_types.is_empty() {
        SetNavigator::new(client)
    } else {
        SetNavigator::with_set_types(client, args.set_types.clone())
    };

    let mut params = ListSetsParams::for_workspace(&args.workspace);
    if args.item_info {
        params = params.with_item_info();
    }
    let listed = navigator.list_sets(&params)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listed)?),
        OutputFormat::Text => print_sets(&listed),
    }
    Ok(())
}

fn print_sets(listed: &ListedSets) {
    if listed.sets.is_empty() {
        println!("no top-level sets");
        return;
    }
    for set in &listed.sets {
        println!(
            "{} {} ({}, {} items)",
            set.obj_ref.to_string().yellow(),
            set.info.name.bold(),
            set.info.type_string,
            set.items.len()
        );
        for item in &set.items {
            match &item.info {
                Some(info) => println!("    {} {}", item.obj_ref, info.name),
                None => println!("    {}", item.obj_ref),
            }
        }
    }
}

fn workspace_info(cli: &Cli, client: RpcWorkspace, args: &WorkspaceInfoArgs) -> anyhow::Result<()> {
    let identity = WorkspaceIdentity::resolve(&args.workspace);
    let info = client.get_workspace_info(&identity)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Text => print_workspace(&info),
    }
    Ok(())
}

fn print_workspace(info: &WorkspaceInfo) {
    println!("{}  {}", info.id.to_string().yellow(), info.name.bold());
    println!("    owner:          {}", info.owner);
    println!("    modified:       {}", info.modified_at);
    println!("    max object id:  {}", info.max_object_id);
    println!("    permission:     {}", info.user_permission);
    println!("    lock status:    {}", info.lock_status);
}
