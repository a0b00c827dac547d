//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the entries and tags tables.
    Deploy(DeployCommand),
}

/// Deploy or destroy DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the DynamoDB tables the API uses.

By default, this command creates any missing table: the entries table
(partition key `id`) and the tags table (partition key `tag`), both billed
per request. Existing tables are left alone.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-2)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the tables instead of creating them.
    #[arg(long)]
    pub destroy: bool,

    /// Entries table name.
    #[arg(long, env = "ENTRIES_TABLE", default_value = config::DEFAULT_ENTRIES_TABLE)]
    pub entries_table: String,

    /// Tags table name.
    #[arg(long, env = "TAGS_TABLE", default_value = config::DEFAULT_TAGS_TABLE)]
    pub tags_table: String,

    /// Partition key attribute of the entries table.
    #[arg(long, env = "ENTRIES_KEY", default_value = config::DEFAULT_ENTRIES_KEY)]
    pub entries_key: String,

    /// Partition key attribute of the tags table.
    #[arg(long, env = "TAGS_KEY", default_value = config::DEFAULT_TAGS_KEY)]
    pub tags_key: String,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;
    let tables = config::skills_tracker_tables(
        &cmd.entries_table,
        &cmd.entries_key,
        &cmd.tags_table,
        &cmd.tags_key,
    );

    if cmd.destroy {
        run_destroy(&dynamo_client, &tables, cmd.force, global).await
    } else {
        run_create(&dynamo_client, &tables, cmd.force, global).await
    }
}

async fn run_destroy(
    client: &aws_sdk_dynamodb::Client,
    tables: &[config::TableConfig],
    force: bool,
    global: &crate::Global,
) -> Result<()> {
    let mut plans = Vec::with_capacity(tables.len());
    for table in tables {
        let current = client::get_table_state(client, &table.table_name).await?;
        plans.push(planning::calculate_destroy_plan(
            current.as_ref(),
            &table.table_name,
        ));
    }

    if !global.is_silent() {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in plans.iter().flat_map(planning::format_destroy_plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if plans
        .iter()
        .all(|p| matches!(p, planning::DestroyPlan::AlreadyGone { .. }))
    {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    if !force
        && !confirm("Are you sure you want to delete these tables? ALL DATA WILL BE LOST", false)?
    {
        return Err(DynamodbError::UserCancelled);
    }

    if global.is_verbose() {
        aprintln!("{}", p_b("Deleting tables..."));
    }

    for plan in &plans {
        deploy::execute_destroy_plan(client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Tables destroyed successfully."));
    }

    Ok(())
}

async fn run_create(
    client: &aws_sdk_dynamodb::Client,
    tables: &[config::TableConfig],
    force: bool,
    global: &crate::Global,
) -> Result<()> {
    let mut plans = Vec::with_capacity(tables.len());
    for table in tables {
        let current = client::get_table_state(client, &table.table_name).await?;
        plans.push(planning::calculate_deploy_plan(current.as_ref(), table));
    }

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in plans.iter().flat_map(planning::format_deploy_plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('!') {
                aprintln!("  {}", p_r(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    // A mismatched key fails before anything is created.
    if let Some(mismatch) = plans
        .iter()
        .find(|p| matches!(p, planning::DeployPlan::KeyMismatch { .. }))
    {
        return deploy::execute_deploy_plan(client, mismatch).await;
    }

    if !plans.iter().any(planning::DeployPlan::has_changes) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !force && !confirm("Apply these changes?", true)? {
        return Err(DynamodbError::UserCancelled);
    }

    for plan in plans.iter().filter(|p| p.has_changes()) {
        if global.is_verbose() {
            for line in planning::format_deploy_plan(plan).iter().take(1) {
                aprintln!("{} {}", p_b("Applying:"), line);
            }
        }
        deploy::execute_deploy_plan(client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::Prompt(e.to_string()))
}
