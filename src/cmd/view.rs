use clap::{Args, Subcommand};

use crate::context::AppContext;
use crate::domain::view::{GroupingKey, SortingKey};
use crate::error::AppResult;
use crate::workflow::options::{apply_overrides, persist_or_warn};

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    #[command(subcommand)]
    pub command: ViewCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ViewCommand {
    /// Show the stored grouping and sorting.
    Show,
    /// Store a new grouping and/or sorting.
    Set {
        /// Column grouping (status, user, priority, team, dueDate).
        #[arg(short, long)]
        group: Option<String>,
        /// Order within a column (priority, title).
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Forget the stored options and go back to the defaults.
    Reset,
}

pub fn run(ctx: &AppContext, command: ViewCommand) -> AppResult<()> {
    match command {
        ViewCommand::Show => run_show(ctx),
        ViewCommand::Set { group, sort } => run_set(ctx, group.as_deref(), sort.as_deref()),
        ViewCommand::Reset => run_reset(ctx),
    }
}

fn run_show(ctx: &AppContext) -> AppResult<()> {
    let options = ctx.view_options.load();

    println!("View state file: {}", ctx.state_location.display());
    println!("Grouping: {}", options.grouping);
    println!("Sorting: {}", options.sorting);
    println!(
        "Available groupings: {}",
        GroupingKey::ALL.map(|key| key.as_str()).join(", ")
    );
    println!(
        "Available sortings: {}",
        SortingKey::ALL.map(|key| key.as_str()).join(", ")
    );
    Ok(())
}

fn run_set(ctx: &AppContext, group: Option<&str>, sort: Option<&str>) -> AppResult<()> {
    let options = apply_overrides(ctx.view_options.load(), group, sort)?;

    if persist_or_warn(&ctx.view_options, &options)? {
        println!(
            "Saved view: grouped by {}, sorted by {}",
            options.grouping, options.sorting
        );
    } else {
        println!("View could not be saved; it will not be remembered.");
    }
    Ok(())
}

fn run_reset(ctx: &AppContext) -> AppResult<()> {
    ctx.view_options.reset()?;
    let options = ctx.view_options.load();
    println!(
        "View reset: grouped by {}, sorted by {}",
        options.grouping, options.sorting
    );
    Ok(())
}
