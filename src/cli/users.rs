//! User management commands

use chrono::Utc;
use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, DisableInactiveArgs, MapGithubArgs, OutputFormat};
use crate::config::{Settings, SweepConfig, process_env};
use crate::error::{Error, Result};
use crate::mapping::{self, MappingPlan, MappingReport};
use crate::models::MappingDisplay;
use crate::output::{self, ConsoleReporter};
use crate::sweep;

/// Run the inactive user sweep
pub async fn disable_inactive(opts: &GlobalOptions, args: &DisableInactiveArgs) -> Result<()> {
    let settings = Settings::load_at(opts.config_ref())?;

    // Invalid sweep settings fail before authenticating
    let config = SweepConfig::resolve(&args.overrides(), &process_env, &settings)?;
    debug!(
        "Sweep: {} days (from {}), batch size {} (from {}), org filter {:?}, dry run {}",
        config.days_inactive.value,
        config.days_inactive.source,
        config.batch_size.value,
        config.batch_size.source,
        config.org_filter(),
        config.dry_run
    );

    let ctx = CommandContext::with_settings(opts, &settings).await?;
    let reporter = ConsoleReporter::new(ctx.format);
    let outcome = sweep::run(&ctx.client, &config, Utc::now(), &reporter).await?;

    if ctx.format == OutputFormat::Json {
        output::print_json(&outcome)?;
    }
    Ok(())
}

/// Link GitHub user entities to Port users
pub async fn map_github(opts: &GlobalOptions, args: &MapGithubArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let plan = mapping::build_plan(&ctx.client, &args.user_blueprint, &args.github_blueprint)
        .await?;

    if args.dry_run {
        print_plan(&plan, ctx.format, true)?;
        return Ok(());
    }

    let report = mapping::apply(&ctx.client, &args.github_blueprint, &plan).await;
    print_plan(&plan, ctx.format, false)?;
    print_report(&plan, &report, ctx.format)?;

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(Error::Other(format!(
            "{} of {} entity updates failed",
            report.failed.len(),
            plan.links.len()
        )))
    }
}

fn print_plan(plan: &MappingPlan, format: OutputFormat, dry_run: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            // Applied runs print the plan inside the report document
            if dry_run {
                output::print_json(plan)?;
            }
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            let rows: Vec<MappingDisplay> = plan
                .links
                .iter()
                .map(MappingDisplay::from)
                .chain(plan.unmatched.iter().map(MappingDisplay::from))
                .collect();
            output::print(&rows, format)?;

            let prefix = if dry_run { "[DRY RUN] " } else { "" };
            println!(
                "\n{}{} to map, {} already mapped, {} unmatched",
                prefix,
                plan.links.len().to_string().bold(),
                plan.already_mapped,
                plan.unmatched.len()
            );
            if dry_run {
                println!("{}", "Dry run finished. No data was changed in Port.".yellow());
            }
        }
    }
    Ok(())
}

fn print_report(plan: &MappingPlan, report: &MappingReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct Applied<'a> {
                plan: &'a MappingPlan,
                linked: &'a [String],
                failed: &'a [String],
            }
            output::print_json(&Applied {
                plan,
                linked: &report.linked,
                failed: &report.failed,
            })?;
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{} Linked {} GitHub users", "✓".green(), report.linked.len());
            if !report.failed.is_empty() {
                println!(
                    "{} Failed to update: {}",
                    "✗".red(),
                    report.failed.join(", ")
                );
            }
        }
    }
    Ok(())
}
