use crate::cli::{Cli, Commands};
use crate::domain::models::{ConfigFile, DiscoverReport, RunReport};
use crate::services::compare::compare;
use crate::services::config::engine_options;
use crate::services::discovery::{DependentSource, PkgGoDevSource};
use crate::services::engine::Engine;
use crate::services::output::print_one;
use crate::services::report::{render_impact, render_summary, summarize};
use crate::services::storage::{load_projects, load_verdicts, save_projects, save_verdicts};
use crate::services::toolchain;

pub fn handle_command(cli: &Cli, config: &ConfigFile) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Discover {
            module,
            limit,
            output,
        } => {
            let limit = limit.unwrap_or(config.discovery.limit);
            tracing::info!("discovering dependents of {} (limit {})", module, limit);
            let source = PkgGoDevSource::new(config.discovery.base_url.clone());
            let dependents = source.fetch_dependents(module, limit)?;
            save_projects(output, &dependents)?;

            let report = DiscoverReport {
                module: module.clone(),
                output: output.to_string_lossy().to_string(),
                dependents,
            };
            print_one(cli.json, report, |r| {
                let mut lines = vec![format!("Found {} dependents", r.dependents.len())];
                for (i, d) in r.dependents.iter().enumerate() {
                    lines.push(format!("  {}. {}", i + 1, d.import_path));
                }
                lines.push(format!("Saved to {}", r.output));
                lines.join("\n")
            })?;
        }
        Commands::Run {
            input,
            output,
            timeout,
            work_dir,
            jobs,
        } => {
            let opts = engine_options(config, *timeout, work_dir.as_deref(), *jobs)?;
            let projects = load_projects(input)?;
            tracing::info!(
                projects = projects.len(),
                work_dir = %opts.work_dir.display(),
                timeout_secs = opts.timeout.as_secs_f64(),
                jobs = opts.jobs,
                "starting run"
            );

            let (fetcher, tester) = toolchain::from_config(&config.toolchain);
            let engine = Engine::new(&fetcher, &tester, opts);
            let verdicts = engine.run(&projects)?;
            save_verdicts(output, &verdicts)?;

            let report = RunReport {
                output: output.to_string_lossy().to_string(),
                summary: summarize(&verdicts),
                verdicts,
            };
            print_one(cli.json, report, |r| {
                format!("{}\nSaved to {}", render_summary(&r.summary), r.output)
            })?;
        }
        Commands::Compare { before, after } => {
            let before = load_verdicts(before)?;
            let after = load_verdicts(after)?;
            let report = compare(&before, &after);
            print_one(cli.json, report, |r| render_impact(r).trim_end().to_string())?;
        }
    }

    Ok(())
}
