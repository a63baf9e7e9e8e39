use anyhow::Result;
use clap::Parser;
use natmap::cli::{Cli, Commands};
use natmap::commands::{self, GroupConfig, ProjectsConfig, RankConfig};

fn main() -> Result<()> {
    // Malformed-row warnings are visible by default; RUST_LOG overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Group {
            input,
            output,
            layout,
            strict,
        } => {
            commands::handle_group(&GroupConfig {
                input,
                output,
                layout: layout.to_layout(),
                strict,
            })?;
        }
        Commands::Projects {
            input,
            output,
            layout,
        } => {
            commands::handle_projects(&ProjectsConfig {
                input,
                output,
                layout: layout.to_layout(),
            })?;
        }
        Commands::Rank {
            artifact,
            metric,
            format,
            output,
        } => {
            commands::handle_rank(&RankConfig {
                artifact,
                metric,
                format,
                output,
            })?;
        }
    }
    Ok(())
}
