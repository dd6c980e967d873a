use amrscope::cli::{self, Commands};
use amrscope::commands::{self, OptionsConfig, ProjectConfig};
use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Init { force } => commands::init_config(force),
        command => {
            let config = cli::load_configuration(cli.config.as_deref())?;
            let defaults = config.view_defaults();
            run(command, config, &defaults)
        }
    }
}

fn run(
    command: Commands,
    config: &amrscope::config::AmrscopeConfig,
    defaults: &amrscope::ViewDefaults,
) -> Result<()> {
    match command {
        Commands::Views => commands::list_views(defaults),
        Commands::Options {
            view,
            category,
            remote,
            endpoint,
        } => commands::show_options(
            OptionsConfig {
                view,
                category,
                remote,
                endpoint,
            },
            defaults,
            &config.remote(),
        ),
        Commands::Project {
            view,
            filters,
            format,
            output,
            save,
            summary,
            rate_ceiling,
        } => commands::project_view(
            ProjectConfig {
                view,
                filters,
                format,
                output,
                save,
                summary,
                rate_ceiling,
            },
            defaults,
            &config.export(),
        ),
        Commands::Init { force } => commands::init_config(force),
    }
}
