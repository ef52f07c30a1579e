use clap::Parser;
use formsmith::cli::commands::{cmd_blocks, cmd_catalog, cmd_edit, cmd_fields, cmd_generate, cmd_preview};
use formsmith::cli::config::{Cli, Commands, load_config, resolve_settings};
use formsmith::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > defaults
    let backend = match &cli.command {
        Commands::Generate { backend, .. } => *backend,
        _ => None,
    };
    let settings = resolve_settings(&cli, config, backend);

    match cli.command {
        Commands::Blocks { file } => {
            cmd_blocks(&file, settings.library)?;
        }
        Commands::Preview { file } => {
            let clean = cmd_preview(&file, &settings)?;
            if !clean {
                std::process::exit(1);
            }
        }
        Commands::Edit {
            file,
            block,
            assignments,
            in_place,
        } => {
            cmd_edit(&file, block, &assignments, in_place, settings.library)?;
        }
        Commands::Fields { file, block } => {
            cmd_fields(&file, block, settings.library)?;
        }
        Commands::Generate {
            prompt,
            input,
            output,
            ..
        } => {
            cmd_generate(&prompt, input.as_deref(), output.as_deref(), &settings)?;
        }
        Commands::Catalog => {
            cmd_catalog(settings.library);
        }
    }

    Ok(())
}
