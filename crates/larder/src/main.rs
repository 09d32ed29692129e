mod cli;
mod commands;
mod config;
mod error;
mod output;
mod router;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use larder_core::{ContentFacade, HttpItemRepository};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::router::ViewRouter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(ref args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "larder", &mut std::io::stdout());
            Ok(())
        }

        Command::Items(args) => {
            let cfg = config::load_config(&config::config_path(&cli.global))?;
            let backend = config::resolve_backend(&cfg, &cli.global)?;
            let repository = HttpItemRepository::connect(&backend)?;

            let router = Arc::new(ViewRouter::new());
            let facade = ContentFacade::spawn(Arc::new(repository), router.clone());

            let ctx = commands::Context {
                facade,
                router,
                output: config::output_format(&cfg, &cli.global),
                color: output::should_color(config::color_mode(&cfg, &cli.global)),
                quiet: cli.global.quiet,
                yes: cli.global.yes,
            };

            tracing::debug!(url = %backend.url, command = ?args.command, "dispatching command");
            commands::items::handle(&ctx, args).await
        }
    }
}
