use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let config_dir = cli.config_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = taskdeck::tui::run(config_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
