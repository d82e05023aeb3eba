mod cli;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Enter {
            cells,
            empty_char,
            strict,
            mask,
        } => cli::enter::run(cells, empty_char, strict, mask),
        Commands::Simulate {
            cells,
            empty_char,
            strict,
            table,
            steps,
        } => cli::simulate::run(cells, empty_char, strict, table, &steps),
        Commands::Config {
            cells,
            empty_char,
            strict,
            no_strict,
            mask,
            no_mask,
        } => cli::config::run(cells, empty_char, strict, no_strict, mask, no_mask),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
