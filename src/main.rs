use clap::Parser;
use formatted_text::cli::{self, Config};

fn main() {
    let config = Config::parse();
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();

    if let Err(error) = cli::run(&config) {
        cli::die(1, &error.to_string());
    }
}
