// SPDX-License-Identifier: Apache-2.0

//! Drives the command-line program.

use crate::{ParseOptions, markdown, parse_html_as_formatted_text};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::debug;
use std::io::{self, Read};
use std::process;
use thiserror::Error;

/// Errors that stop the command-line program.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),

    #[error("could not write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Prints `message` to standard error and exits with `error_code`.
pub fn die(error_code: i32, message: &str) -> ! {
    eprintln!("{message}");
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Converts message markup into plain text and entities", long_about = None)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(subcommand)]
    command: Command,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the formatted text and its entities as JSON
    #[clap(alias = "e")]
    Entities {
        #[command(flatten)]
        input: InputConfig,

        /// Treat the input as markup and skip inline markup conversion
        #[arg(long, default_value_t = false)]
        skip_markdown: bool,

        /// Pretty-print the JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },

    /// Print the markup generated from inline markup
    #[clap(alias = "m")]
    Markup {
        #[command(flatten)]
        input: InputConfig,
    },
}

#[derive(Args, Debug)]
struct InputConfig {
    /// Expand [label](target) link shorthand
    #[arg(short = 'l', long = "links", default_value_t = false)]
    expand_links: bool,

    /// Text to convert; read from standard input if omitted
    input: Option<String>,
}

impl InputConfig {
    fn read(&self) -> Result<String, Error> {
        match &self.input {
            Some(input) => Ok(input.clone()),
            None => {
                debug!("reading input from stdin");
                let mut input = String::new();
                io::stdin().read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

/// Runs the command-line program using the given `config`.
pub fn run(config: &Config) -> Result<(), Error> {
    match &config.command {
        Command::Entities {
            input,
            skip_markdown,
            pretty,
        } => run_entities(input, *skip_markdown, *pretty),
        Command::Markup { input } => run_markup(input),
    }
}

fn run_entities(input: &InputConfig, skip_markdown: bool, pretty: bool) -> Result<(), Error> {
    let opts = ParseOptions::build()
        .expand_links(input.expand_links)
        .skip_markdown(skip_markdown)
        .build();
    let formatted = parse_html_as_formatted_text(&input.read()?, &opts);

    let json = if pretty {
        serde_json::to_string_pretty(&formatted)?
    } else {
        serde_json::to_string(&formatted)?
    };
    println!("{json}");
    Ok(())
}

fn run_markup(input: &InputConfig) -> Result<(), Error> {
    println!("{}", markdown::to_markup(&input.read()?, input.expand_links));
    Ok(())
}
