//! Render a Block Tree
//!
//! Reads a block tree as JSON and prints it as plain text, HTML, or the
//! debug rendering with block boundary markers.
//!
//! Usage:
//!   cargo run --bin render_block -- page.json
//!   cargo run --bin render_block -- page.json --format html --class-prefix alto-
//!   cat page.json | cargo run --bin render_block -- --format debug --validate

use alto_text::converters::{HtmlConverter, PlainTextConverter, RenderOptions, TokenConverter};
use alto_text::structure::validate_block_tree;
use alto_text::text::Block;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Html,
    Debug,
}

struct RenderConfig {
    input: Option<PathBuf>,
    format: Format,
    class_prefix: String,
    validate: bool,
}

impl RenderConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut format = Format::Text;
        let mut class_prefix = String::new();
        let mut validate = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--format" | "-f" => {
                    i += 1;
                    if i < args.len() {
                        format = match args[i].as_str() {
                            "html" => Format::Html,
                            "debug" => Format::Debug,
                            "text" => Format::Text,
                            other => {
                                eprintln!("Unknown format '{}', using text", other);
                                Format::Text
                            },
                        };
                    }
                },
                "--class-prefix" => {
                    i += 1;
                    if i < args.len() {
                        class_prefix = args[i].clone();
                    }
                },
                "--validate" => {
                    validate = true;
                },
                path => {
                    input = Some(PathBuf::from(path));
                },
            }
            i += 1;
        }

        Self {
            input,
            format,
            class_prefix,
            validate,
        }
    }
}

fn read_block(input: Option<&PathBuf>) -> alto_text::Result<Block> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

fn run(config: &RenderConfig) -> alto_text::Result<()> {
    let block = read_block(config.input.as_ref())?;
    log::info!(
        "Loaded block tree: {} blocks, {} words",
        block.block_count(),
        block.word_count()
    );

    if config.validate {
        validate_block_tree(&block).into_result()?;
    }

    let output = match config.format {
        Format::Text => PlainTextConverter.convert(&block),
        Format::Html => {
            let options = RenderOptions::default().with_class_prefix(config.class_prefix.clone());
            HtmlConverter::with_options(options).convert(&block)
        },
        Format::Debug => block.to_string(),
    };
    print!("{}", output);
    Ok(())
}

fn main() {
    env_logger::init();

    let config = RenderConfig::from_args();
    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
