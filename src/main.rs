// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use tbconv::{logging, Conversion, ConvertConfig, Converter};

const BANNER: &str = "----------";

fn print_usage() {
    println!("tbconv - TB-3 / TB-03 pattern backup converter");
    println!();
    println!("Usage: tbconv [OPTIONS] INPUT_FILE OUTPUT_FILE");
    println!();
    println!("Arguments:");
    println!("  INPUT_FILE              File to convert");
    println!("  OUTPUT_FILE             The result of file conversion");
    println!();
    println!("Options:");
    println!("  -p, --print             Print input and output file");
    println!("  --config <FILE>         Load settings from a YAML or TOML file");
    println!("  --dump                  Print the parsed pattern as YAML");
    println!("  -h, --help              Show this help message");
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    input: PathBuf,
    output: PathBuf,
    print: bool,
    dump: bool,
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Convert(Options),
}

fn parse_args(args: &[String]) -> std::result::Result<Command, String> {
    let mut positional = Vec::new();
    let mut print = false;
    let mut dump = false;
    let mut config = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-p" | "--print" => print = true,
            "--dump" => dump = true,
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--config requires a file name".to_string())?;
                config = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("Unknown option: {}", other));
            }
            other => positional.push(PathBuf::from(other)),
        }
    }

    match positional.len() {
        2 => {
            let output = positional.pop().unwrap_or_default();
            let input = positional.pop().unwrap_or_default();
            Ok(Command::Convert(Options {
                input,
                output,
                print,
                dump,
                config,
            }))
        }
        0 | 1 => Err("INPUT_FILE and OUTPUT_FILE are required".to_string()),
        n => Err(format!("Expected 2 file arguments, found {}", n)),
    }
}

fn echo_input(conversion: &Conversion) {
    println!("{}", BANNER);
    println!("Input File: {}", conversion.input.display());
    println!("{}", BANNER);
    println!();
    for line in &conversion.input_lines {
        println!("{}", line);
    }
}

fn echo_outputs(conversion: &Conversion) {
    for file in &conversion.files {
        println!();
        println!("{}", BANNER);
        println!("Output file: {}", file.path.display());
        println!("{}", BANNER);
        println!();
        print!("{}", file.contents);
    }
    println!("{}", BANNER);
    println!();
}

fn run(options: Options) -> Result<()> {
    let config = match &options.config {
        Some(path) => ConvertConfig::load(path)?,
        None => ConvertConfig::default(),
    };

    let print = options.print || config.print;
    let level = logging::parse_level(&config.logging.level)?;
    logging::init(logging::effective_level(level, print));

    let mut converter = Converter::local(config.writer_options());
    let conversion = converter.plan(&options.input, &options.output)?;

    println!(
        "Converting backup file from {} to {}\n",
        conversion.source, conversion.target
    );

    if print {
        echo_input(&conversion);
    }
    if options.dump {
        print!("{}", conversion.pattern.to_yaml()?);
    }

    converter.write_files(&conversion)?;

    if print {
        echo_outputs(&conversion);
    }

    if conversion.is_split() {
        let names: Vec<String> = conversion
            .output_paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!(
            "{} are generated instead of {}, because the pattern in input file is longer than 16 steps.\n",
            names.join(" and "),
            conversion.requested.display()
        );
    }

    println!("Conversion complete.");
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Convert(options)) => options,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
