//! Entry point for the `unattended-config` CLI.
//!
//! Parses arguments, dispatches to the library, and maps failures to exit
//! codes: 0 on success, 2 when the config file does not exist (a normal
//! outcome for the installer, kept distinct), 1 for everything else.

mod cli;

use cli::{Cli, Command, ShowArgs, ValidateArgs, WriteArgs};
use std::process::ExitCode;
use unattended_config::{Config, ConfigFields, LoadError, write_config};

const SUCCESS: u8 = 0;
const FAILURE: u8 = 1;
const NO_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = match cli.command {
        Command::Validate(args) => validate(args),
        Command::Show(args) => show(args),
        Command::Write(args) => write(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::from(FAILURE)
        }
    }
}

fn load_or_exit_code(path: &std::path::Path) -> Result<Result<Config, u8>, String> {
    match Config::load(path) {
        Ok(config) => Ok(Ok(config)),
        Err(LoadError::NotFound(_)) => {
            eprintln!("no unattended configuration at '{}'", path.display());
            Ok(Err(NO_CONFIG))
        }
        Err(e) => Err(e.to_string()),
    }
}

fn validate(args: ValidateArgs) -> Result<u8, String> {
    match load_or_exit_code(&args.path)? {
        Ok(_) => {
            println!("{}: OK", args.path.display());
            Ok(SUCCESS)
        }
        Err(code) => Ok(code),
    }
}

fn show(args: ShowArgs) -> Result<u8, String> {
    let config = match load_or_exit_code(&args.path)? {
        Ok(config) => config,
        Err(code) => return Ok(code),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&config).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        println!("locale: {}", config.locale().unwrap_or("(unset)"));
        println!("image: {}", config.image().unwrap_or("(unset)"));
        if config.computers().is_empty() {
            println!("computers: (any)");
        } else {
            for (i, computer) in config.computers().iter().enumerate() {
                println!(
                    "computer {}: vendor '{}', product '{}'",
                    i + 1,
                    computer.vendor,
                    computer.product
                );
            }
        }
    }

    Ok(SUCCESS)
}

fn write(args: WriteArgs) -> Result<u8, String> {
    let fields = ConfigFields {
        locale: args.locale.as_deref(),
        image_filename: args.image.as_deref(),
        block_device: args.block_device.as_deref(),
        vendor: args.vendor.as_deref(),
        product: args.product.as_deref(),
    };

    let backup = write_config(&args.path, &fields).map_err(|e| e.to_string())?;

    if let Some(backup) = backup {
        println!("previous config preserved as '{backup}'");
    }
    println!("wrote {}", args.path.display());

    Ok(SUCCESS)
}
