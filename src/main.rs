//! cred-gate - Entry Point
//!
//! Command-line front-end for the credential validation facade: validates one
//! identity (with an optional secret) against the configured domain backends.

use std::env;
use std::process;

use log::{error, info};

use cred_gate::BackendRegistry;
use cred_gate::config::ValidatorConfig;
use cred_gate::error::handlers::{error_to_exit_code, handle_error};

fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: cred-gate <identity> [secret]");
        process::exit(1);
    }

    let config = match ValidatorConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let registry = match BackendRegistry::from_config(&config) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to build backend registry: {}", e);
            process::exit(1);
        }
    };

    let created = if args.len() >= 3 {
        registry.create_validator_with_hooks(
            &args[1],
            &args[2],
            Some(Box::new(|| info!("validation succeeded"))),
            Some(Box::new(|| info!("validation failed"))),
        )
    } else {
        registry.create_placeholder(&args[1])
    };

    let mut validator = match created {
        Ok(validator) => validator,
        Err(e) => {
            handle_error(&e);
            process::exit(error_to_exit_code(&e));
        }
    };

    match validator.validate() {
        Ok(valid) => {
            println!("{}", validator.validation_message());
            process::exit(if valid { 0 } else { 1 });
        }
        Err(e) => {
            handle_error(&e);
            process::exit(error_to_exit_code(&e));
        }
    }
}
