use smartcalc::{init_tracing, repl, runner, Calculator, Config};
use std::fs;
use std::path::Path;
use tracing::debug;

fn main() {
    let config = Config::from_args();
    init_tracing(config.verbose);
    debug!(?config, "starting");

    let mut calculator = Calculator::with_config(config.calculator);

    if let Some(ref file_path) = config.file {
        run_file(file_path, &mut calculator);
        if !config.interactive {
            return;
        }
    }

    repl::start_with(calculator);
}

fn run_file(path: &str, calculator: &mut Calculator) {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let name = path.display().to_string();
            runner::run_with(&source, Some(&name), calculator);
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
