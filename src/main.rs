use clap::Parser;
use schelling::{create_observer, Config, ConfigError, Simulation, Verbosity};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Simulate the Schelling segregation model on a 2D board
#[derive(Parser, Debug)]
#[command(name = "schelling")]
#[command(about = "Simulate the Schelling segregation model on a 2D board")]
struct Args {
    /// Path to the board configuration file
    input: PathBuf,

    /// Output verbosity: 0 = silent, 1 = board after each round, 2 = animated
    #[arg(default_value = "0")]
    verbosity: String,

    /// Delay between frames in milliseconds when animated
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// Write a JSON trace of every relocation to this file
    #[arg(long)]
    trace: Option<PathBuf>,
}

// Kept as a plain string in `Args` so that a malformed level ("abc") is
// rejected here with the same exit code as an out-of-range one ("3")
fn parse_verbosity(value: &str) -> Option<Verbosity> {
    match value {
        "0" => Some(Verbosity::Silent),
        "1" => Some(Verbosity::Normal),
        "2" => Some(Verbosity::Verbose),
        _ => None,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let verbosity = match parse_verbosity(&args.verbosity) {
        Some(verbosity) => verbosity,
        None => {
            eprintln!("Verbosity level invalid. Should be 0, 1, or 2");
            return ExitCode::from(1);
        }
    };

    let config = match Config::load(&args.input) {
        Ok(config) => config,
        // File-access problems and bad file contents get distinct exit codes
        Err(err @ ConfigError::Io(_)) => {
            eprintln!("{}", err);
            return ExitCode::from(1);
        }
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    let mut observer = create_observer(
        verbosity,
        Duration::from_millis(args.delay_ms),
        args.trace.map(|path| path.display().to_string()),
    );

    let mut simulation = Simulation::new(config.to_board(), config.threshold, config.iterations);
    simulation.run(observer.as_mut());

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_the_verbosity_is_a_known_level_it_is_parsed() {
        assert_eq!(parse_verbosity("0"), Some(Verbosity::Silent));
        assert_eq!(parse_verbosity("1"), Some(Verbosity::Normal));
        assert_eq!(parse_verbosity("2"), Some(Verbosity::Verbose));
    }

    #[test]
    fn when_the_verbosity_is_out_of_range_or_malformed_it_is_rejected() {
        assert_eq!(parse_verbosity("3"), None);
        assert_eq!(parse_verbosity("-1"), None);
        assert_eq!(parse_verbosity("abc"), None);
        assert_eq!(parse_verbosity(""), None);
    }
}
