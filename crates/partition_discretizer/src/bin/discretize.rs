//! Discretize a delimited table from the command line.
//!
//! ```text
//! discretize [options] <input> [output]
//! ```

use partition_discretizer::conf::{GainMode, ScoringStrategy};
use partition_discretizer::io::{DiscretizeOptions, discretize_file, validate_files};
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    options: DiscretizeOptions,
    validate: bool,
}

fn next_value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    it.next().ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args() -> Result<Args, String> {
    let mut options = DiscretizeOptions::default();
    let mut validate = false;
    let mut positional: Vec<PathBuf> = Vec::new();

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--separator" => {
                let v = next_value(&mut it, "--separator")?;
                options.separator = match v.as_str() {
                    "\\t" | "tab" => b'\t',
                    s if s.len() == 1 => s.as_bytes()[0],
                    _ => return Err(format!("separator must be a single byte, got '{v}'")),
                };
            }
            "--max-rounds" => {
                let v = next_value(&mut it, "--max-rounds")?;
                let rounds = v
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --max-rounds value '{v}'"))?;
                options.config.max_rounds = Some(rounds);
            }
            "--scoring" => {
                let v = next_value(&mut it, "--scoring")?;
                options.config.scoring = v.parse::<ScoringStrategy>()?;
            }
            "--parallel" => options.config.parallel = true,
            "--full-recompute" => options.config.gain_mode = GainMode::FullRecompute,
            "--cuts-json" => {
                options.cuts_json = Some(PathBuf::from(next_value(&mut it, "--cuts-json")?))
            }
            "--validate" => validate = true,
            "--help" | "-h" => print_help_and_exit(),
            other if other.starts_with("--") => return Err(format!("unknown arg: {other}")),
            path => positional.push(PathBuf::from(path)),
        }
    }

    let mut positional = positional.into_iter();
    let input = positional
        .next()
        .ok_or_else(|| "missing <input> path".to_string())?;
    let output = positional.next();
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument: {}", extra.display()));
    }

    Ok(Args {
        input,
        output,
        options,
        validate,
    })
}

fn print_help_and_exit() -> ! {
    eprintln!(
        "discretize <input> [output]\n\n  The last column of <input> is the class label, every other column is numeric.\n  Default output: DISC<input file name> next to the input.\n\n  Options:\n    --separator <char>          field separator (default ',', 'tab' for tabs)\n    --scoring auto|brute|bucket separation scorer (default auto)\n    --full-recompute            rescore the whole partition for every candidate\n    --max-rounds <n>            stop after n committed cuts\n    --parallel                  evaluate candidate gains on the rayon pool\n    --cuts-json <path>          also write the fitted cut set as JSON\n    --validate                  re-read both files and check the output\n"
    );
    std::process::exit(0)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {msg}\n(see --help)");
            return ExitCode::from(2);
        }
    };

    let summary = match discretize_file(&args.input, args.output.as_deref(), &args.options) {
        Ok(summary) => summary,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} rows, {} attributes: {} cut(s) in {} round(s), {} separated pairs",
        summary.rows,
        summary.attributes,
        summary.cut_set.total_cuts(),
        summary.rounds,
        summary.score
    );
    if let Some(reason) = summary.convergence {
        println!("stopped: {reason}");
    }
    println!("output: {}", summary.output.display());

    if args.validate {
        match validate_files(&args.input, &summary.output, args.options.separator) {
            Ok(report) => {
                print!("{report}");
                if !report.is_consistent() {
                    return ExitCode::FAILURE;
                }
            }
            Err(err) => {
                log::error!("validation failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
