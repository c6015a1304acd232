use std::{fs, io};

use clap::Parser;
use env_logger::Env;
use scopecalc::run;

/// scopecalc evaluates line-oriented calculator programs with scoped
/// variables and inline functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells scopecalc to read a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Notation used to evaluate assignments. Only `infix` is implemented.
    #[arg(short, long, default_value = "infix")]
    notation: String,

    /// Logs every pipeline stage to stderr. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Couldn't find the file \"{}\": {e}", &args.contents);
                return;
            },
        }
    } else {
        args.contents
    };

    let stdout = io::stdout();
    if let Err(e) = run(&script, &args.notation, &mut stdout.lock()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
