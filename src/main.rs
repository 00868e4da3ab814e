use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::process;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hcalc::cli::{self, Input};
use hcalc::format::{self, Theme};
use hcalc::{Error, Span, lines};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn default_theme() -> Theme {
    if io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        Theme::Dark
    } else {
        Theme::Mono
    }
}

fn read_source(input: &Input) -> anyhow::Result<String> {
    match input {
        Input::Expression(expr) => Ok(expr.clone()),
        Input::File(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display())),
        Input::Stdin => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("cannot read stdin")?;
            Ok(source)
        }
    }
}

fn run(args: &cli::Args, source: &str) -> hcalc::Result<()> {
    let lines = lines::scan_lines(source)?;

    let mut out = io::BufWriter::new(io::stdout().lock());
    if args.tokens {
        format::write_tokens(&mut out, source, &lines)?;
    } else {
        if !args.scan_only {
            warn!("evaluation is not available yet, showing the scanned source");
        }
        format::print_lines(&mut out, source, &lines, args.show_line_numbers, args.theme)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    init_logging();
    let args = cli::parse_args(default_theme());

    // No input argument: read piped stdin, but never block on a terminal.
    let input = match &args.input {
        Some(input) => input.clone(),
        None if !io::stdin().is_terminal() => Input::Stdin,
        None => {
            eprintln!("hcalc: no input given");
            eprintln!("Try 'hcalc --help' for usage.");
            process::exit(1);
        }
    };

    let source = match read_source(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("hcalc: {:#}", e);
            process::exit(1);
        }
    };
    info!(bytes = source.len(), ?input, "read source");

    match run(&args, &source) {
        Ok(()) => {}
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => match e.offset() {
            Some(offset) if e.is_lexical() => {
                eprintln!("hcalc: syntax error at {}: {}", Span::locate(&source, offset), e);
                process::exit(2);
            }
            _ => {
                eprintln!("hcalc: {}", e);
                process::exit(1);
            }
        },
    }
}
