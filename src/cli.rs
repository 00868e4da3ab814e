use std::env;
use std::path::{Path, PathBuf};
use std::process;

use crate::format::Theme;

/// Where the source buffer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Literal text given on the command line.
    Expression(String),
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// `None` when nothing was given; the caller falls back to stdin if piped.
    pub input: Option<Input>,
    /// Skip the evaluation stage and print the scan only.
    pub scan_only: bool,
    /// Print the token listing instead of rendered lines (implies `scan_only`).
    pub tokens: bool,
    pub theme: Theme,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

/// Parse the process arguments, exiting on `--help`, `--version` and usage errors.
pub fn parse_args(default_theme: Theme) -> Args {
    match parse_from(env::args().skip(1), default_theme) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            print_usage();
            process::exit(0);
        }
        Ok(Command::Version) => {
            println!("hcalc {}", env!("CARGO_PKG_VERSION"));
            process::exit(0);
        }
        Err(msg) => {
            eprintln!("hcalc: {}", msg);
            eprintln!("Try 'hcalc --help' for usage.");
            process::exit(1);
        }
    }
}

/// Parse an argument list (without the program name).
pub fn parse_from<I>(args: I, default_theme: Theme) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let mut input: Option<Input> = None;
    let mut words: Vec<String> = Vec::new();
    let mut scan_only = false;
    let mut tokens = false;
    let mut theme = default_theme;
    let mut show_line_numbers = false;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        if arg == "--" {
            words.extend(args[i + 1..].iter().cloned());
            break;
        }

        if arg == "-s" || arg == "--scan" {
            scan_only = true;
        } else if arg == "--tokens" {
            scan_only = true;
            tokens = true;
        } else if arg == "-n" || arg == "--line-numbers" {
            show_line_numbers = true;
        } else if arg == "-t" || arg == "--theme" {
            i += 1;
            let name = args
                .get(i)
                .ok_or_else(|| format!("{} requires an argument (mono, light, dark)", arg))?;
            theme = name.parse::<Theme>().map_err(|e| e.to_string())?;
        } else if let Some(name) = arg.strip_prefix("--theme=") {
            theme = name.parse::<Theme>().map_err(|e| e.to_string())?;
        } else if arg == "-e" {
            i += 1;
            let expr = args.get(i).ok_or("-e requires an argument")?;
            set_input(&mut input, Input::Expression(expr.clone()))?;
        } else if arg == "-f" {
            i += 1;
            let path = args.get(i).ok_or("-f requires an argument")?;
            set_input(&mut input, Input::File(PathBuf::from(path)))?;
        } else if arg == "-" {
            set_input(&mut input, Input::Stdin)?;
        } else if arg == "-h" || arg == "--help" {
            return Ok(Command::Help);
        } else if arg == "--version" {
            return Ok(Command::Version);
        } else if arg.starts_with('-') && arg.len() > 1 && !looks_numeric(arg) {
            return Err(format!("unknown option: {}", arg));
        } else {
            words.push(arg.clone());
        }

        i += 1;
    }

    if !words.is_empty() {
        set_input(&mut input, classify_input(words))?;
    }

    Ok(Command::Run(Args { input, scan_only, tokens, theme, show_line_numbers }))
}

fn set_input(slot: &mut Option<Input>, value: Input) -> Result<(), String> {
    if slot.is_some() {
        return Err("only one input may be given".to_string());
    }
    *slot = Some(value);
    Ok(())
}

/// A single argument naming an existing file is read as a file; anything else
/// is joined back into one expression.
fn classify_input(words: Vec<String>) -> Input {
    // Only path-like args (containing '/' or '.') are checked, so a bare word
    // such as `total` never picks up a stray file of that name.
    if let [word] = words.as_slice()
        && (word.contains('/') || word.contains('.'))
        && Path::new(word).is_file()
    {
        return Input::File(PathBuf::from(word));
    }
    Input::Expression(words.join(" "))
}

/// `-5` or `-2.5*3` is an expression, not an option.
fn looks_numeric(arg: &str) -> bool {
    arg.as_bytes().get(1).is_some_and(u8::is_ascii_digit)
}

fn print_usage() {
    eprintln!(
        "hcalc {} - hierarchical expression calculator",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!("Usage: hcalc [options] 'expression'");
    eprintln!("       hcalc [options] file");
    eprintln!("       hcalc [options] < file");
    eprintln!();
    eprintln!("Notes are indentation-structured: each indented block is a group whose");
    eprintln!("lines add up to a subtotal on its parent line. Evaluation, subtotals and");
    eprintln!("subtree filtering are not available yet; the scanner output is shown.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --scan           Scan only: print the colorized source");
    eprintln!("      --tokens         Scan only: list tokens with offsets and values");
    eprintln!("  -t, --theme THEME    Color theme: mono, light, dark");
    eprintln!("  -n, --line-numbers   Prefix lines with line numbers");
    eprintln!("  -e EXPR              Read the source from EXPR");
    eprintln!("  -f FILE              Read the source from FILE");
    eprintln!("  -                    Read the source from stdin");
    eprintln!("  -h, --help           Show this help");
    eprintln!("      --version        Show the version");
    eprintln!();
    eprintln!("  The theme defaults to dark on a terminal and mono otherwise or when");
    eprintln!("  NO_COLOR is set. Set RUST_LOG=debug for diagnostics on stderr.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  hcalc -s 'rent: 950 + 45'");
    eprintln!("  hcalc -n -t light budget.txt");
    eprintln!("  hcalc --tokens 'note: (12.3+4.5)/6.7'");
}
