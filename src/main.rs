use std::io::{self, BufRead, Write};

use clap::Parser;
use keycalc::{keypad, Session, State};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Keypad calculator for the terminal.
///
/// Type keys as they appear on the keypad: digits, `.`, `C`, `±`, `%`,
/// `+`, `-`, `×`, `÷` and `=`. `*` or `x` multiply, `/` divides, `~` toggles
/// the sign. Whitespace is ignored.
#[derive(Debug, Parser)]
#[command(name = "keycalc", version, about)]
struct Cli {
    /// Keys to press, e.g. "12+7=". Reads stdin line by line when omitted.
    #[arg(allow_hyphen_values = true)]
    keys: Option<String>,

    /// Print the keypad before evaluating.
    #[arg(long)]
    layout: bool,

    /// Print every recorded key press on exit.
    #[arg(long)]
    trace: bool,
}

/// Honours `RUST_LOG`, defaults to `warn`, and logs to stderr so the
/// display on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.layout {
        println!("{}\n", keypad::render());
    }

    let mut session = Session::new();
    match cli.keys {
        Some(keys) => println!("{}", session.press_all(&keys)?),
        None => repl(&mut session)?,
    }

    if cli.trace {
        print_trace(&session);
    }

    Ok(())
}

fn repl(session: &mut Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    prompt(&mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input == "exit" {
            return Ok(());
        }

        if !input.is_empty() {
            match session.press_all(input) {
                Ok(display) => println!("{display}"),
                Err(e) => eprintln!("{e}"),
            }
        }
        prompt(&mut stdout)?;
    }

    debug!("stdin closed");
    println!();
    Ok(())
}

fn prompt(stdout: &mut io::Stdout) -> io::Result<()> {
    print!("> ");
    stdout.flush()
}

fn print_trace(session: &Session) {
    for (i, transition) in session.history().transitions().iter().enumerate() {
        println!(
            "{:>4}  {}  {:<15} -> {:<15} {}",
            i + 1,
            transition.key,
            transition.from.name(),
            transition.to.name(),
            transition.to.display()
        );
    }
}
