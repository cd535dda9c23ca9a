//! toyc: parse a program and show what the parser made of it.
//!
//! ```text
//! toyc demos/factorial.toy
//! toyc demos/factorial.toy --emit ast
//! toyc demos/broken.toy --tui
//! echo 'FUNC main() RETURN 1 + 2 * 3' | toyc --precedence '+=50'
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use toyc::codegen::{self, Session};
use toyc::parser::parse::ParseOutcome;
use toyc::parser::precedence::PrecedenceTable;
use toyc::printer::AstPrinter;
use toyc::ui::App;

#[derive(Parser)]
#[command(name = "toyc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Front end for a small imperative language", long_about = None)]
struct Cli {
    /// Source file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// What to print for the parsed input
    #[arg(long, value_enum)]
    emit: Option<Emit>,

    /// Operator precedence overrides, e.g. "+=50,^=60"
    #[arg(long)]
    precedence: Option<String>,

    /// Open the interactive explorer
    #[arg(long)]
    tui: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    /// Fully parenthesized source
    Ast,
    /// Indented tree, one node per line
    Outline,
    /// Token stream with locations
    Tokens,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the input was free of diagnostics
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let source = read_source(cli.file.as_ref())?;

    let mut precedence = PrecedenceTable::default();
    if let Some(overrides) = &cli.precedence {
        precedence.parse_overrides(overrides)?;
    }
    let session = Session::new(precedence);

    if let Some(Emit::Tokens) = cli.emit {
        return match codegen::tokens(&source) {
            Ok(lines) => {
                let mut out = io::stdout().lock();
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
                Ok(true)
            }
            Err(e) => {
                eprintln!("{}", e);
                Ok(false)
            }
        };
    }

    if cli.tui {
        let outcome = session.parse(&source);
        report(&outcome);
        let clean = outcome.is_ok();
        run_tui(outcome, source)?;
        return Ok(clean);
    }

    let stdout = io::stdout().lock();
    let outcome = match cli.emit {
        Some(Emit::Ast) => session.compile(&source, &mut AstPrinter::source(stdout))?,
        _ => session.compile(&source, &mut AstPrinter::outline(stdout))?,
    };

    report(&outcome);
    Ok(outcome.is_ok())
}

fn read_source(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn report(outcome: &ParseOutcome) {
    for diagnostic in &outcome.diagnostics {
        eprintln!("{}", diagnostic);
    }
}

fn run_tui(outcome: ParseOutcome, source: String) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(outcome, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
