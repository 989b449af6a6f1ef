// qualm: an interpreter for a character-driven esoteric language

use std::fs;
use std::io::{self, BufReader};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use qualm::interpreter::constants::{DEFAULT_HISTORY_LIMIT, EXIT_FAILURE};
use qualm::interpreter::{Interpreter, RunConfig, Streams};
use qualm::snapshot::{MockTerminal, TeeTerminal};
use qualm::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} FILE [-d]", program_name);
    eprintln!();
    eprintln!("  -d    run the program, then browse its execution in the step debugger");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let mut args: Vec<String> = std::env::args().collect();
    let program_name = args.first().cloned().unwrap_or_else(|| "qualm".to_string());

    let debug = args.iter().skip(1).any(|arg| arg == "-d");
    args.retain(|arg| arg != "-d");

    let Some(path) = args.get(1) else {
        print_usage(&program_name);
        std::process::exit(EXIT_FAILURE);
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path, e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    if !debug {
        let mut interpreter = Interpreter::new(&source, RunConfig::top_level());
        if interpreter.run().is_err() {
            std::process::exit(EXIT_FAILURE);
        }
        return Ok(());
    }

    run_debugger(&source)
}

/// Run the whole program recording history, then open the TUI over it
fn run_debugger(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Output and errors are captured so the TUI can replay them. Input is
    // still read from stdin before the TUI takes over the terminal, so output
    // is echoed to stdout too and prompts stay visible.
    let captured = MockTerminal::new();
    let streams = Streams {
        input: Box::new(BufReader::new(io::stdin())),
        output: Box::new(TeeTerminal::new(captured.clone(), io::stdout())),
        error: Box::new(captured.clone()),
    };
    let mut interpreter =
        Interpreter::with_streams(source, streams, RunConfig::debugger(DEFAULT_HISTORY_LIMIT));

    eprintln!("Executing program...");
    match interpreter.run() {
        Ok(()) => {
            eprintln!("Execution completed successfully.");
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial execution history...");
        }
    }
    eprintln!(
        "Total snapshots: {} ({} operators executed)",
        interpreter.total_snapshots(),
        interpreter.steps()
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(interpreter, captured);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
