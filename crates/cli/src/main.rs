use colored::*;
use std::{
    fs,
    io::{self, Write},
    process,
};
use clap::Parser as ClapParser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

extern crate frontend;
extern crate runtime;

use frontend::ast::printer::render_tree;
use frontend::lexer::Lexer;
use frontend::parser::Parser;
use runtime::{interpreter::Interpreter, output::StdoutSink, scope::Scope};


// --------
//   CLI
// --------

#[derive(ClapParser)]
#[command(version)]
#[command(about="Interpreter for the Tally language")]
struct CLI {
    #[arg(short, long)]
    /// Path to the file to interpret
    file: Option<String>,

    /// Interactive mode after interpreting a file
    #[arg(short, long)]
    inter: bool,

    /// Prints the AST tree of each top level statement
    #[arg(short, long)]
    ast_print: bool,

    /// Prints the variables of the global scope after the file ran
    #[arg(short, long)]
    dump_scope: bool,
}

// Everything that outlives a single piece of code: the REPL keeps the
// variables and the functions declared on previous lines
struct Session {
    parser: Parser,
    interp: Interpreter<StdoutSink>,
    scope: Scope,
}

impl Session {
    fn new() -> Self {
        Self {
            parser: Default::default(),
            interp: Interpreter::new(StdoutSink),
            scope: Scope::new(),
        }
    }
}

// Logs only go out when asked for, program output stays clean otherwise
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn open_file(file_path: &str) -> String {
    match fs::read_to_string(file_path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} opening script file {}: {e}", "Error".red().bold(), file_path.yellow());
            process::exit(1);
        }
    }
}

fn interpret_file(file_name: &str, session: &mut Session, cli: &CLI) {
    println!("\nReading source file {}...", file_name.green());
    let source_code = open_file(file_name);

    interpretation_sequence(source_code, session, cli);

    if cli.dump_scope {
        dump_scope(&session.scope);
    }
}

fn dump_scope(scope: &Scope) {
    println!("\n{} ({} variables)", "Scope".yellow().bold(), scope.len());

    for (name, value) in scope.bindings() {
        println!("  {} = {}", name.cyan(), value);
    }
}

fn interpretation_sequence(code: String, session: &mut Session, cli: &CLI) {
    let mut lexer: Lexer = Default::default();

    if let Err(e) = lexer.tokenize(code) {
        println!("{e}");
        return;
    }

    let tokens = std::mem::take(&mut lexer.tokens);

    if let Err(e) = session.parser.build_ast(tokens) {
        println!("{e}");
        return;
    }

    if cli.ast_print {
        println!("\n{}", "Syntax tree:".bold());
        for n in &session.parser.ast_nodes {
            print!("{}", render_tree(&n.node));
        }
        println!("\n{}", "Program output:".bold());
    }

    if let Err(e) = session
        .interp
        .execute_program(&session.parser.ast_nodes, &mut session.scope)
    {
        println!("{e}");
    }
}

// REPL
fn repl(session: &mut Session, cli: &CLI) {
    println!("\n{} mode started", "Interactive".yellow().bold());

    // Local variables
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut input = String::new();

    loop {
        input.clear();
        print!("\n> ");
        let _ = stdout.flush();

        match stdin.read_line(&mut input) {
            // End of input
            Ok(0) => return,
            Ok(_) => {
                let trimmed_input = input.trim();

                if trimmed_input == "quit" {
                    process::exit(0);
                }

                // Execute interpreter
                interpretation_sequence(trimmed_input.to_string(), session, cli);
            }
            Err(e) => {
                eprintln!("{} reading from terminal: {e}", "Error".red().bold());
                process::exit(1);
            }
        }
    }
}

fn main() {
    // Manage command line args
    let cli = CLI::parse();
    init_tracing();

    // Beginning of program
    println!("\n       --- {} language v0.1 ---", "Tally".cyan().bold());
    let _ = io::stdout().flush();

    let mut session = Session::new();

    match cli.file.as_deref() {
        Some(file_name) => {
            interpret_file(file_name, &mut session, &cli);

            // If interactive mode, we keep the variables and functions of the file
            if cli.inter {
                repl(&mut session, &cli);
            }
        }
        None => repl(&mut session, &cli),
    }
}
