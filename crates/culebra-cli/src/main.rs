//! Culebra front-end CLI

use clap::{ArgAction, Parser, Subcommand};
use culebra_error::{DiagnosticRenderer, SourceFile, SyntaxError};
use culebra_lexer::{generate_tokens, Token};
use culebra_parser::{parse, File, Param, Stmt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

const SUCCESS_MESSAGE: &str = "El análisis sintáctico ha finalizado exitosamente.";

#[derive(Parser)]
#[command(name = "culebra")]
#[command(version = "0.1.0")]
#[command(about = "Tokenizer and parser for the Culebra language", long_about = None)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace); errors only by default
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the tokens of a file and the outcome of parsing it
    Run {
        /// Input file
        #[arg(value_name = "FILE", default_value = "entrada.py")]
        input: PathBuf,
    },

    /// Shows file tokens (debug)
    Lex {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Shows file AST (debug)
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the AST as JSON
        #[arg(long)]
        json: bool,
    },

    /// Checks for syntax errors without printing anything on success
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Render errors with a source snippet
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { input } => {
            let source = read_source_or_exit(&input);
            let (report, result) = run_report(&source);
            print!("{}", report);

            if result.is_err() {
                std::process::exit(1);
            }
        }

        Commands::Lex { input, json } => {
            let source = read_source_or_exit(&input);
            let (tokens, diagnostics) = generate_tokens(&source);

            if json {
                match serde_json::to_string_pretty(&tokens) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error serializing tokens: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print!("{}", format_token_table(&tokens));
            }

            if !diagnostics.is_empty() {
                let file = SourceFile::new(input.display().to_string(), source.as_str());
                eprintln!("\n{}", diagnostics.render(&file));
            }
        }

        Commands::Parse { input, json } => {
            let source = read_source_or_exit(&input);
            let file = parse_or_exit(&input, &source, false);

            if json {
                match serde_json::to_string_pretty(&file) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error serializing AST: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("AST ({} statements):\n", file.items().count());
                print!("{}", format_file(&file));
            }
        }

        Commands::Check { input, pretty } => {
            let source = read_source_or_exit(&input);
            parse_or_exit(&input, &source, pretty);
        }
    }
}

/// Installs the stderr log subscriber
fn init_logging(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(verbosity))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Lexical errors are already part of the command output, so their
/// WARN records only show up from `-v` on
fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Reads the input file; the error is the message shown to the user
fn read_source(input: &Path) -> Result<String, String> {
    if !input.exists() {
        return Err(format!("Error: El archivo '{}' no existe.", input.display()));
    }

    fs::read_to_string(input)
        .map_err(|e| format!("Error: No se pudo leer '{}': {}", input.display(), e))
}

fn read_source_or_exit(input: &Path) -> String {
    match read_source(input) {
        Ok(source) => source,
        Err(message) => {
            println!("{}", message);
            std::process::exit(1);
        }
    }
}

/// Tokenizes and parses, exiting with status 1 on a syntax error
fn parse_or_exit(input: &Path, source: &str, pretty: bool) -> File {
    let (tokens, diagnostics) = generate_tokens(source);
    let source_file = SourceFile::new(input.display().to_string(), source);

    if pretty && !diagnostics.is_empty() {
        eprintln!("{}", diagnostics.render(&source_file));
    }

    match parse(tokens) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{}", render_syntax_error(&err, &source_file, pretty));
            std::process::exit(1);
        }
    }
}

fn render_syntax_error(err: &SyntaxError, file: &SourceFile, pretty: bool) -> String {
    if pretty {
        DiagnosticRenderer::new(file).render(&err.to_diagnostic())
    } else {
        err.to_string()
    }
}

/// Builds the `run` output: lexical errors, the token list, then the
/// parse outcome
fn run_report(source: &str) -> (String, Result<File, SyntaxError>) {
    let (tokens, diagnostics) = generate_tokens(source);

    let mut lines: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
    lines.push("Tokens generados:".to_string());
    lines.extend(tokens.iter().map(Token::to_string));

    let result = parse(tokens);
    match &result {
        Ok(_) => lines.push(SUCCESS_MESSAGE.to_string()),
        Err(err) => lines.push(err.to_string()),
    }

    (lines.join("\n") + "\n", result)
}

fn format_token_table(tokens: &[Token]) -> String {
    let mut out = String::new();

    for token in tokens {
        out.push_str(&format!(
            "  {:4}:{:<3}  {:<16}  {}\n",
            token.line,
            token.column,
            token.kind.name(),
            token.describe()
        ));
    }

    out.push_str(&format!("\nTotal: {} tokens\n", tokens.len()));
    out
}

/// Formats the AST as an indented outline, skipping blank lines
fn format_file(file: &File) -> String {
    let mut lines = Vec::new();
    format_body(&file.statements, 0, &mut lines);

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn format_body(statements: &[Stmt], indent: usize, lines: &mut Vec<String>) {
    for stmt in statements {
        format_stmt(stmt, indent, lines);
    }
}

/// Formats a statement for display
fn format_stmt(stmt: &Stmt, indent: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(indent);

    match stmt {
        Stmt::ClassDef(class) => {
            lines.push(format!("{}Class {}", pad, class.name));
            format_body(&class.body.statements, indent + 1, lines);
        }
        Stmt::FunctionDef(func) => {
            let params: Vec<_> = func.params.iter().map(format_param).collect();
            lines.push(format!("{}Def {}({})", pad, func.name, params.join(", ")));
            format_body(&func.body, indent + 1, lines);
        }
        Stmt::If(if_stmt) => {
            lines.push(format!("{}If {}", pad, if_stmt.condition));
            format_body(&if_stmt.then_branch, indent + 1, lines);
            if let Some(else_branch) = &if_stmt.else_branch {
                lines.push(format!("{}Else", pad));
                format_body(else_branch, indent + 1, lines);
            }
        }
        Stmt::While(while_stmt) => {
            lines.push(format!("{}While {}", pad, while_stmt.condition));
            format_body(&while_stmt.body, indent + 1, lines);
        }
        Stmt::For(for_stmt) => {
            lines.push(format!("{}For {} in {}", pad, for_stmt.target, for_stmt.iterable));
            format_body(&for_stmt.body, indent + 1, lines);
        }
        Stmt::Return(ret) => match &ret.expression {
            Some(expr) => lines.push(format!("{}Return {}", pad, expr)),
            None => lines.push(format!("{}Return", pad)),
        },
        Stmt::Pass => lines.push(format!("{}Pass", pad)),
        Stmt::Empty => {}
        Stmt::Expr(expr) => lines.push(format!("{}Expr {}", pad, expr)),
    }
}

fn format_param(param: &Param) -> String {
    match &param.annotation {
        Some(annotation) => format!("{}: {}", param.name, annotation),
        None => param.name.clone(),
    }
}
