//! exprc: Check expressions against a declaration context.
//!
//! Usage:
//!   exprc [-p exprcheck.json] [-c context.d.ts] [--builtins file] [--stub] [EXPR...]
//!
//! Exit codes: 0 when every expression is clean, 1 when any diagnostic was
//! reported, 2 on usage or configuration errors.

mod tracing_config;

use bumpalo::Bump;
use clap::Parser as ClapParser;
use exprcheck_adapter::HostTypeRepository;
use exprcheck_checker::check;
use exprcheck_core::text::{char_to_byte_offset, LineMap};
use exprcheck_diagnostics::Diagnostic;
use exprcheck_host::{HostChecker, Location};
use exprcheck_options::{parse_config_file, ConfigError, ExprcheckConfig, CONFIG_FILE_NAME};
use exprcheck_parser::Parser;
use exprcheck_types::{StaticTypeRepository, SymbolTable, TypeRepository};
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Severity};
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(ClapParser, Debug)]
#[command(name = "exprc", about = "exprc - type-check expressions against declarations", version)]
struct Cli {
    /// Expressions to check.
    #[arg(value_name = "EXPR")]
    expressions: Vec<String>,

    /// Path to exprcheck.json.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Declaration file providing the bindings.
    #[arg(short = 'c', long = "context")]
    context: Option<String>,

    /// Replacement built-in types fixture.
    #[arg(long)]
    builtins: Option<String>,

    /// Check against static built-ins with no bindings.
    #[arg(long)]
    stub: bool,

    /// Render diagnostics graphically when stderr is a terminal.
    #[arg(long)]
    pretty: Option<bool>,
}

#[derive(Debug, Error, miette::Diagnostic)]
enum CliError {
    #[error(transparent)]
    #[diagnostic(code(exprc::config))]
    Config(#[from] ConfigError),

    #[error("cannot read '{path}'")]
    #[diagnostic(code(exprc::io))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no expressions to check")]
    #[diagnostic(
        code(exprc::usage),
        help("pass expressions as arguments or list them under \"expressions\" in exprcheck.json")
    )]
    NoExpressions,
}

/// Settings after merging exprcheck.json with command-line flags.
#[derive(Debug, Default)]
struct Settings {
    context: Option<String>,
    builtins: Option<String>,
    expressions: Vec<String>,
    pretty: bool,
    stub: bool,
}

impl Settings {
    fn merge(cli: &Cli, config: ExprcheckConfig) -> Self {
        Self {
            context: cli.context.clone().or(config.context),
            builtins: cli.builtins.clone().or(config.builtins),
            expressions: if cli.expressions.is_empty() {
                config.expressions.unwrap_or_default()
            } else {
                cli.expressions.clone()
            },
            pretty: cli.pretty.or(config.pretty).unwrap_or(true),
            stub: cli.stub,
        }
    }
}

/// Where expressions are checked: a repository plus the bindings in scope.
struct Session {
    repository: Box<dyn TypeRepository>,
    scope: SymbolTable,
    /// Problems found while compiling the context, reported before any
    /// expression.
    context_diagnostics: Vec<(Diagnostic, String)>,
}

fn main() {
    tracing_config::init_tracing();
    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(0) => 0,
        Ok(_) => 1,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            2
        }
    };
    process::exit(code);
}

/// Run the CLI and return the number of diagnostics reported.
fn run(cli: &Cli) -> Result<usize, CliError> {
    let config = load_config(cli)?;
    let settings = Settings::merge(cli, config);
    if settings.expressions.is_empty() {
        return Err(CliError::NoExpressions);
    }

    let session = open_session(&settings)?;
    let graphical = settings.pretty && std::io::stderr().is_terminal();
    let mut count = 0;

    for (diagnostic, text) in &session.context_diagnostics {
        report(diagnostic, text, graphical);
        count += 1;
    }

    for (index, expression) in settings.expressions.iter().enumerate() {
        let name = format!("<expr {}>", index + 1);
        let diagnostics = check_expression(session.repository.as_ref(), &session.scope, &name, expression);
        debug!(expression = %expression, diagnostics = diagnostics.len(), "checked expression");
        for diagnostic in &diagnostics {
            report(diagnostic, expression, graphical);
        }
        count += diagnostics.len();
    }

    if count > 0 {
        eprintln!("\nFound {} error{}.", count, if count == 1 { "" } else { "s" });
    }
    Ok(count)
}

fn load_config(cli: &Cli) -> Result<ExprcheckConfig, CliError> {
    if let Some(project) = &cli.project {
        return Ok(parse_config_file(project)?);
    }
    if Path::new(CONFIG_FILE_NAME).exists() {
        return Ok(parse_config_file(CONFIG_FILE_NAME)?);
    }
    Ok(ExprcheckConfig::default())
}

fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

fn open_session(settings: &Settings) -> Result<Session, CliError> {
    if settings.stub {
        if settings.context.is_some() {
            warn!("--stub ignores the declaration context");
        }
        return Ok(Session {
            repository: Box::new(StaticTypeRepository::new()),
            scope: SymbolTable::new(),
            context_diagnostics: Vec::new(),
        });
    }

    let (name, text) = match &settings.context {
        Some(path) => (path.clone(), read_file(path)?),
        None => ("context.d.ts".to_string(), String::new()),
    };
    let host = Rc::new(HostChecker::new());
    let (anchor, mut context_diagnostics) = compile_context(&host, &name, &text);

    let repository = match &settings.builtins {
        Some(path) => HostTypeRepository::with_builtins_source(host.clone(), read_file(path)?),
        None => HostTypeRepository::new(host.clone()),
    };
    let scope = repository.scope_at(anchor);
    debug!(bindings = scope.len(), "opened host session");

    context_diagnostics.extend(host.diagnostics().into_iter().map(|d| (d, text.clone())));
    Ok(Session {
        repository: Box::new(repository),
        scope,
        context_diagnostics,
    })
}

/// Compile the context and return the location expressions are checked at:
/// the end of the context file, where every top-level binding is visible.
fn compile_context(host: &HostChecker, name: &str, text: &str) -> (Location, Vec<(Diagnostic, String)>) {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, name, text);
    let source_file = parser.parse_source_file();
    let parse_diagnostics = parser
        .take_diagnostics()
        .into_diagnostics()
        .into_iter()
        .map(|d| (d, text.to_string()))
        .collect();
    let file = host.add_source_file(&source_file);
    (host.end_of_file(file), parse_diagnostics)
}

/// Parse and check one expression. Parse errors are returned instead of
/// checking a partial tree.
fn check_expression(
    repository: &dyn TypeRepository,
    scope: &SymbolTable,
    name: &str,
    text: &str,
) -> Vec<Diagnostic> {
    let arena = Bump::new();
    let mut parser = Parser::new(&arena, name, text);
    let expression = parser.parse_expression();
    let parse_diagnostics = parser.take_diagnostics();
    if parse_diagnostics.has_errors() {
        return parse_diagnostics.into_diagnostics();
    }
    check(expression, scope, repository)
        .into_iter()
        .map(|d| d.with_file(name))
        .collect()
}

fn report(diagnostic: &Diagnostic, text: &str, graphical: bool) {
    let name = diagnostic.file.clone().unwrap_or_default();
    if !graphical {
        let position = LineMap::new(text).line_and_column_of(diagnostic.start());
        eprintln!(
            "{}:{}:{} - {} EC{}: {}",
            name,
            position.line + 1,
            position.character + 1,
            diagnostic.category,
            diagnostic.code,
            diagnostic.message_text
        );
        return;
    }
    let start = char_to_byte_offset(text, diagnostic.start());
    let end = char_to_byte_offset(text, diagnostic.end());
    let severity = if diagnostic.is_error() { Severity::Error } else { Severity::Warning };
    let rendered = MietteDiagnostic::new(diagnostic.message_text.clone())
        .with_code(format!("EC{}", diagnostic.code))
        .with_severity(severity)
        .with_label(LabeledSpan::new_with_span(None, start..end));
    let report = miette::Report::new(rendered).with_source_code(NamedSource::new(name, text.to_string()));
    eprintln!("{:?}", report);
}
