// LogGrid - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Input reading (file or stdin)
// 4. Driving the table state commands and printing the resulting view
//
// The aligned text-table printer below is presentation plumbing and
// deliberately lives on the binary side, not in the library.

use clap::Parser;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use loggrid::app::state::TableState;
use loggrid::core::export;
use loggrid::core::model::TableView;
use loggrid::core::parser::{parse_content, ParseConfig};
use loggrid::platform;
use loggrid::util;

/// LogGrid - turn key=value log text into a sortable, searchable table.
///
/// Reads a log file (or stdin when FILE is omitted), decomposes each line
/// into named fields, applies any requested search/sort/column commands,
/// and prints the derived view.
#[derive(Parser, Debug)]
#[command(name = "loggrid", version, about)]
struct Cli {
    /// Log file to read (stdin if omitted).
    file: Option<PathBuf>,

    /// Free-text search over every field (case-insensitive substring).
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Column to sort by.
    #[arg(long = "sort")]
    sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long = "descending", requires = "sort")]
    descending: bool,

    /// Explicit column order: a comma-separated permutation of the
    /// discovered columns.
    #[arg(long = "columns", value_delimiter = ',', value_name = "NAME,...")]
    columns: Option<Vec<String>>,

    /// Move a column: FROM:TO reinserts FROM at TO's position (repeatable).
    #[arg(long = "move", value_name = "FROM:TO")]
    moves: Vec<String>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Output format for the derived view.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// Aligned text table.
    Table,
    /// CSV with a header row.
    Csv,
    /// JSON array of records.
    Json,
}

/// Report a fatal error and exit. Commands that fault leave the table
/// unchanged, but a CLI invocation has nothing useful left to print.
fn bail(error: &dyn Display) -> ! {
    tracing::error!(error = %error, "Aborting");
    eprintln!("Error: {error}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging so the
    // configured level can take effect from the first event.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogGrid starting"
    );

    // Read the raw input text.
    let raw = match &cli.file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => bail(&util::error::LogGridError::Io {
                path: path.clone(),
                operation: "read",
                source,
            }),
        },
        None => match io::read_to_string(io::stdin()) {
            Ok(content) => content,
            Err(source) => bail(&util::error::LogGridError::Io {
                path: PathBuf::from("<stdin>"),
                operation: "read",
                source,
            }),
        },
    };

    // Parse and load.
    let parse_config = ParseConfig {
        max_records: config.max_records,
    };
    let outcome = parse_content(&raw, &parse_config);
    if outcome.truncated {
        eprintln!(
            "Warning: input truncated at {} records (see [parse] max_records in config.toml)",
            config.max_records
        );
    }

    let mut state = TableState::new(&config.placeholder);
    state.load(outcome);

    // Apply the requested commands in a fixed order: search, sort,
    // then column rearrangement. Any fault aborts with the typed error.
    if let Some(ref term) = cli.search {
        state.set_search_term(term);
    }

    if let Some(ref column) = cli.sort {
        if let Err(e) = state.set_sort(column) {
            bail(&e);
        }
        if cli.descending {
            // A second sort on the same column toggles to descending.
            if let Err(e) = state.set_sort(column) {
                bail(&e);
            }
        }
    }

    if let Some(columns) = cli.columns.clone() {
        if let Err(e) = state.set_columns(columns) {
            bail(&e);
        }
    }

    for spec in &cli.moves {
        let Some((source, target)) = spec.split_once(':') else {
            bail(&format!("--move expects FROM:TO, got '{spec}'"));
        };
        if let Err(e) = state.move_column(source, target) {
            bail(&e);
        }
    }

    // Emit the derived view.
    let out: Box<dyn Write> = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(source) => bail(&util::error::LogGridError::Io {
                path: path.clone(),
                operation: "create",
                source,
            }),
        },
        None => Box::new(io::stdout().lock()),
    };

    let view = state.view();
    let result = match cli.format {
        OutputFormat::Table => write_table(&view, out).map_err(|source| {
            util::error::LogGridError::Io {
                path: cli.output.clone().unwrap_or_else(|| "<stdout>".into()),
                operation: "write",
                source,
            }
        }),
        OutputFormat::Csv => export::export_csv(&view, out)
            .map(|_| ())
            .map_err(util::error::LogGridError::from),
        OutputFormat::Json => export::export_json(&state.visible_records(), out)
            .map(|_| ())
            .map_err(util::error::LogGridError::from),
    };

    if let Err(e) = result {
        bail(&e);
    }

    tracing::info!(
        matched = view.matched,
        total = view.total,
        "LogGrid finished"
    );
}

// =============================================================================
// Text table rendering
// =============================================================================

/// Header label for a column, with the sort indicator when active.
fn header_label(view: &TableView, column: &str) -> String {
    match &view.sort {
        Some(spec) if spec.column == column => {
            format!("{column} [{}]", spec.direction.short_label())
        }
        _ => column.to_string(),
    }
}

/// Print the view as an aligned text table, followed by a match count.
fn write_table<W: Write>(view: &TableView, mut w: W) -> io::Result<()> {
    if view.columns.is_empty() {
        writeln!(w, "(no columns)")?;
        return writeln!(w, "{} of {} records", view.matched, view.total);
    }

    let headers: Vec<String> = view
        .columns
        .iter()
        .map(|column| header_label(view, column))
        .collect();

    // Column widths: widest of header and every cell, measured in chars.
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &view.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut w, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    write_row(&mut w, &rule, &widths)?;
    for row in &view.rows {
        write_row(&mut w, row, &widths)?;
    }

    writeln!(w, "\n{} of {} records", view.matched, view.total)
}

/// One padded, two-space-separated row. The last cell is not padded so
/// lines carry no trailing whitespace.
fn write_row<W: Write>(w: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            writeln!(w, "{cell}")?;
        } else {
            let pad = width.saturating_sub(cell.chars().count());
            write!(w, "{cell}{}  ", " ".repeat(pad))?;
        }
    }
    Ok(())
}
