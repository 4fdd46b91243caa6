use clap::Parser;
use serde::Serialize;
use sharptree::CompileError;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "sharptree")]
#[command(about = "Dumps the syntactic structure of C# source files as an indented tag tree")]
struct Cli {
    /// .cs files or directories to scan for them
    #[arg(required_unless_present = "stdin")]
    paths: Vec<PathBuf>,

    /// Read one source from stdin
    #[arg(long)]
    stdin: bool,

    /// Emit one JSON report per file instead of plain output
    #[arg(long)]
    json: bool,
}

/// Per-file report for `--json` mode.
#[derive(Serialize)]
struct FileReport {
    path: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileReport {
    fn new(path: &Path, result: &Result<String, CompileError>) -> Self {
        match result {
            Ok(tree) => Self {
                path: path.display().to_string(),
                ok: true,
                tree: Some(tree.clone()),
                error: None,
            },
            Err(err) => Self {
                path: path.display().to_string(),
                ok: false,
                tree: None,
                error: Some(err.to_string()),
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.stdin {
        run_stdin(cli.json);
        return;
    }

    let files = collect_files(&cli.paths);
    if files.is_empty() {
        eprintln!("No .cs files found");
        std::process::exit(1);
    }

    run_files(files, cli.json);
}

fn run_stdin(json: bool) {
    let mut source = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error: failed to read stdin: {}", err);
        std::process::exit(1);
    }

    let result = sharptree::compile(&source).map_err(CompileError::from);
    let path = Path::new("<stdin>");

    if json {
        print_report(path, &result);
    } else {
        match &result {
            Ok(tree) => print!("{}", tree),
            Err(err) => print_failed(path, err),
        }
    }
    if result.is_err() {
        std::process::exit(1);
    }
}

/// Expand the argument list into candidate files: explicit files must
/// carry the .cs extension, directories are walked for it.
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if path.extension().map_or(false, |ext| ext == "cs") {
                files.push(path.clone());
            } else {
                eprintln!("Error: {} is not a .cs file", path.display());
                std::process::exit(1);
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().map_or(false, |ext| ext == "cs"))
            {
                files.push(entry.path().to_path_buf());
            }
        } else {
            eprintln!("Error: {} does not exist", path.display());
            std::process::exit(1);
        }
    }

    files
}

/// Parse each file as an independent unit of work and report results in
/// completion order. Files share nothing; a failing file only fails
/// itself.
fn run_files(files: Vec<PathBuf>, json: bool) {
    let start = Instant::now();
    let total = files.len();

    let (tx, rx) = mpsc::channel();
    let mut handles = Vec::new();
    for path in files {
        let tx = tx.clone();
        handles.push(thread::spawn(move || {
            let result = compile_file(&path);
            // The receiver only hangs up when main exits early.
            let _ = tx.send((path, result));
        }));
    }
    drop(tx);

    let mut failed = 0;
    for (path, result) in rx {
        if json {
            print_report(&path, &result);
            if result.is_err() {
                failed += 1;
            }
            continue;
        }

        match result {
            Ok(tree) => {
                print!("{}", tree);
                print_parsed(&path);
            }
            Err(err) => {
                failed += 1;
                print_failed(&path, &err);
            }
        }
    }

    for handle in handles {
        let _ = handle.join();
    }

    if !json {
        print_summary(total, failed, start.elapsed());
    }
    if failed > 0 {
        std::process::exit(1);
    }
}

fn compile_file(path: &Path) -> Result<String, CompileError> {
    let source = fs::read_to_string(path)?;
    Ok(sharptree::compile(&source)?)
}

fn print_report(path: &Path, result: &Result<String, CompileError>) {
    let report = FileReport::new(path, result);
    match serde_json::to_string(&report) {
        Ok(line) => println!("{}", line),
        Err(err) => eprintln!("Error: failed to serialize report: {}", err),
    }
}

fn print_parsed(path: &Path) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("  \x1b[32m✓\x1b[0m {}", path.display());
    } else {
        eprintln!("  ✓ {}", path.display());
    }
}

fn print_failed(path: &Path, err: &CompileError) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("  \x1b[31m✗\x1b[0m {}: {}", path.display(), err);
    } else {
        eprintln!("  ✗ {}: {}", path.display(), err);
    }
}

fn print_summary(total: usize, failed: usize, elapsed: std::time::Duration) {
    let is_tty = io::stderr().is_terminal();
    let time_str = format_duration(elapsed);
    let files_word = if total == 1 { "file" } else { "files" };

    let line = if failed > 0 {
        format!("Parsed {} {} in {}, {} failed", total, files_word, time_str, failed)
    } else {
        format!("Parsed {} {} in {}", total, files_word, time_str)
    };

    if is_tty {
        eprintln!("\n\x1b[1m{}\x1b[0m", line);
    } else {
        eprintln!("\n{}", line);
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
