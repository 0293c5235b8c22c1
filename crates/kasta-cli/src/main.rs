//! KASTA export CLI
//!
//! Command-line tool for converting KASTA programming-detail workbooks into
//! provisioning JSON. With no subcommand it reads a workbook from standard
//! input and writes the JSON document to standard output.

use clap::{Args, Parser, Subcommand, ValueEnum};
use kasta_core::{
    convert_csv, convert_workbook, flatten_cells, read_csv_grid, read_workbook, scan_directory,
    split_sections, ConversionOutput, ConvertOptions, InputFormat, Section,
};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kasta-cli")]
#[command(about = "KASTA programming-details converter", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (otherwise RUST_LOG, default "warn")
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one export to JSON on standard output
    Convert {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        options: OptionArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the flattened text lines of an export
    Lines {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        options: OptionArgs,

        /// Group the lines by section
        #[arg(long)]
        sections: bool,
    },

    /// Convert every export found under one or more directories
    Batch {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,

        /// Output directory for the JSON files
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Create an options file with the default settings
    CreateConfig {
        /// Output path for the options file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Export file to read (standard input when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Input format (detected from the file extension, workbook for stdin)
    #[arg(long, value_enum)]
    format: Option<Format>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Spreadsheet workbook (xlsx, xlsm, xlsb, xls, ods)
    #[value(alias = "xlsx")]
    Workbook,
    /// Worksheet saved as CSV
    Csv,
}

#[derive(Args)]
struct OptionArgs {
    /// Options file (JSON); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Remove the "AK" and "ES" marketing suffixes from cell text
    #[arg(long)]
    strip_marketing_suffixes: bool,

    /// Skip catalog classification and parse scenes with the untyped grammar
    #[arg(long)]
    no_classify: bool,

    /// Read the first worksheet row instead of treating it as a header
    #[arg(long)]
    no_header_row: bool,
}

impl OptionArgs {
    fn resolve(&self) -> kasta_core::Result<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => ConvertOptions::load(path)?,
            None => ConvertOptions::default(),
        };
        if self.strip_marketing_suffixes {
            options.strip_marketing_suffixes = true;
        }
        if self.no_classify {
            options.classify_devices = false;
        }
        if self.no_header_row {
            options.skip_header_row = false;
        }
        Ok(options)
    }
}

impl InputArgs {
    fn read(&self) -> kasta_core::Result<(Vec<u8>, InputFormat)> {
        let detected = self.input.as_deref().and_then(InputFormat::from_path);
        let format = match self.format {
            Some(Format::Workbook) => InputFormat::Workbook,
            Some(Format::Csv) => InputFormat::Csv,
            None => detected.unwrap_or(InputFormat::Workbook),
        };

        let bytes = match &self.input {
            Some(path) => read_file(path)?,
            None => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf)?;
                buf
            }
        };
        Ok((bytes, format))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli.command) {
        let message = serde_json::json!({ "error": format!("Error: {}", e) });
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

/// Logs go to standard error; standard output carries only results
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(command: Option<Commands>) -> kasta_core::Result<()> {
    match command {
        None => cmd_convert_stdin(),
        Some(Commands::Convert {
            input,
            options,
            pretty,
        }) => cmd_convert(&input, &options.resolve()?, pretty),
        Some(Commands::Lines {
            input,
            options,
            sections,
        }) => cmd_lines(&input, &options.resolve()?, sections),
        Some(Commands::Batch {
            root,
            output,
            options,
        }) => cmd_batch(&root, &output, &options.resolve()?),
        Some(Commands::CreateConfig { output }) => cmd_create_config(&output),
    }
}

fn cmd_convert_stdin() -> kasta_core::Result<()> {
    let input = InputArgs {
        input: None,
        format: None,
    };
    cmd_convert(&input, &ConvertOptions::default(), false)
}

fn cmd_convert(input: &InputArgs, options: &ConvertOptions, pretty: bool) -> kasta_core::Result<()> {
    let (bytes, format) = input.read()?;
    let output = convert(&bytes, format, options)?;

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}

fn cmd_lines(input: &InputArgs, options: &ConvertOptions, by_section: bool) -> kasta_core::Result<()> {
    let (bytes, format) = input.read()?;

    let cells = match format {
        InputFormat::Workbook => match read_workbook(&bytes, options)? {
            Some(cells) => cells,
            None => {
                tracing::warn!("no worksheet name contains 'Programming Details'");
                return Ok(());
            }
        },
        InputFormat::Csv => read_csv_grid(&bytes, options)?,
    };
    let lines = flatten_cells(&cells, options);

    if !by_section {
        for line in &lines {
            println!("{}", line);
        }
        return Ok(());
    }

    let buckets = split_sections(&lines);
    for section in Section::ALL {
        let section_lines = buckets.get(section);
        println!("{} ({} lines)", section.sentinel(), section_lines.len());
        for line in section_lines {
            println!("  {}", line);
        }
        println!();
    }

    Ok(())
}

fn cmd_batch(roots: &[PathBuf], output_dir: &Path, options: &ConvertOptions) -> kasta_core::Result<()> {
    let files = scan_directory(roots)?;
    fs::create_dir_all(output_dir)?;

    println!("Converting {} export file(s)", files.len());

    let mut written = 0;
    let mut no_content = 0;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();
    let mut targets: HashSet<PathBuf> = HashSet::new();

    for file in &files {
        let Some(stem) = file.path.file_stem() else {
            continue;
        };
        let mut file_name = stem.to_os_string();
        file_name.push(".json");
        let target = output_dir.join(file_name);
        if !targets.insert(target.clone()) {
            errors.push((
                file.path.clone(),
                format!("output '{}' already written by another export", target.display()),
            ));
            continue;
        }

        let result = read_file(&file.path)
            .and_then(|bytes| convert(&bytes, file.format, options))
            .and_then(|output| {
                let json = serde_json::to_string_pretty(&output)?;
                fs::write(&target, json)?;
                Ok(output)
            });

        match result {
            Ok(ConversionOutput::Document(_)) => {
                written += 1;
                println!("  {} -> {}", file.path.display(), target.display());
            }
            Ok(ConversionOutput::NoContent { .. }) => {
                no_content += 1;
                println!("  {}: no matching worksheet", file.path.display());
            }
            Err(e) => errors.push((file.path.clone(), e.to_string())),
        }
    }

    println!();
    println!("Batch complete:");
    println!("  {} documents written", written);
    println!("  {} files without a programming-details worksheet", no_content);

    if !errors.is_empty() {
        println!("\nErrors ({}):", errors.len());
        for (path, err) in &errors {
            println!("  {}: {}", path.display(), err);
        }
    }

    Ok(())
}

fn cmd_create_config(output: &Path) -> kasta_core::Result<()> {
    ConvertOptions::default().save(output)?;
    println!("Created options file: {}", output.display());
    println!();
    println!("Edit the file, then run:");
    println!("  kasta-cli convert --input <workbook> --config {}", output.display());

    Ok(())
}

fn convert(bytes: &[u8], format: InputFormat, options: &ConvertOptions) -> kasta_core::Result<ConversionOutput> {
    match format {
        InputFormat::Workbook => convert_workbook(bytes, options),
        InputFormat::Csv => convert_csv(bytes, options),
    }
}

fn read_file(path: &Path) -> kasta_core::Result<Vec<u8>> {
    fs::read(path).map_err(|e| kasta_core::Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
