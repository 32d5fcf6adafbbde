//! docmd CLI - Word to Markdown conversion, workbook splitting and transcripts

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docmd::convert::{write_output, ConvertOptions, ConverterRegistry, OutputFormat};
use docmd::render::{to_markdown_with_stats, ExtractionStats};
use docmd::split::{split_workbook_with_progress, DEFAULT_SKIP_MARKER};
use docmd::{
    detect_format_from_path, parse_file_with_options, JsonFormat, ParseOptions, RenderOptions,
    SplitOptions,
};

#[derive(Parser)]
#[command(name = "docmd")]
#[command(version)]
#[command(about = "Convert Word documents to Markdown", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input .docx file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (defaults to the input path with a .md extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Word document to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Maximum heading level (1-9)
        #[arg(long, default_value = "9")]
        max_heading: u8,

        /// Keep going past malformed XML
        #[arg(long)]
        lenient: bool,

        /// Print extraction statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Convert a Word document to JSON
    Json {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Split a workbook into one CSV file per sheet
    Split {
        /// Input workbook (.xlsx, .xls, .xlsb, .ods)
        #[arg(value_name = "WORKBOOK")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUT_DIR")]
        output: PathBuf,

        /// Skip sheets whose name contains this token
        #[arg(long, env = "DOCMD_SKIP_MARKER", default_value = DEFAULT_SKIP_MARKER)]
        skip_marker: String,
    },

    /// Convert saved chat transcripts (.json) to Markdown
    Transcript {
        /// Transcript files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            max_heading,
            lenient,
            stats,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            frontmatter,
            max_heading,
            lenient,
            stats,
        ),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Split {
            input,
            output,
            skip_marker,
        }) => cmd_split(&input, &output, skip_marker),
        Some(Commands::Transcript { inputs }) => cmd_transcript(&inputs),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert next to the input
            if let Some(input) = cli.input {
                if let Err(e) = cmd_convert(&input, cli.output.as_deref()) {
                    eprintln!("{} {}", "Error during conversion:".red().bold(), e);
                    std::process::exit(1);
                }
                Ok(())
            } else {
                println!("{}", "Usage: docmd <FILE> [-o OUTPUT]".yellow());
                println!("       docmd --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ConverterRegistry::with_defaults();
    let outcome = registry.convert_file(input, output, &ConvertOptions::default())?;

    println!("{}", "Conversion succeeded!".green().bold());
    println!("{}: {}", "Input".bold(), outcome.input.display());
    println!("{}: {}", "Output".bold(), outcome.output.display());

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    max_heading: u8,
    lenient: bool,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ParseOptions::new();
    if lenient {
        options = options.lenient();
    }
    let doc = parse_file_with_options(input, options)?;

    let render_options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_max_heading(max_heading);

    let result = to_markdown_with_stats(&doc, &render_options)?;

    if let Some(path) = output {
        write_output(path, &result.content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", result.content);
    }

    if stats {
        print_stats(&result.stats);
    }

    Ok(())
}

fn print_stats(stats: &ExtractionStats) {
    eprintln!();
    eprintln!("{}", "Extraction Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Headings".bold(), stats.heading_count);
    eprintln!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    eprintln!(
        "{}: {}",
        "Empty paragraphs skipped".bold(),
        stats.skipped_paragraph_count
    );
    eprintln!(
        "{}: {} ({} rows, {} empty rows dropped)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count,
        stats.dropped_row_count
    );
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
    eprintln!("{}: {}", "Characters".bold(), stats.char_count);
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = docmd::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = docmd::render::to_json(&doc, format)?;

    if let Some(path) = output {
        write_output(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Show whatever can be read, even from a damaged body
    let options = ParseOptions::new().lenient();
    let doc = parse_file_with_options(input, options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), detect_format_from_path(input)?);

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref editor) = doc.metadata.last_modified_by {
        println!("{}: {}", "Last modified by".bold(), editor);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let result = to_markdown_with_stats(&doc, &RenderOptions::default())?;
    let text = doc.plain_text();

    println!("{}: {}", "Body elements".bold(), doc.blocks.len());
    println!("{}: {}", "Headings".bold(), result.stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), result.stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), result.stats.table_count);
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_split(
    input: &Path,
    output: &Path,
    skip_marker: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = SplitOptions::new().with_skip_marker(skip_marker);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{pos}] {msg}")?,
    );

    let report = split_workbook_with_progress(input, output, &options, |index, sheet| {
        pb.set_position(index as u64 + 1);
        pb.set_message(format!("Processing sheet: {}", sheet));
    })?;

    pb.finish_and_clear();

    for sheet in &report.skipped {
        println!("{} {}", "Skipped deprecated sheet:".yellow(), sheet);
    }
    for written in &report.written {
        println!(
            "{} {} ({} rows)",
            "Saved".green(),
            written.path.display(),
            written.rows
        );
    }

    println!(
        "\n{} {} of {} sheets written",
        "Done!".green().bold(),
        report.written.len(),
        report.sheet_count()
    );

    Ok(())
}

fn cmd_transcript(inputs: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new().with_format(OutputFormat::Markdown);

    let mut converted = 0;
    for input in inputs {
        let is_json = input
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if !is_json {
            println!("{} {}", "Skipping non-JSON file:".yellow(), input.display());
            continue;
        }

        let outcome = registry.convert_file(input, None, &options)?;
        println!(
            "{} {} -> {}",
            "Converted".green(),
            outcome.input.display(),
            outcome.output.display()
        );
        converted += 1;
    }

    println!("\n{} {} transcripts converted", "Done!".green().bold(), converted);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docmd".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word to Markdown conversion tool");
    println!();
    println!("License: MIT");
}
