use std::fs;
use std::path::PathBuf;

use clap::Parser;

use docx::Config;

#[derive(Parser)]
#[command(name = "docx")]
#[command(about = "Convert Markdown files to Word documents")]
struct Cli {
    /// Input Markdown file
    #[arg(default_value = "README.md")]
    input: PathBuf,

    /// Output .docx file (defaults to input name with .docx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Font configuration file
    #[arg(short, long, default_value = "docx.toml")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Read input file
    let markdown = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let config = Config::load(&cli.config);

    // Convert markdown to a Word document
    let bytes = match docx::markdown_to_docx(&markdown, &config) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Determine output path
    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("docx"));

    // Write document
    if let Err(e) = fs::write(&output, bytes) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }

    println!("Created {}", output.display());
}
