mod config;

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use config::{Config, DEFAULT_CONFIG};
use md2rst_render::RenderOptions;

#[derive(Parser)]
#[command(name = "md2rst")]
#[command(about = "Convert markdown with math to reStructuredText")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a markdown file to reST
    Convert {
        /// Input markdown file (stdin if omitted or `-`)
        path: Option<String>,

        /// Write reST here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop raw HTML instead of emitting raw directives
        #[arg(long)]
        skip_html: bool,

        /// Header underline glyphs, indexed by level
        #[arg(long)]
        levels: Option<String>,

        /// Config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Check that a markdown file converts without generating output
    Check {
        /// Input markdown file (stdin if omitted or `-`)
        path: Option<String>,

        /// Config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            path,
            output,
            skip_html,
            levels,
            config,
        } => {
            let options = load_config(&config).options(skip_html, levels);
            cmd_convert(path.as_deref(), output.as_deref(), &options);
        }
        Command::Check { path, config } => {
            let options = load_config(&config).options(false, None);
            cmd_check(path.as_deref(), &options);
        }
    }
}

fn load_config(path: &Path) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Display name for diagnostics.
fn source_name(path: Option<&str>) -> &str {
    match path {
        None | Some("-") => "<stdin>",
        Some(path) => path,
    }
}

fn read_source(path: Option<&str>) -> String {
    let result = match path {
        None | Some("-") => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source).map(|_| source)
        }
        Some(path) => {
            let p = Path::new(path);
            if !p.exists() {
                eprintln!("Error: file not found: {path}");
                std::process::exit(1);
            }
            std::fs::read_to_string(p)
        }
    };

    match result {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {e}", source_name(path));
            std::process::exit(1);
        }
    }
}

fn convert_or_exit(source: &str, options: &RenderOptions) -> String {
    match md2rst_render::convert(source, options) {
        Ok(rst) => rst,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_convert(path: Option<&str>, output: Option<&Path>, options: &RenderOptions) {
    let source = read_source(path);
    let rst = convert_or_exit(&source, options);

    match output {
        Some(out_path) => {
            if let Err(e) = std::fs::write(out_path, &rst) {
                eprintln!("Error writing {}: {e}", out_path.display());
                std::process::exit(1);
            }
            eprintln!("Converted: {}", out_path.display());
        }
        None => print!("{rst}"),
    }
}

fn cmd_check(path: Option<&str>, options: &RenderOptions) {
    let source = read_source(path);
    convert_or_exit(&source, options);
    eprintln!("OK: {}", source_name(path));
}
