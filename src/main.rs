use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mdsite::{BlockKind, Config};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Generate a static HTML site from Markdown files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site into the output directory
    Build {
        /// Config file (defaults are used if it does not exist)
        #[arg(short, long, default_value = "mdsite.toml")]
        config: PathBuf,

        /// Prefix for root-relative links, e.g. /my-repo/
        #[arg(long)]
        base_path: Option<String>,

        #[arg(long)]
        content: Option<PathBuf>,

        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Convert one Markdown file to an HTML fragment
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how a Markdown file splits into blocks
    Blocks {
        /// Input Markdown file
        input: PathBuf,

        /// Only show blocks of this kind (e.g. heading, ordered_list)
        #[arg(short, long)]
        kind: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            config,
            base_path,
            content,
            static_dir,
            output,
            template,
        } => {
            let mut site = Config::load(&config)?.site;
            if let Some(base_path) = base_path {
                site.base_path = base_path;
            }
            if let Some(content) = content {
                site.content_dir = content;
            }
            if let Some(static_dir) = static_dir {
                site.static_dir = static_dir;
            }
            if let Some(output) = output {
                site.output_dir = output;
            }
            if let Some(template) = template {
                site.template = template;
            }

            let summary = mdsite::generate_site(&site).context("Site generation failed")?;
            log::info!(
                "Built {} pages and copied {} assets into {}",
                summary.pages,
                summary.assets,
                site.output_dir.display()
            );
        }

        Command::Render { input, output } => {
            let markdown = read_markdown(&input)?;
            let html = mdsite::markdown_to_html(&markdown)
                .with_context(|| format!("Failed to convert {}", input.display()))?;

            match output {
                Some(output) => {
                    fs::write(&output, html)
                        .with_context(|| format!("Error writing {}", output.display()))?;
                    println!("Created {}", output.display());
                }
                None => println!("{html}"),
            }
        }

        Command::Blocks { input, kind } => {
            let markdown = read_markdown(&input)?;
            let filter = kind.map(|kind| kind.parse::<BlockKind>()).transpose()?;

            for block in mdsite::parse(&markdown) {
                if filter.is_some_and(|kind| kind != block.kind) {
                    continue;
                }
                println!("[{}]", block.kind);
                let node = mdsite::block_to_html_node_as(&block.source, block.kind)?;
                print!("{}", node.outline());
            }
        }
    }

    Ok(())
}

fn read_markdown(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading {}", path.display()))
}
