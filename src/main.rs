//! Command-line front end for pecha proofreading.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use pecha_proofread::{Config, OpfStore, PageEditor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pecha-proofread",
    about = "Edit pecha pages and realign annotation layers",
    version
)]
struct Cli {
    /// Root directory holding downloaded pechas (can also be set via
    /// OPF_STORE_PATH)
    #[arg(long)]
    store_root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the page ids of a volume
    Pages {
        pecha_id: String,
        vol_num: u32,
    },
    /// Print a page's image URL and content
    GetPage {
        pecha_id: String,
        vol_num: u32,
        page_id: String,
    },
    /// Replace a page's content and realign every layer
    SavePage {
        pecha_id: String,
        vol_num: u32,
        page_id: String,
        /// File holding the new page content (reads stdin when absent)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pecha_proofread=info,proofread_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let store_root = cli.store_root.unwrap_or_else(|| config.store_root.clone());
    tracing::debug!("using pecha store at {}", store_root);

    match cli.command {
        Commands::Pages { pecha_id, vol_num } => {
            let editor = open_editor(&store_root, &pecha_id, &config.iiif_host);
            for page_id in editor.list_pages(vol_num)? {
                println!("{}", page_id);
            }
        }
        Commands::GetPage {
            pecha_id,
            vol_num,
            page_id,
        } => {
            let editor = open_editor(&store_root, &pecha_id, &config.iiif_host);
            let page = editor.get_page(vol_num, &page_id)?;
            println!("{}", page.image_url);
            println!("{}", page.content);
        }
        Commands::SavePage {
            pecha_id,
            vol_num,
            page_id,
            file,
        } => {
            let content = read_content(file.as_deref())?;
            let editor = open_editor(&store_root, &pecha_id, &config.iiif_host);
            let outcome = editor.save_page(vol_num, &page_id, &content)?;
            if !outcome.replaced {
                eprintln!("page content not found in base text; nothing changed");
                std::process::exit(1);
            }
            println!("saved page {} (length delta {:+})", page_id, outcome.delta);
        }
    }
    Ok(())
}

fn open_editor(store_root: &str, pecha_id: &str, iiif_host: &str) -> PageEditor {
    let pecha_path = Path::new(store_root).join(pecha_id);
    PageEditor::new(OpfStore::new(pecha_path, pecha_id), iiif_host)
}

fn read_content(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading page content from stdin")?;
            Ok(buf)
        }
    }
}
