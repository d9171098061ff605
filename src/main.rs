mod cli;
mod config;
mod filter;
mod form;
mod library;
mod transcript;
mod view;

use anyhow::Result;
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kiosk", about = "A terminal article browser")]
pub struct Args {
    #[arg(short, long, help = "One-shot search query mode")]
    pub query: Option<String>,

    #[arg(long, help = "One-shot contact form mode")]
    pub contact: bool,

    #[arg(long, default_value = "", help = "Contact name (with --contact)")]
    pub name: String,

    #[arg(long, default_value = "", help = "Contact email (with --contact)")]
    pub email: String,

    #[arg(long, default_value = "", help = "Contact message (with --contact)")]
    pub message: String,

    #[arg(
        long,
        env = "KIOSK_ARTICLES_DIR",
        help = "Articles directory (overrides config)"
    )]
    pub articles_dir: Option<PathBuf>,

    #[arg(long, help = "Config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Session transcripts directory")]
    pub transcripts_dir: Option<PathBuf>,

    #[arg(long, help = "List article categories and exit")]
    pub list_categories: bool,

    #[arg(long, help = "Enable tracing of filter evaluations")]
    pub trace: bool,

    #[arg(long, help = "Verbose output (print library load warnings)")]
    pub verbose: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Load configuration
    let mut cfg = if let Some(config_path) = &args.config {
        config::Config::load_from(config_path)?
    } else {
        config::Config::load().unwrap_or_default()
    };

    // Apply CLI override for the articles directory
    if let Some(dir) = &args.articles_dir {
        cfg.library.articles_dir = dir.clone();
    }

    if let Err(errors) = cfg.validate() {
        for err in &errors {
            eprintln!("Config error: {}", err);
        }
        return Err(anyhow::anyhow!("invalid configuration"));
    }

    // Load the article library. A missing directory is fine: the filter
    // feature just has nothing to attach to.
    let library = library::Library::load(&cfg.library.articles_dir);
    if args.verbose {
        for (path, warning) in library.warnings() {
            eprintln!("Warning: skipped {}: {}", path.display(), warning);
        }
    }

    // Handle --list-categories: dump and exit
    if args.list_categories {
        print!("{}", view::render_categories(&library.categories()));
        return Ok(());
    }

    let root = std::env::current_dir()?;
    let transcripts_dir = args
        .transcripts_dir
        .clone()
        .unwrap_or_else(|| root.join(".kiosk").join("sessions"));
    std::fs::create_dir_all(&transcripts_dir)?;

    let session_id = uuid::Uuid::new_v4().to_string();
    let transcript_path = transcripts_dir.join(format!("{}.jsonl", session_id));
    let transcript = transcript::Transcript::new(&transcript_path, &session_id, &root)?;

    let trace = args.trace;
    let ctx = cli::Context {
        args,
        root,
        config: cfg,
        library,
        transcript: RefCell::new(transcript),
        session_id,
        query: RefCell::new(String::new()),
        tracing: RefCell::new(trace),
    };

    if ctx.args.contact {
        let accepted = cli::run_contact_once(&ctx)?;
        if !accepted {
            std::process::exit(1);
        }
        Ok(())
    } else if let Some(query) = ctx.args.query.clone() {
        cli::run_query_once(&ctx, &query)
    } else {
        cli::run_repl(ctx)
    }
}
