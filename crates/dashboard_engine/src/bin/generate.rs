use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use dashboard_engine::export_site;

#[derive(Parser, Debug)]
#[command(name = "generate-dashboard", about = "Render every dashboard page to static HTML and JSON.")]
struct Args {
    /// Settings file; defaults to ./settings.json when present
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Output directory for the generated site
    #[arg(short, long, default_value = "dashboard")]
    out: PathBuf,

    /// Overrides `data_dir` from the settings file
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init_default();
    let args = Args::parse();

    let mut settings = settings_loader::load_settings_with_fallback(args.settings.as_ref())?;
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }

    let summary = export_site(&settings, &args.out)?;

    println!("{}", settings.app_title);
    for page in &summary.pages {
        match &page.error {
            None => println!("  ✓ {:<22} {}.html", page.title, page.slug),
            Some(e) => println!("  ✗ {:<22} {}", page.title, e),
        }
    }
    println!("Output: {}", summary.out_dir.display());

    let failed = summary.failed().count();
    if failed > 0 {
        bail!("{} of {} pages failed to build", failed, summary.pages.len());
    }
    Ok(())
}
