use backend_api::{run_server, AppState, FileDocumentRepository};
use std::sync::Arc;
use std::{
    env,
    path::{Path, PathBuf},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_default();

    // Environment overrides take precedence over settings.json
    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let mut settings = settings_loader::load_settings_with_fallback(settings_path.as_ref())?;

    if let Ok(data_dir) = env::var("DATA_DIR") {
        settings.data_dir = PathBuf::from(data_dir);
    }
    if let Ok(host) = env::var("HOST") {
        settings.server.host = host;
    }
    if let Ok(port) = env::var("PORT") {
        match port.parse() {
            Ok(port) => settings.server.port = port,
            Err(_) => tracing::warn!("Ignoring PORT='{}', using {}", port, settings.server.port),
        }
    }

    // Relative data paths: workspace root first (json/ lives there), then the cwd.
    let crate_root = env::current_dir()?;
    let workspace_root = find_workspace_root().unwrap_or_else(|| crate_root.clone());
    settings.data_dir = resolve_with_fallback(&settings.data_dir, &[&workspace_root, &crate_root]);

    tracing::info!("{}", settings.app_title);
    tracing::info!("Workspace root: {}", workspace_root.display());
    tracing::info!("Data dir (resolved): {}", settings.data_dir.display());

    if !settings.data_dir.exists() {
        tracing::warn!(
            "Data directory not found at {}; chart pages will answer 404 until it exists",
            settings.data_dir.display()
        );
    }

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let repo = Arc::new(FileDocumentRepository::new(&settings));

    run_server(AppState::new(repo, settings), &host, port).await?;

    Ok(())
}

/// Find the Cargo workspace root by traversing up until a Cargo.toml that contains a [workspace] section.
fn find_workspace_root() -> Option<PathBuf> {
    let mut dir = env::current_dir().ok()?;
    for _ in 0..10 {
        let candidate = dir.join("Cargo.toml");
        if let Ok(content) = std::fs::read_to_string(&candidate) {
            if content.contains("[workspace]") {
                return Some(dir);
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// First existing `base/input`, or `input` under the first base when none exists yet.
fn resolve_with_fallback(input: &Path, bases: &[&PathBuf]) -> PathBuf {
    if input.is_absolute() {
        return input.to_path_buf();
    }
    for base in bases {
        let candidate = base.join(input);
        if candidate.exists() {
            return candidate;
        }
    }
    match bases.first() {
        Some(base) => base.join(input),
        None => input.to_path_buf(),
    }
}
