use anyhow::Result;
use tracing::warn;

use second_brain::Brain;

use super::output::Output;

pub async fn cmd_share(brain: &Brain, out: &Output, enabled: bool) -> Result<()> {
    match brain.share(enabled).await {
        Ok(Some(link)) => out.message(&link),
        Ok(None) => out.message("Sharing disabled"),
        Err(e) => {
            eprintln!("❌ {}", e.message());
            Ok(())
        }
    }
}

pub async fn cmd_shared(brain: &Brain, out: &Output, hash: &str) -> Result<()> {
    let shared = match brain.shared(hash).await {
        Ok(shared) => shared,
        Err(e) => {
            warn!("{}", e.message());
            return Ok(());
        }
    };

    if !out.is_json() {
        if let Some(username) = &shared.username {
            println!("{username}'s brain\n");
        }
    }
    out.grid(&shared.content, true)?;
    Ok(())
}
