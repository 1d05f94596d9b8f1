use anyhow::Result;

use second_brain::Brain;

use super::output::Output;

pub async fn cmd_search(brain: &Brain, out: &Output, query: &str) -> Result<()> {
    let result = match brain.search(query).await {
        Ok(Some(result)) => result,
        Ok(None) => return Ok(()),
        Err(e) => {
            eprintln!("❌ {}", e.message());
            return Ok(());
        }
    };

    if out.is_json() {
        return out.json(&result);
    }

    println!("{}\n", result.message());
    if !result.relevant_content.is_empty() {
        out.grid(&result.relevant_content, false)?;
    }
    Ok(())
}
