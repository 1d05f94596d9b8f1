use std::io::BufRead;

use anyhow::{Context, Result};

use second_brain::{Brain, Credentials};

/// Password from the flag, else the first line of stdin.
fn read_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn cmd_signin(brain: &Brain, username: &str, password: Option<String>) -> Result<()> {
    let renewing = brain.session().await.is_some();
    let credentials = Credentials::new(username, read_password(password)?);

    match brain.signin(credentials).await {
        Ok(session) => {
            let verb = if renewing { "Session renewed" } else { "Signed in" };
            match session.expires_at() {
                Some(at) => println!("✅ {verb} as {username} (until {})", at.format("%Y-%m-%d %H:%M UTC")),
                None => println!("✅ {verb} as {username}"),
            }
        }
        Err(e) => eprintln!("❌ {}", e.message()),
    }
    Ok(())
}

pub async fn cmd_signup(brain: &Brain, username: &str, password: Option<String>) -> Result<()> {
    let credentials = Credentials::new(username, read_password(password)?);

    match brain.signup(credentials).await {
        Ok(message) => println!("✅ {message}"),
        Err(e) => eprintln!("❌ {}", e.message()),
    }
    Ok(())
}

pub async fn cmd_signout(brain: &Brain) -> Result<()> {
    brain.signout().await?;
    println!("Signed out");
    Ok(())
}
