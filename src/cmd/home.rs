use anyhow::Result;

use second_brain::typewriter::{self, Typewriter, PHRASES};

pub async fn cmd_home(cycles: usize, no_animate: bool) -> Result<()> {
    if no_animate || cycles == 0 {
        for phrase in PHRASES {
            println!("{phrase}");
        }
    } else {
        let mut stdout = std::io::stdout();
        typewriter::play(Typewriter::default(), &mut stdout, cycles).await?;
    }

    println!();
    println!("Save links and notes, find them again, share them.");
    println!("  brain signup <username>    create an account");
    println!("  brain signin <username>    sign in");
    println!("  brain list                 open your dashboard");
    Ok(())
}
