use dialoguer::Confirm;
use oeuvre::error::{OeuvreError, Result};
use std::io::{self, BufRead, IsTerminal, Write};

/// Asks a yes/no question.
///
/// On a terminal this is a dialoguer prompt. Otherwise the answer is read as a
/// line from stdin, and end of input counts as "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    if console::user_attended() && io::stdin().is_terminal() {
        return Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| OeuvreError::Api(format!("prompt failed: {}", e)));
    }

    print!("{} ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Ok(false);
    }
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
