use std::io::{BufRead, Write};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Ask a yes/no question on stdout and read the answer from `input`.
/// Anything other than `y` or `yes` declines.
pub fn confirm_with(prompt: &str, input: &mut impl BufRead) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

pub fn confirm(prompt: &str) -> bool {
    confirm_with(prompt, &mut std::io::stdin().lock())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}


/// Initialize tracing for the CLI. Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}
