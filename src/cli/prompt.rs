use std::io::{self, BufRead, Write};
use tokio::runtime::{Handle, RuntimeFlavor};

/// Runs a terminal read so that the runtime moves other tasks, such as the
/// expiry watcher, off this worker while it blocks.
fn blocking<T>(read: impl FnOnce() -> io::Result<T>) -> io::Result<T> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(read)
        }
        _ => read(),
    }
}

/// Prints `label` and reads one trimmed line from stdin.
pub fn ask(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    blocking(|| io::stdin().lock().read_line(&mut line))?;
    Ok(line.trim().to_string())
}

/// Like [`ask`], keeping `current` when the answer is blank.
pub fn ask_with_default(label: &str, current: &str) -> io::Result<String> {
    let answer = if current.is_empty() {
        ask(label)?
    } else {
        ask(&format!("{} [{}]", label, current))?
    };
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer
    })
}

pub fn get_password(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    blocking(rpassword::read_password)
}

pub fn confirm_password(label: &str) -> io::Result<(String, String)> {
    let password = get_password(label)?;
    let confirm = get_password("Confirm password")?;
    Ok((password, confirm))
}

pub fn confirm(label: &str) -> io::Result<bool> {
    let answer = ask(&format!("{} [y/N]", label))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Prints numbered options and returns the one picked, or `None` for blank.
/// Free text is accepted as-is.
pub fn choose(label: &str, options: &[&str]) -> io::Result<Option<String>> {
    for (i, option) in options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
    }
    let answer = ask(label)?;
    if answer.is_empty() {
        return Ok(None);
    }
    Ok(Some(pick(&answer, options)))
}

/// Maps a 1-based index to its option; anything else is returned verbatim.
pub fn pick(answer: &str, options: &[&str]) -> String {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map(|option| option.to_string())
        .unwrap_or_else(|| answer.to_string())
}

/// Maps each comma-separated entry through [`pick`].
pub fn pick_many(answer: &str, options: &[&str]) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| pick(entry, options))
        .collect()
}
