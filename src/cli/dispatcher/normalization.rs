use crate::cli::args::GlobalFlags;
use crate::error::{MnqnError, Result};

/// Drop every flag-shaped word; handlers only ever see positional names.
pub(crate) fn strip_flags(words: &[String]) -> Vec<String> {
    words
        .iter()
        .filter(|word| !word.starts_with('-'))
        .cloned()
        .collect()
}

/// Apply global flags written after the command and remove them, together
/// with their values, from `words`. Unknown flags are left for `strip_flags`.
pub(crate) fn lift_global_flags(global: &mut GlobalFlags, words: &[String]) -> Result<Vec<String>> {
    let mut rest = Vec::with_capacity(words.len());
    let mut iter = words.iter();

    while let Some(word) = iter.next() {
        match word.as_str() {
            "--verbose" => global.verbose = true,
            "--quiet" => global.quiet = true,
            "--yes" => global.yes = true,
            "--no-color" => global.no_color = true,
            "--kube-context" => match iter.next() {
                Some(value) if !value.starts_with('-') => global.kube_context = value.clone(),
                _ => {
                    return Err(MnqnError::Validation(
                        "--kube-context requires a context name".to_string(),
                    ));
                }
            },
            other => {
                if let Some(value) = other.strip_prefix("--kube-context=") {
                    if value.is_empty() {
                        return Err(MnqnError::Validation(
                            "--kube-context requires a context name".to_string(),
                        ));
                    }
                    global.kube_context = value.to_string();
                } else if !apply_short_cluster(global, other) {
                    rest.push(word.clone());
                }
            }
        }
    }

    Ok(rest)
}

/// `-v`, `-qy` and friends. Returns false when any letter is not a global switch.
fn apply_short_cluster(global: &mut GlobalFlags, word: &str) -> bool {
    let Some(letters) = word.strip_prefix('-') else {
        return false;
    };
    if letters.is_empty() || letters.starts_with('-') || !letters.chars().all(|c| "vqy".contains(c)) {
        return false;
    }

    for letter in letters.chars() {
        match letter {
            'v' => global.verbose = true,
            'q' => global.quiet = true,
            _ => global.yes = true,
        }
    }
    true
}
