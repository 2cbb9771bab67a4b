const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Returns the first character in `value` that cannot appear in a file name.
///
/// The rule set is the union of what Windows, macOS and Linux refuse, so a name
/// accepted here can be exported to any of them.
pub fn find_disallowed_char(value: &str) -> Option<char> {
    value.chars().find(|&ch| is_disallowed_char(ch))
}

pub fn contains_disallowed_chars(value: &str) -> bool {
    find_disallowed_char(value).is_some()
}

/// Windows refuses a trailing dot or space, and `.`/`..` name the current and
/// parent folders.
pub fn has_invalid_ending(value: &str) -> bool {
    value.ends_with(['.', ' '])
}

pub fn is_windows_reserved(value: &str) -> bool {
    let stem = value
        .split('.')
        .next()
        .unwrap_or(value)
        .trim_end()
        .to_ascii_uppercase();
    WINDOWS_RESERVED_NAMES
        .iter()
        .any(|reserved| reserved == &stem)
}

fn is_disallowed_char(ch: char) -> bool {
    matches!(ch, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        || ch == '\0'
        || ch.is_control()
}
