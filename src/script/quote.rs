//! POSIX shell quoting.

use super::error::ScriptError;

/// Quotes `value` so a POSIX shell parses it back as exactly one argument.
///
/// Inert words are left bare to keep rendered scripts readable; anything
/// else is single-quoted with embedded quotes spelled `'\''`.
///
/// # Errors
///
/// Returns [`ScriptError::Quote`] when `value` contains a NUL byte, which no
/// shell argument can carry.
pub fn quote(value: &str) -> Result<String, ScriptError> {
    if value.contains('\0') {
        return Err(ScriptError::Quote {
            value: value.to_string(),
            reason: "shell arguments cannot contain NUL",
        });
    }
    if value.is_empty() {
        return Ok("''".to_string());
    }
    if value.bytes().all(is_inert) {
        return Ok(value.to_string());
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            quoted.push_str(r"'\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    Ok(quoted)
}

// `=` is excluded: a bare `NAME=value` in command position is an assignment.
fn is_inert(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'_' | b'-' | b'.' | b'/' | b',' | b':' | b'+' | b'@' | b'%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_stay_bare() {
        assert_eq!(quote("git").unwrap(), "git");
        assert_eq!(quote("go.weekly.2011-11-02").unwrap(), "go.weekly.2011-11-02");
        assert_eq!(quote("/tmp/x").unwrap(), "/tmp/x");
    }

    #[test]
    fn empty_string_is_an_explicit_token() {
        assert_eq!(quote("").unwrap(), "''");
    }

    #[test]
    fn metacharacters_are_single_quoted() {
        assert_eq!(quote("hello world").unwrap(), "'hello world'");
        assert_eq!(quote("$HOME").unwrap(), "'$HOME'");
        assert_eq!(quote("a;b|c&d").unwrap(), "'a;b|c&d'");
        assert_eq!(quote("`id`").unwrap(), "'`id`'");
        assert_eq!(quote("FOO=bar").unwrap(), "'FOO=bar'");
        assert_eq!(quote("~").unwrap(), "'~'");
    }

    #[test]
    fn embedded_single_quotes_are_spliced() {
        assert_eq!(quote("it's").unwrap(), r"'it'\''s'");
        assert_eq!(quote("'").unwrap(), r"''\'''");
    }

    #[test]
    fn nul_is_rejected() {
        let err = quote("a\0b").unwrap_err();
        assert!(matches!(err, ScriptError::Quote { .. }));
    }
}
