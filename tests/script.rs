//! Rendered scripts run through a real POSIX shell.

use gotag::script::{capture_output, quote, render, ArgVector, Interpreter, ScriptError};

fn sh() -> Interpreter {
    Interpreter::new("sh", "-c", ["-e"])
}

fn printed(words: &[&str]) -> String {
    let command = ArgVector::new("printf").arg("%s\\n").args(words.iter().copied());
    let script = render(None, &[command]).unwrap();
    let output = capture_output(sh().script(script.as_str(), &[]));
    output.stdout_lossy()
}

#[test]
fn quoted_words_survive_the_shell() {
    let words = [
        "plain",
        "two words",
        "it's",
        "$HOME",
        "`uname`",
        "a\"b",
        "back\\slash",
        "*.go",
        "semi;colon",
        "new\nline",
        "",
        "'",
        "''",
    ];
    let expected: String = words.iter().map(|word| format!("{word}\n")).collect();
    assert_eq!(printed(&words), expected);
}

#[test]
fn quote_output_is_a_single_shell_word() {
    let quoted = quote("don't $split me").unwrap();
    let script = format!("set -- {quoted}; echo $#");
    let output = capture_output(sh().script(&script, &[]));
    assert_eq!(output.stdout_lossy(), "1\n");
}

#[test]
fn cd_into_missing_directory_aborts() {
    let missing = tempfile::tempdir().unwrap().path().join("gone");
    let script = render(missing.to_str(), &[ArgVector::new("echo").arg("ran")]).unwrap();
    let output = capture_output(sh().script(script.as_str(), &[]));

    assert_eq!(output.stdout_lossy(), "");
    assert!(matches!(output.result, Err(ScriptError::Execution { .. })));
}

#[test]
fn commands_run_in_the_rendered_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("with space");
    std::fs::create_dir(&nested).unwrap();
    let script = render(nested.to_str(), &[ArgVector::new("pwd").arg("-P")]).unwrap();
    let output = capture_output(sh().script(script.as_str(), &[]));

    let expected = std::fs::canonicalize(&nested).unwrap();
    assert_eq!(output.stdout_lossy().trim_end(), expected.to_str().unwrap());
}
