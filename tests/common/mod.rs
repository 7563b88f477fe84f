/// Runs a Lox snippet in-process against an in-memory sink and asserts on
/// everything the program printed, one expected line per argument.
#[macro_export]
macro_rules! lox_ok {
    ($name:ident, $source:expr $(, $expected:expr)* $(,)?) => {
        #[test]
        fn $name() {
            use lox_lang::Lox;

            let expected: Vec<&str> = vec![$($expected),*];
            let expected = match expected.len() {
                0 => String::new(),
                _ => expected.join("\n") + "\n",
            };

            let mut output = Vec::new();
            let mut lox = Lox::new(&mut output);
            lox.run($source);

            assert!(!lox.had_error(), "unexpected static error in:\n{}", $source);
            assert!(!lox.had_runtime_error(), "unexpected runtime error in:\n{}", $source);

            // Drop the interpreter before reading the sink it writes to.
            drop(lox);
            assert_eq!(expected, String::from_utf8(output).unwrap());
        }
    };
}

/// Writes the snippet to a temporary script, runs the `lox` binary on it and
/// asserts the exact diagnostic text on stderr plus the exit code (65 for
/// static errors, 70 for runtime errors).
#[macro_export]
macro_rules! lox_err {
    ($name:ident, $source:expr, $code:expr $(, $expected:expr)+ $(,)?) => {
        #[test]
        fn $name() {
            use std::io::Write;

            let mut script = tempfile::NamedTempFile::new().unwrap();
            script.write_all($source.as_bytes()).unwrap();

            let expected = vec![$($expected),+].join("\n") + "\n";

            assert_cmd::Command::cargo_bin("lox").unwrap()
                .arg(script.path())
                .assert()
                .stderr(expected)
                .code($code);
        }
    };
}
