#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    use predicates::str::contains;

    lox_ok! {
        empty_program,
        "",
    }

    lox_ok! {
        comments_are_ignored,
        "// a comment on its own\nprint 1; // and a trailing one",
        "1",
    }

    lox_ok! {
        multiline_strings,
        "print \"one\ntwo\";",
        "one",
        "two",
    }

    lox_err! {
        unexpected_character,
        "print @;",
        65,
        "[line 1] Error: Unexpected character.",
    }

    lox_err! {
        unterminated_string,
        "print \"oops;",
        65,
        "[line 1] Error: Unterminated string.",
    }

    lox_err! {
        error_at_end_of_input,
        "print 1 +",
        65,
        "[line 1] Error at end: Expect expression.",
    }

    lox_err! {
        error_lines_count_from_one,
        "print 1;\nprint ghost;",
        70,
        "Undefined variable 'ghost'.",
        "[line 2]",
    }

    // Synchronization lets one run report several parse errors.
    lox_err! {
        parser_recovers_at_statement_boundaries,
        "var 1 = 2; +;",
        65,
        "[line 1] Error at '1': Expect variable name.",
        "[line 1] Error at '+': Expect expression.",
    }

    #[test]
    fn usage_is_printed_for_extra_arguments() {
        assert_cmd::Command::cargo_bin("lox").unwrap()
            .args(["one.lox", "two.lox"])
            .assert()
            .stdout(contains("Usage: lox [script]"))
            .code(64);
    }

    #[test]
    fn missing_script_file_is_reported() {
        assert_cmd::Command::cargo_bin("lox").unwrap()
            .arg("does-not-exist.lox")
            .assert()
            .stderr(contains("Could not read"))
            .code(66);
    }
}
