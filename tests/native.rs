#[macro_use]
mod common;

#[cfg(test)]
mod native {
    lox_ok! {
        clock_reads_seconds_since_the_epoch,
        "print clock() > 0;",
        "true",
    }

    lox_ok! {
        clock_does_not_go_backwards,
        r#"
var before = clock();
var after = clock();
print after >= before;
"#,
        "true",
    }

    lox_ok! {
        str_returns_the_printed_form,
        r#"
print str(12) + "!";
print str(2.5);
print str(true);
print str(nil);
"#,
        "12!",
        "2.5",
        "true",
        "nil",
    }

    lox_ok! {
        float_parses_strings_and_passes_numbers_through,
        r#"
print float("3.5") + 0.5;
print float(2);
print float(" 4 ") + 1;
"#,
        "4",
        "2",
        "5",
    }

    lox_ok! {
        randint_stays_in_range,
        r#"
var r = randint(1, 6);
print r >= 1 and r <= 6;
print randint(5, 5);
"#,
        "true",
        "5",
    }

    lox_err! {
        float_rejects_unparsable_input,
        "float(\"abc\");",
        70,
        "Cannot convert value to a number.",
        "[line 1]",
    }

    lox_err! {
        float_rejects_non_numbers,
        "float(nil);",
        70,
        "Cannot convert value to a number.",
        "[line 1]",
    }

    lox_err! {
        randint_requires_numbers,
        "randint(\"a\", 2);",
        70,
        "Operands must be numbers.",
        "[line 1]",
    }

    lox_err! {
        randint_rejects_an_empty_range,
        "randint(2, 1);",
        70,
        "Range is empty.",
        "[line 1]",
    }

    lox_err! {
        native_arity_is_enforced,
        "clock(1);",
        70,
        "Expected 0 arguments but got 1.",
        "[line 1]",
    }
}
