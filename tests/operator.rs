#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    lox_ok! {
        precedence,
        "print 1 + 2 * 3;",
        "7",
    }

    lox_ok! {
        grouping_overrides_precedence,
        "print (1 + 2) * 3;",
        "9",
    }

    lox_ok! {
        string_concatenation,
        r#"var a = "hi"; var b = a + " there"; print b;"#,
        "hi there",
    }

    lox_ok! {
        comparisons,
        "print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 4;",
        "true",
        "true",
        "false",
        "true",
    }

    lox_ok! {
        equality,
        r#"
print 1 == 1;
print 1 == 2;
print "a" == "a";
print nil == nil;
print 1 == "1";
print nil == false;
print 1 != 2;
"#,
        "true",
        "false",
        "true",
        "true",
        "false",
        "false",
        "true",
    }

    lox_ok! {
        unary,
        "print -3; print !true; print !nil; print !0;",
        "-3",
        "false",
        "true",
        "false",
    }

    lox_ok! {
        division,
        "print 10 / 4;",
        "2.5",
    }

    lox_err! {
        add_mixed_types,
        "print 1 + \"a\";",
        70,
        "Operands must be two numbers or two strings.",
        "[line 1]",
    }

    lox_err! {
        subtract_strings,
        "print \"a\" - \"b\";",
        70,
        "Operands must be numbers.",
        "[line 1]",
    }

    lox_err! {
        negate_string,
        "print -\"a\";",
        70,
        "Operand must be a number.",
        "[line 1]",
    }

    lox_err! {
        compare_mixed_types,
        "print 1 < \"2\";",
        70,
        "Operands must be numbers.",
        "[line 1]",
    }
}
