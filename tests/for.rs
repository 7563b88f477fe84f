#[macro_use]
mod common;

#[cfg(test)]
mod r#for {
    lox_ok! {
        counts_up,
        "for (var i = 0; i < 3; i = i + 1) print i;",
        "0",
        "1",
        "2",
    }

    lox_ok! {
        initializer_may_be_an_expression,
        r#"
var i;
for (i = 0; i < 2; i = i + 1) print i;
print i;
"#,
        "0",
        "1",
        "2",
    }

    lox_ok! {
        false_condition_never_runs_body,
        r#"for (; false;) print "never"; print "after";"#,
        "after",
    }

    lox_ok! {
        increment_runs_after_the_body,
        r#"
for (var i = 0; i < 2; i = i + 1) {
  print "body " + str(i);
}
"#,
        "body 0",
        "body 1",
    }

    // The loop variable lives in its own scope around the desugared while.
    lox_err! {
        loop_variable_does_not_escape,
        "for (var i = 0; i < 1; i = i + 1) print i;\nprint i;",
        70,
        "Undefined variable 'i'.",
        "[line 2]",
    }
}
