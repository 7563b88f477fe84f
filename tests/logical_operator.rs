#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    // `and`/`or` return the deciding operand itself, not a coerced boolean.
    lox_ok! {
        operands_are_returned_unchanged,
        r#"
print false and 1;
print 1 and 2;
print true or 1;
print nil or "fallback";
"#,
        "false",
        "2",
        "true",
        "fallback",
    }

    lox_ok! {
        short_circuit_skips_the_right_operand,
        r#"
var called = false;
fun mark() {
  called = true;
  return true;
}
print false and mark();
print called;
print true or mark();
print called;
"#,
        "false",
        "false",
        "true",
        "false",
    }

    lox_ok! {
        chains_evaluate_left_to_right,
        "print 1 and 2 and 3; print false or nil or 3;",
        "3",
        "3",
    }
}
