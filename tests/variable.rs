#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    lox_ok! {
        define_and_read,
        "var a = 1; print a;",
        "1",
    }

    lox_ok! {
        uninitialized_is_nil,
        "var a; print a;",
        "nil",
    }

    lox_ok! {
        assignment_is_an_expression,
        "var a; print a = 2; print a;",
        "2",
        "2",
    }

    lox_ok! {
        globals_may_be_redeclared,
        "var a = 1; var a = 2; print a;",
        "2",
    }

    lox_ok! {
        shadowing_in_nested_blocks,
        r#"
var x = 1;
{
  var x = 2;
  {
    var x = 3;
    print x;
  }
  print x;
}
print x;
"#,
        "3",
        "2",
        "1",
    }

    lox_err! {
        read_undefined_global,
        "print ghost;",
        70,
        "Undefined variable 'ghost'.",
        "[line 1]",
    }

    lox_err! {
        assign_undefined_global,
        "ghost = 1;",
        70,
        "Undefined variable 'ghost'.",
        "[line 1]",
    }

    lox_err! {
        local_read_in_own_initializer,
        "{ var a = a; }",
        65,
        "[line 1] Error at 'a': Can't read local variable in its own initializer.",
    }

    lox_err! {
        local_redeclaration,
        "{ var a = 1; var a = 2; }",
        65,
        "[line 1] Error at 'a': Already a variable with this name in this scope.",
    }

    lox_err! {
        invalid_assignment_target,
        "1 = 2;",
        65,
        "[line 1] Error at '=': Invalid assignment target.",
    }
}
