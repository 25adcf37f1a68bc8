use pretty_assertions::assert_eq;

use frontend::lexer::Lexer;
use frontend::parser::Parser;
use runtime::interpreter::Interpreter;
use runtime::scope::Scope;
use tools::errors::CodeErr;

// Source text -> values printed, plus the final global scope
fn run(code: &str) -> Result<(Vec<i32>, Scope), CodeErr> {
    let mut lexer: Lexer = Default::default();
    lexer
        .tokenize(code.to_string())
        .map_err(|e| CodeErr::new(0, e.to_string()))?;

    let mut parser: Parser = Default::default();
    parser.build_ast(std::mem::take(&mut lexer.tokens))?;

    let mut interp = Interpreter::new(Vec::<i32>::new());
    let mut scope = Scope::new();
    interp.execute_program(&parser.ast_nodes, &mut scope)?;

    Ok((interp.into_sink(), scope))
}

fn output_of(code: &str) -> Vec<i32> {
    run(code).expect("Program should run").0
}

#[test]
fn counting_loop_with_flag() {
    let code = "
x = 0
done = 0
while done == 0 {
    x += 1
    done = x == 3
}
print x
";
    let (out, scope) = run(code).unwrap();

    assert_eq!(out, vec![3]);
    assert_eq!(scope.bindings(), vec![("done", 1), ("x", 3)]);
}

#[test]
fn arithmetic_and_compound_assignment() {
    let code = "
a = 10
a -= 3
print a - 2
print -a
print -(a + 1) + 20
print 2 + 3 == 5
print 0 || 0
";

    assert_eq!(output_of(code), vec![5, -7, 12, 1, 0]);
}

#[test]
fn addition_wraps_at_32_bits() {
    let code = "
print 2147483647 + 1
print -2147483647 - 2
x = 2147483647
x += x
print x
";

    assert_eq!(output_of(code), vec![-2147483648, 2147483647, -2]);
}

#[test]
fn recursive_function_keeps_each_argument() {
    let code = "
fn sum(n) {
    if n == 0 {
        r = 0
    } else {
        r = n + sum(n - 1)
    }
    return r
}
print sum(4)
print sum(0)
";

    assert_eq!(output_of(code), vec![10, 0]);
}

#[test]
fn recursion_unwinds_in_order() {
    let code = "
fn countdown(n) {
    print n
    if n == 0 {
    } else {
        x = countdown(n - 1)
    }
    print n
}
x = countdown(2)
";

    assert_eq!(output_of(code), vec![2, 1, 0, 0, 1, 2]);
}

#[test]
fn sequential_calls_are_independent() {
    let code = "
fn f(n) {
    if n == 0 {
        r = 1
    } else {
        r = n
    }
    return r
}
print f(2)
print f(5)
print f(0)
";
    let (out, scope) = run(code).unwrap();

    assert_eq!(out, vec![2, 5, 1]);
    // Locals of the calls never reach the global scope
    assert!(scope.is_empty());
}

#[test]
fn or_evaluates_both_operands() {
    let code = "
fn say(n) {
    print n
    return n
}
print say(1) || say(2)
";

    assert_eq!(output_of(code), vec![1, 2, 1]);
}

#[test]
fn arguments_read_caller_values() {
    let code = "
fn second(x, y) {
    return y
}
x = 100
print second(1, x)
print x
";

    assert_eq!(output_of(code), vec![100, 100]);
}

#[test]
fn function_calling_previous_function() {
    let code = "
fn double(n) {
    return n + n
}
fn quad(n) {
    d = double(n)
    return double(d)
}
print quad(3)
";

    assert_eq!(output_of(code), vec![12]);
}

#[test]
fn function_without_return() {
    let code = "
fn noisy() {
    print 7
}
x = noisy()
print x
";

    assert_eq!(output_of(code), vec![7, 0]);
}

#[test]
fn else_if_chain_and_comments() {
    let code = "
// classify a number
fn sign(n) {
    s = 0
    if n == 0 {
        s = 0
    }
    else if n + 5 == 0 {
        s = -1
    } else {
        s = 1
    }
    return s
}
print sign(0) // zero
print sign(-5)
print sign(9)
";

    assert_eq!(output_of(code), vec![0, -1, 1]);
}

#[test]
fn bare_block_shares_the_scope() {
    let code = "
x = 1
{
    x += 1
    y = x
}
print y
";

    assert_eq!(output_of(code), vec![2]);
}

#[test]
fn runtime_error_stops_the_program() {
    let err = run("print 1\nprint y\nprint 2").unwrap_err();

    assert_eq!(err.line(), 1);
    assert!(err.message().contains("-y-"));
}

#[test]
fn function_body_cannot_see_globals() {
    let code = "
g = 4
fn peek() {
    return g
}
print peek()
";
    let err = run(code).unwrap_err();

    assert_eq!(err.line(), 5);
    assert!(err.message().contains("-g-"));
}

#[test]
fn parse_error_rejects_whole_program() {
    assert!(run("print 1\nx = f(2)").is_err());
    assert!(run("fn f(a) { return a }\nprint f(1, 2)").is_err());
    assert!(run("print 1 +").is_err());
}

#[test]
fn lexer_error() {
    assert!(run("x = 1 | 2").is_err());
    assert!(run("x = 12ab").is_err());
}
