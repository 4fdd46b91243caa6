//! End-to-end tests over the public pipeline: source text in, tag tree out.

use sharptree::{compile, ErrorKind};

#[test]
fn test_empty_namespace() {
    let tree = compile("namespace Foo { }").unwrap();
    assert_eq!(
        tree,
        "<namespace>\n\
         \x20 <keyword> namespace </keyword>\n\
         \x20 <identifier> Foo </identifier>\n\
         \x20 <statementsequence>\n\
         \x20   <symbol> { </symbol>\n\
         \x20   <symbol> } </symbol>\n\
         \x20 </statementsequence>\n\
         </namespace>\n"
    );
}

#[test]
fn test_derived_class() {
    let tree = compile("public class Bar : Baz { }").unwrap();
    assert_eq!(
        tree,
        "<class>\n\
         \x20 <keyword> public </keyword>\n\
         \x20 <keyword> class </keyword>\n\
         \x20 <identifier> Bar </identifier>\n\
         \x20 <symbol> : </symbol>\n\
         \x20 <identifier> Baz </identifier>\n\
         \x20 <statementsequence>\n\
         \x20   <symbol> { </symbol>\n\
         \x20   <symbol> } </symbol>\n\
         \x20 </statementsequence>\n\
         </class>\n"
    );
}

#[test]
fn test_class_without_modifiers() {
    let tree = compile("class Foo { }").unwrap();
    assert!(tree.starts_with("<class>\n"));
    assert!(tree.contains("<identifier> Foo </identifier>"));
}

#[test]
fn test_variable_declaration() {
    let tree = compile("int count = 5;").unwrap();
    assert_eq!(
        tree,
        "<variable>\n\
         \x20 <keyword> int </keyword>\n\
         \x20 <identifier> count </identifier>\n\
         \x20 <symbol> = </symbol>\n\
         \x20 <number> 5 </number>\n\
         \x20 <symbol> ; </symbol>\n\
         </variable>\n"
    );
}

#[test]
fn test_dotted_function_call() {
    let tree = compile("a.b.c();").unwrap();
    assert_eq!(
        tree,
        "<functioncall>\n\
         \x20 <identifier> a.b.c </identifier>\n\
         \x20 <symbol> ( </symbol>\n\
         \x20 <symbol> ) </symbol>\n\
         \x20 <symbol> ; </symbol>\n\
         </functioncall>\n"
    );
}

#[test]
fn test_constructor_with_chained_call() {
    let source = "public class Point {\n  public Point(int x) : this(x, 0) {\n  }\n}";
    let tree = compile(source).unwrap();
    assert!(tree.contains("<constructor>"));
    assert!(tree.contains("<keyword> this </keyword>"));
    // Two parameter lists: the constructor's own and the chained call's.
    assert_eq!(tree.matches("<parameters>").count(), 2);
    assert_eq!(tree.matches("</parameters>").count(), 2);
}

#[test]
fn test_function_with_parameters() {
    let source = "public void Log(string message, int level) { }";
    let tree = compile(source).unwrap();
    assert!(tree.contains("<function>"));
    assert_eq!(tree.matches("<parameter>").count(), 2);
    assert!(tree.contains("<identifier> message </identifier>"));
    assert!(tree.contains("<identifier> level </identifier>"));
}

#[test]
fn test_string_value_loses_quotes() {
    let tree = compile("string greeting = \"hello\";").unwrap();
    assert!(tree.contains("<string> hello </string>"));
    assert!(!tree.contains('"'));
}

#[test]
fn test_reserved_characters_are_escaped() {
    let tree = compile("bool y = a < b;").unwrap();
    assert!(tree.contains("<symbol> &lt; </symbol>"));
    assert!(!tree.contains("<symbol> < </symbol>"));
}

#[test]
fn test_comments_are_transparent() {
    let plain = compile("int x;").unwrap();
    assert_eq!(compile("int x; // = 5").unwrap(), plain);
    assert_eq!(compile("/* leading */ int x;").unwrap(), plain);
    assert_eq!(compile("int /* spanning\nlines */ x;").unwrap(), plain);
}

#[test]
fn test_compile_is_deterministic() {
    let source = "using System;\nnamespace A { public class B : C { int n = 1; } }";
    let first = compile(source).unwrap();
    for _ in 0..5 {
        assert_eq!(compile(source).unwrap(), first);
    }
}

#[test]
fn test_tag_balance() {
    let source = "using System;\n\
                  namespace Garage {\n\
                    public class Car : Vehicle {\n\
                      int _speed = 0;\n\
                      public Car(int speed) : base(speed) { }\n\
                      public void Drive(int distance) {\n\
                        var trip = Math.Abs(distance);\n\
                        Logger.Log(trip);\n\
                      }\n\
                    }\n\
                  }";
    let tree = compile(source).unwrap();

    // A stack re-scan of the output must never hit a close tag that does
    // not match the innermost open, and must end with the stack empty.
    let mut stack: Vec<&str> = Vec::new();
    for line in tree.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("</") {
            let name = rest.trim_end_matches('>');
            assert_eq!(stack.pop(), Some(name), "mismatched close tag in:\n{}", tree);
        } else if trimmed.starts_with('<') && !trimmed.contains("</") {
            let name = trimmed.trim_start_matches('<').trim_end_matches('>');
            stack.push(name);
        }
        // Inline `<tag> value </tag>` lines open and close on one line.
    }
    assert!(stack.is_empty(), "unclosed tags {:?} in:\n{}", stack, tree);
}

#[test]
fn test_truncated_input_is_end_of_stream() {
    let err = compile("class Foo {").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedEndOfStream);
}

#[test]
fn test_missing_semicolon_at_end_is_end_of_stream() {
    let err = compile("using System").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedEndOfStream);
}

#[test]
fn test_wrong_token_is_syntax_error() {
    let err = compile("using ;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.line, 1);
}

#[test]
fn test_failed_file_produces_no_tree() {
    // The Err carries no partial buffer; callers drop everything
    // accumulated for the failing file.
    let result = compile("namespace Foo {\n  using Broken\n}");
    assert!(result.is_err());
}
