//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Postfix, prefix, `sizeof` and `some` expressions
//! - Types, including function types
//! - Statements and switch case bodies
//! - Declarations and extern blocks
//! - Error kinds, spans and limits

use crate::{
    ast::{
        ast::{Decl, Expr, Stmt, Type},
        declarations::{variadic_position, ExternItem},
        expressions::{BinaryOperator, Literal, SizeofOperand, UnaryOperator},
        statements::{CaseBody, ElseBranch, ForInit, Mutability},
        types::Primitive,
    },
    config::{ParserConfig, ParserLimits},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    printer::unparse_expr,
    Span,
};

use super::parser::{
    parse, parse_expression_source, parse_statement_source, parse_type_source, parse_with_config,
};

const FILE: Option<&str> = Some("test.pbl");

fn expr(source: &str) -> Expr {
    parse_expression_source(source, FILE).unwrap()
}

fn ty(source: &str) -> Type {
    parse_type_source(source, FILE).unwrap()
}

fn stmt(source: &str) -> Stmt {
    parse_statement_source(source, FILE).unwrap()
}

fn parse_err(source: &str) -> Error {
    parse(source, FILE).unwrap_err()
}

fn binary(expr: &Expr) -> (&Expr, BinaryOperator, &Expr) {
    let Expr::Binary(binary) = expr else {
        panic!("expected binary expression, got {:?}", expr);
    };
    (&binary.left, binary.operator, &binary.right)
}

fn integer(expr: &Expr) -> u64 {
    let Expr::Literal(literal) = expr else {
        panic!("expected literal, got {:?}", expr);
    };
    let Literal::Integer(value) = literal.value else {
        panic!("expected integer literal, got {:?}", literal.value);
    };
    value
}

fn path(expr: &Expr) -> String {
    let Expr::Path(path) = expr else {
        panic!("expected path, got {:?}", expr);
    };
    path.to_path_string()
}

// EXPRESSIONS

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    let parsed = expr("1 + 2 * 3");
    let (left, operator, right) = binary(&parsed);

    assert_eq!(operator, BinaryOperator::Add);
    assert_eq!(integer(left), 1);

    let (left, operator, right) = binary(right);
    assert_eq!(operator, BinaryOperator::Multiply);
    assert_eq!(integer(left), 2);
    assert_eq!(integer(right), 3);
}

#[test]
fn test_binary_operators_are_left_associative() {
    let parsed = expr("a - b - c");
    let (left, operator, right) = binary(&parsed);

    assert_eq!(operator, BinaryOperator::Subtract);
    assert_eq!(path(right), "c");

    let (left, _, right) = binary(left);
    assert_eq!(path(left), "a");
    assert_eq!(path(right), "b");
}

#[test]
fn test_logical_precedence() {
    let parsed = expr("a == b && c < d || e");
    let (left, operator, right) = binary(&parsed);
    assert_eq!(operator, BinaryOperator::Or);
    assert_eq!(path(right), "e");

    let (left, operator, right) = binary(left);
    assert_eq!(operator, BinaryOperator::And);
    assert_eq!(binary(left).1, BinaryOperator::Equal);
    assert_eq!(binary(right).1, BinaryOperator::Less);
}

#[test]
fn test_bitwise_and_shift_precedence() {
    let parsed = expr("a | b ^ c & d << 1");
    let (_, operator, right) = binary(&parsed);
    assert_eq!(operator, BinaryOperator::BitOr);

    let (_, operator, right) = binary(right);
    assert_eq!(operator, BinaryOperator::BitXor);

    let (_, operator, right) = binary(right);
    assert_eq!(operator, BinaryOperator::BitAnd);
    assert_eq!(binary(right).1, BinaryOperator::ShiftLeft);
}

#[test]
fn test_cast_shares_bit_or_level() {
    // (a as T) | b
    let parsed = expr("a as T | b");
    let (left, operator, right) = binary(&parsed);
    assert_eq!(operator, BinaryOperator::BitOr);
    assert_eq!(path(right), "b");

    let Expr::Cast(cast) = left else {
        panic!("expected cast, got {:?}", left);
    };
    assert_eq!(path(&cast.value), "a");
    assert!(matches!(*cast.target, Type::Path(ref p) if p.to_path_string() == "T"));

    // (a | b) as T
    let parsed = expr("a | b as T");
    let Expr::Cast(cast) = &parsed else {
        panic!("expected cast, got {:?}", parsed);
    };
    assert_eq!(binary(&cast.value).1, BinaryOperator::BitOr);
}

#[test]
fn test_cast_binds_looser_than_arithmetic() {
    let parsed = expr("a + b as f64");
    let Expr::Cast(cast) = &parsed else {
        panic!("expected cast, got {:?}", parsed);
    };
    assert_eq!(binary(&cast.value).1, BinaryOperator::Add);
    assert!(matches!(
        *cast.target,
        Type::Primitive(ref p) if p.primitive == Primitive::F64
    ));
}

#[test]
fn test_prefix_operators() {
    let parsed = expr("-a * b");
    let (left, operator, _) = binary(&parsed);
    assert_eq!(operator, BinaryOperator::Multiply);
    assert!(matches!(left, Expr::Unary(u) if u.operator == UnaryOperator::Negate));

    let parsed = expr("!a.b");
    let Expr::Unary(unary) = &parsed else {
        panic!("expected unary, got {:?}", parsed);
    };
    assert_eq!(unary.operator, UnaryOperator::Not);
    assert!(matches!(*unary.operand, Expr::Field(_)));

    let parsed = expr("& &x");
    let Expr::Unary(outer) = &parsed else {
        panic!("expected unary, got {:?}", parsed);
    };
    assert_eq!(outer.operator, UnaryOperator::AddressOf);
    assert!(matches!(*outer.operand, Expr::Unary(ref inner) if inner.operator == UnaryOperator::AddressOf));

    assert!(matches!(expr("~*p"), Expr::Unary(u) if u.operator == UnaryOperator::BitNot));
}

#[test]
fn test_postfix_chain() {
    let parsed = expr("f(1, 2)[0].x");
    let Expr::Field(field) = &parsed else {
        panic!("expected field access, got {:?}", parsed);
    };
    assert_eq!(field.field.name, "x");

    let Expr::Index(index) = &*field.object else {
        panic!("expected index, got {:?}", field.object);
    };
    assert_eq!(integer(&index.index), 0);

    let Expr::Call(call) = &*index.object else {
        panic!("expected call, got {:?}", index.object);
    };
    assert_eq!(path(&call.callee), "f");
    assert_eq!(call.arguments.len(), 2);
}

#[test]
fn test_empty_call() {
    let Expr::Call(call) = expr("run()") else {
        panic!("expected call");
    };
    assert!(call.arguments.is_empty());
    assert_eq!(call.span, Span::new(0, 5));
}

#[test]
fn test_slice_forms() {
    let cases = [
        ("a[1:2]", true, true),
        ("a[:2]", false, true),
        ("a[1:]", true, false),
        ("a[:]", false, false),
    ];

    for (source, has_start, has_end) in cases {
        let Expr::Slice(slice) = expr(source) else {
            panic!("expected slice for {}", source);
        };
        assert_eq!(slice.start.is_some(), has_start, "{}", source);
        assert_eq!(slice.end.is_some(), has_end, "{}", source);
        assert_eq!(slice.span, Span::new(0, source.len() as u32));
    }

    assert!(matches!(expr("a[i + 1]"), Expr::Index(_)));
}

#[test]
fn test_qualified_path() {
    let Expr::Path(parsed) = expr("std::io::print") else {
        panic!("expected path");
    };
    let names: Vec<_> = parsed.segments().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["std", "io", "print"]);
    assert_eq!(parsed.span, Span::new(0, 14));

    assert!(matches!(expr("mem::alloc(8)"), Expr::Call(c) if path(&c.callee) == "mem::alloc"));
}

#[test]
fn test_literals() {
    assert_eq!(integer(&expr("42")), 42);
    assert_eq!(integer(&expr("0x1F")), 31);
    assert_eq!(integer(&expr("18446744073709551615")), u64::MAX);

    let literal = |source: &str| match expr(source) {
        Expr::Literal(literal) => literal.value,
        other => panic!("expected literal, got {:?}", other),
    };

    assert_eq!(literal("3.5"), Literal::Float(3.5));
    assert_eq!(literal("1.5e3"), Literal::Float(1500.0));
    assert_eq!(literal(r#""a\nb""#), Literal::String(String::from("a\nb")));
    assert_eq!(literal(r#""""#), Literal::String(String::new()));
    assert_eq!(literal(r"'\x41'"), Literal::Char('A'));
    assert_eq!(literal(r"'é'"), Literal::Char('é'));
    assert_eq!(literal("true"), Literal::Boolean(true));
    assert_eq!(literal("false"), Literal::Boolean(false));
    assert_eq!(literal("nil"), Literal::Nil);
}

#[test]
fn test_integer_overflow_is_number_error() {
    let error = parse_expression_source("18446744073709551616", FILE).unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::NumberParseError { .. }));
    assert_eq!(error.get_span(), Span::new(0, 20));
}

#[test]
fn test_invalid_escape_points_into_literal() {
    let error = parse_expression_source(r#""ab\qc""#, FILE).unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::InvalidEscape { escape } if escape == "\\q"));
    assert_eq!(error.get_span(), Span::new(3, 5));
}

#[test]
fn test_sizeof_operands() {
    let operand = |source: &str| match expr(source) {
        Expr::Sizeof(sizeof) => sizeof.operand,
        other => panic!("expected sizeof, got {:?}", other),
    };

    assert!(matches!(
        operand("sizeof int"),
        SizeofOperand::Type(ref t) if matches!(**t, Type::Primitive(_))
    ));
    assert!(matches!(
        operand("sizeof(*u8)"),
        SizeofOperand::Type(ref t) if matches!(**t, Type::Pointer(_))
    ));
    assert!(matches!(
        operand("sizeof [4]int"),
        SizeofOperand::Type(ref t) if matches!(**t, Type::Array(_))
    ));
    assert!(matches!(
        operand("sizeof ?int"),
        SizeofOperand::Type(ref t) if matches!(**t, Type::Optional(_))
    ));

    // Names are always expressions
    assert!(matches!(
        operand("sizeof x"),
        SizeofOperand::Expr(ref e) if matches!(**e, Expr::Path(_))
    ));
    assert!(matches!(
        operand("sizeof (x)"),
        SizeofOperand::Expr(ref e) if matches!(**e, Expr::Paren(_))
    ));
    assert!(matches!(
        operand("sizeof *p"),
        SizeofOperand::Expr(ref e) if matches!(**e, Expr::Unary(_))
    ));
}

#[test]
fn test_sizeof_binds_like_prefix() {
    let parsed = expr("sizeof x + 1");
    let (left, operator, _) = binary(&parsed);
    assert_eq!(operator, BinaryOperator::Add);
    assert!(matches!(left, Expr::Sizeof(_)));

    let parsed = expr("sizeof (int) * 2");
    let (left, operator, _) = binary(&parsed);
    assert_eq!(operator, BinaryOperator::Multiply);
    assert!(matches!(left, Expr::Sizeof(s) if s.span == Span::new(0, 12)));
}

#[test]
fn test_some_takes_whole_expression() {
    let Expr::Some(some) = expr("some a + b") else {
        panic!("expected some");
    };
    assert_eq!(binary(&some.value).1, BinaryOperator::Add);

    assert!(matches!(expr("none"), Expr::None(_)));
    assert!(matches!(expr("context"), Expr::Context(_)));
}

#[test]
fn test_function_expression() {
    let Expr::Function(function) = expr("fn \"C\" (x int, y int) int { return x + y; }") else {
        panic!("expected function expression");
    };
    assert_eq!(function.calling_convention.as_deref(), Some("C"));
    assert_eq!(function.parameters.len(), 2);
    assert!(matches!(function.return_type, Some(Type::Primitive(_))));
    assert_eq!(function.body.body.len(), 1);

    let Expr::Function(function) = expr("fn () {}") else {
        panic!("expected function expression");
    };
    assert!(function.return_type.is_none());
    assert!(function.parameters.is_empty());
}

#[test]
fn test_binary_span_covers_operands() {
    let parsed = expr("(a + b) * c");
    assert_eq!(parsed.get_span(), Span::new(0, 11));

    let (left, _, _) = binary(&parsed);
    assert!(matches!(left, Expr::Paren(p) if p.span == Span::new(0, 7)));
}

// TYPES

#[test]
fn test_simple_types() {
    assert!(matches!(ty("usize"), Type::Primitive(p) if p.primitive == Primitive::Usize));
    assert!(matches!(ty("io::File"), Type::Path(p) if p.to_path_string() == "io::File"));

    let Type::Pointer(pointer) = ty("*?int") else {
        panic!("expected pointer");
    };
    assert!(matches!(*pointer.pointee, Type::Optional(_)));
}

#[test]
fn test_array_and_slice_types() {
    let Type::Slice(slice) = ty("[]u8") else {
        panic!("expected slice type");
    };
    assert!(matches!(*slice.element, Type::Primitive(ref p) if p.primitive == Primitive::U8));

    let Type::Array(array) = ty("[4]int") else {
        panic!("expected array type");
    };
    assert_eq!(integer(&array.size), 4);
    assert_eq!(array.span, Span::new(0, 6));

    let Type::Array(array) = ty("[N * 2][]f32") else {
        panic!("expected array type");
    };
    assert_eq!(binary(&array.size).1, BinaryOperator::Multiply);
    assert!(matches!(*array.element, Type::Slice(_)));
}

#[test]
fn test_function_types() {
    let Type::Function(function) = ty("fn \"C\" (int, *u8) void") else {
        panic!("expected function type");
    };
    assert_eq!(function.calling_convention.as_deref(), Some("C"));
    assert_eq!(function.parameters.len(), 2);
    assert!(function.return_type.is_some());

    // The return type is greedy
    let Type::Function(outer) = ty("fn () fn () int") else {
        panic!("expected function type");
    };
    let Some(inner) = outer.return_type else {
        panic!("expected a return type");
    };
    assert!(matches!(*inner, Type::Function(ref f) if f.return_type.is_some()));

    let Type::Function(function) = ty("fn ()") else {
        panic!("expected function type");
    };
    assert!(function.return_type.is_none());
}

#[test]
fn test_expected_type() {
    let error = parse_type_source("+", FILE).unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::ExpectedType { found } if found == "`+`"));
}

// STATEMENTS

#[test]
fn test_variable_declarations() {
    let Stmt::VarDecl(decl) = stmt("let x int = 5;") else {
        panic!("expected var decl");
    };
    assert_eq!(decl.mutability, Mutability::Immutable);
    assert_eq!(decl.identifier.name, "x");
    assert!(decl.explicit_type.is_some());
    assert!(decl.assigned_value.is_some());
    assert_eq!(decl.span, Span::new(0, 14));

    let Stmt::VarDecl(decl) = stmt("var y;") else {
        panic!("expected var decl");
    };
    assert_eq!(decl.mutability, Mutability::Mutable);
    assert!(decl.explicit_type.is_none());
    assert!(decl.assigned_value.is_none());

    let Stmt::VarDecl(decl) = stmt("let z = 1;") else {
        panic!("expected var decl");
    };
    assert!(decl.explicit_type.is_none());
}

#[test]
fn test_variable_declaration_errors() {
    let error = parse_statement_source("let x int 5;", FILE).unwrap_err();
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("`=` or `;`"),
            found: String::from("`5`"),
        }
    );
    assert_eq!(error.get_expected(), &[TokenKind::Assignment, TokenKind::Semicolon]);

    let error = parse_statement_source("let x = 5 6;", FILE).unwrap_err();
    assert_eq!(error.get_expected(), &[TokenKind::Semicolon]);
    assert_eq!(error.get_span(), Span::new(10, 11));
}

#[test]
fn test_expression_statement() {
    let Stmt::Expression(statement) = stmt("print_all(a, b);") else {
        panic!("expected expression statement");
    };
    assert!(matches!(statement.expression, Expr::Call(_)));
    assert_eq!(statement.span, Span::new(0, 16));
}

#[test]
fn test_return_statement() {
    assert!(matches!(stmt("return;"), Stmt::Return(r) if r.value.is_none()));
    assert!(matches!(stmt("return a * 2;"), Stmt::Return(r) if r.value.is_some()));
}

#[test]
fn test_else_if_chain() {
    let Stmt::If(outer) = stmt("if a { } else if b { } else { }") else {
        panic!("expected if");
    };
    assert_eq!(path(&outer.condition), "a");

    let Some(ElseBranch::If(inner)) = &outer.else_body else {
        panic!("expected else-if, got {:?}", outer.else_body);
    };
    assert_eq!(path(&inner.condition), "b");
    assert!(matches!(inner.else_body, Some(ElseBranch::Block(_))));
}

#[test]
fn test_else_belongs_to_enclosing_if() {
    let Stmt::If(outer) = stmt("if a { if b { print b; } } else { print a; }") else {
        panic!("expected if");
    };
    assert!(matches!(outer.else_body, Some(ElseBranch::Block(_))));

    let Some(Stmt::If(inner)) = outer.then_body.body.first() else {
        panic!("expected nested if");
    };
    assert!(inner.else_body.is_none());
}

#[test]
fn test_while_and_block() {
    let Stmt::While(statement) = stmt("while i < 10 { i; }") else {
        panic!("expected while");
    };
    assert_eq!(binary(&statement.condition).1, BinaryOperator::Less);
    assert_eq!(statement.body.body.len(), 1);

    assert!(matches!(stmt("{ let a = 1; { } }"), Stmt::Block(b) if b.body.len() == 2));
}

#[test]
fn test_for_statement() {
    let Stmt::For(statement) = stmt("for let i = 0; i < n; i + 1 { print i; }") else {
        panic!("expected for");
    };
    assert!(matches!(statement.initializer, ForInit::VarDecl(_)));
    assert_eq!(binary(&statement.condition).1, BinaryOperator::Less);
    assert_eq!(binary(&statement.update).1, BinaryOperator::Add);

    let Stmt::For(statement) = stmt("for i; i < n; next(i) { }") else {
        panic!("expected for");
    };
    assert!(matches!(statement.initializer, ForInit::Expr(Expr::Path(_))));
}

#[test]
fn test_loop_range_inclusivity() {
    let Stmt::Loop(exclusive) = stmt("loop 0..10 { }") else {
        panic!("expected loop");
    };
    assert!(!exclusive.range.inclusive);
    assert_eq!(integer(&exclusive.range.start), 0);
    assert_eq!(integer(&exclusive.range.end), 10);
    assert_eq!(exclusive.range.span, Span::new(5, 10));

    let Stmt::Loop(inclusive) = stmt("loop a..=b + 1 { }") else {
        panic!("expected loop");
    };
    assert!(inclusive.range.inclusive);
    assert_eq!(binary(&inclusive.range.end).1, BinaryOperator::Add);

    let error = parse_statement_source("loop 0 10 { }", FILE).unwrap_err();
    assert_eq!(error.get_expected(), &[TokenKind::DotDot, TokenKind::DotDotEquals]);
}

#[test]
fn test_switch_case_bodies() {
    let source = "switch x {
        case 1: print a;
        case 2: { print b; }
        case 3:
            print c;
            break;
        else: print d;
    }";

    let Stmt::Switch(switch) = stmt(source) else {
        panic!("expected switch");
    };
    assert_eq!(switch.cases.len(), 3);
    assert!(matches!(&switch.cases[0].body, CaseBody::Statements(s) if s.len() == 1));
    assert!(matches!(&switch.cases[1].body, CaseBody::Block(b) if b.body.len() == 1));
    assert!(matches!(&switch.cases[2].body, CaseBody::Statements(s) if s.len() == 2));
    assert_eq!(integer(&switch.cases[2].value), 3);

    let Some(default) = &switch.default else {
        panic!("expected else clause");
    };
    assert!(matches!(&default.body, CaseBody::Statements(s) if s.len() == 1));
}

#[test]
fn test_switch_without_cases() {
    let Stmt::Switch(switch) = stmt("switch x { }") else {
        panic!("expected switch");
    };
    assert!(switch.cases.is_empty());
    assert!(switch.default.is_none());
}

#[test]
fn test_else_colon_closes_if_inside_case() {
    let Stmt::Switch(switch) = stmt("switch x { case 1: if a { print a; } else: print b; }") else {
        panic!("expected switch");
    };

    let CaseBody::Statements(body) = &switch.cases[0].body else {
        panic!("expected statement body");
    };
    assert!(matches!(&body[0], Stmt::If(i) if i.else_body.is_none()));
    assert!(switch.default.is_some());
}

#[test]
fn test_malformed_case_clauses() {
    let malformed = |source: &str| {
        let error = parse_statement_source(source, FILE).unwrap_err();
        assert!(
            matches!(error.get_kind(), ErrorImpl::MalformedCaseClause { .. }),
            "{}: {:?}",
            source,
            error
        );
        error
    };

    let error = malformed("switch x { case 1: }");
    assert_eq!(error.get_span(), Span::new(19, 20));

    malformed("switch x { case 1 print a; }");
    malformed("switch x { case 1: print a; { print b; } }");
    malformed("switch x { else: print a; case 1: print b; }");
    malformed("switch x { else print a; }");

    let error = malformed("switch x { print a; }");
    assert_eq!(
        error.get_expected(),
        &[TokenKind::Case, TokenKind::Else, TokenKind::CloseCurly]
    );
}

#[test]
fn test_simple_statements() {
    assert!(matches!(stmt("print a, b + 1, c;"), Stmt::Print(p) if p.values.len() == 3));
    assert!(matches!(stmt("break;"), Stmt::Break(_)));
    assert!(matches!(stmt("continue;"), Stmt::Continue(_)));

    let Stmt::Defer(defer) = stmt("defer free(p);") else {
        panic!("expected defer");
    };
    assert!(matches!(*defer.statement, Stmt::Expression(_)));
    assert_eq!(defer.span, Span::new(0, 14));

    assert!(matches!(stmt("defer { close(f); }"), Stmt::Defer(d) if matches!(*d.statement, Stmt::Block(_))));
}

// DECLARATIONS

#[test]
fn test_empty_source() {
    let file = parse("", FILE).unwrap();
    assert!(file.declarations.is_empty());
    assert_eq!(file.span, Span::new(0, 0));

    let file = parse("  // only a comment\n", FILE).unwrap();
    assert!(file.declarations.is_empty());
    assert_eq!(file.span, Span::new(0, 20));
}

#[test]
fn test_top_level_declarations() {
    let source = r#"
import "std/io";

type Size = usize;

let limit Size = 64;
var counter = 0;

fn "C" main(argc int, argv **u8) int {
    return 0;
}
"#;

    let file = parse(source, FILE).unwrap();
    let kinds: Vec<_> = file.declarations.iter().map(|d| d.get_decl_type()).collect();
    assert_eq!(kinds.len(), 5);

    assert!(matches!(&file.declarations[0], Decl::Import(i) if i.module == "std/io"));
    assert!(matches!(&file.declarations[1], Decl::TypeAlias(t) if t.identifier.name == "Size"));
    assert!(matches!(&file.declarations[2], Decl::Variable(v) if v.mutability == Mutability::Immutable));
    assert!(matches!(&file.declarations[3], Decl::Variable(v) if v.mutability == Mutability::Mutable));

    let Decl::Function(main) = &file.declarations[4] else {
        panic!("expected function");
    };
    assert_eq!(main.calling_convention.as_deref(), Some("C"));
    assert_eq!(main.identifier.name, "main");
    assert_eq!(main.parameters.len(), 2);
    assert!(matches!(main.parameters[1].ty, Type::Pointer(_)));
    assert!(main.return_type.is_some());
    assert_eq!(file.span, Span::new(0, source.len() as u32));
}

#[test]
fn test_type_alias_semicolon_is_optional() {
    let file = parse("type Handle = *void\nfn main() {}", FILE).unwrap();
    assert_eq!(file.declarations.len(), 2);
    assert!(matches!(&file.declarations[0], Decl::TypeAlias(t) if t.span == Span::new(0, 19)));
    assert!(matches!(&file.declarations[1], Decl::Function(_)));
}

#[test]
fn test_variadic_parameters() {
    let file = parse("extern fn printf(format *u8, ...args *u8) i32;", FILE).unwrap();
    let Decl::Extern(decl) = &file.declarations[0] else {
        panic!("expected extern");
    };
    assert!(decl.library.is_none());

    let ExternItem::Function(function) = &decl.item else {
        panic!("expected extern fn");
    };
    assert!(!function.parameters[0].is_variadic);
    assert!(function.parameters[1].is_variadic);
    assert_eq!(variadic_position(&function.parameters), Some(1));
    assert_eq!(function.parameters[1].span, Span::new(29, 40));
}

#[test]
fn test_extern_forms() {
    let source = r#"
extern "libc" fn puts(s *u8) i32;
extern type Opaque;
extern "C" {
    fn malloc(size usize) *void;
    type FILE;
    var errno i32;
}
extern {}
"#;

    let file = parse(source, FILE).unwrap();
    assert_eq!(file.declarations.len(), 4);

    assert!(matches!(
        &file.declarations[0],
        Decl::Extern(e) if e.library.as_deref() == Some("libc") && matches!(e.item, ExternItem::Function(_))
    ));
    assert!(matches!(
        &file.declarations[1],
        Decl::Extern(e) if matches!(e.item, ExternItem::Type(_))
    ));

    let Decl::ExternBlock(block) = &file.declarations[2] else {
        panic!("expected extern block");
    };
    assert_eq!(block.library.as_deref(), Some("C"));
    assert_eq!(block.items.len(), 3);
    assert!(matches!(block.items[0], ExternItem::Function(ref f) if f.return_type.is_some()));
    assert!(matches!(block.items[1], ExternItem::Type(_)));
    assert!(matches!(block.items[2], ExternItem::Variable(_)));

    assert!(matches!(&file.declarations[3], Decl::ExternBlock(b) if b.items.is_empty()));
}

#[test]
fn test_extern_rejects_other_items() {
    let error = parse_err("extern { return; }");
    assert_eq!(
        error.get_expected(),
        &[TokenKind::Fn, TokenKind::Type, TokenKind::Let, TokenKind::Var]
    );
}

// ERRORS

#[test]
fn test_expected_declaration() {
    let error = parse_err("print x;");
    assert!(matches!(error.get_kind(), ErrorImpl::ExpectedDeclaration { found } if found == "`print`"));
    assert_eq!(error.get_span(), Span::new(0, 5));
    assert!(error.get_expected().contains(&TokenKind::Fn));
    assert_eq!(error.get_file(), "test.pbl");
}

#[test]
fn test_expected_expression() {
    let error = parse_err("let x = ;");
    assert!(matches!(error.get_kind(), ErrorImpl::ExpectedExpression { found } if found == "`;`"));
    assert_eq!(error.get_span(), Span::new(8, 9));
    assert!(error.is_syntax_error());
}

#[test]
fn test_unclosed_block_points_at_opener() {
    let error = parse_err("fn main() { let x = 1;");
    let ErrorImpl::UnclosedDelimiter { expected, opener } = error.get_kind() else {
        panic!("expected unclosed delimiter, got {:?}", error);
    };
    assert_eq!(expected, "`}`");
    assert_eq!(*opener, Span::new(10, 11));
    assert_eq!(error.get_span(), Span::new(22, 22));
    assert_eq!(error.get_expected(), &[TokenKind::CloseCurly]);
}

#[test]
fn test_unclosed_call() {
    let error = parse_expression_source("foo(1, 2;", FILE).unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UnclosedDelimiter { opener, .. } if *opener == Span::new(3, 4)
    ));
    assert_eq!(error.get_span(), Span::new(8, 9));
}

#[test]
fn test_missing_semicolon() {
    let error = parse_err("fn main() { foo() }");
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("`;`"),
            found: String::from("`}`"),
        }
    );
    assert_eq!(error.get_span(), Span::new(18, 19));
}

#[test]
fn test_end_of_input_is_reported_as_such() {
    let error = parse_err("fn main(");
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UnexpectedToken { found, .. } if found == "end of input"
    ));
}

#[test]
fn test_lex_error_wins_over_syntax_error() {
    let error = parse_err("let x = 1 @");
    assert!(error.is_lex_error());
    assert!(matches!(error.get_kind(), ErrorImpl::UnrecognisedToken { token } if token == "@"));
    assert_eq!(error.get_span(), Span::new(10, 11));
}

#[test]
fn test_unterminated_string_is_lex_error() {
    let error = parse_err("fn main() { let s = \"abc; }");
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString);
    assert!(error.is_lex_error());
    assert_eq!(error.get_position().0, 20);
}

#[test]
fn test_nesting_limit() {
    let limits = ParserLimits {
        max_nesting_depth: 16,
        ..ParserLimits::default()
    };
    let config = ParserConfig::default().with_limits(limits);

    let nested = format!("let x = {}1{};", "(".repeat(50), ")".repeat(50));
    let error = parse_with_config(&nested, FILE, &config).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::NestingTooDeep { limit: 16 });

    let shallow = format!("let x = {}1{};", "(".repeat(4), ")".repeat(4));
    assert!(parse_with_config(&shallow, FILE, &config).is_ok());
}

#[test]
fn test_default_nesting_limit_stops_runaway_input() {
    let source = format!("let x = {}1;", "-".repeat(10_000));
    let error = parse_err(&source);
    assert!(matches!(error.get_kind(), ErrorImpl::NestingTooDeep { limit: 256 }));
}

#[test]
fn test_default_nesting_limit_stops_long_operator_chains() {
    for source in [
        format!("let x = {}1;", "1+".repeat(20_000)),
        format!("let x = a{};", ".b".repeat(20_000)),
        format!("let x = f{};", "()".repeat(20_000)),
        format!("let x = a{};", "[0]".repeat(20_000)),
    ] {
        let error = parse_err(&source);
        assert_eq!(error.get_kind(), &ErrorImpl::NestingTooDeep { limit: 256 });
    }
}

#[test]
fn test_operator_chain_counts_against_configured_limit() {
    let limits = ParserLimits {
        max_nesting_depth: 16,
        ..ParserLimits::default()
    };
    let config = ParserConfig::default().with_limits(limits);

    let long = format!("let x = 1{};", " + 1".repeat(40));
    let error = parse_with_config(&long, FILE, &config).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::NestingTooDeep { limit: 16 });

    let short = format!("let x = 1{};", " + 1".repeat(8));
    assert!(parse_with_config(&short, FILE, &config).is_ok());
}

#[test]
fn test_operator_chain_under_limit_prints() {
    let source = format!("1{}", " + 1".repeat(200));
    let parsed = expr(&source);
    assert_eq!(unparse_expr(&parsed), source);
}

#[test]
fn test_default_file_name() {
    let error = parse("@", None).unwrap_err();
    assert_eq!(error.get_file(), "<input>");
}

// ENTRY POINTS AND OUTPUT

#[test]
fn test_single_item_entry_points_require_end_of_input() {
    let error = parse_expression_source("1 2", FILE).unwrap_err();
    assert_eq!(error.get_expected(), &[TokenKind::EOF]);
    assert_eq!(error.get_span(), Span::new(2, 3));

    assert!(parse_type_source("int int", FILE).is_err());
    assert!(parse_statement_source("break; break;", FILE).is_err());
}

#[test]
fn test_collected_tokens() {
    let config = ParserConfig::default().with_tokens(true);
    let output = parse_with_config("let x = 1; // trailing\n", FILE, &config).unwrap();

    let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
    assert_eq!(output.ast.declarations.len(), 1);
}

#[test]
fn test_collected_tokens_keep_comments_in_order() {
    let config = ParserConfig::default().with_tokens(true).with_comments(true);
    let source = "// head\nlet x = 1; // tail\n";
    let output = parse_with_config(source, FILE, &config).unwrap();

    let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Comment,
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Comment,
            TokenKind::EOF,
        ]
    );
    assert_eq!(output.tokens[0].value, "// head");
    assert!(output
        .tokens
        .windows(2)
        .all(|pair| pair[0].span.start <= pair[1].span.start));
}

#[test]
fn test_tokens_not_collected_by_default() {
    let output = parse_with_config("let x = 1;", FILE, &ParserConfig::default()).unwrap();
    assert!(output.tokens.is_empty());
}

#[test]
fn test_if_without_else_then_if_else() {
    let file = parse("fn main() { if a { } if b { } else { } }", FILE).unwrap();
    let Decl::Function(main) = &file.declarations[0] else {
        panic!("expected function");
    };

    assert!(matches!(&main.body.body[0], Stmt::If(first) if first.else_body.is_none()));
    assert!(matches!(&main.body.body[1], Stmt::If(second) if second.else_body.is_some()));
}

#[test]
fn test_unterminated_string_at_end_of_input() {
    let error = parse_err("let x = \"abc;");
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_span(), Span::new(8, 13));
}

#[test]
fn test_trailing_variadic_parameter() {
    let file = parse("fn f(...xs []int) { }", FILE).unwrap();
    let Decl::Function(function) = &file.declarations[0] else {
        panic!("expected function");
    };
    assert_eq!(function.parameters.len(), 1);
    assert!(function.parameters[0].is_variadic);
    assert!(matches!(function.parameters[0].ty, Type::Slice(_)));
}

#[test]
fn test_extern_block_function_has_no_body() {
    let file = parse(r#"extern "C" { fn foo(x int) int; }"#, FILE).unwrap();
    let Decl::ExternBlock(block) = &file.declarations[0] else {
        panic!("expected extern block");
    };
    assert_eq!(block.items.len(), 1);

    let ExternItem::Function(function) = &block.items[0] else {
        panic!("expected extern fn");
    };
    assert_eq!(function.identifier.name, "foo");
    assert_eq!(function.parameters.len(), 1);
    assert!(function.return_type.is_some());
}

#[test]
fn test_loop_ranges_differ_only_in_inclusivity() {
    let (Stmt::Loop(exclusive), Stmt::Loop(inclusive)) =
        (stmt("loop 0..5 { }"), stmt("loop 0..=5 { }"))
    else {
        panic!("expected loops");
    };

    assert!(!exclusive.range.inclusive);
    assert!(inclusive.range.inclusive);
    assert_eq!(integer(&exclusive.range.start), integer(&inclusive.range.start));
    assert_eq!(integer(&exclusive.range.end), integer(&inclusive.range.end));
    assert_eq!(exclusive.body.body, inclusive.body.body);
}

#[test]
fn test_percent_is_not_an_operator() {
    let error = parse_expression_source("a % b", FILE).unwrap_err();
    assert!(error.is_lex_error());
    assert_eq!(error.get_span(), Span::new(2, 3));
}
