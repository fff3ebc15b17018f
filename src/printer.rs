//! Canonical unparser.
//!
//! Prints an AST back to source with uniform spacing and 4-space
//! indentation. Parentheses only appear where the tree has a
//! [`ParenExpr`](crate::ast::expressions::ParenExpr), plus around a `sizeof`
//! type operand, so printing a freshly parsed tree and parsing the output
//! gives the same tree up to spans.

use crate::ast::{
    ast::{Decl, Expr, SourceFile, Stmt, Type},
    declarations::{ExternItem, Parameter},
    expressions::{Literal, QualifiedPath, SizeofOperand},
    statements::{BlockStmt, CaseBody, ElseBranch, ForInit, Mutability, VarDeclStmt},
};

const INDENT: &str = "    ";

pub fn unparse(file: &SourceFile) -> String {
    let mut printer = Printer::default();
    for decl in &file.declarations {
        printer.decl(decl);
        printer.out.push('\n');
    }
    printer.out
}

pub fn unparse_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::default();
    printer.stmt(stmt);
    printer.out
}

pub fn unparse_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr(expr);
    printer.out
}

pub fn unparse_type(ty: &Type) -> String {
    let mut printer = Printer::default();
    printer.ty(ty);
    printer.out
}

fn escape(value: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push(quote);

    for ch in value.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\\' => escaped.push_str("\\\\"),
            '\0' => escaped.push_str("\\0"),
            ch if ch == quote => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ch if ch.is_ascii_control() => escaped.push_str(&format!("\\x{:02x}", ch as u32)),
            ch => escaped.push(ch),
        }
    }

    escaped.push(quote);
    escaped
}

/// Shortest round-tripping form, always with a fractional part since the
/// lexer requires one.
fn format_float(value: f64) -> String {
    let formatted = format!("{:?}", value);
    if formatted.contains('.') {
        return formatted;
    }

    match formatted.find(['e', 'E']) {
        Some(exponent) => format!("{}.0{}", &formatted[..exponent], &formatted[exponent..]),
        None => format!("{}.0", formatted),
    }
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn comma_separated<T>(&mut self, items: &[T], mut print: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            print(self, item);
        }
    }

    fn calling_convention(&mut self, calling_convention: &Option<String>) {
        if let Some(convention) = calling_convention {
            self.push(&escape(convention, '"'));
            self.push(" ");
        }
    }

    fn signature(&mut self, parameters: &[Parameter], return_type: Option<&Type>) {
        self.push("(");
        self.comma_separated(parameters, |p, parameter| {
            if parameter.is_variadic {
                p.push("...");
            }
            p.push(&parameter.name.name);
            p.push(" ");
            p.ty(&parameter.ty);
        });
        self.push(")");

        if let Some(ty) = return_type {
            self.push(" ");
            self.ty(ty);
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Import(decl) => {
                self.push("import ");
                self.push(&escape(&decl.module, '"'));
                self.push(";");
            }
            Decl::Function(decl) => {
                self.push("fn ");
                self.calling_convention(&decl.calling_convention);
                self.push(&decl.identifier.name);
                self.signature(&decl.parameters, decl.return_type.as_ref());
                self.push(" ");
                self.block(&decl.body);
            }
            Decl::TypeAlias(decl) => {
                self.push("type ");
                self.push(&decl.identifier.name);
                self.push(" = ");
                self.ty(&decl.aliased);
                self.push(";");
            }
            Decl::Variable(decl) => self.var_decl(decl),
            Decl::Extern(decl) => {
                self.push("extern ");
                self.calling_convention(&decl.library);
                self.extern_item(&decl.item);
            }
            Decl::ExternBlock(block) => {
                self.push("extern ");
                self.calling_convention(&block.library);
                if block.items.is_empty() {
                    self.push("{}");
                    return;
                }

                self.push("{");
                self.indent += 1;
                for item in &block.items {
                    self.newline();
                    self.extern_item(item);
                }
                self.indent -= 1;
                self.newline();
                self.push("}");
            }
        }
    }

    fn extern_item(&mut self, item: &ExternItem) {
        match item {
            ExternItem::Function(decl) => {
                self.push("fn ");
                self.push(&decl.identifier.name);
                self.signature(&decl.parameters, decl.return_type.as_ref());
                self.push(";");
            }
            ExternItem::Type(decl) => {
                self.push("type ");
                self.push(&decl.identifier.name);
                self.push(";");
            }
            ExternItem::Variable(decl) => self.var_decl(decl),
        }
    }

    fn var_decl(&mut self, decl: &VarDeclStmt) {
        self.push(match decl.mutability {
            Mutability::Immutable => "let ",
            Mutability::Mutable => "var ",
        });
        self.push(&decl.identifier.name);

        if let Some(ty) = &decl.explicit_type {
            self.push(" ");
            self.ty(ty);
        }
        if let Some(value) = &decl.assigned_value {
            self.push(" = ");
            self.expr(value);
        }
        self.push(";");
    }

    fn block(&mut self, block: &BlockStmt) {
        if block.body.is_empty() {
            self.push("{}");
            return;
        }

        self.push("{");
        self.indent += 1;
        for stmt in block.iter() {
            self.newline();
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn case_body(&mut self, body: &CaseBody) {
        match body {
            CaseBody::Block(block) => {
                self.push(" ");
                self.block(block);
            }
            CaseBody::Statements(stmts) => {
                self.indent += 1;
                for stmt in stmts {
                    self.newline();
                    self.stmt(stmt);
                }
                self.indent -= 1;
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(stmt) => {
                self.expr(&stmt.expression);
                self.push(";");
            }
            Stmt::Block(block) => self.block(block),
            Stmt::VarDecl(decl) => self.var_decl(decl),
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => {
                    self.push("return ");
                    self.expr(value);
                    self.push(";");
                }
                None => self.push("return;"),
            },
            Stmt::If(stmt) => {
                let mut current = stmt;
                loop {
                    self.push("if ");
                    self.expr(&current.condition);
                    self.push(" ");
                    self.block(&current.then_body);

                    match &current.else_body {
                        Some(ElseBranch::If(next)) => {
                            self.push(" else ");
                            current = &**next;
                        }
                        Some(ElseBranch::Block(block)) => {
                            self.push(" else ");
                            self.block(block);
                            break;
                        }
                        None => break,
                    }
                }
            }
            Stmt::While(stmt) => {
                self.push("while ");
                self.expr(&stmt.condition);
                self.push(" ");
                self.block(&stmt.body);
            }
            Stmt::For(stmt) => {
                self.push("for ");
                match &stmt.initializer {
                    ForInit::VarDecl(decl) => self.var_decl(decl),
                    ForInit::Expr(expr) => {
                        self.expr(expr);
                        self.push(";");
                    }
                }
                self.push(" ");
                self.expr(&stmt.condition);
                self.push("; ");
                self.expr(&stmt.update);
                self.push(" ");
                self.block(&stmt.body);
            }
            Stmt::Loop(stmt) => {
                self.push("loop ");
                self.expr(&stmt.range.start);
                self.push(if stmt.range.inclusive { "..=" } else { ".." });
                self.expr(&stmt.range.end);
                self.push(" ");
                self.block(&stmt.body);
            }
            Stmt::Switch(stmt) => {
                self.push("switch ");
                self.expr(&stmt.condition);
                self.push(" {");
                self.indent += 1;
                for case in &stmt.cases {
                    self.newline();
                    self.push("case ");
                    self.expr(&case.value);
                    self.push(":");
                    self.case_body(&case.body);
                }
                if let Some(default) = &stmt.default {
                    self.newline();
                    self.push("else:");
                    self.case_body(&default.body);
                }
                self.indent -= 1;
                self.newline();
                self.push("}");
            }
            Stmt::Print(stmt) => {
                self.push("print ");
                self.comma_separated(&stmt.values, |p, value| p.expr(value));
                self.push(";");
            }
            Stmt::Break(_) => self.push("break;"),
            Stmt::Continue(_) => self.push("continue;"),
            Stmt::Defer(stmt) => {
                self.push("defer ");
                self.stmt(&stmt.statement);
            }
        }
    }

    fn path(&mut self, path: &QualifiedPath) {
        self.push(&path.to_path_string());
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Integer(value) => self.push(&value.to_string()),
            Literal::Float(value) => self.push(&format_float(*value)),
            Literal::String(value) => self.push(&escape(value, '"')),
            Literal::Char(value) => self.push(&escape(&value.to_string(), '\'')),
            Literal::Boolean(value) => self.push(if *value { "true" } else { "false" }),
            Literal::Nil => self.push("nil"),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Path(path) => self.path(path),
            Expr::Literal(literal) => self.literal(&literal.value),
            Expr::Binary(expr) => {
                self.expr(&expr.left);
                self.push(" ");
                self.push(expr.operator.as_str());
                self.push(" ");
                self.expr(&expr.right);
            }
            Expr::Unary(expr) => {
                self.push(expr.operator.as_str());
                // `& &x` must not print as `&&x`
                if matches!(*expr.operand, Expr::Unary(_)) {
                    self.push(" ");
                }
                self.expr(&expr.operand);
            }
            Expr::Sizeof(expr) => {
                self.push("sizeof ");
                match &expr.operand {
                    SizeofOperand::Type(ty) => {
                        self.push("(");
                        self.ty(ty);
                        self.push(")");
                    }
                    SizeofOperand::Expr(operand) => self.expr(operand),
                }
            }
            Expr::Call(expr) => {
                self.expr(&expr.callee);
                self.push("(");
                self.comma_separated(&expr.arguments, |p, argument| p.expr(argument));
                self.push(")");
            }
            Expr::Field(expr) => {
                self.expr(&expr.object);
                self.push(".");
                self.push(&expr.field.name);
            }
            Expr::Index(expr) => {
                self.expr(&expr.object);
                self.push("[");
                self.expr(&expr.index);
                self.push("]");
            }
            Expr::Slice(expr) => {
                self.expr(&expr.object);
                self.push("[");
                if let Some(start) = &expr.start {
                    self.expr(start);
                }
                self.push(":");
                if let Some(end) = &expr.end {
                    self.expr(end);
                }
                self.push("]");
            }
            Expr::Paren(expr) => {
                self.push("(");
                self.expr(&expr.inner);
                self.push(")");
            }
            Expr::Cast(expr) => {
                self.expr(&expr.value);
                self.push(" as ");
                self.ty(&expr.target);
            }
            Expr::Some(expr) => {
                self.push("some ");
                self.expr(&expr.value);
            }
            Expr::None(_) => self.push("none"),
            Expr::Context(_) => self.push("context"),
            Expr::Function(expr) => {
                self.push("fn ");
                self.calling_convention(&expr.calling_convention);
                self.signature(&expr.parameters, expr.return_type.as_ref());
                self.push(" ");
                self.block(&expr.body);
            }
        }
    }

    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Primitive(ty) => self.push(ty.primitive.as_str()),
            Type::Path(path) => self.path(path),
            Type::Pointer(ty) => {
                self.push("*");
                self.ty(&ty.pointee);
            }
            Type::Array(ty) => {
                self.push("[");
                self.expr(&ty.size);
                self.push("]");
                self.ty(&ty.element);
            }
            Type::Slice(ty) => {
                self.push("[]");
                self.ty(&ty.element);
            }
            Type::Optional(ty) => {
                self.push("?");
                self.ty(&ty.inner);
            }
            Type::Function(ty) => {
                self.push("fn ");
                self.calling_convention(&ty.calling_convention);
                self.push("(");
                self.comma_separated(&ty.parameters, |p, parameter| p.ty(parameter));
                self.push(")");
                if let Some(return_type) = &ty.return_type {
                    self.push(" ");
                    self.ty(return_type);
                }
            }
        }
    }
}
