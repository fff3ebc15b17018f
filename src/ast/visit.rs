//! Read-only AST traversal.
//!
//! Implement [`Visitor`] and override the hooks you care about. Every default
//! method forwards to the matching `walk_*` function, which visits the node's
//! children in source order, so an override can call `walk_*` itself to keep
//! descending.

use super::{
    ast::{Decl, Expr, SourceFile, Stmt, Type},
    declarations::{ExternItem, Parameter},
    expressions::{Identifier, QualifiedPath, SizeofOperand},
    statements::{BlockStmt, CaseBody, ElseBranch, ForInit, RangeExpr, VarDeclStmt},
};

pub trait Visitor<'ast> {
    fn visit_source_file(&mut self, file: &'ast SourceFile) {
        walk_source_file(self, file);
    }

    fn visit_decl(&mut self, decl: &'ast Decl) {
        walk_decl(self, decl);
    }

    fn visit_extern_item(&mut self, item: &'ast ExternItem) {
        walk_extern_item(self, item);
    }

    fn visit_parameter(&mut self, parameter: &'ast Parameter) {
        walk_parameter(self, parameter);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &'ast BlockStmt) {
        walk_block(self, block);
    }

    fn visit_var_decl(&mut self, decl: &'ast VarDeclStmt) {
        walk_var_decl(self, decl);
    }

    fn visit_range(&mut self, range: &'ast RangeExpr) {
        walk_range(self, range);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &'ast Type) {
        walk_type(self, ty);
    }

    fn visit_path(&mut self, path: &'ast QualifiedPath) {
        walk_path(self, path);
    }

    fn visit_identifier(&mut self, _identifier: &'ast Identifier) {}
}

pub fn walk_source_file<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, file: &'ast SourceFile) {
    for decl in &file.declarations {
        v.visit_decl(decl);
    }
}

fn walk_signature<'ast, V: Visitor<'ast> + ?Sized>(
    v: &mut V,
    parameters: &'ast [Parameter],
    return_type: Option<&'ast Type>,
) {
    for parameter in parameters {
        v.visit_parameter(parameter);
    }
    if let Some(ty) = return_type {
        v.visit_type(ty);
    }
}

pub fn walk_decl<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, decl: &'ast Decl) {
    match decl {
        Decl::Import(_) => {}
        Decl::Function(decl) => {
            v.visit_identifier(&decl.identifier);
            walk_signature(v, &decl.parameters, decl.return_type.as_ref());
            v.visit_block(&decl.body);
        }
        Decl::TypeAlias(decl) => {
            v.visit_identifier(&decl.identifier);
            v.visit_type(&decl.aliased);
        }
        Decl::Variable(decl) => v.visit_var_decl(decl),
        Decl::Extern(decl) => v.visit_extern_item(&decl.item),
        Decl::ExternBlock(block) => {
            for item in &block.items {
                v.visit_extern_item(item);
            }
        }
    }
}

pub fn walk_extern_item<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, item: &'ast ExternItem) {
    match item {
        ExternItem::Function(decl) => {
            v.visit_identifier(&decl.identifier);
            walk_signature(v, &decl.parameters, decl.return_type.as_ref());
        }
        ExternItem::Type(decl) => v.visit_identifier(&decl.identifier),
        ExternItem::Variable(decl) => v.visit_var_decl(decl),
    }
}

pub fn walk_parameter<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, parameter: &'ast Parameter) {
    v.visit_identifier(&parameter.name);
    v.visit_type(&parameter.ty);
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, block: &'ast BlockStmt) {
    for stmt in block.iter() {
        v.visit_stmt(stmt);
    }
}

pub fn walk_var_decl<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, decl: &'ast VarDeclStmt) {
    v.visit_identifier(&decl.identifier);
    if let Some(ty) = &decl.explicit_type {
        v.visit_type(ty);
    }
    if let Some(value) = &decl.assigned_value {
        v.visit_expr(value);
    }
}

pub fn walk_range<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, range: &'ast RangeExpr) {
    v.visit_expr(&range.start);
    v.visit_expr(&range.end);
}

fn walk_case_body<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, body: &'ast CaseBody) {
    match body {
        CaseBody::Block(block) => v.visit_block(block),
        CaseBody::Statements(stmts) => {
            for stmt in stmts {
                v.visit_stmt(stmt);
            }
        }
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Expression(stmt) => v.visit_expr(&stmt.expression),
        Stmt::Block(block) => v.visit_block(block),
        Stmt::VarDecl(decl) => v.visit_var_decl(decl),
        Stmt::Return(stmt) => {
            if let Some(value) = &stmt.value {
                v.visit_expr(value);
            }
        }
        Stmt::If(stmt) => {
            let mut current = stmt;
            loop {
                v.visit_expr(&current.condition);
                v.visit_block(&current.then_body);
                match &current.else_body {
                    Some(ElseBranch::If(next)) => current = &**next,
                    Some(ElseBranch::Block(block)) => {
                        v.visit_block(block);
                        break;
                    }
                    None => break,
                }
            }
        }
        Stmt::While(stmt) => {
            v.visit_expr(&stmt.condition);
            v.visit_block(&stmt.body);
        }
        Stmt::For(stmt) => {
            match &stmt.initializer {
                ForInit::VarDecl(decl) => v.visit_var_decl(decl),
                ForInit::Expr(expr) => v.visit_expr(expr),
            }
            v.visit_expr(&stmt.condition);
            v.visit_expr(&stmt.update);
            v.visit_block(&stmt.body);
        }
        Stmt::Loop(stmt) => {
            v.visit_range(&stmt.range);
            v.visit_block(&stmt.body);
        }
        Stmt::Switch(stmt) => {
            v.visit_expr(&stmt.condition);
            for case in &stmt.cases {
                v.visit_expr(&case.value);
                walk_case_body(v, &case.body);
            }
            if let Some(default) = &stmt.default {
                walk_case_body(v, &default.body);
            }
        }
        Stmt::Print(stmt) => {
            for value in &stmt.values {
                v.visit_expr(value);
            }
        }
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::Defer(stmt) => v.visit_stmt(&stmt.statement),
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Path(path) => v.visit_path(path),
        Expr::Literal(_) | Expr::None(_) | Expr::Context(_) => {}
        Expr::Binary(expr) => {
            v.visit_expr(&expr.left);
            v.visit_expr(&expr.right);
        }
        Expr::Unary(expr) => v.visit_expr(&expr.operand),
        Expr::Sizeof(expr) => match &expr.operand {
            SizeofOperand::Type(ty) => v.visit_type(ty),
            SizeofOperand::Expr(operand) => v.visit_expr(operand),
        },
        Expr::Call(expr) => {
            v.visit_expr(&expr.callee);
            for argument in &expr.arguments {
                v.visit_expr(argument);
            }
        }
        Expr::Field(expr) => {
            v.visit_expr(&expr.object);
            v.visit_identifier(&expr.field);
        }
        Expr::Index(expr) => {
            v.visit_expr(&expr.object);
            v.visit_expr(&expr.index);
        }
        Expr::Slice(expr) => {
            v.visit_expr(&expr.object);
            if let Some(start) = &expr.start {
                v.visit_expr(start);
            }
            if let Some(end) = &expr.end {
                v.visit_expr(end);
            }
        }
        Expr::Paren(expr) => v.visit_expr(&expr.inner),
        Expr::Cast(expr) => {
            v.visit_expr(&expr.value);
            v.visit_type(&expr.target);
        }
        Expr::Some(expr) => v.visit_expr(&expr.value),
        Expr::Function(expr) => {
            walk_signature(v, &expr.parameters, expr.return_type.as_ref());
            v.visit_block(&expr.body);
        }
    }
}

pub fn walk_type<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, ty: &'ast Type) {
    match ty {
        Type::Primitive(_) => {}
        Type::Path(path) => v.visit_path(path),
        Type::Pointer(ty) => v.visit_type(&ty.pointee),
        Type::Array(ty) => {
            v.visit_expr(&ty.size);
            v.visit_type(&ty.element);
        }
        Type::Slice(ty) => v.visit_type(&ty.element),
        Type::Optional(ty) => v.visit_type(&ty.inner),
        Type::Function(ty) => {
            for parameter in &ty.parameters {
                v.visit_type(parameter);
            }
            if let Some(return_type) = &ty.return_type {
                v.visit_type(return_type);
            }
        }
    }
}

pub fn walk_path<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, path: &'ast QualifiedPath) {
    for segment in path.segments() {
        v.visit_identifier(segment);
    }
}
