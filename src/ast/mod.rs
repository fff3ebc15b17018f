/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Tagged Decl/Stmt/Expr/Type enums and their discriminators
/// - declarations: Top-level and extern declarations
/// - expressions: Definitions for various expression types
/// - statements: Definitions for various statement types
/// - types: Definitions for type representations in the AST
/// - visit: Read-only traversal
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod visit;
