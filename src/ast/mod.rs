/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree the parser builds and the
/// semantic passes decorate
///
/// Submodules:
/// - declarations: Variable declarations, function definitions and the program
/// - expressions: Expression nodes, operators and variable references
/// - statements: Statement nodes, blocks and loops
pub mod declarations;
pub mod expressions;
pub mod statements;
