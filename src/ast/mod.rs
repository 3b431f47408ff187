// Abstract syntax tree for the front end.
// Commands and expressions are closed enums; every consumer matches them exhaustively.

mod traits;
pub use traits::Spanned;

mod declarations;
mod expressions;
mod program;
mod statements;

pub use declarations::{Decl, VarDecl};
pub use expressions::{Binary, Expr, NumLit, ProcCall, Unary};
pub use program::Program;
pub use statements::{Assign, CmdBlock, Command, Direction, ForStmt, IfStmt, WhileStmt};
