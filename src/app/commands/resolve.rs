//! Resolve command: report which interpreter a run would use.

use crate::app::AppContext;
use crate::domain::{InterpreterPath, interpreter};

pub fn execute(ctx: &AppContext) -> InterpreterPath {
    interpreter::resolve(ctx.project_root(), &ctx.config().job.interpreter)
}
