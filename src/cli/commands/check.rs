use anyhow::Result;
use tracing::debug;

use super::super::args::CheckCommand;
use super::{CommandKind, CommandResult};
use crate::core::CheckContext;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common, &cmd.paths)?;
    debug!(
        files = ctx.files.len(),
        call_names = ?ctx.config.call_names,
        "checking units"
    );

    let issues = ctx.issues();
    Ok(CommandResult::from_issues(
        CommandKind::Check,
        issues,
        ctx.files.len(),
    ))
}
