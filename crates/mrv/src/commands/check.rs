//! `mrv check`: one validation cycle, one report.

use tokio_util::sync::CancellationToken;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    // Single-shot: interval forced to zero regardless of profile.
    let device = config::resolve_device_config(global, Some(0))?;
    super::run_validation(device, global, CancellationToken::new()).await
}
