//! Pure parse/validate for runner configuration (`schedrun.toml`).

use super::RunnerConfig;
use super::dto::RunnerConfigDto;
use crate::domain::AppError;

/// Parse and validate runner configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<RunnerConfig, AppError> {
    let dto: RunnerConfigDto = toml::from_str(content)?;
    RunnerConfig::try_from(dto)
}
