// src/config/validate.rs

use tokio::sync::Semaphore;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MultibuildError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = MultibuildError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_nvr_format(cfg)?;
    validate_url_templates(cfg)?;
    validate_run(cfg)?;
    Ok(())
}

fn validate_nvr_format(cfg: &RawConfigFile) -> Result<()> {
    if let Some(format) = &cfg.nvr.format {
        if format.trim().is_empty() {
            return Err(MultibuildError::ConfigError(
                "[nvr].format must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_url_templates(cfg: &RawConfigFile) -> Result<()> {
    for (service, section) in cfg.services.iter() {
        if let Some(template) = &section.build_info_url_template {
            if template.matches("%d").count() != 1 {
                return Err(MultibuildError::ConfigError(format!(
                    "[{service}].build_info_url_template must contain exactly one '%d' placeholder"
                )));
            }
        }
    }
    Ok(())
}

fn validate_run(cfg: &RawConfigFile) -> Result<()> {
    if let Some(n) = cfg.run.max_parallel {
        if n > Semaphore::MAX_PERMITS {
            return Err(MultibuildError::ConfigError(format!(
                "[run].max_parallel must be at most {}, got {n}",
                Semaphore::MAX_PERMITS
            )));
        }
    }
    Ok(())
}
