//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use std::env::{self, VarError};

use shellexpand::LookupError;

use crate::ConfigError;

/// Why a referenced variable could not be substituted.
#[derive(Debug, PartialEq, Eq)]
enum LookupFailure {
    Unset,
    NotUnicode,
}

impl From<VarError> for LookupFailure {
    fn from(err: VarError) -> Self {
        match err {
            VarError::NotPresent => Self::Unset,
            VarError::NotUnicode(_) => Self::NotUnicode,
        }
    }
}

/// Expand environment variable references in the value of config `field`.
///
/// Text without a `${` reference is returned as is, so footers may contain
/// bare `$` signs. A reference with a `:-default` falls back to the default
/// when the variable cannot be read.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(LookupError { var_name, cause }) => {
            let message = match cause {
                LookupFailure::Unset => format!("${{{var_name}}} not set"),
                LookupFailure::NotUnicode => format!("${{{var_name}}} is not valid unicode"),
            };
            Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message,
            })
        }
    }
}

fn lookup(name: &str) -> Result<Option<String>, LookupFailure> {
    Ok(Some(env::var(name)?))
}
