//! `${VAR}` references in configuration strings.

use std::env::VarError;

use shellexpand::LookupError;

use crate::ConfigError;

/// Replace `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Values without a `${` are returned untouched, so a lone `$VAR` stays
/// literal. A reference with no default fails when the variable is unset or
/// not valid Unicode; `field` names the config key in that error.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(error) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: describe(&error),
        }),
    }
}

fn lookup(name: &str) -> Result<Option<String>, VarError> {
    std::env::var(name).map(Some)
}

fn describe(error: &LookupError<VarError>) -> String {
    match error.cause {
        VarError::NotPresent => format!("${{{}}} not set", error.var_name),
        VarError::NotUnicode(_) => format!("${{{}}} is not valid Unicode", error.var_name),
    }
}
