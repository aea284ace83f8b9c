//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// `field` names the config key in error messages. Only braced references are
/// expanded; a bare `$` (common in cookies and URLs) is always literal, as is
/// an unterminated `${`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len + 1;
        expanded.push_str(&rest[..start]);
        expanded.push_str(&expand_reference(&rest[start..end], field)?);
        rest = &rest[end..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |var| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Variable referenced without a default and missing from the environment.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_header_value() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SUBSTACK_TEST_SID", "s%3Aabc");
        }
        let result = expand_env("substack.sid=${SUBSTACK_TEST_SID}", "api.headers.Cookie").unwrap();
        assert_eq!(result, "substack.sid=s%3Aabc");
        unsafe {
            std::env::remove_var("SUBSTACK_TEST_SID");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SUBSTACK_TEST_UNSET_HOST");
        }
        let result = expand_env(
            "https://${SUBSTACK_TEST_UNSET_HOST:-substack.com}/api/v1",
            "api.base_url",
        )
        .unwrap();
        assert_eq!(result, "https://substack.com/api/v1");
    }

    #[test]
    fn test_missing_var_names_field_and_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SUBSTACK_TEST_MISSING");
        }
        let err = expand_env("${SUBSTACK_TEST_MISSING}", "notes.tab_id").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("SUBSTACK_TEST_MISSING"));
        assert!(message.contains("notes.tab_id"));
    }

    #[test]
    fn test_bare_dollar_next_to_reference_is_literal() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SUBSTACK_TEST_COOKIE_SID", "abc");
        }
        let result = expand_env(
            "a=$x; b=${SUBSTACK_TEST_COOKIE_SID}; c=$",
            "api.headers.Cookie",
        )
        .unwrap();
        assert_eq!(result, "a=$x; b=abc; c=$");
        unsafe {
            std::env::remove_var("SUBSTACK_TEST_COOKIE_SID");
        }
    }

    #[test]
    fn test_unterminated_reference_is_literal() {
        let result = expand_env("token=${abc", "api.headers.Cookie").unwrap();
        assert_eq!(result, "token=${abc");
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        let result = expand_env("token=$abc", "api.headers.Cookie").unwrap();
        assert_eq!(result, "token=$abc");
    }
}
