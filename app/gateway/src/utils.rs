//! Gateway utility functions.

/// Expand `${VAR}` and `${VAR:-default}` patterns with environment values.
///
/// Unset variables without a default expand to an empty string. An
/// unterminated `${` is copied through verbatim.
pub fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let expr = &after[..end];
        let (name, default) = match expr.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (expr, None),
        };
        match std::env::var(name) {
            Ok(value) if !value.is_empty() || default.is_none() => result.push_str(&value),
            _ => result.push_str(default.unwrap_or_default()),
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}
