//! Config helpers.

/// Expand `${VAR}` and `${VAR:-fallback}` patterns with environment values.
///
/// Unset variables without a fallback expand to an empty string. An
/// unterminated `${` is copied through unchanged.
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
        let (name, fallback) = match expr.split_once(":-") {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (expr, None),
        };
        match std::env::var(name) {
            Ok(val) if !val.is_empty() || fallback.is_none() => result.push_str(&val),
            _ => result.push_str(fallback.unwrap_or_default()),
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}
