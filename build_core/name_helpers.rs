//! Name transformation helpers used to generate idiomatic Rust code.
//==================================================================================NAME_HELPERS
/// Convert `camelCase` into `snake_case`. Digits stay attached to the word
/// they follow (`vvt1TargetAngle` becomes `vvt1_target_angle`).
pub(crate) fn to_snake_case(field: &str) -> String {
    let mut buffer = String::new();

    field.chars().for_each(|c| {
        if c.is_uppercase() && !buffer.is_empty() {
            buffer.push('_');
        }
        buffer.push(c.to_ascii_lowercase());
    });
    buffer
}

/// Convert `camelCase` into the `SCREAMING_SNAKE_CASE` used for constants.
pub(crate) fn to_const_case(field: &str) -> String {
    to_snake_case(field).to_ascii_uppercase()
}

/// Identifiers must start with an ASCII letter and contain only ASCII
/// alphanumerics, otherwise the generated constant would not compile.
pub(crate) fn is_valid_identifier(field: &str) -> bool {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}
