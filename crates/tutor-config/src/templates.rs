//! Starter configuration files written by `tutor init`.
//!
//! Both templates are plain TOML. Active settings repeat the built-in defaults, so a
//! freshly written file changes nothing until it is edited.

/// Template for a course directory.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Template for `~/.tutor.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Starter `.tutor.toml` for a course directory.
pub fn local_template() -> &'static str {
    LOCAL_TEMPLATE
}

/// Starter `~/.tutor.toml`.
pub fn global_template() -> &'static str {
    GLOBAL_TEMPLATE
}
