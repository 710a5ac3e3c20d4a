//! Physical attribute naming

/// Substituted for an empty base name
pub const DEFAULT_BASE: &str = "value";

/// Separator between base name and field suffix
pub const SUFFIX_SEPARATOR: char = '_';

/// `base`, or [`DEFAULT_BASE`] when `base` is empty
pub fn effective_base(base: &str) -> &str {
    if base.is_empty() {
        DEFAULT_BASE
    } else {
        base
    }
}

/// `<base>_<suffix>` with the empty-base fallback applied
pub fn format_attr_name(base: &str, suffix: &str) -> String {
    let base = effective_base(base);
    let mut name = String::with_capacity(base.len() + suffix.len() + 1);
    name.push_str(base);
    name.push(SUFFIX_SEPARATOR);
    name.push_str(suffix);
    name
}
