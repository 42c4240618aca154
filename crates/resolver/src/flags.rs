//! Feature flag lookup with settings-then-override precedence.

use crate::sources::ResolverContext;
use tracing::trace;

/// Prefix of the local override key for a flag (`sys.fflag.override.<flag>`).
pub const FLAG_OVERRIDE_PREFIX: &str = "sys.fflag.override.";

/// Resolves a boolean feature flag.
///
/// Precedence, first non-empty value wins:
/// 1. the dynamic settings store, keyed by `name`;
/// 2. the override channel, keyed by [`FLAG_OVERRIDE_PREFIX`] + `name`;
/// 3. `default`.
///
/// Values are re-read on every call.
#[must_use]
pub fn resolve_flag(ctx: &ResolverContext<'_>, name: &str, default: bool) -> bool {
    if let Some(value) = ctx.setting(name).filter(|v| !v.is_empty()) {
        trace!(flag = name, %value, "Flag set in settings");
        return parse_bool(&value);
    }

    let override_key = format!("{FLAG_OVERRIDE_PREFIX}{name}");
    if let Some(value) = ctx.flag_override(&override_key).filter(|v| !v.is_empty()) {
        trace!(flag = name, %value, "Flag set by override");
        return parse_bool(&value);
    }

    default
}

/// `true` only for a case-insensitive `"true"`; everything else is `false`.
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Boolean platform property: `"1"`/`"true"` and `"0"`/`"false"`, case-insensitive.
///
/// Any other value is treated as unset.
#[must_use]
pub fn parse_property_bool(value: &str) -> Option<bool> {
    if value == "1" || value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
