//! Host locale numeric separators.
//!
//! Decimal parsing elsewhere needs the decimal point, digit-group separator
//! and currency symbol of the host locale. Lookup is best effort: any
//! failure keeps the defaults `.`, `,` and `$`.

use tracing::debug;

/// Separators used when parsing locale-formatted numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSeparators {
    pub decimal_point: char,
    pub group_separator: char,
    pub currency_symbol: char,
}

impl Default for LocaleSeparators {
    fn default() -> Self {
        LocaleSeparators {
            decimal_point: '.',
            group_separator: ',',
            currency_symbol: '$',
        }
    }
}

/// Raw numeric formatting fields as reported by the locale. `None` means
/// the locale did not report the field at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleConv {
    pub decimal_point: Option<String>,
    pub thousands_sep: Option<String>,
    pub currency_symbol: Option<String>,
}

fn single_char(value: Option<&str>) -> Option<char> {
    let mut chars = value?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Resolves separators from optional locale data.
///
/// Each field is adopted only when it is exactly one character. An
/// explicitly empty group separator is replaced by a guess: the opposite
/// of the decimal point (`.` when the decimal point is `,`, otherwise `,`).
/// That guess is an approximation for locales that report no grouping.
pub fn resolve_separators(conv: Option<&LocaleConv>) -> LocaleSeparators {
    let mut separators = LocaleSeparators::default();
    let Some(conv) = conv else {
        return separators;
    };

    if let Some(c) = single_char(conv.decimal_point.as_deref()) {
        separators.decimal_point = c;
    }

    match conv.thousands_sep.as_deref() {
        Some("") | Some("\0") => {
            separators.group_separator = if separators.decimal_point == ',' { '.' } else { ',' };
        }
        other => {
            if let Some(c) = single_char(other) {
                separators.group_separator = c;
            }
        }
    }

    if let Some(c) = single_char(conv.currency_symbol.as_deref()) {
        separators.currency_symbol = c;
    }

    separators
}

/// Queries the process's current C locale.
#[cfg(unix)]
pub fn query_host_locale() -> Option<LocaleConv> {
    use std::ffi::CStr;

    fn field(ptr: *const libc::c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        // SAFETY: non-null localeconv fields are NUL-terminated C strings.
        let raw = unsafe { CStr::from_ptr(ptr) };
        raw.to_str().ok().map(str::to_string)
    }

    // SAFETY: localeconv returns a pointer to static storage, valid until the
    // next localeconv/setlocale call; every field is copied out immediately.
    let lconv = unsafe { libc::localeconv() };
    if lconv.is_null() {
        return None;
    }
    let lconv = unsafe { &*lconv };

    Some(LocaleConv {
        decimal_point: field(lconv.decimal_point),
        thousands_sep: field(lconv.thousands_sep),
        currency_symbol: field(lconv.currency_symbol),
    })
}

#[cfg(not(unix))]
pub fn query_host_locale() -> Option<LocaleConv> {
    None
}

/// Loads separators from the host locale, falling back to defaults.
pub fn load_separators() -> LocaleSeparators {
    let conv = query_host_locale();
    if conv.is_none() {
        debug!("Host locale unavailable; using default numeric separators");
    }
    let separators = resolve_separators(conv.as_ref());
    debug!(?separators, "Resolved locale separators");
    separators
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(decimal: Option<&str>, thousands: Option<&str>, currency: Option<&str>) -> LocaleConv {
        LocaleConv {
            decimal_point: decimal.map(str::to_string),
            thousands_sep: thousands.map(str::to_string),
            currency_symbol: currency.map(str::to_string),
        }
    }

    #[test]
    fn test_no_locale_uses_defaults() {
        assert_eq!(resolve_separators(None), LocaleSeparators::default());
        assert_eq!(
            resolve_separators(Some(&LocaleConv::default())),
            LocaleSeparators::default()
        );
    }

    #[test]
    fn test_comma_decimal_with_empty_group_infers_dot() {
        let seps = resolve_separators(Some(&conv(Some(","), Some(""), None)));
        assert_eq!(seps.decimal_point, ',');
        assert_eq!(seps.group_separator, '.');
    }

    #[test]
    fn test_dot_decimal_with_empty_group_infers_comma() {
        let seps = resolve_separators(Some(&conv(Some("."), Some(""), None)));
        assert_eq!(seps.decimal_point, '.');
        assert_eq!(seps.group_separator, ',');
    }

    #[test]
    fn test_nul_group_treated_as_empty() {
        let seps = resolve_separators(Some(&conv(Some(","), Some("\0"), None)));
        assert_eq!(seps.group_separator, '.');
    }

    #[test]
    fn test_single_characters_adopted() {
        let seps = resolve_separators(Some(&conv(Some(","), Some(" "), Some("€"))));
        assert_eq!(
            seps,
            LocaleSeparators {
                decimal_point: ',',
                group_separator: ' ',
                currency_symbol: '€',
            }
        );
    }

    #[test]
    fn test_multi_character_values_ignored() {
        let seps = resolve_separators(Some(&conv(Some("٫٫"), Some("\u{a0}\u{a0}"), Some("USD"))));
        assert_eq!(seps, LocaleSeparators::default());
    }

    #[test]
    fn test_load_separators_never_fails() {
        let seps = load_separators();
        assert_ne!(seps.decimal_point, seps.group_separator);
    }
}
