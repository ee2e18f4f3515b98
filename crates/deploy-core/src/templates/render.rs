//! Placeholder substitution over template text

use std::collections::BTreeMap;

/// Placeholder name to substitution value. Ordered map so substitution
/// iterates deterministically.
pub type ParameterSet = BTreeMap<String, String>;

/// Replace every `{{key}}` occurrence with the matching parameter value.
///
/// Permissive by design: placeholders with no matching key pass through
/// unchanged, enabling partially-templated files. Substitution is
/// whole-value and non-recursive; values must not themselves contain
/// placeholder tokens.
pub fn render(template: &str, params: &ParameterSet) -> String {
    let mut rendered = template.to_string();
    for (key, value) in params {
        rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
    }
    rendered
}
