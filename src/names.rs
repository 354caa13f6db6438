//! Symbol naming for generated code.
//!
//! Variable names are allocated per unit from per-kind counters; type and
//! constructor names are derived from the unit's file name.

use std::collections::HashMap;
use std::path::Path;

use crate::golang;

/// Field holding a unit's root elements.
pub const ROOTS_FIELD: &str = "roots";
/// Accessor method generated for [`ROOTS_FIELD`].
pub const ROOTS_METHOD: &str = "Roots";

// ═══════════════════════════════════════════════════════════════════════════════
// VARIABLE NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Successive variable names for one unit's constructor, e.g. `div0`, `div1`, `a0`.
#[derive(Debug, Default)]
pub struct VarNames {
    counters: HashMap<String, usize>,
}

impl VarNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: &str) -> String {
        let kind = sanitize_kind(kind);
        let n = self.counters.entry(kind.clone()).or_insert(0);
        let name = format!("{}{}", kind, n);
        *n += 1;
        name
    }
}

/// Custom element names such as `my-widget` are not identifiers; map every
/// character that cannot appear in one to `_`.
fn sanitize_kind(kind: &str) -> String {
    let mut out: String = kind
        .chars()
        .map(|c| if c == '_' || c.is_alphanumeric() { c } else { '_' })
        .collect();
    if out.chars().next().map_or(true, |c| c.is_numeric()) {
        out.insert(0, '_');
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPE & CONSTRUCTOR NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Names generated for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSymbols {
    pub type_name: String,
    pub constructor: String,
}

impl UnitSymbols {
    /// Derive the symbols for the unit at `path`. Returns the rejected type
    /// name when the file name does not produce a usable identifier.
    pub fn for_path(path: &Path) -> Result<Self, String> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let type_name = type_name(&file_name);
        if !golang::is_identifier(&type_name) || golang::is_keyword(&type_name) {
            return Err(type_name);
        }
        let constructor = constructor_name(&type_name);
        Ok(Self {
            type_name,
            constructor,
        })
    }
}

/// The file name with its final extension removed.
pub fn type_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) => file_name[..idx].to_string(),
        None => file_name.to_string(),
    }
}

pub fn constructor_name(type_name: &str) -> String {
    if golang::is_exported(type_name) {
        format!("New{}", type_name)
    } else {
        format!("new{}", upper_first(type_name))
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REF NAME RULES
// ═══════════════════════════════════════════════════════════════════════════════

/// Reason a ref name cannot become a field name, if any.
pub fn disallowed_ref_reason(name: &str) -> Option<&'static str> {
    if golang::is_keyword(name) {
        Some("Go keyword")
    } else if name == ROOTS_FIELD {
        Some("reserved for internal use")
    } else if name == ROOTS_METHOD {
        Some("reserved for the roots accessor")
    } else if !golang::is_identifier(name) {
        Some("not a valid identifier")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_names_count_per_kind() {
        let mut names = VarNames::new();
        assert_eq!(names.next("div"), "div0");
        assert_eq!(names.next("div"), "div1");
        assert_eq!(names.next("a"), "a0");
        assert_eq!(names.next("div"), "div2");
        assert_eq!(names.next("stringliteral"), "stringliteral0");
    }

    #[test]
    fn test_var_names_sanitize_custom_elements() {
        let mut names = VarNames::new();
        assert_eq!(names.next("my-widget"), "my_widget0");
        assert_eq!(names.next("my_widget"), "my_widget1");
    }

    #[test]
    fn test_type_name_strips_final_extension() {
        assert_eq!(type_name("card.html"), "card");
        assert_eq!(type_name("card.view.html"), "card.view");
        assert_eq!(type_name("card"), "card");
    }

    #[test]
    fn test_constructor_names() {
        assert_eq!(constructor_name("Card"), "NewCard");
        assert_eq!(constructor_name("card"), "newCard");
        assert_eq!(constructor_name("specificElement"), "newSpecificElement");
        assert_eq!(constructor_name("_card"), "new_card");
    }

    #[test]
    fn test_symbols_for_path() {
        let symbols = UnitSymbols::for_path(Path::new("views/ref.html")).unwrap();
        assert_eq!(symbols.type_name, "ref");
        assert_eq!(symbols.constructor, "newRef");

        assert_eq!(
            UnitSymbols::for_path(Path::new("views/my-card.html")),
            Err("my-card".to_string())
        );
        assert_eq!(
            UnitSymbols::for_path(Path::new("views/type.html")),
            Err("type".to_string())
        );
    }

    #[test]
    fn test_disallowed_ref_names() {
        assert_eq!(disallowed_ref_reason("func"), Some("Go keyword"));
        assert_eq!(disallowed_ref_reason("roots"), Some("reserved for internal use"));
        assert_eq!(disallowed_ref_reason("Roots"), Some("reserved for the roots accessor"));
        assert_eq!(disallowed_ref_reason(""), Some("not a valid identifier"));
        assert_eq!(disallowed_ref_reason("title-bar"), Some("not a valid identifier"));
        assert_eq!(disallowed_ref_reason("title"), None);
    }
}
