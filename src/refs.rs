//! Reference and root collection for one unit, and the struct type it yields.
//!
//! Refs are kept in a sorted map so fields and initializers come out in the
//! same order on every run.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use crate::error::UnitError;
use crate::names::{self, UnitSymbols, ROOTS_FIELD, ROOTS_METHOD};
use crate::webapi::{self, ELEMENT_TYPE};

const ROOTS_TYPE: &str = "[]*dom.Element";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    pub tag_name: String,
    pub var_name: String,
    /// Type of the included unit, for refs declared on `<include>`.
    pub nested_type: Option<String>,
}

impl RefEntry {
    fn field_type(&self) -> String {
        match (&self.nested_type, webapi::binding(&self.tag_name)) {
            (Some(nested), _) => format!("*{}", nested),
            (None, Some(binding)) => format!("*{}", binding.type_name),
            (None, None) => ELEMENT_TYPE.to_string(),
        }
    }

    fn initializer(&self) -> String {
        if self.nested_type.is_some() {
            return self.var_name.clone();
        }
        match webapi::binding(&self.tag_name) {
            Some(binding) => format!("{}({})", binding.from_element, self.var_name),
            None => self.var_name.clone(),
        }
    }
}

/// A parentless node of a unit, in closing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root {
    Element(String),
    /// An include site at top level contributes all of the included roots.
    Include(String),
}

#[derive(Debug, Default)]
pub struct RefCollector {
    refs: BTreeMap<String, RefEntry>,
    roots: Vec<Root>,
}

impl RefCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject names that cannot become a field of the generated struct.
    pub fn check_name(name: &str) -> Result<(), UnitError> {
        match names::disallowed_ref_reason(name) {
            Some(reason) => Err(UnitError::DisallowedRef {
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn add_ref(&mut self, name: &str, entry: RefEntry) -> Result<(), UnitError> {
        Self::check_name(name)?;
        if let Some(previous) = self.refs.get(name) {
            return Err(UnitError::DuplicateRef {
                name: name.to_string(),
                previous_tag: previous.tag_name.clone(),
            });
        }
        self.refs.insert(name.to_string(), entry);
        Ok(())
    }

    pub fn add_root(&mut self, root: Root) {
        self.roots.push(root);
    }

    pub fn refs(&self) -> &BTreeMap<String, RefEntry> {
        &self.refs
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TYPE SYNTHESIS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The unit's struct definition, preceded by its source comment.
    pub fn render_type(&self, path: &Path, symbols: &UnitSymbols) -> String {
        let mut fields: Vec<(&str, String)> = self
            .refs
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.field_type()))
            .collect();
        fields.push((ROOTS_FIELD, ROOTS_TYPE.to_string()));

        let width = fields.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "\n// source: {}\n", path.display());
        let _ = writeln!(out, "type {} struct {{", symbols.type_name);
        for (name, ty) in &fields {
            let _ = writeln!(out, "\t{}{} {}", name, pad(name, width), ty);
        }
        out.push_str("}\n");
        out
    }

    /// Statements assembling the root list (if needed) and the return of the
    /// constructed value.
    pub fn render_return(&self, symbols: &UnitSymbols) -> String {
        let mut out = String::new();
        let roots_expr = self.render_roots(&mut out);

        let mut inits: Vec<(&str, String)> = self
            .refs
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.initializer()))
            .collect();
        inits.push((ROOTS_FIELD, roots_expr));

        let width = inits.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);

        let _ = writeln!(out, "\treturn &{}{{", symbols.type_name);
        for (name, value) in &inits {
            let _ = writeln!(out, "\t\t{}:{} {},", name, pad(name, width), value);
        }
        out.push_str("\t}\n");
        out
    }

    /// Returns the expression for the root list. Plain element roots form a
    /// slice literal; root-level includes are spliced in with `append`.
    fn render_roots(&self, out: &mut String) -> String {
        let has_include = self.roots.iter().any(|r| matches!(r, Root::Include(_)));
        if !has_include {
            let vars: Vec<&str> = self
                .roots
                .iter()
                .map(|r| match r {
                    Root::Element(v) | Root::Include(v) => v.as_str(),
                })
                .collect();
            return format!("{}{{{}}}", ROOTS_TYPE, vars.join(", "));
        }

        let mut pending: Vec<&str> = Vec::new();
        let mut started = false;
        for root in &self.roots {
            match root {
                Root::Element(var) => pending.push(var),
                Root::Include(var) => {
                    flush_roots(out, &mut pending, &mut started);
                    let _ = writeln!(out, "\t{0} = append({0}, {1}.{0}...)", ROOTS_FIELD, var);
                }
            }
        }
        if !pending.is_empty() {
            flush_roots(out, &mut pending, &mut started);
        }
        ROOTS_FIELD.to_string()
    }
}

fn flush_roots(out: &mut String, pending: &mut Vec<&str>, started: &mut bool) {
    if !*started {
        let _ = writeln!(
            out,
            "\t{} := {}{{{}}}",
            ROOTS_FIELD,
            ROOTS_TYPE,
            pending.join(", ")
        );
        *started = true;
    } else if !pending.is_empty() {
        let _ = writeln!(out, "\t{0} = append({0}, {1})", ROOTS_FIELD, pending.join(", "));
    }
    pending.clear();
}

/// The `Roots()` accessor for a unit's struct.
pub fn render_accessor(symbols: &UnitSymbols) -> String {
    format!(
        "func (v *{}) {}() {} {{\n\treturn v.{}\n}}\n",
        symbols.type_name, ROOTS_METHOD, ROOTS_TYPE, ROOTS_FIELD
    )
}

fn pad(name: &str, width: usize) -> String {
    " ".repeat(width - name.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(type_name: &str) -> UnitSymbols {
        UnitSymbols {
            type_name: type_name.to_string(),
            constructor: names::constructor_name(type_name),
        }
    }

    fn element_ref(tag: &str, var: &str) -> RefEntry {
        RefEntry {
            tag_name: tag.to_string(),
            var_name: var.to_string(),
            nested_type: None,
        }
    }

    #[test]
    fn test_type_without_refs_has_only_roots() {
        let collector = RefCollector::new();
        assert_eq!(
            collector.render_type(Path::new("v/plain.html"), &symbols("plain")),
            "\n// source: v/plain.html\n\ntype plain struct {\n\troots []*dom.Element\n}\n"
        );
    }

    #[test]
    fn test_fields_are_sorted_and_aligned() {
        let mut collector = RefCollector::new();
        collector.add_ref("title", element_ref("h1", "h10")).unwrap();
        collector.add_ref("box", element_ref("section", "section0")).unwrap();
        collector
            .add_ref(
                "card",
                RefEntry {
                    tag_name: "include".to_string(),
                    var_name: "include0".to_string(),
                    nested_type: Some("Card".to_string()),
                },
            )
            .unwrap();
        collector.add_root(Root::Element("section0".to_string()));

        let ty = collector.render_type(Path::new("page.html"), &symbols("page"));
        assert_eq!(
            ty,
            "\n// source: page.html\n\ntype page struct {\n\
             \tbox   *dom.Element\n\
             \tcard  *Card\n\
             \ttitle *html.HTMLHeadingElement\n\
             \troots []*dom.Element\n}\n"
        );

        let ret = collector.render_return(&symbols("page"));
        assert_eq!(
            ret,
            "\treturn &page{\n\
             \t\tbox:   section0,\n\
             \t\tcard:  include0,\n\
             \t\ttitle: html.HTMLHeadingElementFromJS(h10),\n\
             \t\troots: []*dom.Element{section0},\n\t}\n"
        );
    }

    #[test]
    fn test_duplicate_ref_names_previous_tag() {
        let mut collector = RefCollector::new();
        collector.add_ref("item", element_ref("li", "li0")).unwrap();
        let err = collector.add_ref("item", element_ref("span", "span0")).unwrap_err();
        assert!(matches!(
            err,
            UnitError::DuplicateRef { ref name, ref previous_tag } if name == "item" && previous_tag == "li"
        ));
    }

    #[test]
    fn test_reserved_names_rejected() {
        let mut collector = RefCollector::new();
        for name in ["roots", "func", "Roots"] {
            assert!(matches!(
                collector.add_ref(name, element_ref("div", "div0")),
                Err(UnitError::DisallowedRef { .. })
            ));
        }
        assert!(collector.refs().is_empty());
    }

    #[test]
    fn test_multiple_roots_keep_closing_order() {
        let mut collector = RefCollector::new();
        collector.add_root(Root::Element("p0".to_string()));
        collector.add_root(Root::Element("div0".to_string()));
        let ret = collector.render_return(&symbols("two"));
        assert!(ret.contains("roots: []*dom.Element{p0, div0},"));
    }

    #[test]
    fn test_empty_roots() {
        let collector = RefCollector::new();
        let ret = collector.render_return(&symbols("empty"));
        assert!(ret.contains("roots: []*dom.Element{},"));
    }

    #[test]
    fn test_include_roots_are_spliced() {
        let mut collector = RefCollector::new();
        collector.add_root(Root::Element("header0".to_string()));
        collector.add_root(Root::Include("include0".to_string()));
        collector.add_root(Root::Element("footer0".to_string()));
        let ret = collector.render_return(&symbols("layout"));
        assert_eq!(
            ret,
            "\troots := []*dom.Element{header0}\n\
             \troots = append(roots, include0.roots...)\n\
             \troots = append(roots, footer0)\n\
             \treturn &layout{\n\
             \t\troots: roots,\n\t}\n"
        );
    }

    #[test]
    fn test_leading_include_root() {
        let mut collector = RefCollector::new();
        collector.add_root(Root::Include("include0".to_string()));
        let ret = collector.render_return(&symbols("wrap"));
        assert_eq!(
            ret,
            "\troots := []*dom.Element{}\n\
             \troots = append(roots, include0.roots...)\n\
             \treturn &wrap{\n\
             \t\troots: roots,\n\t}\n"
        );
    }

    #[test]
    fn test_accessor() {
        assert_eq!(
            render_accessor(&symbols("ref")),
            "func (v *ref) Roots() []*dom.Element {\n\treturn v.roots\n}\n"
        );
    }
}
