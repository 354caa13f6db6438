//! Construction instructions emitted into a unit's constructor body.

use std::fmt::Write;

use crate::golang;
use crate::names::ROOTS_FIELD;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `var := _document.CreateElement("tag", nil)`
    CreateElement { var: String, tag: String },
    /// `var.SetAttribute("key", "value")`
    SetAttribute {
        var: String,
        key: String,
        value: String,
    },
    /// `literal := "text"` followed by `parent.SetTextContent(&literal)`
    SetText {
        parent: String,
        literal: String,
        text: String,
    },
    /// `parent.AppendChild(&child.Node)`
    AppendChild { parent: String, child: String },
    /// Appends every root of an included unit under `parent`.
    AppendIncludeRoots { parent: String, include: String },
    /// `var := constructor()`
    Construct { var: String, constructor: String },
}

impl Instruction {
    /// Render as Go statements, one indentation level deep.
    pub fn render(&self, out: &mut String) {
        let _ = match self {
            Instruction::CreateElement { var, tag } => writeln!(
                out,
                "\t{} := _document.CreateElement({}, nil)",
                var,
                golang::quote(tag)
            ),
            Instruction::SetAttribute { var, key, value } => writeln!(
                out,
                "\t{}.SetAttribute({}, {})",
                var,
                golang::quote(key),
                golang::quote(value)
            ),
            Instruction::SetText {
                parent,
                literal,
                text,
            } => writeln!(
                out,
                "\t{} := {}\n\t{}.SetTextContent(&{})",
                literal,
                golang::quote(text),
                parent,
                literal
            ),
            Instruction::AppendChild { parent, child } => {
                writeln!(out, "\t{}.AppendChild(&{}.Node)", parent, child)
            }
            Instruction::AppendIncludeRoots { parent, include } => writeln!(
                out,
                "\tfor _, r := range {}.{} {{\n\t\t{}.AppendChild(&r.Node)\n\t}}",
                include, ROOTS_FIELD, parent
            ),
            Instruction::Construct { var, constructor } => {
                writeln!(out, "\t{} := {}()", var, constructor)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(instruction: Instruction) -> String {
        let mut out = String::new();
        instruction.render(&mut out);
        out
    }

    #[test]
    fn test_render_element_statements() {
        assert_eq!(
            render(Instruction::CreateElement {
                var: "div0".into(),
                tag: "div".into()
            }),
            "\tdiv0 := _document.CreateElement(\"div\", nil)\n"
        );
        assert_eq!(
            render(Instruction::SetAttribute {
                var: "a0".into(),
                key: "href".into(),
                value: "/docs?q=\"x\"".into()
            }),
            "\ta0.SetAttribute(\"href\", \"/docs?q=\\\"x\\\"\")\n"
        );
        assert_eq!(
            render(Instruction::AppendChild {
                parent: "div0".into(),
                child: "a0".into()
            }),
            "\tdiv0.AppendChild(&a0.Node)\n"
        );
    }

    #[test]
    fn test_render_text_and_include() {
        assert_eq!(
            render(Instruction::SetText {
                parent: "a0".into(),
                literal: "stringliteral0".into(),
                text: "README".into()
            }),
            "\tstringliteral0 := \"README\"\n\ta0.SetTextContent(&stringliteral0)\n"
        );
        assert_eq!(
            render(Instruction::AppendIncludeRoots {
                parent: "div0".into(),
                include: "include0".into()
            }),
            "\tfor _, r := range include0.roots {\n\t\tdiv0.AppendChild(&r.Node)\n\t}\n"
        );
        assert_eq!(
            render(Instruction::Construct {
                var: "include0".into(),
                constructor: "newCard".into()
            }),
            "\tinclude0 := newCard()\n"
        );
    }
}
