//! Unit compiler: translates one view file's token stream into a struct
//! type and its constructor.
//!
//! The translation is a single pass over the tokens. A nesting stack of open
//! elements tracks parents (its depth is the nesting depth), and a top-level
//! `<style>` switches the compiler into style capture, after which only the
//! style text is read.

use std::path::{Component, Path, PathBuf};

use crate::emit::Instruction;
use crate::error::{Error, UnitError};
use crate::names::{UnitSymbols, VarNames};
use crate::refs::{self, RefCollector, RefEntry, Root};
use crate::style::{self, StyleBlock};
use crate::tokenize::{MarkupToken, TagToken};

const INCLUDE_TAG: &str = "include";
const STYLE_TAG: &str = "style";
const REF_ATTR: &str = "ref";
const PATH_ATTR: &str = "path";
const STRING_LITERAL_KIND: &str = "stringliteral";

/// Compiles included units on behalf of the unit compiler.
pub trait IncludeResolver {
    /// Compile the unit at `path`, or reuse it if already compiled, and
    /// return its symbols. Errors are already attributed to their unit.
    fn resolve(&mut self, path: &Path) -> Result<UnitSymbols, Error>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILED OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct CompiledUnit {
    pub path: PathBuf,
    pub symbols: UnitSymbols,
    pub collector: RefCollector,
    pub body: Vec<Instruction>,
    pub style: Option<StyleBlock>,
}

impl CompiledUnit {
    /// Go source for this unit: type, constructor and roots accessor.
    pub fn render(&self) -> String {
        let mut out = self.collector.render_type(&self.path, &self.symbols);
        out.push_str(&format!(
            "\nfunc {}() *{} {{\n",
            self.symbols.constructor, self.symbols.type_name
        ));
        for instruction in &self.body {
            instruction.render(&mut out);
        }
        out.push_str(&self.collector.render_return(&self.symbols));
        out.push_str("}\n\n");
        out.push_str(&refs::render_accessor(&self.symbols));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// UNIT COMPILER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    StyleCapture,
}

#[derive(Debug)]
struct OpenElement {
    tag: String,
    var: String,
}

pub struct UnitCompiler<'a, R: IncludeResolver> {
    path: &'a Path,
    root: &'a Path,
    resolver: &'a mut R,
    mode: Mode,
    stack: Vec<OpenElement>,
    names: VarNames,
    collector: RefCollector,
    body: Vec<Instruction>,
}

impl<'a, R: IncludeResolver> UnitCompiler<'a, R> {
    /// `root` is the directory that absolute-looking include paths are
    /// resolved against.
    pub fn new(path: &'a Path, root: &'a Path, resolver: &'a mut R) -> Self {
        Self {
            path,
            root,
            resolver,
            mode: Mode::Normal,
            stack: Vec::new(),
            names: VarNames::new(),
            collector: RefCollector::new(),
            body: Vec::new(),
        }
    }

    pub fn compile(
        mut self,
        tokens: Vec<MarkupToken>,
        symbols: UnitSymbols,
    ) -> Result<CompiledUnit, Error> {
        let mut tokens = tokens.into_iter();
        for token in tokens.by_ref() {
            self.step(token)?;
            if self.mode == Mode::StyleCapture {
                break;
            }
        }

        let style = match self.mode {
            Mode::StyleCapture => {
                let block = style::capture(self.path, tokens.next()).map_err(|k| self.fail(k))?;
                tracing::debug!(path = %self.path.display(), "captured top-level style");
                Some(block)
            }
            Mode::Normal => None,
        };

        Ok(CompiledUnit {
            path: self.path.to_path_buf(),
            symbols,
            collector: self.collector,
            body: self.body,
            style,
        })
    }

    fn fail(&self, kind: UnitError) -> Error {
        Error::unit(self.path, kind)
    }

    fn step(&mut self, token: MarkupToken) -> Result<(), Error> {
        match token {
            MarkupToken::Text(text) => self.text(&text),
            MarkupToken::StartTag(tag) => self.start_tag(&tag),
            MarkupToken::SelfClosingTag(tag) => {
                self.start_tag(&tag)?;
                if self.mode == Mode::StyleCapture {
                    return Ok(());
                }
                self.end_tag(&tag.name)
            }
            MarkupToken::EndTag(name) => self.end_tag(&name),
            MarkupToken::Comment | MarkupToken::Doctype => Ok(()),
        }
    }

    fn text(&mut self, raw: &str) -> Result<(), Error> {
        let Some(parent) = self.stack.last() else {
            tracing::trace!(path = %self.path.display(), "dropping text outside any element");
            return Ok(());
        };
        let text = format_text_content(raw);
        if text.is_empty() {
            return Ok(());
        }
        if parent.tag == INCLUDE_TAG {
            return Err(self.fail(UnitError::IncludeContent("text".to_string())));
        }
        let parent = parent.var.clone();
        let literal = self.names.next(STRING_LITERAL_KIND);
        self.body.push(Instruction::SetText {
            parent,
            literal,
            text,
        });
        Ok(())
    }

    fn start_tag(&mut self, tag: &TagToken) -> Result<(), Error> {
        let var = self.names.next(&tag.name);

        if tag.name == STYLE_TAG && self.stack.is_empty() {
            self.mode = Mode::StyleCapture;
            return Ok(());
        }

        if self.stack.last().is_some_and(|p| p.tag == INCLUDE_TAG) {
            return Err(self.fail(UnitError::IncludeContent(format!("<{}>", tag.name))));
        }

        self.stack.push(OpenElement {
            tag: tag.name.clone(),
            var: var.clone(),
        });

        if tag.name == INCLUDE_TAG {
            self.construct_include(tag, &var)
        } else {
            self.construct_element(tag, &var)
        }
    }

    fn end_tag(&mut self, name: &str) -> Result<(), Error> {
        let Some(closed) = self.stack.pop() else {
            return Err(self.fail(UnitError::UnmatchedEndTag(name.to_string())));
        };

        let is_include = closed.tag == INCLUDE_TAG;
        match self.stack.last() {
            None if is_include => self.collector.add_root(Root::Include(closed.var)),
            None => self.collector.add_root(Root::Element(closed.var)),
            Some(parent) if is_include => self.body.push(Instruction::AppendIncludeRoots {
                parent: parent.var.clone(),
                include: closed.var,
            }),
            Some(parent) => self.body.push(Instruction::AppendChild {
                parent: parent.var.clone(),
                child: closed.var,
            }),
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ELEMENT CONSTRUCTION
    // ═══════════════════════════════════════════════════════════════════════════

    fn construct_element(&mut self, tag: &TagToken, var: &str) -> Result<(), Error> {
        self.body.push(Instruction::CreateElement {
            var: var.to_string(),
            tag: tag.name.clone(),
        });

        for (key, value) in &tag.attrs {
            if key == REF_ATTR {
                let entry = RefEntry {
                    tag_name: tag.name.clone(),
                    var_name: var.to_string(),
                    nested_type: None,
                };
                self.collector
                    .add_ref(value, entry)
                    .map_err(|k| self.fail(k))?;
            } else {
                self.body.push(Instruction::SetAttribute {
                    var: var.to_string(),
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INCLUDE RESOLUTION
    // ═══════════════════════════════════════════════════════════════════════════

    fn construct_include(&mut self, tag: &TagToken, var: &str) -> Result<(), Error> {
        let mut ref_name: Option<&str> = None;
        let mut included: Option<UnitSymbols> = None;

        for (key, value) in &tag.attrs {
            match key.as_str() {
                REF_ATTR => {
                    // Registered once the included type is known.
                    RefCollector::check_name(value).map_err(|k| self.fail(k))?;
                    ref_name = Some(value.as_str());
                }
                PATH_ATTR => {
                    if included.is_some() {
                        return Err(self.fail(UnitError::DuplicateIncludePath));
                    }
                    let include_path = resolve_include_path(self.path, self.root, value);
                    tracing::debug!(
                        from = %self.path.display(),
                        to = %include_path.display(),
                        "resolving include"
                    );
                    let symbols = self.resolver.resolve(&include_path)?;
                    self.body.push(Instruction::Construct {
                        var: var.to_string(),
                        constructor: symbols.constructor.clone(),
                    });
                    included = Some(symbols);
                }
                other => {
                    return Err(self.fail(UnitError::InvalidIncludeAttribute(other.to_string())));
                }
            }
        }

        let Some(included) = included else {
            return Err(self.fail(UnitError::MissingIncludePath));
        };

        if let Some(name) = ref_name {
            let entry = RefEntry {
                tag_name: tag.name.clone(),
                var_name: var.to_string(),
                nested_type: Some(included.type_name),
            };
            self.collector
                .add_ref(name, entry)
                .map_err(|k| self.fail(k))?;
        }
        Ok(())
    }
}

/// Resolve an include's `path` attribute: absolute-looking values are taken
/// relative to `root`, everything else relative to the including file.
pub fn resolve_include_path(including: &Path, root: &Path, value: &str) -> PathBuf {
    let joined = if value.starts_with('/') {
        root.join(value.trim_start_matches('/'))
    } else {
        including
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(value)
    };
    clean_path(&joined)
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component where there is one.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Remove newlines, then trim surrounding whitespace except non-breaking
/// spaces.
pub fn format_text_content(raw: &str) -> String {
    let without_newlines: String = raw.chars().filter(|&c| c != '\n').collect();
    without_newlines
        .trim_matches(|c: char| c.is_whitespace() && c != '\u{A0}')
        .to_string()
}
