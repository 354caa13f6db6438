//! Driver: compiles entry files into one Go views module and one stylesheet.
//!
//! Units are compiled depth first; an included unit is fully generated before
//! the unit that includes it, so its code lands earlier in the output. Each
//! path is compiled at most once per run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::compile::{clean_path, IncludeResolver, UnitCompiler};
use crate::error::{Error, UnitError};
use crate::format::{FormatError, Gofmt, SourceFormatter};
use crate::golang;
use crate::history::RecursionHistory;
use crate::names::UnitSymbols;
use crate::options::Options;
use crate::style::Stylesheet;
use crate::tokenize::tokenize;

/// Generated artifacts of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub views: Vec<u8>,
    pub stylesheet: Vec<u8>,
}

/// Compile `inputs` in order, formatting the views with gofmt.
pub fn generate<P: AsRef<Path>>(inputs: &[P], opts: &Options) -> Result<Output, Error> {
    Generator::new(opts.clone()).run(inputs)
}

pub struct Generator {
    opts: Options,
    formatter: Box<dyn SourceFormatter>,
    /// Fully compiled units, by cleaned path.
    generated: HashMap<PathBuf, UnitSymbols>,
    /// Type name -> the path that produced it.
    type_names: HashMap<String, PathBuf>,
    views: String,
    stylesheet: Stylesheet,
}

impl Generator {
    pub fn new(opts: Options) -> Self {
        Self {
            opts,
            formatter: Box::new(Gofmt::new()),
            generated: HashMap::new(),
            type_names: HashMap::new(),
            views: String::new(),
            stylesheet: Stylesheet::new(),
        }
    }

    pub fn with_formatter(mut self, formatter: impl SourceFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn run<P: AsRef<Path>>(mut self, inputs: &[P]) -> Result<Output, Error> {
        if !golang::is_identifier(&self.opts.package) || golang::is_keyword(&self.opts.package) {
            return Err(Error::InvalidPackage(self.opts.package.clone()));
        }
        self.views.push_str(&views_header(&self.opts.package));

        for input in inputs {
            let path = clean_path(input.as_ref());
            let mut history = RecursionHistory::new();
            self.generate_unit(&path, &mut history)?;
            debug_assert!(history.is_empty());
        }

        let views = match self.formatter.format(self.views.as_bytes()) {
            Ok(views) => views,
            Err(FormatError::Unavailable(e)) => return Err(Error::Formatter(e)),
            Err(FormatError::Rejected(msg)) => {
                panic!("generated views were rejected by the formatter (generator bug): {msg}")
            }
        };

        tracing::info!(
            units = self.generated.len(),
            entries = inputs.len(),
            "generated views"
        );

        Ok(Output {
            views,
            stylesheet: self.stylesheet.into_bytes(),
        })
    }

    fn generate_unit(
        &mut self,
        path: &Path,
        history: &mut RecursionHistory,
    ) -> Result<UnitSymbols, Error> {
        if let Some(symbols) = self.generated.get(path) {
            tracing::debug!(path = %path.display(), "already generated");
            return Ok(symbols.clone());
        }

        let mut history = history
            .enter(path)
            .map_err(|chain| Error::unit(path, UnitError::IncludeCycle { chain }))?;

        let symbols = UnitSymbols::for_path(path)
            .map_err(|name| Error::unit(path, UnitError::InvalidTypeName { name }))?;
        let source = fs::read(path).map_err(|e| Error::unit(path, e.into()))?;
        let tokens = tokenize(&source).map_err(|e| Error::unit(path, e.into()))?;

        tracing::debug!(
            path = %path.display(),
            depth = history.len(),
            type_name = %symbols.type_name,
            "compiling unit"
        );

        let root = self.opts.root.clone();
        let unit = {
            let mut resolver = Resolver {
                generator: &mut *self,
                history: &mut *history,
            };
            UnitCompiler::new(path, &root, &mut resolver).compile(tokens, symbols)?
        };

        if let Some(previous) = self.type_names.get(&unit.symbols.type_name) {
            return Err(Error::unit(
                path,
                UnitError::DuplicateTypeName {
                    name: unit.symbols.type_name.clone(),
                    previous: previous.clone(),
                },
            ));
        }

        self.views.push_str(&unit.render());
        if let Some(block) = &unit.style {
            self.stylesheet.push(block);
        }
        self.type_names
            .insert(unit.symbols.type_name.clone(), path.to_path_buf());
        self.generated
            .insert(path.to_path_buf(), unit.symbols.clone());
        Ok(unit.symbols)
    }
}

/// Routes includes back into the generator, sharing its memo set and the
/// current recursion history.
struct Resolver<'g, 'h> {
    generator: &'g mut Generator,
    history: &'h mut RecursionHistory,
}

impl IncludeResolver for Resolver<'_, '_> {
    fn resolve(&mut self, path: &Path) -> Result<UnitSymbols, Error> {
        self.generator.generate_unit(path, self.history)
    }
}

fn views_header(package: &str) -> String {
    format!(
        r#"package {package}

// Code generated by viewgen. DO NOT EDIT.

import (
	"github.com/gowebapi/webapi"
	"github.com/gowebapi/webapi/dom"
	"github.com/gowebapi/webapi/html"
	"github.com/gowebapi/webapi/html/canvas"
	"github.com/gowebapi/webapi/html/media"
)

type (
	_ *webapi.Document // prevent unused import errors
	_ *dom.Element
	_ *html.HTMLDivElement
	_ *canvas.HTMLCanvasElement
	_ *media.HTMLAudioElement
)

var (
	_document = webapi.GetDocument()
)
"#
    )
}
