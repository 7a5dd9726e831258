//! Solution skeleton generation
//!
//! `create` writes `src/day{NN}.{ext}` from a fixed template unless it already
//! exists, and always makes sure the empty `inputs/day{NN}_test.txt` fixture
//! is there. Running it twice changes nothing.

use crate::error::HarnessError;
use crate::layout;
use crate::storage::Storage;
use crate::unit::Unit;
use clap::ValueEnum;
use handlebars::Handlebars;
use serde_json::json;
use std::path::{Path, PathBuf};

const C_TEMPLATE: &str = include_str!("../templates/solution.c.hbs");
const RUST_TEMPLATE: &str = include_str!("../templates/solution.rs.hbs");

/// Language of the generated skeleton
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum Language {
    /// C source built by the project's own build step into `build/`
    #[default]
    C,
    /// Standalone Rust source
    Rust,
}

impl Language {
    pub fn extension(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Rust => "rs",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Language::C => C_TEMPLATE,
            Language::Rust => RUST_TEMPLATE,
        }
    }
}

/// What `create` did with one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Outcome of generating one day's files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    pub source: FileAction,
    pub fixture: FileAction,
}

/// Writes solution skeletons and test fixtures through a [`Storage`]
pub struct TemplateGenerator<S> {
    storage: S,
    year: u16,
    registry: Handlebars<'static>,
}

impl<S: Storage> TemplateGenerator<S> {
    pub fn new(storage: S, year: u16) -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);
        Self {
            storage,
            year,
            registry,
        }
    }

    /// Render the skeleton for `unit` without writing it
    pub fn render(&self, unit: Unit, language: Language) -> Result<String, HarnessError> {
        let data = json!({
            "year": self.year,
            "day": unit.get(),
            "day_padded": format!("{:02}", unit.get()),
            "input": portable(&layout::input_path(unit)),
            "test_input": portable(&layout::test_input_path(unit)),
        });
        Ok(self.registry.render_template(language.template(), &data)?)
    }

    /// Create the skeleton and fixture for `unit`, leaving existing files alone
    pub fn create(&self, unit: Unit, language: Language) -> Result<CreateReport, HarnessError> {
        let source_path = layout::source_path(unit, language);
        let source = if self.storage.exists(&source_path) {
            tracing::debug!(path = %source_path.display(), "solution file already exists");
            FileAction::AlreadyExists(source_path)
        } else {
            let contents = self.render(unit, language)?;
            self.storage.write(&source_path, &contents)?;
            FileAction::Created(source_path)
        };

        let fixture_path = layout::test_input_path(unit);
        let fixture = if self.storage.exists(&fixture_path) {
            FileAction::AlreadyExists(fixture_path)
        } else {
            self.storage.write(&fixture_path, "")?;
            FileAction::Created(fixture_path)
        };

        Ok(CreateReport { source, fixture })
    }
}

/// Forward-slash form of a relative path, as it appears inside sources
fn portable(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
