//! Run settings read from a task document.
//!
//! ```text
//! group closure_limit: 5000
//! simplifier max_iterations: 32 tags: expand, fraction
//! logging level: debug file: algebra.log console: false
//! ```
//!
//! Every section and key is optional; missing ones keep their defaults. Unknown sections and
//! keys are rejected so that a typo does not silently fall back to a default.
use crate::Utils::logger::{init_logger, parse_level};
use crate::Utils::task_parser::{DocumentMap, SectionMap, Value, parse_document_as, template_of};
use crate::algebra::calculator::GroupCalculator;
use crate::algebra::error::{AlgebraError, AlgebraResult};
use crate::algebra::finite_group::FiniteGroup;
use crate::symbolic::symbolic_engine::ExprCalculator;
use crate::symbolic::symbolic_simplify::{DEFAULT_MAX_ITERATIONS, Simplifier, StrategyHolder};
use log::{LevelFilter, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_CLOSURE_LIMIT: usize = 100_000;

const GROUP_KEYS: &[&str] = &["closure_limit"];
const SIMPLIFIER_KEYS: &[&str] = &["max_iterations", "tags"];
const LOGGING_KEYS: &[&str] = &["level", "file", "console"];

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSettings {
    /// largest set closure may produce before giving up
    pub closure_limit: usize,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            closure_limit: DEFAULT_CLOSURE_LIMIT,
        }
    }
}

impl GroupSettings {
    /// Closure of `generators` bounded by `closure_limit`.
    pub fn generate<T: Clone + 'static>(
        &self,
        calculator: Arc<dyn GroupCalculator<T>>,
        generators: &[T],
    ) -> AlgebraResult<FiniteGroup<T>> {
        FiniteGroup::create_group_with_limit(calculator, generators, self.closure_limit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimplifierSettings {
    pub max_iterations: usize,
    pub tags: BTreeSet<String>,
}

impl Default for SimplifierSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tags: BTreeSet::new(),
        }
    }
}

impl SimplifierSettings {
    /// Simplifier with the default rules over `variable`.
    pub fn simplifier(&self, variable: &str) -> Simplifier {
        Simplifier::new(
            StrategyHolder::with_default_strategies(),
            ExprCalculator::new(variable),
        )
        .with_tags(self.tags.iter().cloned())
        .with_max_iterations(self.max_iterations)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
    pub console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file: None,
            console: true,
        }
    }
}

impl LoggingSettings {
    pub fn init(&self) -> AlgebraResult<()> {
        init_logger(self.level, self.console, self.file.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlgebraSettings {
    pub group: GroupSettings,
    pub simplifier: SimplifierSettings,
    pub logging: LoggingSettings,
}

impl AlgebraSettings {
    /// Sections and keys the settings document understands.
    pub fn template() -> DocumentMap {
        template_of(&[
            ("group", GROUP_KEYS),
            ("simplifier", SIMPLIFIER_KEYS),
            ("logging", LOGGING_KEYS),
        ])
    }

    pub fn from_document(document: &DocumentMap) -> AlgebraResult<Self> {
        let template = Self::template();
        for (title, section) in document {
            let Some(known) = template.get(title) else {
                return Err(AlgebraError::Config(format!("unknown section '{}'", title)));
            };
            if let Some(key) = section.keys().find(|key| !known.contains_key(*key)) {
                return Err(AlgebraError::Config(format!(
                    "unknown key '{}' in section '{}'",
                    key, title
                )));
            }
        }

        let mut settings = Self::default();
        if let Some(section) = document.get("group") {
            if let Some(value) = single(section, "closure_limit")? {
                settings.group.closure_limit = positive(value, "closure_limit")?;
            }
        }
        if let Some(section) = document.get("simplifier") {
            if let Some(value) = single(section, "max_iterations")? {
                settings.simplifier.max_iterations = positive(value, "max_iterations")?;
            }
            if let Some(Some(values)) = section.get("tags") {
                settings.simplifier.tags = values.iter().map(|v| v.to_string()).collect();
            }
        }
        if let Some(section) = document.get("logging") {
            if let Some(value) = single(section, "level")? {
                settings.logging.level = parse_level(&value.to_string())?;
            }
            if let Some(value) = single(section, "file")? {
                settings.logging.file = Some(PathBuf::from(value.to_string()));
            }
            if let Some(value) = single(section, "console")? {
                settings.logging.console = value.as_boolean().ok_or_else(|| {
                    AlgebraError::Config(format!("console expects true or false, got '{}'", value))
                })?;
            }
        }
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> AlgebraResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AlgebraError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let settings = content.parse::<Self>()?;
        info!("settings loaded from {}", path.display());
        Ok(settings)
    }
}

impl FromStr for AlgebraSettings {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let document = parse_document_as(s, None).map_err(AlgebraError::Config)?;
        Self::from_document(&document)
    }
}

/// The only value of `key`; `None` when the key is absent or unset.
fn single<'a>(section: &'a SectionMap, key: &str) -> AlgebraResult<Option<&'a Value>> {
    match section.get(key) {
        None | Some(None) => Ok(None),
        Some(Some(values)) if values.len() == 1 => Ok(values.first()),
        Some(Some(values)) => Err(AlgebraError::Config(format!(
            "{} expects one value, got {}",
            key,
            values.len()
        ))),
    }
}

fn positive(value: &Value, key: &str) -> AlgebraResult<usize> {
    match value.as_integer() {
        Some(n) if n > 0 => Ok(n as usize),
        _ => Err(AlgebraError::Config(format!(
            "{} expects a positive integer, got '{}'",
            key, value
        ))),
    }
}
