//! Guess plugins and the pipeline that folds them.
//!
//! A plugin is a pure function from a sample and a seed to a diff. The
//! pipeline runs an explicit, ordered list of plugins; each one sees the
//! seed merged with the diffs suggested before it.

use crate::config::{ConfigDiff, ParserConfig};
use crate::error::Result;
use crate::guesser::{CsvGuesser, GuessMode};
use crate::sample::Sample;

/// One step of configuration guessing.
pub trait GuessPlugin: Send + Sync {
    /// Name used to exclude the plugin from a pipeline.
    fn name(&self) -> &str;

    /// Suggest configuration for `sample`. Fields set in `seed` must not
    /// appear in the returned diff.
    fn guess(&self, sample: &Sample, seed: &ParserConfig) -> Result<ConfigDiff>;
}

/// Guesses the CSV dialect, header and typed schema.
#[derive(Debug, Clone, Default)]
pub struct CsvGuessPlugin {
    guesser: CsvGuesser,
}

impl CsvGuessPlugin {
    /// Create the plugin around a configured guesser. The guesser's mode is
    /// forced to typed.
    pub fn new(mut guesser: CsvGuesser) -> Self {
        guesser.mode(GuessMode::Typed);
        Self { guesser }
    }
}

impl GuessPlugin for CsvGuessPlugin {
    fn name(&self) -> &str {
        "csv"
    }

    fn guess(&self, sample: &Sample, seed: &ParserConfig) -> Result<ConfigDiff> {
        self.guesser.guess_diff(sample, seed)
    }
}

/// Same dialect and header guess as [`CsvGuessPlugin`], but every column is
/// a string.
#[derive(Debug, Clone)]
pub struct CsvAllStringsGuessPlugin {
    guesser: CsvGuesser,
}

impl Default for CsvAllStringsGuessPlugin {
    fn default() -> Self {
        Self::new(CsvGuesser::new())
    }
}

impl CsvAllStringsGuessPlugin {
    /// Create the plugin around a configured guesser. The guesser's mode is
    /// forced to all-strings.
    pub fn new(mut guesser: CsvGuesser) -> Self {
        guesser.mode(GuessMode::AllStrings);
        Self { guesser }
    }
}

impl GuessPlugin for CsvAllStringsGuessPlugin {
    fn name(&self) -> &str {
        "csv_all_strings"
    }

    fn guess(&self, sample: &Sample, seed: &ParserConfig) -> Result<ConfigDiff> {
        self.guesser.guess_diff(sample, seed)
    }
}

/// Ordered list of plugins folded into one diff.
#[derive(Default)]
pub struct GuessPipeline {
    plugins: Vec<Box<dyn GuessPlugin>>,
    excluded: Vec<String>,
}

impl GuessPipeline {
    /// Create a pipeline from an ordered plugin list.
    pub fn new(plugins: Vec<Box<dyn GuessPlugin>>) -> Self {
        Self {
            plugins,
            excluded: Vec::new(),
        }
    }

    /// Append a plugin.
    pub fn push<P: GuessPlugin + 'static>(&mut self, plugin: P) -> &mut Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Skip the plugin with this name when running.
    pub fn exclude(&mut self, name: impl Into<String>) -> &mut Self {
        self.excluded.push(name.into());
        self
    }

    /// Names of the plugins that will run, in order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.active().map(|plugin| plugin.name()).collect()
    }

    /// Run every active plugin in order and fold their diffs. Earlier
    /// suggestions win over later ones.
    pub fn run(&self, sample: &Sample, seed: &ParserConfig) -> Result<ConfigDiff> {
        let mut acc = ConfigDiff::empty();

        for plugin in self.active() {
            let merged = acc.apply_to(seed);
            let diff = plugin.guess(sample, &merged)?;
            tracing::debug!(plugin = plugin.name(), empty = diff.is_empty(), "plugin finished");
            acc = acc.and_then(&diff);
        }

        Ok(acc)
    }

    fn active(&self) -> impl Iterator<Item = &dyn GuessPlugin> {
        self.plugins
            .iter()
            .map(|plugin| plugin.as_ref())
            .filter(|plugin| !self.excluded.iter().any(|name| name == plugin.name()))
    }
}
