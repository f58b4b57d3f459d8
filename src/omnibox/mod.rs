//! Address-bar integration.
//!
//! The host owns event registration. It hands each input change to
//! [`Omnibox::on_input_changed`] along with a [`SuggestionSink`] that receives
//! the suggestions to display.

mod format;

pub use format::{escape_markup, format_value};

use crate::ast::{Evaluation, Evaluator};
use crate::config::Config;
use log::{debug, trace};
use lru::LruCache;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text the address bar fills in when the suggestion is accepted.
    pub content: String,
    /// Markup shown in the dropdown.
    pub description: String,
}

/// Receiver for the suggestions produced by one input change.
pub trait SuggestionSink {
    fn suggest(&mut self, suggestions: Vec<Suggestion>);
}

impl<F> SuggestionSink for F
where
    F: FnMut(Vec<Suggestion>),
{
    fn suggest(&mut self, suggestions: Vec<Suggestion>) {
        self(suggestions)
    }
}

pub struct Omnibox {
    evaluator: Evaluator,
    cache: Option<LruCache<String, Suggestion>>,
    highlight_recognized: bool,
}

impl Default for Omnibox {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Omnibox {
    pub fn new(config: Config) -> Self {
        Self {
            evaluator: Evaluator::from_config(&config),
            cache: NonZeroUsize::new(config.cache_capacity).map(LruCache::new),
            highlight_recognized: config.highlight_recognized,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Handles one input change. Blank input clears the suggestion list.
    pub fn on_input_changed<S>(&mut self, input: &str, sink: &mut S)
    where
        S: SuggestionSink + ?Sized,
    {
        if input.trim().is_empty() {
            sink.suggest(Vec::new());
            return;
        }
        let suggestion = self.suggestion_for(input);
        sink.suggest(vec![suggestion]);
    }

    /// Feeds every input event from `inputs` through [`Omnibox::on_input_changed`].
    pub fn run<I, S>(&mut self, inputs: I, sink: &mut S)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        S: SuggestionSink + ?Sized,
    {
        for input in inputs {
            self.on_input_changed(input.as_ref(), sink);
        }
    }

    /// Builds the suggestion for `input`, reusing a cached one when this input was seen recently.
    pub fn suggestion_for(&mut self, input: &str) -> Suggestion {
        if let Some(cached) = self.cache.as_mut().and_then(|cache| cache.get(input)) {
            trace!("Suggestion cache hit for {:?}", input);
            return cached.clone();
        }

        let evaluation = self.evaluator.evaluate(input);
        debug!("Evaluated {:?}: {:?}", input, evaluation);
        let suggestion = self.render(input, &evaluation);

        if let Some(cache) = self.cache.as_mut() {
            cache.put(input.to_string(), suggestion.clone());
        }
        suggestion
    }

    fn render(&self, input: &str, evaluation: &Evaluation) -> Suggestion {
        if !evaluation.is_recognized() {
            return Suggestion {
                content: input.to_string(),
                description: format!("{} (no recognized expression)", escape_markup(input)),
            };
        }

        let (recognized, trailing) = evaluation.split(input);
        let value = format_value(evaluation.value);
        let recognized = if self.highlight_recognized {
            format!("<url>{}</url>", escape_markup(recognized))
        } else {
            escape_markup(recognized)
        };

        Suggestion {
            description: format!("{}{} = {}", recognized, escape_markup(trailing), value),
            content: value,
        }
    }
}
