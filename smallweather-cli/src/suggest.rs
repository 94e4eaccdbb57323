use std::sync::Arc;

use inquire::{
    CustomUserError, Text,
    autocompletion::{Autocomplete, Replacement},
};
use smallweather_core::CityIndex;

/// Feeds city search results into an inquire prompt.
#[derive(Debug, Clone)]
pub struct CitySuggester {
    index: Arc<CityIndex>,
    limit: usize,
}

impl CitySuggester {
    pub fn new(index: Arc<CityIndex>, limit: usize) -> Self {
        Self { index, limit }
    }

    fn suggestions(&self, input: &str) -> Vec<String> {
        self.index
            .search(input, self.limit)
            .into_iter()
            .map(|hit| hit.full_name)
            .collect()
    }
}

impl Autocomplete for CitySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(self.suggestions(input))
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion.or_else(|| self.suggestions(input).into_iter().next()))
    }
}

/// Ask for a city, suggesting matches from `index` as the user types.
pub fn prompt_city(index: Arc<CityIndex>, limit: usize) -> anyhow::Result<String> {
    let city = Text::new("City:")
        .with_autocomplete(CitySuggester::new(index, limit))
        .with_help_message("type to search, tab to complete")
        .prompt()?;

    Ok(city.trim().to_string())
}
