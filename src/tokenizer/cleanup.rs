//! Grammar cleanup stages
//!
//! Cleanup stages rewrite the token stream in place, in order, before it is
//! allocated. A failing stage stops the pipeline.

use super::error::CleanupError;
use super::token::{Token, TokenKind};
use crate::profile::CustomizationProfile;

/// A transform over an owned token buffer
pub trait CleanupStage: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn process(
        &self,
        tokens: &mut Vec<Token>,
        profile: &CustomizationProfile,
    ) -> Result<(), CleanupError>;
}

/// Ordered list of cleanup stages
#[derive(Debug)]
pub struct CleanupPipeline {
    stages: Vec<Box<dyn CleanupStage>>,
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self {
            stages: vec![Box::new(QuotedTextConsolidation)],
        }
    }
}

impl CleanupPipeline {
    /// A pipeline with no stages
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, stage: Box<dyn CleanupStage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(
        &self,
        tokens: &mut Vec<Token>,
        profile: &CustomizationProfile,
    ) -> Result<(), CleanupError> {
        for stage in &self.stages {
            log::trace!("Running cleanup stage {}", stage.name());
            stage.process(tokens, profile)?;
        }
        Ok(())
    }
}

/// Folds every quoted run back into a single literal text token
///
/// Scanning resumes right after each consolidated token, so every quoted run
/// is handled once, left to right. An opening quoter with no matching closer
/// truncates the stream at the opener and stops.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuotedTextConsolidation;

impl CleanupStage for QuotedTextConsolidation {
    fn name(&self) -> &'static str {
        "quoted-text-consolidation"
    }

    fn process(
        &self,
        tokens: &mut Vec<Token>,
        profile: &CustomizationProfile,
    ) -> Result<(), CleanupError> {
        let comparison = profile.comparison();
        let mut cursor = 0;

        while let Some(open) = next_quoter(tokens, cursor) {
            let opening = &tokens[open];
            let close_text = profile
                .closing_quote(&opening.text)
                .map(String::from)
                .unwrap_or_else(|| opening.text.clone());

            let close = tokens[open + 1..]
                .iter()
                .position(|t| t.is(TokenKind::Quoter) && comparison.equals(&t.text, &close_text))
                .map(|offset| open + 1 + offset);

            let Some(close) = close else {
                let error = CleanupError::UnclosedQuoter {
                    quote: opening.text.clone(),
                    source_index: opening.source_index,
                    position: open,
                };
                log::debug!("{}; truncating {} tokens", error, tokens.len() - open);
                tokens.truncate(open);
                return Err(error);
            };

            let text: String = tokens[open + 1..close]
                .iter()
                .map(|t| t.text.as_str())
                .collect();
            let source_index = tokens[open].source_index;
            tokens[open] = Token::text(text, source_index);
            tokens.drain(open + 1..=close);
            cursor = open + 1;
        }

        Ok(())
    }
}

fn next_quoter(tokens: &[Token], from: usize) -> Option<usize> {
    tokens
        .iter()
        .skip(from)
        .position(|t| t.is(TokenKind::Quoter))
        .map(|offset| from + offset)
}
