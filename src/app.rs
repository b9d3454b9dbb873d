//! Application wiring
//!
//! `DecisionApp` ties the dice to the venue assistant so that every
//! committed roll starts the chat from a clean slate.

use crate::catalog::{Category, VenueCatalog};
use crate::chat::assistant::{AssistantReply, VenueAssistant};
use crate::config::Config;
use crate::error::Result;
use crate::providers::{optional_provider, Provider};
use crate::roll::{RandomSource, RollSequencer, RollTiming, ThreadRandom};

/// Dice plus assistant
pub struct DecisionApp {
    dice: RollSequencer,
    assistant: VenueAssistant,
}

impl DecisionApp {
    /// Compose an app from its parts
    pub fn new(dice: RollSequencer, assistant: VenueAssistant) -> Self {
        Self { dice, assistant }
    }

    /// Build the production app from configuration
    ///
    /// A missing API key is not an error: the assistant then answers from
    /// the fallback table only.
    ///
    /// # Errors
    ///
    /// Returns error if a configured provider cannot be initialized
    pub fn from_config(config: &Config, category: Category) -> Result<Self> {
        let provider = optional_provider(&config.provider)?;

        Ok(Self::with_parts(
            config,
            category,
            Box::new(ThreadRandom),
            provider,
        ))
    }

    /// Build an app with an explicit random source and provider
    pub fn with_parts(
        config: &Config,
        category: Category,
        random: Box<dyn RandomSource>,
        provider: Option<Box<dyn Provider>>,
    ) -> Self {
        let dice = RollSequencer::new(
            VenueCatalog::default(),
            random,
            RollTiming::from(&config.roll),
            category,
        );
        let assistant = VenueAssistant::from_config(provider, &config.chat);
        Self::new(dice, assistant)
    }

    /// Roll and wait for the outcome
    ///
    /// On commit the chat cache is cleared before this returns. Returns
    /// `None` if a roll was already running, the roll was invalidated, or
    /// there was nothing to draw from.
    pub async fn roll_and_wait(&mut self) -> Option<String> {
        let handle = self.dice.roll()?;
        let result = handle.wait().await?;
        self.assistant.on_new_roll(&result, self.dice.category());
        Some(result)
    }

    /// Ask about the current result
    ///
    /// Returns `None` if nothing has been rolled yet or the question is blank.
    pub async fn ask(&mut self, question: &str) -> Option<AssistantReply> {
        let result = self.dice.result()?;
        let category = self.dice.category();
        self.assistant.ask(question, &result, category).await
    }

    /// Ask the current result's last question again
    ///
    /// Returns `None` if nothing has been rolled or nothing was asked yet.
    pub async fn regenerate(&mut self) -> Option<AssistantReply> {
        let result = self.dice.result()?;
        let category = self.dice.category();
        self.assistant.regenerate(&result, category).await
    }

    /// Replace the current result's last question and ask it
    pub async fn edit_last_question(&mut self, question: &str) -> Option<AssistantReply> {
        let result = self.dice.result()?;
        let category = self.dice.category();
        self.assistant
            .edit_last_question(question, &result, category)
            .await
    }

    /// Suggested questions for the current result
    pub fn suggestions(&self) -> Vec<String> {
        match self.dice.result() {
            Some(result) => self
                .assistant
                .suggested_prompts(&result, self.dice.category()),
            None => Vec::new(),
        }
    }

    /// Switch category; clears the result
    pub fn set_category(&self, category: Category) {
        self.dice.set_category(category);
    }

    /// Flip secret mode; clears the result and returns the new value
    pub fn toggle_secret_mode(&self) -> bool {
        self.dice.toggle_secret_mode()
    }

    /// The dice
    pub fn dice(&self) -> &RollSequencer {
        &self.dice
    }

    /// The assistant
    pub fn assistant(&self) -> &VenueAssistant {
        &self.assistant
    }

    /// Mutable access to the assistant
    pub fn assistant_mut(&mut self) -> &mut VenueAssistant {
        &mut self.assistant
    }
}
