//! Interactive gift entry form.
//!
//! Field prompts reuse the import-side column names so the form reads the same
//! as the spreadsheet people upload.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use rust_decimal::Decimal;

use gift_core::parse_amount;
use gift_domain::{looks_like_url, GiftField, GiftRecord};

use crate::cli::core::CommandError;
use crate::cli::io;

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

pub(crate) fn validate_text(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("Value cannot be empty".into())
    } else {
        Ok(())
    }
}

pub(crate) fn validate_amount(input: &str) -> Result<(), String> {
    match parse_amount(input) {
        Some(_) => Ok(()),
        None => Err("Enter a non-negative amount such as 25 or 19.99".into()),
    }
}

/// Walks the user through every field, pre-filled from `initial` when editing.
pub struct GiftForm<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> GiftForm<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }

    pub fn run(&self, initial: Option<&GiftRecord>) -> Result<FormResult<GiftRecord>, CommandError> {
        let recipient = self.text(
            GiftField::Recipient,
            initial.map(|record| record.recipient.clone()),
        )?;
        let gift = self.text(GiftField::Gift, initial.map(|record| record.gift.clone()))?;
        let budget = self.amount(GiftField::Budget, initial.map(|record| record.budget))?;
        let cost = self.amount(GiftField::Cost, initial.and_then(|record| record.cost))?;
        let purchased = Confirm::with_theme(self.theme)
            .with_prompt(GiftField::Purchased.import_header())
            .default(initial.map(|record| record.purchased).unwrap_or(false))
            .interact()?;
        let link = self.link(initial.and_then(|record| record.link.clone()))?;

        let record = GiftRecord::new(recipient, gift, budget)
            .with_cost(cost)
            .with_purchased(purchased)
            .with_link(link);

        if !io::confirm_action(self.theme, "Save this gift?", true)? {
            return Ok(FormResult::Cancelled);
        }
        Ok(FormResult::Completed(record))
    }

    fn text(&self, field: GiftField, initial: Option<String>) -> Result<String, CommandError> {
        let mut input = Input::<String>::with_theme(self.theme)
            .with_prompt(field.import_header())
            .validate_with(|value: &String| validate_text(value));
        if let Some(initial) = initial {
            input = input.with_initial_text(initial);
        }
        Ok(input.interact_text()?.trim().to_string())
    }

    fn amount(&self, field: GiftField, initial: Option<Decimal>) -> Result<Decimal, CommandError> {
        let value = Input::<String>::with_theme(self.theme)
            .with_prompt(field.import_header())
            .with_initial_text(initial.unwrap_or(Decimal::ZERO).to_string())
            .validate_with(|value: &String| validate_amount(value))
            .interact_text()?;
        parse_amount(&value).ok_or_else(|| {
            CommandError::InvalidArguments(format!("invalid amount `{}`", value.trim()))
        })
    }

    fn link(&self, initial: Option<String>) -> Result<String, CommandError> {
        let value = Input::<String>::with_theme(self.theme)
            .with_prompt(GiftField::Link.import_header())
            .with_initial_text(initial.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        let value = value.trim().to_string();
        if !value.is_empty() && !looks_like_url(&value) {
            io::print_warning("Gift link does not look like a web address; keeping it as entered.");
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_validation_matches_import_rules() {
        assert!(validate_amount("19.99").is_ok());
        assert!(validate_amount("$40").is_ok());
        assert!(validate_amount("-3").is_err());
        assert!(validate_amount("lots").is_err());
    }

    #[test]
    fn text_fields_must_not_be_blank() {
        assert!(validate_text("Alice").is_ok());
        assert!(validate_text("   ").is_err());
    }
}
