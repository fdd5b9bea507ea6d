//! Payment form
//!
//! Card details are collected to complete the wizard but are never sent
//! anywhere. Once an order is placed only the holder name and the last four
//! digits are kept.

use std::fmt;

use serde::Deserialize;

use crate::checkout::{customer::require_fields, errors::FormError};

/// Raw values from the payment form.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    /// Name on card
    pub card_name: String,

    /// Card number
    pub card_number: String,

    /// Expiry, as typed (e.g. `12/28`)
    pub expiry_date: String,

    /// Security code
    pub cvv: String,

    /// Whether to remember the card
    pub save_card: bool,
}

impl PaymentForm {
    /// Check the required fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] listing every blank field.
    pub fn validate(&self) -> Result<PaymentDetails, FormError> {
        require_fields(&[
            ("card_name", self.card_name.as_str()),
            ("card_number", self.card_number.as_str()),
            ("expiry_date", self.expiry_date.as_str()),
            ("cvv", self.cvv.as_str()),
        ])?;

        Ok(PaymentDetails {
            card_name: self.card_name.trim().to_string(),
            card_number: self.card_number.trim().to_string(),
            expiry_date: self.expiry_date.trim().to_string(),
            cvv: self.cvv.trim().to_string(),
            save_card: self.save_card,
        })
    }
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("card_name", &self.card_name)
            .field("card_number", &mask(&self.card_number))
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .field("save_card", &self.save_card)
            .finish()
    }
}

/// Validated card details.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    card_name: String,
    card_number: String,
    expiry_date: String,
    cvv: String,
    save_card: bool,
}

impl PaymentDetails {
    /// Name on card
    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    /// Expiry as entered
    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    /// Whether the customer asked to remember the card
    pub fn save_card(&self) -> bool {
        self.save_card
    }

    /// Discard the number and security code, keeping what a receipt shows.
    pub fn into_method(self) -> PaymentMethod {
        PaymentMethod {
            card_name: self.card_name,
            last_four: last_four(&self.card_number),
        }
    }
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_name", &self.card_name)
            .field("card_number", &mask(&self.card_number))
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .field("save_card", &self.save_card)
            .finish()
    }
}

/// The card an order was paid with, as printed on a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    card_name: String,
    last_four: String,
}

impl PaymentMethod {
    /// Name on card
    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    /// Last four digits of the card number
    pub fn last_four(&self) -> &str {
        &self.last_four
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (card ending {})", self.card_name, self.last_four)
    }
}

fn last_four(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();

    digits.iter().skip(digits.len().saturating_sub(4)).collect()
}

fn mask(card_number: &str) -> String {
    format!("**** {}", last_four(card_number))
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn complete_form() -> PaymentForm {
        PaymentForm {
            card_name: "Ada Lovelace".to_string(),
            card_number: "4242 4242 4242 1234".to_string(),
            expiry_date: "12/28".to_string(),
            cvv: "123".to_string(),
            save_card: true,
        }
    }

    #[test]
    fn complete_form_validates() -> TestResult {
        let details = complete_form().validate()?;

        assert_eq!(details.card_name(), "Ada Lovelace");
        assert_eq!(details.expiry_date(), "12/28");
        assert!(details.save_card(), "save_card should carry over");

        Ok(())
    }

    #[test]
    fn missing_fields_are_reported() {
        let form = PaymentForm {
            card_number: String::new(),
            cvv: " ".to_string(),
            ..complete_form()
        };

        assert_eq!(
            form.validate(),
            Err(FormError::MissingFields(smallvec!["card_number", "cvv"]))
        );
    }

    #[test]
    fn debug_masks_card_number_and_cvv() -> TestResult {
        let details = complete_form().validate()?;

        let form_debug = format!("{:?}", complete_form());
        let details_debug = format!("{details:?}");

        for debug in [form_debug, details_debug] {
            assert!(!debug.contains("4242"), "card number leaked: {debug}");
            assert!(!debug.contains("123\""), "cvv leaked: {debug}");
            assert!(debug.contains("**** 1234"), "expected masked number: {debug}");
        }

        Ok(())
    }

    #[test]
    fn method_keeps_last_four_digits() -> TestResult {
        let method = complete_form().validate()?.into_method();

        assert_eq!(method.last_four(), "1234");
        assert_eq!(method.card_name(), "Ada Lovelace");
        assert_eq!(method.to_string(), "Ada Lovelace (card ending 1234)");

        Ok(())
    }

    #[test]
    fn short_numbers_keep_what_there_is() {
        assert_eq!(last_four("12"), "12");
        assert_eq!(last_four("ab-99"), "99");
    }
}
