//! Customer information form

use serde::Deserialize;
use smallvec::SmallVec;

use crate::checkout::errors::FormError;

/// Raw values from the customer information form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CustomerInfoForm {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// State or province; optional
    pub state: String,

    /// ZIP or postal code
    pub zip_code: String,
}

impl CustomerInfoForm {
    /// Check required fields and the email shape.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingFields`]: one or more required fields are blank;
    ///   every blank field is listed.
    /// - [`FormError::InvalidEmail`]: the email is present but malformed.
    pub fn validate(&self) -> Result<CustomerInfo, FormError> {
        require_fields(&[
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("zip_code", self.zip_code.as_str()),
        ])?;

        let email = self.email.trim();

        if !is_plausible_email(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }

        let state = self.state.trim();

        Ok(CustomerInfo {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: (!state.is_empty()).then(|| state.to_string()),
            zip_code: self.zip_code.trim().to_string(),
        })
    }
}

/// Validated customer contact and address details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    state: Option<String>,
    zip_code: String,
}

impl CustomerInfo {
    /// First name
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Last name
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name separated by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Street address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// City
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State or province, if given
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// ZIP or postal code
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }
}

/// Fail with every blank field name if any field is blank after trimming.
pub(crate) fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), FormError> {
    let missing: SmallVec<[&'static str; 8]> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::MissingFields(missing))
    }
}

// Same bar as a browser `type=email` input: something@something.tld, no spaces.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}
