//! Fixtures
//!
//! YAML service catalogs and scripted checkouts.

use std::{collections::BTreeMap, fs, path::Path};

use jiff::{ToSpan, civil::Date};
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError, CartLineInput},
    checkout::{CustomerInfoForm, PaymentForm, ServiceDetailsForm},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between services, or between catalog and cart
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Service id not present in the catalog
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// Catalog defines no services
    #[error("Catalog has no services; currency unknown")]
    EmptyCatalog,

    /// Relative schedule date cannot be represented
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Service could not be turned into a cart line
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Parse a price of the form `AMOUNT CURRENCY`, e.g. `120.00 USD`.
///
/// # Errors
///
/// - [`FixtureError::InvalidPrice`]: not two parts, or the amount is not a decimal.
/// - [`FixtureError::UnknownCurrency`]: the code is not GBP, USD or EUR.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let invalid = || FixtureError::InvalidPrice(s.to_string());

    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount.parse::<Decimal>().map_err(|_err| invalid())?;

    let currency = match code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    services: BTreeMap<String, ServiceFixture>,
}

#[derive(Debug, Deserialize)]
struct ServiceFixture {
    name: String,
    price: String,

    #[serde(default)]
    category: Option<String>,

    #[serde(default)]
    image: Option<String>,
}

/// A service that can be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogService {
    id: String,
    name: String,
    price: Decimal,
    category: Option<String>,
    image: Option<String>,
}

impl CatalogService {
    /// Service id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price in the catalog currency
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Category label
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Image reference
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Services offered, all priced in one currency.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: BTreeMap<String, CatalogService>,
    currency: &'static Currency,
}

impl Catalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price is invalid, prices
    /// use more than one currency, or there are no services.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let mut currency: Option<&'static Currency> = None;
        let mut services = BTreeMap::new();

        for (id, service) in fixture.services {
            let (price, service_currency) = parse_price(&service.price)?;

            if price < Decimal::ZERO {
                return Err(CartError::NegativePrice(id, price).into());
            }

            match currency {
                Some(existing) if existing != service_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        service_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(service_currency),
            }

            services.insert(
                id.clone(),
                CatalogService {
                    id,
                    name: service.name,
                    price,
                    category: service.category,
                    image: service.image,
                },
            );
        }

        let currency = currency.ok_or(FixtureError::EmptyCatalog)?;

        Ok(Self { services, currency })
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or as [`Catalog::from_yaml`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Currency every service is priced in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Services, ordered by id
    pub fn services(&self) -> impl Iterator<Item = &CatalogService> {
        self.services.values()
    }

    /// Look up a service by id
    pub fn get(&self, id: &str) -> Option<&CatalogService> {
        self.services.get(id)
    }

    /// Cart input for the service `id`.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::ServiceNotFound`]: no such service.
    /// - [`FixtureError::Cart`]: the service has a negative price.
    pub fn line_input(&self, id: &str) -> Result<CartLineInput, FixtureError> {
        let service = self
            .get(id)
            .ok_or_else(|| FixtureError::ServiceNotFound(id.to_string()))?;

        let mut input = CartLineInput::new(&service.id, &service.name, service.price)?;

        if let Some(category) = &service.category {
            input = input.with_category(category);
        }

        if let Some(image) = &service.image {
            input = input.with_image_ref(image);
        }

        Ok(input)
    }
}

/// Schedule section of a checkout script. The date is relative so scripts
/// stay inside the booking window.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFixture {
    /// Days after today
    pub days_ahead: i32,

    /// Time slot label
    pub time: String,

    /// Special instructions
    #[serde(default)]
    pub special_instructions: String,
}

/// A complete scripted checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutScript {
    /// Service ids to add, in order; repeats add quantity
    #[serde(default)]
    pub services: Vec<String>,

    /// Customer information form
    pub customer: CustomerInfoForm,

    /// Schedule
    pub schedule: ScheduleFixture,

    /// Payment form
    pub payment: PaymentForm,
}

impl CheckoutScript {
    /// Parse a script from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the YAML is malformed.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Add every scripted service to `cart`.
    ///
    /// Ids are all resolved before the cart is touched, so a failure leaves
    /// it unchanged.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::CurrencyMismatch`]: the cart and catalog currencies differ.
    /// - [`FixtureError::ServiceNotFound`]: an id is not in the catalog.
    pub fn fill_cart(&self, catalog: &Catalog, cart: &mut Cart) -> Result<(), FixtureError> {
        if cart.currency() != catalog.currency() {
            return Err(FixtureError::CurrencyMismatch(
                cart.currency().iso_alpha_code.to_string(),
                catalog.currency().iso_alpha_code.to_string(),
            ));
        }

        let inputs = self
            .services
            .iter()
            .map(|id| catalog.line_input(id))
            .collect::<Result<Vec<_>, _>>()?;

        for input in inputs {
            cart.add_to_cart(input);
        }

        Ok(())
    }

    /// The service details form with the relative date resolved against `today`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidSchedule`] if the date overflows.
    pub fn service_details_form(&self, today: Date) -> Result<ServiceDetailsForm, FixtureError> {
        let date = today
            .checked_add(self.schedule.days_ahead.days())
            .map_err(|err| FixtureError::InvalidSchedule(err.to_string()))?;

        Ok(ServiceDetailsForm {
            date: date.to_string(),
            time: self.schedule.time.clone(),
            special_instructions: self.schedule.special_instructions.clone(),
        })
    }
}
