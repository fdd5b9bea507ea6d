//! Orders

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    checkout::{customer::CustomerInfo, payment::PaymentMethod, schedule::ServiceDetails},
    random::RandomSource,
};

/// Literal prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "ORD-";

const ORDER_ID_SUFFIX_LEN: usize = 9;
const BASE36: u32 = 36;

/// Errors parsing an order id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderIdError {
    /// The value is not `ORD-` followed by nine characters from `[0-9A-Z]`.
    #[error("malformed order id: {0}")]
    Malformed(String),
}

/// Display identifier assigned when an order is placed.
///
/// Ids are drawn at random and are not guaranteed to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Draw a new id from `random`.
    pub fn generate(random: &mut impl RandomSource) -> Self {
        let suffix: String = (0..ORDER_ID_SUFFIX_LEN)
            .map(|_| {
                char::from_digit(random.next_below(BASE36), BASE36)
                    .unwrap_or('0')
                    .to_ascii_uppercase()
            })
            .collect();

        OrderId(format!("{ORDER_ID_PREFIX}{suffix}"))
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = OrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.strip_prefix(ORDER_ID_PREFIX).is_some_and(|suffix| {
            suffix.len() == ORDER_ID_SUFFIX_LEN
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        });

        if well_formed {
            Ok(OrderId(s.to_string()))
        } else {
            Err(OrderIdError::Malformed(s.to_string()))
        }
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A placed order: the id plus everything the customer submitted, with the
/// cart as it was at the moment of placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    customer: CustomerInfo,
    schedule: ServiceDetails,
    payment: PaymentMethod,
    lines: Vec<CartLine>,
    item_count: u64,
    total: Money<'static, Currency>,
}

impl Order {
    /// Snapshot `cart` into a new order. The cart itself is left untouched.
    pub fn new(
        id: OrderId,
        customer: CustomerInfo,
        schedule: ServiceDetails,
        payment: PaymentMethod,
        cart: &Cart,
    ) -> Self {
        Self {
            id,
            customer,
            schedule,
            payment,
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }

    /// Order id
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Customer details at placement
    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Requested schedule
    pub fn schedule(&self) -> &ServiceDetails {
        &self.schedule
    }

    /// Card the order was paid with
    pub fn payment(&self) -> &PaymentMethod {
        &self.payment
    }

    /// Cart lines at placement
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total quantity at placement
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Total price at placement
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }
}
