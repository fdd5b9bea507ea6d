//! Checkout errors

use jiff::civil::Date;
use smallvec::SmallVec;
use thiserror::Error;

use crate::checkout::step::{CheckoutAction, CheckoutStep};

/// Errors raised when a transition is requested from the wrong step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The action is not allowed from the current step.
    #[error("cannot {action} from the {step} step")]
    InvalidTransition {
        /// Step the flow was in
        step: CheckoutStep,

        /// Action that was requested
        action: CheckoutAction,
    },
}

/// Local validation failures for a checkout form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// One or more required fields were blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(SmallVec<[&'static str; 8]>),

    /// The email address does not look like `local@domain.tld`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The date falls outside the bookable window.
    #[error("date {date} is outside the bookable window {earliest} to {latest}")]
    DateOutOfRange {
        /// Requested date
        date: Date,

        /// First bookable date
        earliest: Date,

        /// Last bookable date
        latest: Date,
    },

    /// The time is not one of the half-hour slots between 08:00 and 17:00.
    #[error("time {0} is not an available slot")]
    InvalidTimeSlot(String),
}
