//! Storefront
//!
//! Composition root: owns the cart, the active checkout and the random
//! source used to simulate backend outcomes. Nothing here is global; each
//! storefront is an independent session.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::Cart,
    checkout::{CheckoutEntry, CheckoutError, CheckoutFlow, Order, PaymentDetails},
    random::{RandomSource, SmallRngSource},
};

/// Errors from storefront-level operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// There is no checkout in progress.
    #[error("no checkout in progress")]
    NoActiveCheckout,

    /// The cart was emptied before the order was placed.
    #[error("cart is empty")]
    EmptyCart,

    /// The checkout rejected the request.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Whether face authentication is offered in this build or session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaceAuth {
    /// Face authentication screens are available.
    Enabled,

    /// Face authentication is not offered.
    #[default]
    Disabled,
}

impl FaceAuth {
    /// Resolve from a boolean switch.
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            FaceAuth::Enabled
        } else {
            FaceAuth::Disabled
        }
    }

    /// Whether the capability is on
    pub fn is_enabled(self) -> bool {
        self == FaceAuth::Enabled
    }
}

/// Optional capabilities, fixed when the storefront is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// Face authentication availability
    pub face_auth: FaceAuth,
}

/// What the checkout page should show.
#[derive(Debug)]
pub enum CheckoutView<'a> {
    /// The wizard, at whatever step it is on.
    Wizard(&'a mut CheckoutFlow),

    /// The empty-cart notice.
    EmptyCart,
}

/// A storefront session.
#[derive(Debug)]
pub struct Storefront<R = SmallRngSource> {
    cart: Cart,
    checkout: Option<CheckoutFlow>,
    random: R,
    features: Features,
}

impl<R: RandomSource> Storefront<R> {
    /// Build a session with an empty cart in `currency`.
    pub fn new(currency: &'static Currency, features: Features, random: R) -> Self {
        Self {
            cart: Cart::new(currency),
            checkout: None,
            random,
            features,
        }
    }

    /// The cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart, for mutation
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Capabilities this session was built with
    pub fn features(&self) -> Features {
        self.features
    }

    /// Open the checkout page.
    ///
    /// Resumes the active flow if there is one. A completed flow stays on its
    /// confirmation step; an unfinished flow is dropped if the cart has since
    /// been emptied. Otherwise enters a new flow if the cart has lines.
    pub fn begin_checkout(&mut self) -> CheckoutView<'_> {
        let abandoned = self
            .checkout
            .as_ref()
            .is_some_and(|flow| !flow.is_complete() && self.cart.is_empty());

        if abandoned {
            debug!("cart emptied during checkout, dropping unfinished flow");

            self.checkout = None;
        }

        if self.checkout.is_none() {
            match CheckoutFlow::begin(&self.cart) {
                CheckoutEntry::Wizard(flow) => self.checkout = Some(flow),
                CheckoutEntry::EmptyCart => return CheckoutView::EmptyCart,
            }
        }

        match self.checkout.as_mut() {
            Some(flow) => CheckoutView::Wizard(flow),
            None => CheckoutView::EmptyCart,
        }
    }

    /// The active checkout, if any
    pub fn checkout(&self) -> Option<&CheckoutFlow> {
        self.checkout.as_ref()
    }

    /// The active checkout, for mutation
    pub fn checkout_mut(&mut self) -> Option<&mut CheckoutFlow> {
        self.checkout.as_mut()
    }

    /// Place the order on the active checkout using this session's cart and
    /// random source.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NoActiveCheckout`]: checkout was never opened.
    /// - [`StorefrontError::EmptyCart`]: the cart was emptied; the unfinished
    ///   flow is dropped.
    /// - [`StorefrontError::Checkout`]: the flow is not on its payment step.
    pub fn submit_payment(&mut self, payment: PaymentDetails) -> Result<&Order, StorefrontError> {
        if self.cart.is_empty() && self.checkout.as_ref().is_some_and(|flow| !flow.is_complete()) {
            debug!("cart emptied during checkout, dropping unfinished flow");

            self.checkout = None;

            return Err(StorefrontError::EmptyCart);
        }

        let Self {
            cart,
            checkout,
            random,
            ..
        } = self;

        let flow = checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)?;

        Ok(flow.submit_payment(payment, cart, random)?)
    }

    /// Leave the checkout page, discarding the flow.
    ///
    /// Returns the order if the flow had completed.
    pub fn finish_checkout(&mut self) -> Option<Order> {
        self.checkout.take().and_then(|flow| flow.order().cloned())
    }
}
