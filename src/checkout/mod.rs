//! Checkout
//!
//! A four-step wizard: customer info, service details, payment,
//! confirmation. Each form validates itself before its payload reaches the
//! flow, so the flow only checks that the requested move is allowed from
//! the current step.
//!
//! ```text
//! info ──submit──▶ details ──submit──▶ payment ──submit──▶ confirmation
//!      ◀──back────         ◀──back────
//! ```

use std::mem;

use tracing::{debug, info};

use crate::{cart::Cart, random::RandomSource};

pub mod customer;
pub mod errors;
pub mod order;
pub mod payment;
pub mod schedule;
pub mod step;

pub use customer::{CustomerInfo, CustomerInfoForm};
pub use errors::{CheckoutError, FormError};
pub use order::{ORDER_ID_PREFIX, Order, OrderId, OrderIdError};
pub use payment::{PaymentDetails, PaymentForm, PaymentMethod};
pub use schedule::{BookingWindow, ServiceDetails, ServiceDetailsForm, TimeSlot};
pub use step::{CheckoutAction, CheckoutStep, StepProgress, StepStatus};

/// Result of trying to enter checkout.
#[derive(Debug)]
pub enum CheckoutEntry {
    /// The cart has lines; the wizard starts at [`CheckoutStep::Info`].
    Wizard(CheckoutFlow),

    /// The cart is empty; show the empty-cart notice instead.
    EmptyCart,
}

#[derive(Debug, Clone)]
enum Stage {
    Info,
    Details {
        customer: CustomerInfo,
    },
    Payment {
        customer: CustomerInfo,
        schedule: ServiceDetails,
    },
    Confirmation,
}

impl Stage {
    fn step(&self) -> CheckoutStep {
        match self {
            Stage::Info => CheckoutStep::Info,
            Stage::Details { .. } => CheckoutStep::Details,
            Stage::Payment { .. } => CheckoutStep::Payment,
            Stage::Confirmation => CheckoutStep::Confirmation,
        }
    }
}

/// Checkout wizard state.
///
/// Data submitted on a step survives going back past it, so the form can
/// be shown pre-filled.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    stage: Stage,
    saved_customer: Option<CustomerInfo>,
    saved_schedule: Option<ServiceDetails>,
    order: Option<Order>,
}

impl CheckoutFlow {
    /// Enter checkout for `cart`.
    ///
    /// This is the only place the cart is checked for emptiness. A flow that
    /// later completes stays on [`CheckoutStep::Confirmation`] even though
    /// placing the order empties the cart.
    pub fn begin(cart: &Cart) -> CheckoutEntry {
        if cart.is_empty() {
            debug!("checkout requested with an empty cart");

            return CheckoutEntry::EmptyCart;
        }

        info!(item_count = cart.item_count(), "checkout started");

        CheckoutEntry::Wizard(CheckoutFlow {
            stage: Stage::Info,
            saved_customer: None,
            saved_schedule: None,
            order: None,
        })
    }

    /// The step being shown
    pub fn step(&self) -> CheckoutStep {
        self.stage.step()
    }

    /// Whether the order has been placed
    pub fn is_complete(&self) -> bool {
        self.order.is_some()
    }

    /// Status of every step for the progress indicator.
    pub fn progress(&self) -> [StepProgress; 4] {
        step::progress(self.step())
    }

    /// Most recently submitted customer info, if any
    pub fn customer(&self) -> Option<&CustomerInfo> {
        match &self.stage {
            Stage::Details { customer } | Stage::Payment { customer, .. } => Some(customer),
            Stage::Confirmation => self.order.as_ref().map(Order::customer),
            Stage::Info => self.saved_customer.as_ref(),
        }
    }

    /// Most recently submitted service details, if any
    pub fn service_details(&self) -> Option<&ServiceDetails> {
        match &self.stage {
            Stage::Payment { schedule, .. } => Some(schedule),
            Stage::Confirmation => self.order.as_ref().map(Order::schedule),
            Stage::Info | Stage::Details { .. } => self.saved_schedule.as_ref(),
        }
    }

    /// The placed order, once the flow is complete
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Move from [`CheckoutStep::Info`] to [`CheckoutStep::Details`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from any other step.
    pub fn submit_customer_info(
        &mut self,
        customer: CustomerInfo,
    ) -> Result<CheckoutStep, CheckoutError> {
        match mem::replace(&mut self.stage, Stage::Info) {
            Stage::Info => {
                self.saved_customer = None;
                self.stage = Stage::Details { customer };

                Ok(self.advanced(CheckoutStep::Info))
            }
            other => self.reject(other, CheckoutAction::SubmitCustomerInfo),
        }
    }

    /// Move from [`CheckoutStep::Details`] to [`CheckoutStep::Payment`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from any other step.
    pub fn submit_service_details(
        &mut self,
        schedule: ServiceDetails,
    ) -> Result<CheckoutStep, CheckoutError> {
        match mem::replace(&mut self.stage, Stage::Info) {
            Stage::Details { customer } => {
                self.saved_schedule = None;
                self.stage = Stage::Payment { customer, schedule };

                Ok(self.advanced(CheckoutStep::Details))
            }
            other => self.reject(other, CheckoutAction::SubmitServiceDetails),
        }
    }

    /// Place the order: move from [`CheckoutStep::Payment`] to
    /// [`CheckoutStep::Confirmation`].
    ///
    /// Draws an order id from `random`, snapshots `cart` into the order and
    /// then clears `cart`. Card number and security code are dropped here.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from any other step; the
    /// cart is not touched in that case.
    pub fn submit_payment<R: RandomSource>(
        &mut self,
        payment: PaymentDetails,
        cart: &mut Cart,
        random: &mut R,
    ) -> Result<&Order, CheckoutError> {
        match mem::replace(&mut self.stage, Stage::Info) {
            Stage::Payment { customer, schedule } => {
                let id = OrderId::generate(random);
                let order = Order::new(id, customer, schedule, payment.into_method(), cart);

                cart.clear_cart();

                self.stage = Stage::Confirmation;

                info!(
                    order_id = %order.id(),
                    item_count = order.item_count(),
                    total = %order.total(),
                    "order placed"
                );

                Ok(&*self.order.insert(order))
            }
            other => {
                self.stage = other;

                Err(self.invalid(CheckoutAction::SubmitPayment))
            }
        }
    }

    /// Return to the previous step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from
    /// [`CheckoutStep::Info`] and [`CheckoutStep::Confirmation`].
    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        match mem::replace(&mut self.stage, Stage::Info) {
            Stage::Details { customer } => {
                self.saved_customer = Some(customer);
            }
            Stage::Payment { customer, schedule } => {
                self.saved_schedule = Some(schedule);
                self.stage = Stage::Details { customer };
            }
            other => return self.reject(other, CheckoutAction::Back),
        }

        debug!(step = %self.step(), "checkout went back");

        Ok(self.step())
    }

    fn advanced(&self, from: CheckoutStep) -> CheckoutStep {
        let to = self.step();

        info!(%from, %to, "checkout advanced");

        to
    }

    fn reject(
        &mut self,
        stage: Stage,
        action: CheckoutAction,
    ) -> Result<CheckoutStep, CheckoutError> {
        self.stage = stage;

        Err(self.invalid(action))
    }

    fn invalid(&self, action: CheckoutAction) -> CheckoutError {
        let step = self.step();

        debug!(%step, %action, "rejected checkout transition");

        CheckoutError::InvalidTransition { step, action }
    }
}
