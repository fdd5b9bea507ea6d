//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartLineInput},
    checkout::{
        BookingWindow, CheckoutAction, CheckoutEntry, CheckoutError, CheckoutFlow, CheckoutStep,
        CustomerInfo, CustomerInfoForm, FormError, Order, OrderId, OrderIdError, PaymentDetails,
        PaymentForm, PaymentMethod, ServiceDetails, ServiceDetailsForm, StepProgress, StepStatus,
        TimeSlot,
    },
    fixtures::{Catalog, CatalogService, CheckoutScript, FixtureError},
    random::{RandomSource, SequenceSource, SmallRngSource},
    receipt::{ReceiptError, write_cart_summary, write_order_confirmation},
    storefront::{CheckoutView, FaceAuth, Features, Storefront, StorefrontError},
};
