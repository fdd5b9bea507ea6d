//! Cart

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::pricing::{line_total, total_price, total_quantity};

/// Errors related to cart line construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line was given a unit price below zero (line id, price).
    #[error("Line {0} has negative unit price {1}")]
    NegativePrice(String, Decimal),
}

/// A service to be added to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineInput {
    id: String,
    title: String,
    unit_price: Decimal,
    category: Option<String>,
    image_ref: Option<String>,
}

impl CartLineInput {
    /// Create a new line input.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] if `unit_price` is below zero.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        unit_price: Decimal,
    ) -> Result<Self, CartError> {
        let id = id.into();

        if unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(id, unit_price));
        }

        Ok(Self {
            id,
            title: title.into(),
            unit_price,
            category: None,
            image_ref: None,
        })
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Line id
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// One selected service in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    id: String,
    title: String,
    unit_price: Decimal,
    category: Option<String>,
    image_ref: Option<String>,
    quantity: u32,
}

impl CartLine {
    fn from_input(input: CartLineInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            unit_price: input.unit_price,
            category: input.category,
            image_ref: input.image_ref,
            quantity: 1,
        }
    }

    /// Line id, unique within the cart
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Category label, if any
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Image reference, if any
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    /// Quantity; never zero.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> Decimal {
        line_total(self.unit_price, self.quantity)
    }
}

/// Cart
///
/// Lines are kept in insertion order and keyed by id. Every mutation keeps
/// ids unique and quantities at one or more; totals are derived on read.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a service.
    ///
    /// If a line with the same id exists its quantity goes up by one and the
    /// rest of `input` is ignored. Otherwise a new line with quantity one is
    /// appended.
    pub fn add_to_cart(&mut self, input: CartLineInput) {
        let id = if let Some(line) = self.line_mut(&input.id) {
            line.quantity = line.quantity.saturating_add(1);

            input.id
        } else {
            let id = input.id.clone();

            self.lines.push(CartLine::from_input(input));

            id
        };

        debug!(id, item_count = self.item_count(), "added to cart");
    }

    /// Remove the line with the given id. Absent ids are ignored.
    pub fn remove_from_cart(&mut self, id: &str) {
        let before = self.lines.len();

        self.lines.retain(|line| line.id != id);

        if self.lines.len() != before {
            debug!(id, item_count = self.item_count(), "removed line from cart");
        }
    }

    /// Replace a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Absent ids are ignored.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;

            debug!(id, quantity, item_count = self.item_count(), "updated line quantity");
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();

        debug!("cleared cart");
    }

    /// Sum of all line quantities
    pub fn item_count(&self) -> u64 {
        total_quantity(&self.lines)
    }

    /// Sum of unit price times quantity across all lines, as a plain decimal.
    pub fn total_amount(&self) -> Decimal {
        total_price(&self.lines)
    }

    /// Sum of unit price times quantity across all lines.
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total_amount(), self.currency)
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Get the number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn cleaning() -> Result<CartLineInput, CartError> {
        Ok(CartLineInput::new("svc-1", "Cleaning", Decimal::new(100, 0))?.with_category("cleaning"))
    }

    fn plumbing() -> Result<CartLineInput, CartError> {
        CartLineInput::new("svc-2", "Plumbing", Decimal::new(4550, 2))
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(iso::USD);

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::from_minor(0, iso::USD));
        assert_eq!(cart.currency(), iso::USD);
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = CartLineInput::new("svc-1", "Cleaning", Decimal::new(-1, 0));

        assert_eq!(
            result,
            Err(CartError::NegativePrice("svc-1".to_string(), Decimal::new(-1, 0)))
        );
    }

    #[test]
    fn zero_price_is_allowed() -> TestResult {
        let input = CartLineInput::new("free", "Consultation", Decimal::ZERO)?;

        assert_eq!(input.id(), "free");

        Ok(())
    }

    #[test]
    fn add_inserts_line_with_quantity_one() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);

        let line = cart.get("svc-1").ok_or("line missing")?;

        assert_eq!(line.quantity(), 1);
        assert_eq!(line.title(), "Cleaning");
        assert_eq!(line.category(), Some("cleaning"));
        assert_eq!(line.image_ref(), None);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Money::from_major(100, iso::USD));

        Ok(())
    }

    #[test]
    fn add_same_id_increments_and_existing_line_wins() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);
        cart.add_to_cart(CartLineInput::new("svc-1", "Deep Cleaning", Decimal::new(999, 0))?);

        let line = cart.get("svc-1").ok_or("line missing")?;

        assert_eq!(cart.len(), 1);
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.title(), "Cleaning");
        assert_eq!(line.unit_price(), Decimal::new(100, 0));
        assert_eq!(cart.total_amount(), Decimal::new(200, 0));

        Ok(())
    }

    #[test]
    fn lines_keep_insertion_order() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(plumbing()?);
        cart.add_to_cart(cleaning()?);
        cart.add_to_cart(plumbing()?);

        let ids: Vec<&str> = cart.lines().iter().map(CartLine::id).collect();

        assert_eq!(ids, ["svc-2", "svc-1"]);

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);
        cart.add_to_cart(plumbing()?);

        cart.remove_from_cart("svc-1");
        let once = cart.lines().to_vec();

        cart.remove_from_cart("svc-1");

        assert_eq!(cart.lines(), once.as_slice());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn remove_absent_id_is_noop() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);
        cart.remove_from_cart("missing");

        assert_eq!(cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn update_quantity_replaces_value() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(plumbing()?);
        cart.update_quantity("svc-2", 4);

        assert_eq!(cart.get("svc-2").map(CartLine::quantity), Some(4));
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total_amount(), Decimal::new(18200, 2));

        cart.update_quantity("svc-2", 2);

        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_line() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);
        cart.update_quantity("svc-1", 0);

        assert!(cart.get("svc-1").is_none());
        assert_eq!(cart.item_count(), 0);

        Ok(())
    }

    #[test]
    fn update_quantity_negative_matches_remove() -> TestResult {
        let mut updated = Cart::new(iso::USD);
        let mut removed = Cart::new(iso::USD);

        for cart in [&mut updated, &mut removed] {
            cart.add_to_cart(cleaning()?);
            cart.add_to_cart(plumbing()?);
        }

        updated.update_quantity("svc-1", -3);
        removed.remove_from_cart("svc-1");

        assert_eq!(updated.lines(), removed.lines());

        Ok(())
    }

    #[test]
    fn update_quantity_absent_id_is_noop() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);
        cart.update_quantity("missing", 5);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn update_quantity_clamps_to_u32() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);
        cart.update_quantity("svc-1", i64::MAX);

        assert_eq!(cart.get("svc-1").map(CartLine::quantity), Some(u32::MAX));

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(cleaning()?);
        cart.add_to_cart(plumbing()?);
        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn line_total_uses_quantity() -> TestResult {
        let mut cart = Cart::new(iso::USD);

        cart.add_to_cart(plumbing()?);
        cart.add_to_cart(plumbing()?);

        let line = cart.get("svc-2").ok_or("line missing")?;

        assert_eq!(line.line_total(), Decimal::new(9100, 2));

        Ok(())
    }
}
