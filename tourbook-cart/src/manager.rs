use crate::models::CartLineItem;
use uuid::Uuid;

/// The cards currently in the cart, in display order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, item_id: &Uuid) -> CartResult<&CartLineItem> {
        self.items
            .iter()
            .find(|i| i.id == *item_id)
            .ok_or_else(|| CartError::CardNotFound(item_id.to_string()))
    }

    pub fn get_mut(&mut self, item_id: &Uuid) -> CartResult<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == *item_id)
            .ok_or_else(|| CartError::CardNotFound(item_id.to_string()))
    }

    pub fn remove(&mut self, item_id: &Uuid) -> CartResult<CartLineItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == *item_id)
            .ok_or_else(|| CartError::CardNotFound(item_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CartError {
    #[error("Cart card not found: {0}")]
    CardNotFound(String),
}

pub type CartResult<T> = Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_card() {
        let island = CartLineItem::new("Orange Bay Island", 600.0, 2);
        let first = island.id;
        let mut cart = Cart::new(vec![island, CartLineItem::new("Desert Safari", 45.0, 3)]);

        assert_eq!(cart.subtotal(), 1335.0);

        let removed = cart.remove(&first).unwrap();
        assert_eq!(removed.title, "Orange Bay Island");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.subtotal(), 135.0);
    }

    #[test]
    fn test_unknown_card() {
        let mut cart = Cart::default();
        let missing = Uuid::new_v4();
        assert_eq!(
            cart.remove(&missing).unwrap_err(),
            CartError::CardNotFound(missing.to_string())
        );
        assert!(cart.get(&missing).is_err());
    }

    #[test]
    fn test_empty_cart_subtotal() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0.0);
    }
}
