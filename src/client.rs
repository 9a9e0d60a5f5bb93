//! The inventory client controller.
//!
//! Owns the in-memory [`Inventory`] and turns user intents into API calls.
//! Every failure is reported through the injected [`Notifier`] before being
//! returned, and the item list is only ever replaced by a successful load.

use crate::api::{ApiError, CheckoutReceipt, CheckoutRequest, InventoryApi, NewItem, QuantityUpdate};
use crate::inventory::{parse_amount, parse_quantity, validate_name, Inventory, Item, ValidationError};
use crate::notify::{Dialog, Notifier, Severity};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Item not found")]
    NotFound(String),
    #[error("Cancelled")]
    Cancelled,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Confirmation prompt shown before deleting an item
pub fn delete_prompt(name: &str) -> String {
    format!(
        "Are you sure you want to delete \"{}\"? This action cannot be undone.",
        name
    )
}

pub struct InventoryClient<A, N> {
    api: A,
    notifier: N,
    inventory: Inventory,
}

impl<A: InventoryApi, N: Notifier> InventoryClient<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            inventory: Inventory::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn report<E: Into<ClientError>>(&mut self, context: &str, err: E) -> ClientError {
        let err = err.into();
        let message = if context.is_empty() {
            err.to_string()
        } else {
            format!("{}: {}", context, err)
        };
        tracing::warn!("{}", message);
        self.notifier.notify(&message, Severity::Error);
        err
    }

    /// Fetch the full item list and replace the in-memory copy
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.api.list_items().await {
            Ok(items) => {
                tracing::info!("Loaded {} items", items.len());
                self.inventory.replace(items);
                Ok(())
            }
            Err(e) => Err(self.report("Error loading inventory", e)),
        }
    }

    /// Create an item (the server adds to an existing item of the same name)
    pub async fn add(&mut self, name: &str, quantity: &str) -> ClientResult<Item> {
        let new_item = match validate_name(name)
            .and_then(|name| parse_quantity(quantity).map(|quantity| NewItem { name, quantity }))
        {
            Ok(new_item) => new_item,
            Err(e) => return Err(self.report("", e)),
        };

        let created = match self.api.create_item(&new_item).await {
            Ok(item) => item,
            Err(e) => return Err(self.report("Error adding item", e)),
        };

        tracing::info!("Added {} of {}", created.quantity, created.name);
        self.notifier.notify(
            &format!("Successfully added {} of {}", created.quantity, created.name),
            Severity::Success,
        );
        let _ = self.load().await;
        Ok(created)
    }

    /// Increase the quantity of an item that is already tracked
    pub async fn restock(&mut self, name: &str, quantity: &str) -> ClientResult<Item> {
        let quantity = match parse_quantity(quantity) {
            Ok(q) => q,
            Err(e) => return Err(self.report("", e)),
        };
        let name = match self.inventory.find_by_name(name.trim()) {
            Some(item) => item.name.clone(),
            None => return Err(self.report("", ClientError::NotFound(name.to_string()))),
        };

        let updated = match self.api.create_item(&NewItem { name, quantity }).await {
            Ok(item) => item,
            Err(e) => return Err(self.report("Error restocking item", e)),
        };

        self.notifier.notify(
            &format!("Restocked {} of {}. New total: {}", quantity, updated.name, updated.quantity),
            Severity::Success,
        );
        let _ = self.load().await;
        Ok(updated)
    }

    /// Check out `amount` units of the named item, optionally to a recipient.
    ///
    /// Whether the amount exceeds the available stock is the server's call.
    pub async fn checkout(
        &mut self,
        name: &str,
        amount: &str,
        recipient: Option<&str>,
    ) -> ClientResult<CheckoutReceipt> {
        let request = match validate_name(name).and_then(|name| {
            parse_amount(amount).map(|amount| CheckoutRequest {
                name,
                amount,
                recipient: recipient
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string),
            })
        }) {
            Ok(request) => request,
            // Empty name and bad amount share one message
            Err(_) => return Err(self.report("", ValidationError::InvalidAmount)),
        };

        let receipt = match self.api.checkout(&request).await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.report("Error checking out items", e)),
        };

        tracing::info!(
            "Checked out {} of {} (recipient: {:?})",
            receipt.checked_out,
            receipt.name,
            request.recipient
        );
        self.notifier.notify(
            &format!(
                "Successfully checked out {} of {}. Remaining: {}",
                receipt.checked_out, receipt.name, receipt.quantity
            ),
            Severity::Success,
        );
        let _ = self.load().await;
        Ok(receipt)
    }

    /// Set the absolute quantity of the named item
    pub async fn edit(&mut self, name: &str, quantity: &str) -> ClientResult<Item> {
        let quantity = match parse_quantity(quantity) {
            Ok(q) if !name.is_empty() => q,
            Ok(_) | Err(_) => return Err(self.report("", ValidationError::InvalidQuantity)),
        };
        let id = match self.inventory.find_by_name(name) {
            Some(item) => item.id,
            None => return Err(self.report("", ClientError::NotFound(name.to_string()))),
        };

        let updated = match self.api.update_quantity(id, &QuantityUpdate { quantity }).await {
            Ok(item) => item,
            Err(e) => return Err(self.report("Error updating quantity", e)),
        };

        tracing::info!("Set {} (id {}) to {}", updated.name, id, updated.quantity);
        self.notifier.notify(
            &format!("Successfully updated {} quantity to {}", updated.name, updated.quantity),
            Severity::Success,
        );
        let _ = self.load().await;
        Ok(updated)
    }

    /// Delete an item after the dialog confirms; a refusal sends nothing
    pub async fn delete(&mut self, id: i64, name: &str, dialog: &mut dyn Dialog) -> ClientResult<()> {
        if !dialog.confirm(&delete_prompt(name)) {
            tracing::debug!("Delete of {} cancelled", name);
            return Err(ClientError::Cancelled);
        }

        if let Err(e) = self.api.delete_item(id).await {
            return Err(self.report("Error deleting item", e));
        }

        tracing::info!("Deleted {} (id {})", name, id);
        self.notifier.notify(&format!("Successfully deleted {}", name), Severity::Success);
        let _ = self.load().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::inventory::StockStatus;
    use crate::notify::testing::{RecordingNotifier, ScriptedDialog};

    fn pen() -> Item {
        Item { id: 1, name: "Pen".to_string(), quantity: 5 }
    }

    async fn loaded_client(items: Vec<Item>) -> InventoryClient<FakeApi, RecordingNotifier> {
        let mut client = InventoryClient::new(FakeApi::with_items(items), RecordingNotifier::default());
        client.load().await.unwrap();
        client
    }

    fn last_message<A: InventoryApi>(client: &InventoryClient<A, RecordingNotifier>) -> (String, Severity) {
        client.notifier().last().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_load_replaces_list() {
        let client = loaded_client(vec![pen()]).await;
        assert_eq!(client.inventory().items(), &[pen()]);
        assert!(client.notifier().messages.is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_stale_list() {
        let mut client = loaded_client(vec![pen()]).await;
        client.api().set_offline(true);

        let err = client.load().await.unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::Network(_))));
        assert_eq!(client.inventory().items(), &[pen()]);
        assert_eq!(
            last_message(&client),
            ("Error loading inventory: connection refused".to_string(), Severity::Error)
        );
    }

    #[tokio::test]
    async fn test_add_empty_name_sends_nothing() {
        let mut client = loaded_client(vec![]).await;

        let err = client.add("   ", "3").await.unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::EmptyName));
        assert_eq!(client.api().mutations(), 0);
        assert_eq!(last_message(&client), ("Please enter an item name".to_string(), Severity::Error));
    }

    #[tokio::test]
    async fn test_add_bad_quantity_sends_nothing() {
        let mut client = loaded_client(vec![]).await;

        for quantity in ["-1", "ten", ""] {
            let err = client.add("Pen", quantity).await.unwrap_err();
            assert_eq!(err, ClientError::Validation(ValidationError::InvalidQuantity));
        }
        assert_eq!(client.api().mutations(), 0);
        assert_eq!(last_message(&client).0, "Please enter a valid quantity");
    }

    #[tokio::test]
    async fn test_add_success_reloads() {
        let mut client = loaded_client(vec![]).await;
        let lists_before = client.api().lists();

        let created = client.add(" Sticker ", "25").await.unwrap();
        assert_eq!(created.name, "Sticker");
        assert_eq!(client.api().lists(), lists_before + 1);
        assert_eq!(client.inventory().find_by_name("Sticker").map(|i| i.quantity), Some(25));
        assert_eq!(
            client.notifier().messages[0],
            ("Successfully added 25 of Sticker".to_string(), Severity::Success)
        );
    }

    #[tokio::test]
    async fn test_add_transport_failure() {
        let mut client = loaded_client(vec![pen()]).await;
        client.api().set_offline(true);

        assert!(client.add("Mug", "2").await.is_err());
        assert_eq!(last_message(&client).0, "Error adding item: connection refused");
        assert_eq!(client.inventory().items(), &[pen()]);
    }

    #[tokio::test]
    async fn test_checkout_zero_sends_nothing() {
        let mut client = loaded_client(vec![pen()]).await;

        let err = client.checkout("Pen", "0", None).await.unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::InvalidAmount));
        assert_eq!(client.api().mutations(), 0);
        assert_eq!(last_message(&client).0, "Please enter a valid amount");
    }

    #[tokio::test]
    async fn test_checkout_reloads_remaining_quantity() {
        let mut client = loaded_client(vec![pen()]).await;

        let receipt = client.checkout("Pen", "3", Some("  ")).await.unwrap();
        assert_eq!(receipt.quantity, 2);

        let item = client.inventory().find_by_name("Pen").unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.status(), StockStatus::LowStock);
        assert_eq!(
            client.notifier().messages[0].0,
            "Successfully checked out 3 of Pen. Remaining: 2"
        );
    }

    #[tokio::test]
    async fn test_blank_recipient_is_sent_as_none() {
        let mut client = loaded_client(vec![pen()]).await;

        client.checkout("Pen", "1", Some("  ")).await.unwrap();
        assert_eq!(client.api().last_checkout().unwrap().recipient, None);

        client.checkout("Pen", "1", None).await.unwrap();
        assert_eq!(client.api().last_checkout().unwrap().recipient, None);

        client.checkout("Pen", "1", Some(" Alex ")).await.unwrap();
        let request = client.api().last_checkout().unwrap();
        assert_eq!(request.recipient.as_deref(), Some("Alex"));
        assert_eq!(request.amount, 1);
    }

    #[tokio::test]
    async fn test_over_checkout_surfaces_server_error() {
        let mut client = loaded_client(vec![pen()]).await;

        let err = client.checkout("Pen", "6", Some("Alex")).await.unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::Server { status: 400, .. })));
        assert_eq!(last_message(&client).0, "Error checking out items: Insufficient stock");
        assert_eq!(client.inventory().find_by_name("Pen").unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_edit_sets_absolute_quantity() {
        let mut client = loaded_client(vec![pen()]).await;

        let updated = client.edit("Pen", "40").await.unwrap();
        assert_eq!(updated.quantity, 40);
        assert_eq!(client.inventory().items()[0].status(), StockStatus::InStock);
        assert_eq!(
            client.notifier().messages[0].0,
            "Successfully updated Pen quantity to 40"
        );
    }

    #[tokio::test]
    async fn test_edit_unknown_name_sends_nothing() {
        let mut client = loaded_client(vec![pen()]).await;

        let err = client.edit("Eraser", "4").await.unwrap_err();
        assert_eq!(err, ClientError::NotFound("Eraser".to_string()));
        assert_eq!(client.api().mutations(), 0);
        assert_eq!(last_message(&client).0, "Item not found");
    }

    #[tokio::test]
    async fn test_edit_negative_quantity_sends_nothing() {
        let mut client = loaded_client(vec![pen()]).await;

        assert!(client.edit("Pen", "-3").await.is_err());
        assert_eq!(client.api().mutations(), 0);
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let mut client = loaded_client(vec![pen()]).await;
        let mut dialog = ScriptedDialog::answering(false);

        let err = client.delete(1, "Pen", &mut dialog).await.unwrap_err();
        assert_eq!(err, ClientError::Cancelled);
        assert_eq!(client.api().mutations(), 0);
        assert_eq!(client.inventory().items(), &[pen()]);
        assert!(client.notifier().messages.is_empty());
        assert_eq!(
            dialog.prompts,
            vec!["Are you sure you want to delete \"Pen\"? This action cannot be undone.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let mut client = loaded_client(vec![pen()]).await;
        let mut dialog = ScriptedDialog::answering(true);

        client.delete(1, "Pen", &mut dialog).await.unwrap();
        assert!(client.inventory().is_empty());
        assert_eq!(last_message(&client), ("Successfully deleted Pen".to_string(), Severity::Success));
    }

    #[tokio::test]
    async fn test_delete_missing_id_reports_server_message() {
        let mut client = loaded_client(vec![pen()]).await;

        assert!(client.delete(99, "Ghost", &mut ScriptedDialog::answering(true)).await.is_err());
        assert_eq!(last_message(&client).0, "Error deleting item: Item not found");
    }

    #[tokio::test]
    async fn test_restock_requires_known_item() {
        let mut client = loaded_client(vec![pen()]).await;

        assert!(client.restock("Mug", "3").await.is_err());
        assert_eq!(client.api().mutations(), 0);

        let updated = client.restock("Pen", "7").await.unwrap();
        assert_eq!(updated.quantity, 12);
        assert_eq!(client.notifier().last().unwrap().0, "Restocked 7 of Pen. New total: 12");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_good_list() {
        let mut client = loaded_client(vec![pen()]).await;
        client.edit("Pen", "8").await.unwrap();
        client.api().set_offline(true);
        assert!(client.load().await.is_err());
        assert_eq!(client.inventory().find_by_name("Pen").unwrap().quantity, 8);
    }
}
