use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

use crate::api::InventoryApi;
use crate::client::{delete_prompt, InventoryClient};
use crate::notify::{Answered, Notifier, Severity, ToastNotifier};
use crate::theme::Theme;
use crate::view::{InventoryView, ItemRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    AddItem,
    Checkout,
    EditQuantity,
    Help,
    Confirm,
}

#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

/// Input state of the add / checkout / edit popups
#[derive(Debug, Clone, Default)]
pub struct Form {
    /// Item the form acts on (None for the add form)
    pub item_name: Option<String>,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    fn add_item() -> Self {
        Self {
            item_name: None,
            fields: vec![FormField::new("Item Name", ""), FormField::new("Quantity", "")],
            focus: 0,
        }
    }

    fn checkout(name: &str) -> Self {
        Self {
            item_name: Some(name.to_string()),
            fields: vec![
                FormField::new("Amount", ""),
                FormField::new("Recipient (optional)", ""),
            ],
            focus: 0,
        }
    }

    fn edit_quantity(name: &str, quantity: u32) -> Self {
        Self {
            item_name: Some(name.to_string()),
            fields: vec![FormField::new("Quantity", quantity.to_string())],
            focus: 0,
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
        }
    }

    fn focused_mut(&mut self) -> Option<&mut String> {
        self.fields.get_mut(self.focus).map(|f| &mut f.value)
    }
}

pub struct App<A> {
    pub client: InventoryClient<A, ToastNotifier>,
    pub view: InventoryView,
    pub selected: usize,
    pub popup: Popup,
    pub form: Form,

    /// Item awaiting the answer of the confirm popup
    pub pending_delete: Option<(i64, String)>,

    pub theme: Theme,
    pub source: String,
}

impl<A: InventoryApi> App<A> {
    pub fn new(client: InventoryClient<A, ToastNotifier>, theme: Theme, source: impl Into<String>) -> Self {
        let view = InventoryView::build(client.inventory());
        Self {
            client,
            view,
            selected: 0,
            popup: Popup::None,
            form: Form::default(),
            pending_delete: None,
            theme,
            source: source.into(),
        }
    }

    /// Rebuild the view-model from the client's current list
    fn sync_view(&mut self) {
        self.view = InventoryView::build(self.client.inventory());
        if self.selected >= self.view.rows.len() {
            self.selected = self.view.rows.len().saturating_sub(1);
        }
    }

    fn select_by_name(&mut self, name: &str) {
        if let Some(index) = self.view.rows.iter().position(|r| r.name == name) {
            self.selected = index;
        }
    }

    pub fn selected_row(&self) -> Option<&ItemRow> {
        self.view.rows.get(self.selected)
    }

    /// Reload the inventory from the server
    pub async fn refresh(&mut self) -> Result<()> {
        let _ = self.client.load().await;
        self.sync_view();
        Ok(())
    }

    pub fn tick(&mut self) {
        self.client.notifier_mut().expire(Instant::now());
    }

    fn warn(&mut self, message: &str) {
        self.client.notifier_mut().notify(message, Severity::Warning);
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key).await;
        }

        self.handle_normal_key(key).await
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.view.rows.len().saturating_sub(1),

            KeyCode::Char('a') => {
                self.form = Form::add_item();
                self.popup = Popup::AddItem;
            }
            KeyCode::Char('c') | KeyCode::Enter => {
                match self.selected_row().map(|r| r.name.clone()) {
                    Some(name) => {
                        self.form = Form::checkout(&name);
                        self.popup = Popup::Checkout;
                    }
                    None => self.warn("Select an item first"),
                }
            }
            KeyCode::Char('e') => {
                match self.selected_row().map(|r| (r.name.clone(), r.quantity)) {
                    Some((name, quantity)) => {
                        self.form = Form::edit_quantity(&name, quantity);
                        self.popup = Popup::EditQuantity;
                    }
                    None => self.warn("Select an item first"),
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                match self.selected_row().map(|r| (r.id, r.name.clone())) {
                    Some(target) => {
                        self.pending_delete = Some(target);
                        self.popup = Popup::Confirm;
                    }
                    None => self.warn("Select an item first"),
                }
            }

            KeyCode::Char('R') => {
                if self.client.load().await.is_ok() {
                    self.client
                        .notifier_mut()
                        .notify("Inventory refreshed", Severity::Info);
                }
                self.sync_view();
            }

            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            KeyCode::Esc => self.client.notifier_mut().dismiss(),

            _ => {}
        }
        Ok(())
    }

    async fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::AddItem | Popup::Checkout | Popup::EditQuantity => self.handle_form_key(key).await,
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::Confirm => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => self.answer_delete(true).await,
                    KeyCode::Char('n') | KeyCode::Esc => self.answer_delete(false).await,
                    _ => {}
                }
                Ok(())
            }
            Popup::None => Ok(()),
        }
    }

    async fn answer_delete(&mut self, confirmed: bool) {
        self.popup = Popup::None;
        if let Some((id, name)) = self.pending_delete.take() {
            let _ = self.client.delete(id, &name, &mut Answered(confirmed)).await;
            self.sync_view();
        }
    }

    /// Prompt shown by the confirm popup
    pub fn confirm_message(&self) -> String {
        self.pending_delete
            .as_ref()
            .map(|(_, name)| delete_prompt(name))
            .unwrap_or_else(|| "Confirm?".to_string())
    }

    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Enter => self.submit_form().await,
            KeyCode::Backspace => {
                if let Some(value) = self.form.focused_mut() {
                    value.pop();
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if let Some(value) = self.form.focused_mut() {
                    value.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close_form(&mut self) {
        self.popup = Popup::None;
        self.form = Form::default();
    }

    /// Submit the open form; it only closes when the request succeeded
    async fn submit_form(&mut self) {
        let item_name = self.form.item_name.clone().unwrap_or_default();

        let succeeded_on = match self.popup {
            Popup::AddItem => self
                .client
                .add(self.form.value(0), self.form.value(1))
                .await
                .ok()
                .map(|item| item.name),
            Popup::Checkout => {
                let recipient = self.form.value(1).to_string();
                self.client
                    .checkout(&item_name, self.form.value(0), Some(recipient.as_str()))
                    .await
                    .ok()
                    .map(|receipt| receipt.name)
            }
            Popup::EditQuantity => self
                .client
                .edit(&item_name, self.form.value(0))
                .await
                .ok()
                .map(|item| item.name),
            _ => None,
        };

        self.sync_view();
        if let Some(name) = succeeded_on {
            self.close_form();
            self.select_by_name(&name);
        }
    }

    fn move_down(&mut self) {
        if !self.view.rows.is_empty() {
            self.selected = (self.selected + 1) % self.view.rows.len();
        }
    }

    fn move_up(&mut self) {
        if !self.view.rows.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.view.rows.len() - 1);
        }
    }
}
