//! Contact message inbox. The list and the detail view both read from the
//! server, so a status change made in one is what the other shows.

use crate::admin::listing::AdminList;
use crate::catalog::filter::CatalogQuery;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Message, MessageStatus};

#[derive(Debug, Clone, Default)]
pub struct Inbox {
    list: AdminList<Message>,
    selected: Option<String>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &AdminList<Message> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut AdminList<Message> {
        &mut self.list
    }

    pub fn set_query(&mut self, query: CatalogQuery) {
        self.list.set_query(query);
    }

    pub fn messages(&self) -> &[Message] {
        self.list.state().items()
    }

    pub fn visible(&self) -> Vec<&Message> {
        self.list.visible()
    }

    pub fn selected(&self) -> Option<&Message> {
        let id = self.selected.as_deref()?;
        self.list.state().find(id)
    }

    pub fn unread_count(&self) -> usize {
        self.messages()
            .iter()
            .filter(|m| m.status == MessageStatus::Unread)
            .count()
    }

    pub async fn refresh(&mut self, client: &ApiClient) -> bool {
        self.list.refresh(client).await
    }

    /// Load one message for the detail view. Opening an unread message marks
    /// it read on the server; if that call fails the message stays unread.
    pub async fn open(&mut self, client: &ApiClient, id: &str) -> Result<Message> {
        let mut message = client.fetch_one::<Message>(id).await?;

        if message.status == MessageStatus::Unread {
            match client.set_message_status(id, MessageStatus::Read).await {
                Ok(updated) => message = updated,
                Err(e) => tracing::warn!(id = %id, error = %e, "could not mark message read"),
            }
        }

        self.list.state_mut().upsert(message.clone());
        self.selected = Some(id.to_string());
        Ok(message)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Show the new status immediately, then PATCH it. A rejected update
    /// restores the previous message and surfaces the error on the list.
    pub async fn set_status(
        &mut self,
        client: &ApiClient,
        id: &str,
        status: MessageStatus,
    ) -> Result<Message> {
        let previous = self.list.state().find(id).cloned();
        if let Some(mut optimistic) = previous.clone() {
            optimistic.status = status;
            self.list.state_mut().upsert(optimistic);
        }

        match client.set_message_status(id, status).await {
            Ok(updated) => {
                self.list.state_mut().upsert(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                if let Some(previous) = previous {
                    self.list.state_mut().upsert(previous);
                }
                self.list.state_mut().set_error(e.user_message());
                Err(e)
            }
        }
    }

    pub fn request_delete(&mut self, id: impl Into<String>) -> bool {
        self.list.request_delete(id)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.list.cancel_delete()
    }

    pub async fn confirm_delete(&mut self, client: &ApiClient) -> bool {
        let target = self.list.delete_flow().target().cloned();
        let deleted = self.list.confirm_delete(client).await;
        if deleted && target.is_some() && target == self.selected {
            self.selected = None;
        }
        deleted
    }
}
