use crate::admin::delete::DeleteFlow;
use crate::catalog::filter::{apply, CatalogQuery};
use crate::client::{ApiClient, CatalogEntity, FetchState};

/// Admin list page for one resource: fetched items, the active query and
/// the delete dialog.
#[derive(Debug, Clone)]
pub struct AdminList<T> {
    state: FetchState<T>,
    query: CatalogQuery,
    delete: DeleteFlow<String>,
}

impl<T> Default for AdminList<T> {
    fn default() -> Self {
        Self {
            state: FetchState::default(),
            query: CatalogQuery::default(),
            delete: DeleteFlow::default(),
        }
    }
}

impl<T: CatalogEntity> AdminList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: CatalogQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut FetchState<T> {
        &mut self.state
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: CatalogQuery) {
        self.query = query;
    }

    pub fn delete_flow(&self) -> &DeleteFlow<String> {
        &self.delete
    }

    pub async fn refresh(&mut self, client: &ApiClient) -> bool {
        self.state.load(client.list::<T>()).await
    }

    /// Items that pass the current query, in display order.
    pub fn visible(&self) -> Vec<&T> {
        apply(self.state.items(), &self.query)
    }

    pub fn request_delete(&mut self, key: impl Into<String>) -> bool {
        self.delete.request(key.into())
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.delete.cancel()
    }

    /// Send the DELETE for the pending target. On success the item leaves
    /// the local list right away and the collection is fetched again; on
    /// failure the item stays and the dialog shows the error.
    ///
    /// Returns true when the server confirmed the delete.
    pub async fn confirm_delete(&mut self, client: &ApiClient) -> bool {
        let Some(key) = self.delete.confirm() else {
            return false;
        };

        let result = client.remove::<T>(&key).await;
        let Some(deleted) = self.delete.resolve(result) else {
            return false;
        };

        self.state.remove(&deleted);

        let ticket = self.state.begin();
        let fresh = client.list::<T>().await;
        if let Err(e) = &fresh {
            tracing::warn!(
                resource = T::RESOURCE.label(),
                key = %deleted,
                error = %e,
                "revalidation after delete failed"
            );
        }
        self.state.finish(ticket, fresh);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::delete::DeleteState;
    use crate::catalog::filter::SortKey;
    use crate::config::AdminConfig;
    use crate::models::BlogPost;
    use chrono::{TimeZone, Utc};

    fn post(slug: &str, title: &str, day: u32) -> BlogPost {
        BlogPost {
            title: title.to_string(),
            slug: slug.to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    async fn seeded() -> AdminList<BlogPost> {
        let mut list = AdminList::new();
        list.state_mut()
            .load(async {
                Ok(vec![
                    post("rust-tips", "Rust Tips", 1),
                    post("design-notes", "Design Notes", 3),
                    post("rust-async", "Async Rust", 2),
                ])
            })
            .await;
        list
    }

    #[tokio::test]
    async fn test_visible_applies_query() {
        let mut list = seeded().await;
        let slugs: Vec<_> = list.visible().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["design-notes", "rust-async", "rust-tips"]);

        list.set_query(CatalogQuery::default().search("rust").sort(SortKey::Oldest));
        let slugs: Vec<_> = list.visible().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rust-tips", "rust-async"]);
    }

    #[tokio::test]
    async fn test_nothing_removed_before_confirm() {
        let mut list = seeded().await;
        assert!(list.request_delete("rust-tips"));
        assert_eq!(list.state().items().len(), 3);

        assert!(list.cancel_delete());
        assert_eq!(list.state().items().len(), 3);
        assert_eq!(list.delete_flow().state(), &DeleteState::Idle);
    }

    #[tokio::test]
    async fn test_confirm_without_request_is_noop() {
        let mut list = seeded().await;
        let client = ApiClient::new(&AdminConfig::for_base_url("http://127.0.0.1:1")).unwrap();
        assert!(!list.confirm_delete(&client).await);
        assert_eq!(list.state().items().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_item_and_shows_error() {
        let mut list = seeded().await;
        // nothing listens on port 1
        let client = ApiClient::new(&AdminConfig::for_base_url("http://127.0.0.1:1")).unwrap();

        list.request_delete("rust-tips");
        assert!(!list.confirm_delete(&client).await);
        assert_eq!(list.state().items().len(), 3);
        assert!(list.delete_flow().error().is_some());
        assert_eq!(list.delete_flow().target().map(String::as_str), Some("rust-tips"));
    }
}
