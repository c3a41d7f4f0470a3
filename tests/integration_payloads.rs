mod common;

use serde_json::json;

use common::{mongo_doc, spawn_api};
use u3devlab_admin::admin::{AdminList, Inbox};
use u3devlab_admin::catalog::{CatalogQuery, SortKey};
use u3devlab_admin::client::ProductListQuery;
use u3devlab_admin::models::{BlogPost, PortfolioProject, Product, ProductKind, ProductType};

#[tokio::test]
async fn blog_list_loads_documents_with_id_virtual() -> anyhow::Result<()> {
    let api = spawn_api().await?;
    api.seed(
        "blog",
        vec![
            mongo_doc("b1", json!({ "title": "Launch", "slug": "launch", "isPublished": true })),
            json!({ "_id": "b2", "title": "Roadmap", "slug": "roadmap" }),
        ],
    );

    let mut list = AdminList::<BlogPost>::new();
    assert!(list.refresh(&api.client).await);
    assert!(list.state().error().is_none());

    let ids: Vec<_> = list.state().items().iter().map(BlogPost::record_id).collect();
    assert_eq!(ids, vec![Some("b1"), Some("b2")]);
    Ok(())
}

#[tokio::test]
async fn portfolio_list_loads_documents_with_id_virtual() -> anyhow::Result<()> {
    let api = spawn_api().await?;
    api.seed(
        "portfolio",
        vec![mongo_doc(
            "pf1",
            json!({ "title": "Fintech Dashboard", "slug": "fintech-dashboard", "categories": ["Web"] }),
        )],
    );

    let mut list = AdminList::<PortfolioProject>::new();
    assert!(list.refresh(&api.client).await);
    assert_eq!(list.state().items().len(), 1);
    assert!(list.state().items()[0].created_at.is_some());
    Ok(())
}

#[tokio::test]
async fn product_without_type_loads_as_shop_item() -> anyhow::Result<()> {
    let api = spawn_api().await?;
    api.seed(
        "products",
        vec![
            json!({ "title": "Mug", "slug": "mug", "price": 12 }),
            mongo_doc(
                "e1",
                json!({ "title": "Guide", "slug": "guide", "price": 9, "productType": "ebook" }),
            ),
            mongo_doc(
                "w1",
                json!({ "title": "Workshop", "slug": "workshop", "price": 99, "productType": "course" }),
            ),
        ],
    );

    let mut list = AdminList::<Product>::with_query(CatalogQuery::default().sort(SortKey::PriceAsc));
    assert!(list.refresh(&api.client).await);
    assert!(list.state().error().is_none());

    let visible = list.visible();
    let kinds: Vec<_> = visible.iter().map(|p| (p.slug.as_str(), p.product_type())).collect();
    assert_eq!(
        kinds,
        vec![
            ("guide", ProductType::Ebook),
            ("mug", ProductType::Product),
            ("workshop", ProductType::Product),
        ]
    );
    assert_eq!(visible[1].kind, ProductKind::Product);

    let shop = api
        .client
        .list_products(&ProductListQuery {
            product_type: Some(ProductType::Product),
            ..Default::default()
        })
        .await?;
    assert_eq!(shop.len(), 1);
    assert_eq!(shop[0].slug, "mug");
    Ok(())
}

#[tokio::test]
async fn inbox_loads_messages_with_date_and_timestamps() -> anyhow::Result<()> {
    let api = spawn_api().await?;
    let mut older = mongo_doc(
        "m1",
        json!({ "fullName": "Jane Doe", "email": "jane@example.com",
                "message": "We need a new landing page.", "status": "unread" }),
    );
    older["date"] = json!("2024-04-01T10:00:00.000Z");
    let mut newer = mongo_doc(
        "m2",
        json!({ "fullName": "John Roe", "email": "john@example.com",
                "message": "Quote for a mobile app please.", "status": "read" }),
    );
    newer["date"] = json!("2024-04-03T10:00:00.000Z");
    api.seed("messages", vec![older, newer]);

    let mut inbox = Inbox::new();
    assert!(inbox.refresh(&api.client).await);
    assert!(inbox.list().state().error().is_none());
    assert_eq!(inbox.unread_count(), 1);

    // newest first goes by `date`, not the shared `createdAt`
    let ids: Vec<_> = inbox.visible().iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec!["m2", "m1"]);

    let opened = inbox.open(&api.client, "m1").await?;
    assert_eq!(opened.id(), "m1");
    assert_eq!(inbox.unread_count(), 0);
    Ok(())
}
