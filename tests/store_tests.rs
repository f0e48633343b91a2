//! Entity store behavior: identity assignment, insertion order, partial
//! updates, bulk replace, and the duplicate guard.

use watchvault::db::Store;
use watchvault::models::{
    Episode, TagCreate, TagUpdate, WorkCreate, WorkKind, WorkQuery, WorkStatus, WorkUpdate,
};
use watchvault::services::{CatalogError, CatalogService};

async fn test_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("watchvault-store-test-{}.db", uuid::Uuid::new_v4()));
    Store::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open test store")
}

fn work(title: &str) -> WorkCreate {
    WorkCreate {
        title: title.to_string(),
        kind: WorkKind::Anime,
        status: WorkStatus::Ongoing,
        ..WorkCreate::default()
    }
}

fn episode(number: i32, watched: bool) -> Episode {
    Episode {
        id: uuid::Uuid::new_v4().to_string(),
        number,
        season: 1,
        kind: "episode".to_string(),
        watched,
        date_watched: None,
        title: None,
        description: None,
        note: None,
    }
}

#[tokio::test]
async fn create_assigns_identity_and_timestamp() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    let created = catalog
        .create_work(work("Attack on Titan"))
        .await
        .expect("create failed");

    assert!(!created.id.is_empty());
    assert!(!created.date_added.is_empty());
    assert!(created.date_updated.is_none());

    let all = store.all_works().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Attack on Titan");
    assert_eq!(all[0].id, created.id);
}

#[tokio::test]
async fn duplicate_title_is_rejected_without_writing() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    catalog.create_work(work("X")).await.expect("first create");
    let err = catalog.create_work(work("X")).await.unwrap_err();

    match err {
        CatalogError::DuplicateTitle(title) => assert_eq!(title, "X"),
        other => panic!("expected DuplicateTitle, got {other:?}"),
    }
    assert_eq!(store.all_works().await.len(), 1);
}

#[tokio::test]
async fn duplicate_external_id_is_rejected() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    let mut first = work("Frieren");
    first.note = Some("AniList ID: 154587".to_string());
    catalog.create_work(first).await.expect("first create");

    let mut second = work("Frieren: Beyond Journey's End");
    second.note = Some("imported again, AniList ID: 154587".to_string());
    let err = catalog.create_work(second).await.unwrap_err();

    match err {
        CatalogError::DuplicateExternalId(id) => assert_eq!(id, 154_587),
        other => panic!("expected DuplicateExternalId, got {other:?}"),
    }
    assert_eq!(store.all_works().await.len(), 1);
}

#[tokio::test]
async fn title_case_differences_are_distinct() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    catalog.create_work(work("monster")).await.expect("first");
    catalog.create_work(work("Monster")).await.expect("second");

    assert_eq!(store.all_works().await.len(), 2);
}

#[tokio::test]
async fn update_merges_fields_and_stamps_time() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    let created = catalog.create_work(work("Vinland Saga")).await.unwrap();

    let patch = WorkUpdate {
        status: Some(WorkStatus::Completed),
        rating: Some(9),
        ..WorkUpdate::default()
    };
    let updated = catalog
        .update_work(&created.id, patch)
        .await
        .unwrap()
        .expect("work should exist");

    assert_eq!(updated.title, "Vinland Saga");
    assert_eq!(updated.status, WorkStatus::Completed);
    assert_eq!(updated.rating, Some(9));
    assert!(updated.date_updated.is_some());

    let stored = store.get_work(&created.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn update_of_missing_id_returns_none() {
    let store = test_store().await;
    let catalog = CatalogService::new(store);

    let result = catalog
        .update_work("no-such-id", WorkUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_reports_found_flag() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    let created = catalog.create_work(work("Berserk")).await.unwrap();

    assert!(catalog.delete_work(&created.id).await.unwrap());
    assert!(!catalog.delete_work(&created.id).await.unwrap());
    assert!(store.all_works().await.is_empty());
}

#[tokio::test]
async fn all_works_preserves_insertion_order() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    for title in ["C", "A", "B"] {
        catalog.create_work(work(title)).await.unwrap();
    }

    let titles: Vec<String> = store
        .all_works()
        .await
        .into_iter()
        .map(|w| w.title)
        .collect();
    assert_eq!(titles, ["C", "A", "B"]);
}

#[tokio::test]
async fn set_all_replaces_wholesale() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    catalog.create_work(work("Old")).await.unwrap();

    let mut replacement = Vec::new();
    for title in ["New 1", "New 2"] {
        let mut w = catalog.create_work(work(title)).await.unwrap();
        w.episodes = vec![episode(1, true)];
        replacement.push(w);
    }

    store.set_all_works(&replacement).await.unwrap();

    let all = store.all_works().await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "New 1");
    assert_eq!(all[1].title, "New 2");
    assert_eq!(all[0].episodes.len(), 1);
}

#[tokio::test]
async fn find_by_title_returns_first_exact_match() {
    let store = test_store().await;
    let catalog = CatalogService::new(store.clone());

    catalog.create_work(work("Mushishi")).await.unwrap();

    let found = store.find_work_by_title("Mushishi").await;
    assert!(found.is_some());
    assert!(store.find_work_by_title("mushishi").await.is_none());
    assert!(store.find_work_by_title("Mushi").await.is_none());
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let store = test_store().await;
    let catalog = CatalogService::new(store);

    let mut movie = work("Perfect Blue");
    movie.kind = WorkKind::Movie;
    movie.year = Some(1997);
    catalog.create_work(movie).await.unwrap();

    let mut anime = work("Paranoia Agent");
    anime.year = Some(2004);
    catalog.create_work(anime).await.unwrap();

    let by_kind = catalog
        .list_works(WorkQuery {
            kind: Some(WorkKind::Movie),
            ..WorkQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(by_kind.total, 1);
    assert_eq!(by_kind.works[0].title, "Perfect Blue");

    let by_title = catalog
        .list_works(WorkQuery {
            title: Some("para".to_string()),
            ..WorkQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(by_title.total, 1);

    let paged = catalog
        .list_works(WorkQuery {
            size: Some(1),
            page: Some(2),
            ..WorkQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(paged.total, 2);
    assert_eq!(paged.works.len(), 1);
    assert_eq!(paged.works[0].title, "Paranoia Agent");
}

#[tokio::test]
async fn tag_ids_are_assigned_monotonically() {
    let store = test_store().await;

    let action = store
        .create_tag(TagCreate {
            name: "Action".to_string(),
            color: "#ff0000".to_string(),
        })
        .await
        .unwrap();
    let drama = store
        .create_tag(TagCreate {
            name: "Drama".to_string(),
            color: "#00ff00".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(action.id, 1);
    assert_eq!(drama.id, 2);

    assert!(store.delete_tag(drama.id).await.unwrap());
    let replacement = store
        .create_tag(TagCreate {
            name: "Slice of Life".to_string(),
            color: "#0000ff".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(replacement.id, 2);
}

#[tokio::test]
async fn tag_update_and_lookup() {
    let store = test_store().await;

    let tag = store
        .create_tag(TagCreate {
            name: "Favourites".to_string(),
            color: "#ffffff".to_string(),
        })
        .await
        .unwrap();

    let updated = store
        .update_tag(
            tag.id,
            TagUpdate {
                color: Some("#ff8800".to_string()),
                ..TagUpdate::default()
            },
        )
        .await
        .unwrap()
        .expect("tag should exist");
    assert_eq!(updated.name, "Favourites");
    assert_eq!(updated.color, "#ff8800");

    assert!(store.find_tag_by_name("Favourites").await.is_some());
    assert!(store.find_tag_by_name("favourites").await.is_none());
    assert!(
        store
            .update_tag(999, TagUpdate::default())
            .await
            .unwrap()
            .is_none()
    );
}
