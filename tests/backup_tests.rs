//! Backup codec round trips, validation, restore ordering, and the
//! auto-backup retention bound.

use watchvault::db::Store;
use watchvault::models::{
    BackupSnapshot, Episode, SnapshotMetadata, Tag, Work, WorkKind, WorkStatus,
};
use watchvault::services::{AutoBackupService, BackupError, BackupFormat, BackupService};

async fn test_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("watchvault-backup-test-{}.db", uuid::Uuid::new_v4()));
    Store::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open test store")
}

fn episode(number: i32, season: i32, watched: bool) -> Episode {
    Episode {
        id: format!("ep-{season}-{number}"),
        number,
        season,
        kind: "episode".to_string(),
        watched,
        date_watched: watched.then(|| "2024-01-02T00:00:00Z".to_string()),
        title: Some(format!("Episode {number}")),
        description: Some("An episode".to_string()),
        note: Some("good".to_string()),
    }
}

fn full_work(title: &str, episodes: Vec<Episode>) -> Work {
    Work {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        kind: WorkKind::Anime,
        status: WorkStatus::Ongoing,
        year: Some(2024),
        rating: Some(8),
        review: Some("solid".to_string()),
        note: Some("AniList ID: 1".to_string()),
        source: Some("AniList".to_string()),
        reminder_enabled: true,
        reminder_frequency: Some("weekly".to_string()),
        tag_ids: vec![1],
        episodes,
        date_added: "2024-01-01T00:00:00Z".to_string(),
        date_updated: Some("2024-01-03T00:00:00Z".to_string()),
    }
}

fn snapshot_of(works: Vec<Work>, tags: Vec<Tag>) -> BackupSnapshot {
    let metadata = SnapshotMetadata::derive(&works, &tags);
    BackupSnapshot {
        version: "1.0.0".to_string(),
        timestamp: "2024-01-04T00:00:00Z".to_string(),
        works,
        tags,
        metadata,
    }
}

fn sample_tag() -> Tag {
    Tag {
        id: 1,
        name: "Action".to_string(),
        color: "#ff0000".to_string(),
    }
}

#[tokio::test]
async fn json_round_trip_is_exact() {
    let store = test_store().await;
    let backup = BackupService::new(store);

    let snapshot = snapshot_of(
        vec![
            full_work(
                "Frieren",
                vec![episode(1, 1, true), episode(2, 1, false), episode(1, 2, false)],
            ),
            full_work("Vinland Saga", vec![]),
        ],
        vec![sample_tag()],
    );

    let serialized = backup.serialize(&snapshot, BackupFormat::Json).unwrap();
    let parsed = backup.parse(&serialized, BackupFormat::Json).unwrap();

    assert_eq!(parsed, snapshot);
    // Nested episode ordering is insertion order.
    let numbers: Vec<(i32, i32)> = parsed.works[0]
        .episodes
        .iter()
        .map(|e| (e.season, e.number))
        .collect();
    assert_eq!(numbers, [(1, 1), (1, 2), (2, 1)]);
}

#[tokio::test]
async fn json_round_trip_of_empty_snapshot() {
    let store = test_store().await;
    let backup = BackupService::new(store);

    let snapshot = snapshot_of(vec![], vec![]);
    let serialized = backup.serialize(&snapshot, BackupFormat::Json).unwrap();
    let parsed = backup.parse(&serialized, BackupFormat::Json).unwrap();

    assert_eq!(parsed, snapshot);
}

#[tokio::test]
async fn csv_round_trip_preserves_structure() {
    let store = test_store().await;
    let backup = BackupService::new(store);

    let mut tricky = full_work(
        "Re:Zero, Starting \"Life\" in Another World",
        vec![episode(1, 1, true), episode(2, 1, false)],
    );
    tricky.note = Some("has, commas and \"quotes\"".to_string());

    let snapshot = snapshot_of(
        vec![tricky, full_work("Mob Psycho 100", vec![episode(1, 1, false)])],
        vec![sample_tag()],
    );

    let serialized = backup.serialize(&snapshot, BackupFormat::Csv).unwrap();
    let parsed = backup.parse(&serialized, BackupFormat::Csv).unwrap();

    assert_eq!(parsed.works.len(), snapshot.works.len());
    assert_eq!(parsed.tags.len(), snapshot.tags.len());
    assert_eq!(
        parsed.works[0].title,
        "Re:Zero, Starting \"Life\" in Another World"
    );
    assert_eq!(
        parsed.works[0].note.as_deref(),
        Some("has, commas and \"quotes\"")
    );

    for (parsed_work, original) in parsed.works.iter().zip(&snapshot.works) {
        assert_eq!(parsed_work.episodes.len(), original.episodes.len());
        for (p, o) in parsed_work.episodes.iter().zip(&original.episodes) {
            assert_eq!((p.season, p.number, p.watched), (o.season, o.number, o.watched));
        }
    }
}

#[tokio::test]
async fn csv_export_example_scenario() {
    let store = test_store().await;
    let backup = BackupService::new(store);

    let snapshot = snapshot_of(
        vec![
            full_work(
                "With Episodes",
                vec![episode(1, 1, true), episode(2, 1, true), episode(3, 1, false)],
            ),
            full_work("Without Episodes", vec![]),
        ],
        vec![sample_tag()],
    );

    let serialized = backup.serialize(&snapshot, BackupFormat::Csv).unwrap();
    let parsed = backup.parse(&serialized, BackupFormat::Csv).unwrap();

    assert_eq!(parsed.metadata.total_works, 2);
    assert_eq!(parsed.metadata.total_episodes, 3);
    assert_eq!(parsed.metadata.watched_episodes, 2);
}

#[tokio::test]
async fn validation_rejects_malformed_payloads() {
    let store = test_store().await;
    let backup = BackupService::new(store);

    for payload in [
        "[1, 2, 3]",
        "{\"timestamp\": \"2024-01-01T00:00:00Z\", \"works\": [], \"tags\": []}",
        "{\"version\": \"1.0.0\", \"timestamp\": \"t\", \"works\": {}, \"tags\": []}",
        "{\"version\": \"1.0.0\", \"timestamp\": \"t\", \"tags\": []}",
        "not json at all",
    ] {
        let err = backup.parse(payload, BackupFormat::Json).unwrap_err();
        assert!(
            matches!(err, BackupError::InvalidFormat(_)),
            "payload {payload} should be rejected, got {err:?}"
        );
    }
}

#[tokio::test]
async fn version_mismatch_is_accepted() {
    let store = test_store().await;
    let backup = BackupService::new(store);

    let mut snapshot = snapshot_of(vec![], vec![sample_tag()]);
    snapshot.version = "0.9.0".to_string();

    let serialized = backup.serialize(&snapshot, BackupFormat::Json).unwrap();
    let parsed = backup.parse(&serialized, BackupFormat::Json).unwrap();
    assert_eq!(parsed.version, "0.9.0");
}

#[tokio::test]
async fn restore_replaces_both_collections() {
    let store = test_store().await;
    let backup = BackupService::new(store.clone());

    store
        .create_tag(watchvault::models::TagCreate {
            name: "Stale".to_string(),
            color: "#000000".to_string(),
        })
        .await
        .unwrap();

    let snapshot = snapshot_of(
        vec![full_work("Restored Work", vec![episode(1, 1, true)])],
        vec![sample_tag()],
    );

    backup.restore(&snapshot).await.unwrap();

    let works = store.all_works().await;
    let tags = store.all_tags().await;
    assert_eq!(works.len(), 1);
    assert_eq!(works[0].title, "Restored Work");
    assert_eq!(works[0].episodes.len(), 1);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "Action");
}

#[tokio::test]
async fn file_export_and_import_round_trip() {
    let store = test_store().await;
    let backup = BackupService::new(store.clone());

    store
        .insert_work(&full_work("On Disk", vec![episode(1, 1, false)]))
        .await
        .unwrap();

    let dir = std::env::temp_dir().join(format!("watchvault-export-{}", uuid::Uuid::new_v4()));
    let path = backup
        .export_to_file(&dir, BackupFormat::Json)
        .await
        .unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("watchvault-backup-"));
    assert!(name.ends_with(".json"));

    let imported = backup.import_from_file(&path).await.unwrap();
    assert_eq!(imported.works.len(), 1);
    assert_eq!(imported.works[0].title, "On Disk");
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let store = test_store().await;
    let backup = BackupService::new(store);

    let err = backup
        .import_from_file(std::path::Path::new("backup.xml"))
        .await
        .unwrap_err();
    assert!(matches!(err, BackupError::InvalidFormat(_)));
}

#[tokio::test]
async fn retention_keeps_the_seven_newest_slots() {
    let store = test_store().await;
    let auto_backup = AutoBackupService::new(store);

    for day in 1..=9 {
        auto_backup
            .snapshot_on(&format!("2024-06-{day:02}"))
            .await
            .unwrap();
    }

    let entries = auto_backup.list().await.unwrap();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[0].date, "2024-06-09");
    assert_eq!(entries[6].date, "2024-06-03");
    assert!(entries.iter().all(|e| e.size > 0));

    assert!(auto_backup.last_backup().await.unwrap().is_some());
}

#[tokio::test]
async fn auto_backup_restore_round_trip() {
    let store = test_store().await;
    let auto_backup = AutoBackupService::new(store.clone());

    store
        .insert_work(&full_work("Archived", vec![episode(1, 1, true)]))
        .await
        .unwrap();
    store.set_all_tags(&[sample_tag()]).await.unwrap();

    auto_backup.snapshot_on("2024-06-01").await.unwrap();

    // Wipe the live collections, then restore the slot.
    store.set_all_works(&[]).await.unwrap();
    store.set_all_tags(&[]).await.unwrap();
    assert!(store.all_works().await.is_empty());

    let restored = auto_backup.restore("2024-06-01").await.unwrap();
    assert_eq!(restored.works.len(), 1);

    let works = store.all_works().await;
    assert_eq!(works.len(), 1);
    assert_eq!(works[0].title, "Archived");
    assert_eq!(store.all_tags().await.len(), 1);
}

#[tokio::test]
async fn restoring_a_missing_slot_fails() {
    let store = test_store().await;
    let auto_backup = AutoBackupService::new(store);

    let err = auto_backup.restore("1999-01-01").await.unwrap_err();
    match err {
        BackupError::SnapshotNotFound(date) => assert_eq!(date, "1999-01-01"),
        other => panic!("expected SnapshotNotFound, got {other:?}"),
    }
}
