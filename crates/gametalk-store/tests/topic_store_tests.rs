mod common;

use common::{register, setup_test_store, topic};
use gametalk_core::errors::GtErrorKind;
use gametalk_core::model::{Category, Topic, TopicDraft};

#[test]
fn test_topics_ordered_by_last_activity_desc() {
    // Given: Topics inserted out of activity order
    let store = setup_test_store();
    store.insert_topic(&topic(1, 1, 100)).unwrap();
    store.insert_topic(&topic(2, 1, 300)).unwrap();
    store.insert_topic(&topic(3, 2, 200)).unwrap();

    // When: Listing all topics and one category
    let all: Vec<i64> = store.list_topics().unwrap().iter().map(|t| t.id).collect();
    let cat1: Vec<i64> = store
        .observe_topics_by_category(1)
        .current()
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();

    // Then: Most recent activity comes first
    assert_eq!(all, vec![2, 3, 1]);
    assert_eq!(cat1, vec![2, 1]);
}

#[test]
fn test_topics_by_user_ordered_by_created_at_desc() {
    let store = setup_test_store();
    let mut old = topic(1, 1, 900);
    old.created_at = 10;
    let mut new = topic(2, 1, 50);
    new.created_at = 20;
    store.insert_topic(&old).unwrap();
    store.insert_topic(&new).unwrap();

    let ids: Vec<i64> = store
        .observe_topics_by_user(1)
        .current()
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_insert_with_existing_id_replaces_row() {
    let store = setup_test_store();
    store.insert_topic(&topic(5, 1, 100)).unwrap();

    let mut changed = topic(5, 1, 100);
    changed.title = "Renamed".to_string();
    store.insert_topic(&changed).unwrap();

    let topics = store.list_topics().unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].title, "Renamed");
}

#[test]
fn test_locally_authored_topic_gets_id_and_needs_parents() {
    // Given: A registered user and a category
    let store = setup_test_store();
    let user_id = register(&store, "ana@example.com");
    store
        .insert_category(&Category::new(3, "Shooters", "FPS", "🔫"))
        .unwrap();

    // When: A topic without id is inserted
    let draft = TopicDraft::new(3, user_id, "Mejor FPS", "¿Cuál es?");
    let id = store.insert_topic(&Topic::from_draft(0, &draft, 1_000)).unwrap();

    // Then: The store assigned an id
    assert!(id > 0);
    assert_eq!(store.get_topic(id).unwrap().unwrap().title, "Mejor FPS");

    // And: Unknown parents are rejected
    let orphan = TopicDraft::new(99, user_id, "t", "d");
    let err = store
        .insert_topic(&Topic::from_draft(0, &orphan, 1_000))
        .unwrap_err();
    assert_eq!(err.kind(), GtErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("99"));
}

#[test]
fn test_update_missing_topic_is_not_found() {
    let store = setup_test_store();

    let err = store.update_topic(&topic(404, 1, 1)).unwrap_err();

    assert_eq!(err.kind(), GtErrorKind::NotFound);
    assert_eq!(err.message(), "No se encontró el tema");
}

#[test]
fn test_update_and_delete_topic() {
    let store = setup_test_store();
    store.insert_topic(&topic(1, 1, 100)).unwrap();

    let mut edited = store.get_topic(1).unwrap().unwrap();
    edited.apply_edit("Nuevo título", "Nueva descripción");
    store.update_topic(&edited).unwrap();
    assert_eq!(store.get_topic(1).unwrap().unwrap().title, "Nuevo título");

    assert!(store.delete_topic(1).unwrap());
    assert!(!store.delete_topic(1).unwrap());
    assert!(store.get_topic(1).unwrap().is_none());
}

#[test]
fn test_deleting_category_cascades_to_topics() {
    // Given: Two categories with topics
    let store = setup_test_store();
    store
        .insert_categories(&[
            Category::new(1, "RPG", "", ""),
            Category::new(2, "Indie", "", ""),
        ])
        .unwrap();
    store.insert_topic(&topic(1, 1, 1)).unwrap();
    store.insert_topic(&topic(2, 1, 2)).unwrap();
    store.insert_topic(&topic(3, 2, 3)).unwrap();

    // When: Category 1 is deleted
    assert!(store.delete_category(1).unwrap());

    // Then: Only its topics are gone
    assert_eq!(store.count_topics_by_category(1).unwrap(), 0);
    assert_eq!(store.count_topics_by_category(2).unwrap(), 1);
}

#[test]
fn test_deleting_user_cascades_to_topics() {
    let store = setup_test_store();
    let ana = register(&store, "ana@example.com");
    let luis = register(&store, "luis@example.com");
    let mut mine = topic(1, 1, 1);
    mine.user_id = ana;
    let mut theirs = topic(2, 1, 2);
    theirs.user_id = luis;
    store.insert_topic(&mine).unwrap();
    store.insert_topic(&theirs).unwrap();

    assert!(store.delete_user(ana).unwrap());

    let remaining: Vec<i64> = store.list_topics().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(remaining, vec![2]);
}

#[test]
fn test_record_view_bumps_count_and_activity() {
    let store = setup_test_store();
    store.insert_topic(&topic(1, 1, 100)).unwrap();

    let viewed = store.record_topic_view(1, 500).unwrap();

    assert_eq!(viewed.views_count, 1);
    assert_eq!(viewed.last_activity, 500);
    assert_eq!(viewed.created_at, 100);
}

#[test]
fn test_concurrent_views_lose_no_increment() {
    // Given: One topic shared by many threads
    let store = setup_test_store();
    store.insert_topic(&topic(1, 1, 100)).unwrap();

    // When: 8 threads each record 25 views
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    store.record_topic_view(1, 1_000 + i).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Then: Every view counted
    assert_eq!(store.get_topic(1).unwrap().unwrap().views_count, 200);
}

#[test]
fn test_record_view_on_missing_topic() {
    let store = setup_test_store();
    let err = store.record_topic_view(7, 1).unwrap_err();
    assert_eq!(err.kind(), GtErrorKind::NotFound);
}
