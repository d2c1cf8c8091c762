//! Behavioral laws of the store, checked through its public surface.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tempfile::TempDir;

use labnet_core::{conversation_id, NotificationKind, PostDraft, RequestStatus};
use labnet_storage::{FileStore, KeyValueStore, MemoryStore};
use labnet_store::{Command, ManualClock, Store, StoreConfig};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 10, 9, 0, 0).unwrap()
}

fn open<B: KeyValueStore>(backend: B, clock: &ManualClock) -> Store<B> {
    Store::open_with_clock(backend, StoreConfig::default(), Box::new(clock.clone()))
}

fn memory_store() -> (Store<MemoryStore>, ManualClock) {
    let clock = ManualClock::new(start());
    (open(MemoryStore::new(), &clock), clock)
}

const SEED_POSTS: [&str; 4] = ["post-1", "post-2", "post-3", "post-4"];
const OTHER_USERS: [&str; 4] = ["2", "3", "4", "5"];

fn seed_post() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SEED_POSTS.to_vec())
}

fn other_user() -> impl Strategy<Value = &'static str> {
    prop::sample::select(OTHER_USERS.to_vec())
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        seed_post().prop_map(|id| Command::LikePost {
            post_id: id.to_string()
        }),
        seed_post().prop_map(|id| Command::SharePost {
            post_id: id.to_string()
        }),
        seed_post().prop_map(|id| Command::ToggleSavePost {
            post_id: id.to_string()
        }),
        (seed_post(), "[a-z ]{1,20}").prop_map(|(id, content)| Command::AddComment {
            post_id: id.to_string(),
            content,
            parent_id: None,
        }),
        "[a-z ]{1,30}".prop_map(|content| Command::AddPost {
            draft: PostDraft {
                content,
                ..PostDraft::default()
            }
        }),
        other_user().prop_map(|to| Command::SendConnectionRequest { to: to.to_string() }),
        (other_user(), "[a-z ]{1,20}").prop_map(|(to, content)| Command::SendMessage {
            to: to.to_string(),
            content,
        }),
        other_user().prop_map(|id| Command::RemoveConnection {
            user_id: id.to_string()
        }),
        Just(Command::MarkAllNotificationsRead),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn liking_twice_restores_likes(id in seed_post()) {
        let (mut store, _clock) = memory_store();
        let before = store.state().find_post(id).unwrap().likes.clone();

        store.mutate(|m| {
            m.like_post(id);
            m.like_post(id);
        });
        prop_assert_eq!(&store.state().find_post(id).unwrap().likes, &before);
    }

    #[test]
    fn reload_reproduces_every_collection(
        commands in prop::collection::vec(command_strategy(), 0..24)
    ) {
        let dir = TempDir::new().unwrap();
        let backend = FileStore::init(dir.path()).unwrap();
        let clock = ManualClock::new(start());
        let mut store = open(backend, &clock);
        for command in commands {
            clock.advance(Duration::milliseconds(250));
            store.dispatch(command);
        }
        store.persist_all();

        let reopened = open(FileStore::open(dir.path()).unwrap(), &clock);
        prop_assert_eq!(
            serde_json::to_string(store.state()).unwrap(),
            serde_json::to_string(reopened.state()).unwrap()
        );
    }

    #[test]
    fn connections_stay_symmetric(
        commands in prop::collection::vec(command_strategy(), 0..32)
    ) {
        let (mut store, _clock) = memory_store();
        store.dispatch_all(commands);
        // Accept whatever is pending, so links get exercised too.
        let pending: Vec<String> = store
            .connection_requests()
            .iter()
            .filter(|r| r.is_pending())
            .map(|r| r.id.clone())
            .collect();
        store.dispatch_all(
            pending
                .into_iter()
                .map(|id| Command::AcceptConnectionRequest { id }),
        );

        let state = store.state();
        let me = state.current_user.clone();
        prop_assert!(!me.connections.contains(&me.id));
        for user in &state.all_users {
            prop_assert!(!user.connections.contains(&user.id));
            prop_assert_eq!(
                me.is_connected_to(&user.id),
                user.is_connected_to(&me.id),
                "asymmetric link between {} and {}",
                me.id,
                user.id
            );
        }
    }
}

#[test]
fn like_notifies_only_foreign_authors() {
    let (mut store, _clock) = memory_store();
    let own = store.mutate(|m| {
        m.add_post(PostDraft {
            content: "own".to_string(),
            ..PostDraft::default()
        })
    });
    store.mutate(|m| m.like_post(&own));
    assert!(store.notifications().is_empty());

    store.mutate(|m| m.like_post("post-3"));
    let likes: Vec<_> = store
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Like)
        .collect();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].post_id.as_deref(), Some("post-3"));
}

#[test]
fn connection_request_to_isolated_user_has_no_mutuals() {
    let (mut store, _clock) = memory_store();
    store.mutate(|m| m.send_connection_request("4"));

    let pending: Vec<_> = store
        .connection_requests()
        .iter()
        .filter(|r| r.is_pending() && r.from.id == "1")
        .collect();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].mutual_connections, 0);
}

#[test]
fn mutuals_are_counted_at_send_time() {
    let (mut store, _clock) = memory_store();
    // User 3 is connected to 1 and 2; user 1 is connected to 2 and 3.
    let id = store.mutate(|m| m.send_connection_request("3")).unwrap();
    let request = store
        .connection_requests()
        .iter()
        .find(|r| r.id == id)
        .unwrap();
    assert_eq!(request.mutual_connections, 1);

    store.mutate(|m| m.remove_connection("2"));
    let request = store
        .connection_requests()
        .iter()
        .find(|r| r.id == id)
        .unwrap();
    assert_eq!(request.mutual_connections, 1);
}

#[test]
fn disconnect_after_accept_keeps_accepted_status() {
    let (mut store, _clock) = memory_store();
    let id = store.mutate(|m| m.send_connection_request("5")).unwrap();
    store.mutate(|m| m.accept_connection_request(&id));
    store.mutate(|m| m.remove_connection("5"));

    let request = &store.connection_requests()[0];
    assert_eq!(request.status, RequestStatus::Accepted);
    assert!(!store.current_user().is_connected_to("5"));
    assert!(!store
        .state()
        .find_user("5")
        .unwrap()
        .is_connected_to("1"));
}

#[test]
fn first_message_creates_one_sorted_conversation() {
    let (mut store, _clock) = memory_store();
    store.mutate(|m| m.send_message("4", "hello".to_string()));

    assert_eq!(store.conversations().len(), 1);
    assert_eq!(store.conversations()[0].id, conversation_id("4", "1"));
    assert_eq!(store.conversations()[0].id, "1-4");
    let in_thread = store
        .messages()
        .iter()
        .filter(|m| m.conversation_id == "1-4")
        .count();
    assert_eq!(in_thread, 1);
}

#[test]
fn delete_post_leaves_no_saved_reference() {
    let (mut store, _clock) = memory_store();
    store.mutate(|m| {
        m.toggle_save_post("post-1");
        m.toggle_save_post("post-4");
    });
    store.mutate(|m| m.delete_post("post-1"));

    assert!(store.state().find_post("post-1").is_none());
    assert!(!store.saved_posts().contains("post-1"));
    assert!(store.saved_posts().contains("post-4"));
}

#[test]
fn duplicate_requests_are_kept_side_by_side() {
    let (mut store, _clock) = memory_store();
    store.mutate(|m| {
        m.send_connection_request("4");
        m.send_connection_request("4");
    });
    let to_four = store
        .connection_requests()
        .iter()
        .filter(|r| r.to == "4" && r.is_pending())
        .count();
    assert_eq!(to_four, 2);
}

#[test]
fn corrupt_file_falls_back_to_seed() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    let mut store = open(FileStore::init(dir.path()).unwrap(), &clock);
    store.persist_all();
    drop(store);

    let posts = dir.path().join("collections").join("posts.json");
    std::fs::write(&posts, "[{\"broken\": true").unwrap();

    let reopened = open(FileStore::open(dir.path()).unwrap(), &clock);
    assert_eq!(reopened.posts().len(), 4);
    assert_eq!(reopened.current_user().id, "1");
}
