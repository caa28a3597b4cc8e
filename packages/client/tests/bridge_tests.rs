/// Bridge tests
///
/// Two clients share one server: A mirrors the list through its bridge while
/// B mutates it over REST.
mod helpers;

use helpers::TestFixture;
use std::sync::Arc;
use std::time::Duration;
use todo_client::{Store, TodoAction, TodoClient, TodoState};

/// Wait until the store satisfies `pred` or fail after two seconds
async fn wait_for(store: &Store, pred: impl Fn(&TodoState) -> bool) -> Arc<TodoState> {
    let mut rx = store.subscribe();
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let state = rx.borrow_and_update().clone();
            if pred(&state) {
                return state;
            }
            if rx.changed().await.is_err() {
                return state;
            }
        }
    })
    .await;
    waited.expect("store never reached the expected state")
}

#[tokio::test]
async fn test_sync_loads_full_list() {
    let fixture = TestFixture::new().await.expect("Failed to create fixture");
    fixture.client.create_todo("one").await.unwrap();
    fixture.client.create_todo("two").await.unwrap();

    let bridge = fixture.bridge();
    assert_eq!(bridge.sync(&fixture.client).await.unwrap(), 2);

    let state = bridge.store().state();
    assert_eq!(state.todos, fixture.client.list_todos().await.unwrap());
    assert_eq!(bridge.store().history(), vec!["init"]);
}

#[tokio::test]
async fn test_changes_from_another_client_reach_the_store() {
    let fixture = TestFixture::new().await.expect("Failed to create fixture");
    let other = TodoClient::new(&fixture.server.base_url);

    let bridge = fixture.bridge();
    let mut hub = fixture.connect_hub().await.unwrap();
    bridge.sync(&fixture.client).await.unwrap();

    let runner = bridge.clone();
    let task = tokio::spawn(async move { runner.run(&mut hub).await });

    let created = other.create_todo("Buy milk").await.unwrap();
    let state = wait_for(bridge.store(), |s| s.get(created.id).is_some()).await;
    assert_eq!(state.get(created.id), Some(&created));

    other.complete_todo(created.id).await.unwrap();
    wait_for(bridge.store(), |s| {
        s.get(created.id).is_some_and(|todo| todo.completed)
    })
    .await;

    other.delete_todo(created.id).await.unwrap();
    let state = wait_for(bridge.store(), |s| s.get(created.id).is_none()).await;
    assert!(state.is_empty());

    assert_eq!(
        bridge.store().history(),
        vec!["init", "add", "complete", "delete"]
    );
    task.abort();
}

#[tokio::test]
async fn test_own_echo_of_add_keeps_one_copy() {
    let fixture = TestFixture::new().await.expect("Failed to create fixture");
    let bridge = fixture.bridge();
    let mut hub = fixture.connect_hub().await.unwrap();

    let runner = bridge.clone();
    let task = tokio::spawn(async move { runner.run(&mut hub).await });

    // Local optimistic add, then the hub echoes the same creation
    let created = fixture.client.create_todo("echoed").await.unwrap();
    bridge.store().dispatch(TodoAction::Add(created.clone()));

    wait_for(bridge.store(), |_| bridge.store().dispatched() >= 2).await;
    assert_eq!(bridge.store().state().todos, vec![created]);
    task.abort();
}

#[tokio::test]
async fn test_create_between_connect_and_sync_is_not_duplicated() {
    let fixture = TestFixture::new().await.expect("Failed to create fixture");
    let bridge = fixture.bridge();

    // Same order as the CLI watch: subscribe, then load the list
    let mut hub = fixture.connect_hub().await.unwrap();
    let created = fixture.client.create_todo("in between").await.unwrap();
    bridge.sync(&fixture.client).await.unwrap();
    assert_eq!(bridge.store().state().todos, vec![created.clone()]);

    // The buffered item-created now lands on a list that already has it
    let runner = bridge.clone();
    let task = tokio::spawn(async move { runner.run(&mut hub).await });
    wait_for(bridge.store(), |_| bridge.store().dispatched() >= 2).await;

    assert_eq!(bridge.store().state().todos, vec![created]);
    assert_eq!(bridge.store().history(), vec!["init", "add"]);
    task.abort();
}

#[tokio::test]
async fn test_own_echo_of_update_is_harmless() {
    let fixture = TestFixture::new().await.expect("Failed to create fixture");
    let created = fixture.client.create_todo("draft").await.unwrap();

    let bridge = fixture.bridge();
    let mut hub = fixture.connect_hub().await.unwrap();
    bridge.sync(&fixture.client).await.unwrap();

    let runner = bridge.clone();
    let task = tokio::spawn(async move { runner.run(&mut hub).await });

    let updated = fixture
        .client
        .update_todo(created.id, Some("final".to_string()), false)
        .await
        .unwrap();
    bridge.store().dispatch(TodoAction::Update(updated.clone()));

    // Wait for the echo to be applied on top of the local dispatch
    wait_for(bridge.store(), |_| bridge.store().dispatched() >= 3).await;
    assert_eq!(bridge.store().state().todos, vec![updated]);
    task.abort();
}

#[tokio::test]
async fn test_undo_remote_change_is_local_only() {
    let fixture = TestFixture::new().await.expect("Failed to create fixture");
    let bridge = fixture.bridge();
    let mut hub = fixture.connect_hub().await.unwrap();
    bridge.sync(&fixture.client).await.unwrap();

    let runner = bridge.clone();
    let task = tokio::spawn(async move { runner.run(&mut hub).await });

    let created = fixture.client.create_todo("remote").await.unwrap();
    wait_for(bridge.store(), |s| s.len() == 1).await;

    assert!(bridge.store().undo());
    assert!(bridge.store().state().is_empty());
    // The server still has it
    assert_eq!(fixture.client.list_todos().await.unwrap(), vec![created]);
    task.abort();
}
