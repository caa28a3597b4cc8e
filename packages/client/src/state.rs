//! Client-side state container
//!
//! The whole todo list lives in one immutable [`TodoState`] snapshot. The
//! only way to change it is to [`Store::dispatch`] a [`TodoAction`]; the pure
//! [`reduce`] function turns the current snapshot and the action into a new
//! snapshot, which then replaces the old one.
//!
//! Because every snapshot is kept behind an `Arc` and never mutated, the
//! store can hold on to previous snapshots cheaply. That is what backs
//! [`Store::undo`], [`Store::redo`] and [`Store::history`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use todo_server::models::domain::TodoItem;
use tokio::sync::watch;
use uuid::Uuid;

use crate::logger::{Logger, NoopLogger};

const DEFAULT_HISTORY_LIMIT: usize = 100;

// ============================================================================
// State + Actions
// ============================================================================

/// One snapshot of the client's todo list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub todos: Vec<TodoItem>,
}

impl TodoState {
    pub fn new(todos: Vec<TodoItem>) -> Self {
        Self { todos }
    }

    pub fn get(&self, id: Uuid) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }
}

/// Named transitions of the client state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    /// Replace the whole list (initial load)
    Init(Vec<TodoItem>),
    Add(TodoItem),
    Update(TodoItem),
    Delete(Uuid),
    Complete(TodoItem),
    Reset(TodoItem),
}

impl TodoAction {
    pub fn name(&self) -> &'static str {
        match self {
            TodoAction::Init(_) => "init",
            TodoAction::Add(_) => "add",
            TodoAction::Update(_) => "update",
            TodoAction::Delete(_) => "delete",
            TodoAction::Complete(_) => "complete",
            TodoAction::Reset(_) => "reset",
        }
    }
}

/// Apply `action` to `state`, producing a new snapshot.
///
/// Never fails. Actions naming an identifier that is not in the list
/// return a snapshot equal to `state`.
pub fn reduce(state: &TodoState, action: &TodoAction) -> TodoState {
    match action {
        TodoAction::Init(todos) => TodoState::new(todos.clone()),
        // A known id is replaced in place so a repeated add stays one item
        TodoAction::Add(item) if state.get(item.id).is_some() => replace_by_id(state, item),
        TodoAction::Add(item) => {
            let mut todos = Vec::with_capacity(state.todos.len() + 1);
            todos.extend(state.todos.iter().cloned());
            todos.push(item.clone());
            TodoState::new(todos)
        }
        // complete/reset are separate tags for tracing only
        TodoAction::Update(item) | TodoAction::Complete(item) | TodoAction::Reset(item) => {
            replace_by_id(state, item)
        }
        TodoAction::Delete(id) => TodoState::new(
            state
                .todos
                .iter()
                .filter(|todo| todo.id != *id)
                .cloned()
                .collect(),
        ),
    }
}

fn replace_by_id(state: &TodoState, item: &TodoItem) -> TodoState {
    TodoState::new(
        state
            .todos
            .iter()
            .map(|todo| {
                if todo.id == item.id {
                    item.clone()
                } else {
                    todo.clone()
                }
            })
            .collect(),
    )
}

// ============================================================================
// Store
// ============================================================================

/// A dispatched action together with the snapshot it replaced
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub action: &'static str,
    pub previous: Arc<TodoState>,
}

#[derive(Debug, Default)]
struct History {
    past: VecDeque<HistoryEntry>,
    future: Vec<HistoryEntry>,
    dispatched: u64,
}

/// Process-wide holder of the current snapshot
///
/// Cloning a `Store` yields another handle to the same state. Observers call
/// [`Store::subscribe`] and are woken after every transition.
#[derive(Clone)]
pub struct Store {
    state_tx: Arc<watch::Sender<Arc<TodoState>>>,
    history: Arc<Mutex<History>>,
    history_limit: usize,
    logger: Arc<dyn Logger>,
}

impl Store {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_state(TodoState::default(), logger)
    }

    pub fn with_state(state: TodoState, logger: Arc<dyn Logger>) -> Self {
        let (state_tx, _rx) = watch::channel(Arc::new(state));
        Self {
            state_tx: Arc::new(state_tx),
            history: Arc::new(Mutex::new(History::default())),
            history_limit: DEFAULT_HISTORY_LIMIT,
            logger,
        }
    }

    /// Limit how many past snapshots are kept for undo; 0 disables history
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<TodoState> {
        self.state_tx.borrow().clone()
    }

    /// Receiver that observes every new snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<TodoState>> {
        self.state_tx.subscribe()
    }

    /// Apply an action and publish the resulting snapshot
    pub fn dispatch(&self, action: TodoAction) -> Arc<TodoState> {
        let mut history = self.lock_history();

        let previous = self.state();
        let next = Arc::new(reduce(&previous, &action));

        history.dispatched += 1;
        history.future.clear();
        if self.history_limit > 0 {
            history.past.push_back(HistoryEntry {
                action: action.name(),
                previous,
            });
            while history.past.len() > self.history_limit {
                history.past.pop_front();
            }
        }

        self.logger.debug(&format!(
            "Dispatched {} ({} todo(s))",
            action.name(),
            next.len()
        ));
        self.state_tx.send_replace(next.clone());
        next
    }

    /// Step back to the snapshot before the last dispatched action
    pub fn undo(&self) -> bool {
        let mut history = self.lock_history();
        let Some(entry) = history.past.pop_back() else {
            return false;
        };

        let current = self.state_tx.send_replace(entry.previous);
        self.logger.debug(&format!("Undid {}", entry.action));
        history.future.push(HistoryEntry {
            action: entry.action,
            previous: current,
        });
        true
    }

    /// Re-apply the most recently undone action
    pub fn redo(&self) -> bool {
        let mut history = self.lock_history();
        let Some(entry) = history.future.pop() else {
            return false;
        };

        let current = self.state_tx.send_replace(entry.previous);
        self.logger.debug(&format!("Redid {}", entry.action));
        history.past.push_back(HistoryEntry {
            action: entry.action,
            previous: current,
        });
        true
    }

    /// Names of the actions that can currently be undone, oldest first
    pub fn history(&self) -> Vec<&'static str> {
        self.lock_history()
            .past
            .iter()
            .map(|entry| entry.action)
            .collect()
    }

    /// Total number of actions dispatched since creation
    pub fn dispatched(&self) -> u64 {
        self.lock_history().dispatched
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Arc::new(NoopLogger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> TodoItem {
        TodoItem::new(title)
    }

    fn sample_state() -> TodoState {
        TodoState::new(vec![item("one"), item("two"), item("three")])
    }

    #[test]
    fn test_init_replaces_list() {
        let state = sample_state();
        let fresh = vec![item("only")];
        let next = reduce(&state, &TodoAction::Init(fresh.clone()));
        assert_eq!(next.todos, fresh);
    }

    #[test]
    fn test_add_appends() {
        let state = sample_state();
        let new_item = item("four");
        let next = reduce(&state, &TodoAction::Add(new_item.clone()));

        assert_eq!(next.len(), 4);
        assert_eq!(next.todos.last(), Some(&new_item));
        assert_eq!(&next.todos[..3], &state.todos[..]);
    }

    #[test]
    fn test_add_of_known_id_replaces_in_place() {
        let state = sample_state();
        let mut again = state.todos[1].clone();
        again.completed = true;

        let next = reduce(&state, &TodoAction::Add(again.clone()));
        assert_eq!(next.len(), 3);
        assert_eq!(next.todos[1], again);

        let twice = reduce(&next, &TodoAction::Add(again));
        assert_eq!(twice, next);
    }

    #[test]
    fn test_update_replaces_matching_item_in_place() {
        let state = sample_state();
        let mut changed = state.todos[1].clone();
        changed.title = Some("TWO".to_string());

        let next = reduce(&state, &TodoAction::Update(changed.clone()));
        assert_eq!(next.todos[1], changed);
        assert_eq!(next.todos[0], state.todos[0]);
        assert_eq!(next.todos[2], state.todos[2]);
    }

    #[test]
    fn test_unmatched_update_is_value_equal() {
        let state = sample_state();
        for action in [
            TodoAction::Update(item("stranger")),
            TodoAction::Complete(item("stranger")),
            TodoAction::Reset(item("stranger")),
            TodoAction::Delete(Uuid::new_v4()),
        ] {
            assert_eq!(reduce(&state, &action), state, "{}", action.name());
        }
    }

    #[test]
    fn test_delete_removes_matching_item() {
        let state = sample_state();
        let id = state.todos[0].id;
        let next = reduce(&state, &TodoAction::Delete(id));
        assert_eq!(next.len(), 2);
        assert!(next.get(id).is_none());
    }

    #[test]
    fn test_complete_and_reset_behave_like_update() {
        let state = sample_state();
        let completed = TodoItem {
            completed: true,
            ..state.todos[2].clone()
        };

        let via_complete = reduce(&state, &TodoAction::Complete(completed.clone()));
        let via_update = reduce(&state, &TodoAction::Update(completed.clone()));
        assert_eq!(via_complete, via_update);
        assert_eq!(via_complete.completed_count(), 1);

        let reset = TodoItem {
            completed: false,
            ..completed
        };
        assert_eq!(reduce(&via_complete, &TodoAction::Reset(reset)), state);
    }

    #[test]
    fn test_replace_actions_are_idempotent() {
        let state = sample_state();
        let target = TodoItem {
            completed: true,
            ..state.todos[0].clone()
        };

        for action in [
            TodoAction::Update(target.clone()),
            TodoAction::Complete(target.clone()),
            TodoAction::Reset(target.clone()),
            TodoAction::Delete(target.id),
            TodoAction::Init(vec![target.clone()]),
        ] {
            let once = reduce(&state, &action);
            let twice = reduce(&once, &action);
            assert_eq!(once, twice, "{}", action.name());
        }
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let state = sample_state();
        let copy = state.clone();
        let _ = reduce(&state, &TodoAction::Delete(state.todos[0].id));
        assert_eq!(state, copy);
    }

    #[test]
    fn test_store_dispatch_publishes_new_snapshot() {
        let store = Store::default();
        let before = store.state();

        let added = item("new");
        let after = store.dispatch(TodoAction::Add(added.clone()));

        assert!(before.is_empty());
        assert_eq!(after.todos, vec![added]);
        assert!(Arc::ptr_eq(&after, &store.state()));
        assert_eq!(store.dispatched(), 1);
    }

    #[tokio::test]
    async fn test_store_subscribers_see_changes() {
        let store = Store::default();
        let mut rx = store.subscribe();

        store.dispatch(TodoAction::Init(vec![item("a"), item("b")]));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 2);
    }

    #[test]
    fn test_undo_redo() {
        let store = Store::default();
        let a = item("a");
        let b = item("b");

        store.dispatch(TodoAction::Add(a.clone()));
        store.dispatch(TodoAction::Add(b.clone()));
        assert_eq!(store.history(), vec!["add", "add"]);

        assert!(store.undo());
        assert_eq!(store.state().todos, vec![a.clone()]);
        assert!(store.undo());
        assert!(store.state().is_empty());
        assert!(!store.undo());

        assert!(store.redo());
        assert_eq!(store.state().todos, vec![a.clone()]);
        assert!(store.redo());
        assert_eq!(store.state().todos, vec![a, b]);
        assert!(!store.redo());
    }

    #[test]
    fn test_dispatch_clears_redo() {
        let store = Store::default();
        store.dispatch(TodoAction::Add(item("a")));
        store.undo();
        store.dispatch(TodoAction::Add(item("b")));
        assert!(!store.redo());
    }

    #[test]
    fn test_history_limit() {
        let store = Store::default().with_history_limit(2);
        for i in 0..5 {
            store.dispatch(TodoAction::Add(item(&i.to_string())));
        }
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.dispatched(), 5);

        let disabled = Store::default().with_history_limit(0);
        disabled.dispatch(TodoAction::Add(item("x")));
        assert!(!disabled.undo());
        assert_eq!(disabled.state().len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::default();
        let other = store.clone();
        store.dispatch(TodoAction::Add(item("shared")));
        assert_eq!(other.state().len(), 1);
    }
}
