use crate::cli::Commands;
use crate::config::WatchConfig;
use crate::logging::TracingLogger;
use anyhow::{Context, Result};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use todo_client::{
    Bridge, Logger, Store, TodoClient, TodoItem, TodoPayload, TodoState, WebSocketClient,
};
use tracing::{debug, info};

/// One line per todo: `[x] <id> <title>`
pub fn format_item(item: &TodoItem) -> String {
    let mark = if item.completed { "x" } else { " " };
    format!(
        "[{}] {} {}",
        mark,
        item.id,
        item.title.as_deref().unwrap_or("(untitled)")
    )
}

fn render<W: Write>(out: &mut W, todos: &[TodoItem]) -> std::io::Result<()> {
    if todos.is_empty() {
        writeln!(out, "No todos")?;
    }
    for item in todos {
        writeln!(out, "{}", format_item(item))?;
    }
    Ok(())
}

fn render_state<W: Write>(out: &mut W, state: &TodoState) -> std::io::Result<()> {
    writeln!(
        out,
        "--- {} todo(s), {} completed ---",
        state.len(),
        state.completed_count()
    )?;
    render(out, &state.todos)?;
    out.flush()
}

/// Execute one command against the server, writing results to `out`
pub async fn run<W: Write>(
    command: Commands,
    client: &TodoClient,
    watch_config: &WatchConfig,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::List => {
            let todos = client.list_todos().await.context("Failed to list todos")?;
            render(out, &todos)?;
        }
        Commands::Get { id } => {
            let item = client
                .get_todo(id)
                .await
                .with_context(|| format!("Failed to get todo {}", id))?;
            writeln!(out, "{}", format_item(&item))?;
        }
        Commands::Add { title, completed } => {
            let payload = TodoPayload {
                completed,
                ..TodoPayload::titled(title)
            };
            let item = client.create(&payload).await.context("Failed to add todo")?;
            info!("Created todo {}", item.id);
            writeln!(out, "{}", format_item(&item))?;
        }
        Commands::Update {
            id,
            title,
            completed,
        } => {
            // PUT replaces both fields, so fill the gaps from the current item
            let current = client
                .get_todo(id)
                .await
                .with_context(|| format!("Failed to get todo {}", id))?;
            let item = client
                .update_todo(
                    id,
                    title.or(current.title),
                    completed.unwrap_or(current.completed),
                )
                .await
                .with_context(|| format!("Failed to update todo {}", id))?;
            writeln!(out, "{}", format_item(&item))?;
        }
        Commands::Delete { id } => {
            client
                .delete_todo(id)
                .await
                .with_context(|| format!("Failed to delete todo {}", id))?;
            writeln!(out, "Deleted {}", id)?;
        }
        Commands::Complete { id } => {
            let item = client
                .complete_todo(id)
                .await
                .with_context(|| format!("Failed to complete todo {}", id))?;
            writeln!(out, "{}", format_item(&item))?;
        }
        Commands::Reset { id } => {
            let item = client
                .reset_todo(id)
                .await
                .with_context(|| format!("Failed to reset todo {}", id))?;
            writeln!(out, "{}", format_item(&item))?;
        }
        Commands::Watch => {
            let stop = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
            };
            watch(client, watch_config, out, stop).await?;
        }
    }
    Ok(())
}

/// Mirror the server list into a local store and print it after every
/// change until `stop` resolves or the hub is gone for good.
///
/// Returns the number of actions the store saw.
pub async fn watch<W, F>(
    client: &TodoClient,
    config: &WatchConfig,
    out: &mut W,
    stop: F,
) -> Result<u64>
where
    W: Write,
    F: Future<Output = ()>,
{
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let bridge = Bridge::new(Store::new(logger.clone()), logger.clone());

    // Connect before the initial load so no change slips in between
    let mut hub = WebSocketClient::new(client.hub_url())
        .with_reconnect_delay(config.reconnect_delay())
        .with_logger(logger)
        .connect()
        .await
        .context("Failed to connect to the hub")?;

    let mut changes = bridge.store().subscribe();
    bridge.sync(client).await.context("Failed to load todos")?;

    let runner = bridge.clone();
    let mut pump = tokio::spawn(async move { runner.run(&mut hub).await });
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => {
                info!("Stopping watch");
                break;
            }
            applied = &mut pump => {
                info!("Hub closed after {} event(s)", applied.unwrap_or_default());
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = changes.borrow_and_update().clone();
                debug!("State now has {} todo(s)", state.len());
                render_state(out, &state)?;
            }
        }
    }

    pump.abort();
    Ok(bridge.store().dispatched())
}
