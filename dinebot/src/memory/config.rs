//! Invoke config: thread_id and user_id.
//!
//! Passed to `CompiledStateGraph::invoke` and to the `Checkpointer`.

/// Config for a single invoke. Identifies the thread whose state is saved.
///
/// **Interaction**: Passed to `CompiledStateGraph::invoke(state, config)` and
/// `Checkpointer::put` / `get_tuple`.
#[derive(Debug, Clone, Default)]
pub struct RunnableConfig {
    /// Conversation id. Required when using a checkpointer; the order bot uses the user id.
    pub thread_id: Option<String>,
    /// Optional user id, kept for logging.
    pub user_id: Option<String>,
}

impl RunnableConfig {
    /// Config for one user's session: thread id and user id are both the user id.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            thread_id: Some(user_id.clone()),
            user_id: Some(user_id),
        }
    }
}
