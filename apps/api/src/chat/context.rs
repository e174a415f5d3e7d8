//! Context Fetcher: loads the caller's profile and latest applications.

use tracing::warn;
use uuid::Uuid;

use crate::chat::store::ChatStore;
use crate::models::application::ApplicationDetailRow;
use crate::models::user::UserProfileRow;

pub const RECENT_APPLICATION_LIMIT: i64 = 5;

/// Everything the chat flow knows about the caller. A `None` user means no
/// personalization is available, not that the request should fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatContext {
    pub user: Option<UserProfileRow>,
    pub applications: Vec<ApplicationDetailRow>,
}

impl ChatContext {
    pub fn skills(&self) -> &[String] {
        self.user.as_ref().map(|u| u.skills.as_slice()).unwrap_or(&[])
    }
}

/// Loads the caller's context. Any backend failure degrades to an empty context.
pub async fn fetch_context(store: &dyn ChatStore, user_id: Uuid) -> ChatContext {
    match load_context(store, user_id).await {
        Ok(context) => context,
        Err(e) => {
            warn!("Failed to load chat context for user {user_id}: {e}");
            ChatContext::default()
        }
    }
}

async fn load_context(store: &dyn ChatStore, user_id: Uuid) -> Result<ChatContext, sqlx::Error> {
    let user = store.find_user_profile(user_id).await?;
    let applications = store
        .recent_applications(user_id, RECENT_APPLICATION_LIMIT)
        .await?;
    Ok(ChatContext { user, applications })
}
