use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-facing view of a session's current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub session_id: Uuid,
    /// Letters still on the draw pile, top of the pile first
    pub draw_pile: String,
    pub top_letter: Option<char>,
    pub word1_row: String,
    pub word2_row: String,
    pub remaining: usize,
    pub can_undo: bool,
    pub complete: bool,
    /// Both words separated by a space, only once the draw pile is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    pub started_at: DateTime<Utc>,
}
