//! In-memory chat simulation.
//!
//! Each session token gets its own message list. The "AI" responder is
//! canned: it echoes the user's message unless the message mentions
//! markdown, in which case it returns one of a few markdown samples so the
//! client has something rich to render. Nothing is persisted; a restart
//! clears all conversations.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(content: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            role,
            timestamp: Utc::now(),
        }
    }
}

/// Keywords (English and Russian) that trigger a markdown sample reply.
const MARKDOWN_KEYWORDS: &[&str] = &[
    "markdown",
    "покажи",
    "пример",
    "код",
    "разметка",
    "форматирование",
    "таблица",
    "список",
];

/// Canned markdown replies, shown when the user asks about formatting.
const MARKDOWN_SAMPLES: &[&str] = &[
    "### Привет!\n\nВот пример разметки Markdown:\n\n- Маркированный список\n- С несколькими пунктами\n\n1. Нумерованный список\n2. Тоже полезный\n\n**Жирный текст** и *курсив* тоже поддерживаются.\n\n```javascript\nfunction hello() {\n  console.log(\"Привет, мир!\");\n}\n```\n\n> Цитаты отображаются так",
    "## Markdown поддерживает разные заголовки\n\nСсылки тоже работают, например [Google](https://google.com)\n\nВот таблица:\n\n| Имя | Возраст | Город |\n|-----|---------|-------|\n| Иван | 25 | Москва |\n| Мария | 30 | Санкт-Петербург |\n\n---\n\nИ горизонтальную черту тоже можно добавить",
    "Обычный ответ без особого форматирования, но можно выделить `код внутри строки` при необходимости.\n\nИногда полезно создать чек-лист задач:\n\n- [x] Выполненная задача\n- [ ] Невыполненная задача\n- [ ] Еще одна задача",
];

/// Produce the canned reply for a user message.
pub fn reply_for(content: &str) -> String {
    let lowered = content.to_lowercase();
    let wants_markdown = MARKDOWN_KEYWORDS.iter().any(|k| lowered.contains(k));

    if wants_markdown {
        let idx = rand::rng().random_range(0..MARKDOWN_SAMPLES.len());
        MARKDOWN_SAMPLES[idx].to_string()
    } else {
        content.to_string()
    }
}

/// Per-session message lists keyed by session token.
#[derive(Debug, Default)]
pub struct ChatStore {
    conversations: DashMap<String, Vec<ChatMessage>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages for a session, oldest first. Empty for unknown sessions.
    pub fn messages(&self, session: &str) -> Vec<ChatMessage> {
        self.conversations
            .get(session)
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Append the user message and its simulated reply, returning both.
    pub fn exchange(&self, session: &str, content: &str) -> (ChatMessage, ChatMessage) {
        let user = ChatMessage::new(content.to_string(), Role::User);
        let reply = ChatMessage::new(reply_for(content), Role::Ai);

        let mut conversation = self.conversations.entry(session.to_string()).or_default();
        conversation.push(user.clone());
        conversation.push(reply.clone());

        (user, reply)
    }

    /// Drop a session's conversation. Clearing an absent one is a no-op.
    pub fn clear(&self, session: &str) {
        self.conversations.remove(session);
    }
}
