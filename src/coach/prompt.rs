use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// System prompt that keeps the coach on today's skill
pub fn system_prompt(item: &CatalogItem, custom_prompt: Option<&str>) -> String {
    let mut prompt = format!(
        "You are SkillSpark AI, a friendly and focused soft skills coach.\n\
         \n\
         CORE BEHAVIOR:\n\
         - You can respond to greetings like \"hi\" and \"hello\" warmly\n\
         - You ONLY help with the current skill: \"{title}\"\n\
         - For any off-topic questions, politely redirect to the current skill\n\
         - Keep responses under 6 sentences unless asked for detail\n\
         - Always offer 1 practical exercise and 1 reflection question\n\
         \n\
         TODAY'S FOCUS: {title} ({category})\n\
         CONTEXT: {description}\n",
        title = item.title,
        category = item.category,
        description = item.description,
    );

    if let Some(custom) = custom_prompt.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("\nSPECIAL INSTRUCTIONS: {}\n", custom));
    }

    prompt.push_str(&format!(
        "\nRESPONSE GUIDELINES:\n\
         - Be encouraging and supportive\n\
         - Provide actionable, specific advice\n\
         - Use examples when helpful\n\
         - If asked about other topics, say: \"I'm here to help with {} today. Let's focus on that!\"",
        item.title
    ));
    prompt
}

/// Full message list for one request: system prompt, then the conversation.
/// System messages from the caller are dropped so the prompt cannot be replaced.
pub fn build_messages(
    item: &CatalogItem,
    history: &[ChatMessage],
    custom_prompt: Option<&str>,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage {
        role: Role::System,
        content: system_prompt(item, custom_prompt),
    });
    messages.extend(
        history
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned(),
    );
    messages
}

/// The item a conversation is about, plus any per-task instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachTarget {
    pub item: CatalogItem,
    pub custom_prompt: Option<String>,
}

impl CoachTarget {
    pub fn new(item: CatalogItem, custom_prompt: Option<String>) -> Self {
        CoachTarget { item, custom_prompt }
    }

    pub fn messages(&self, history: &[ChatMessage]) -> Vec<ChatMessage> {
        build_messages(&self.item, history, self.custom_prompt.as_deref())
    }
}
