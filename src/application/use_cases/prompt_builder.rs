//! Text-to-SQL prompt construction.
//!
//! Pure string templating: the same schema, history, and question always
//! produce the same prompt. The model's reply is used as-is downstream, so
//! the instructions here are best effort, not an enforced contract.

use crate::domain::chat::ChatMessage;

/// Fixed system message for every completion request.
pub const SYSTEM_PROMPT: &str = "You are a data analyst at a company. You are interacting with \
     a user who is asking you questions about the company's database.";

/// Serialize the transcript as role-tagged lines in insertion order.
pub fn serialize_history(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|message| format!("{}: {}", message.role.label(), message.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the template with the live schema snapshot, the conversation so far,
/// and the new question.
pub fn build(schema: &str, history: &[ChatMessage], question: &str) -> String {
    format!(
        "Based on the table schema below, write a SQL query that would answer the user's \
         question. Take the conversation history into account.\n\
         \n\
         <SCHEMA>{schema}</SCHEMA>\n\
         \n\
         Conversation History:\n\
         {history}\n\
         \n\
         Write only the SQL query and nothing else. Do not wrap the SQL query in any other \
         text, not even backticks.\n\
         \n\
         For example:\n\
         Question: which 3 artists have the most tracks?\n\
         SQL Query: SELECT ArtistId, COUNT(*) as track_count FROM Track GROUP BY ArtistId \
         ORDER BY track_count DESC LIMIT 3;\n\
         Question: Name 10 artists\n\
         SQL Query: SELECT Name FROM Artist LIMIT 10;\n\
         \n\
         Your turn:\n\
         \n\
         Question: {question}\n\
         SQL Query:",
        schema = schema,
        history = serialize_history(history),
        question = question,
    )
}
