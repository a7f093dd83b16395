//! In-process session memory for the chatbot.
//!
//! Each session keeps the most recent exchanges up to a fixed bound. There is
//! no expiry; a session only disappears through `clear`.

use std::collections::{BTreeSet, HashMap, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// Number of exchanges returned in a session summary.
const SUMMARY_RECENT: usize = 5;

/// Which handler produced an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    WebSearch,
    ResumeAdvice,
    General,
}

/// One user message and the assistant's answer.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub user: String,
    pub bot: String,
    #[serde(rename = "type")]
    pub topic: Topic,
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    pub fn new(user: &str, bot: &str, topic: Topic) -> Self {
        Self {
            user: user.to_string(),
            bot: bot.to_string(),
            topic,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub total_messages: usize,
    pub conversation_start: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
    pub topics_discussed: Vec<Topic>,
    pub recent_messages: Vec<Exchange>,
}

pub struct SessionStore {
    sessions: Mutex<HashMap<String, VecDeque<Exchange>>>,
    max_exchanges: usize,
}

impl SessionStore {
    pub fn new(max_exchanges: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_exchanges: max_exchanges.max(1),
        }
    }

    /// Creates an empty history for the session if it has none.
    pub fn ensure(&self, session_id: &str) {
        self.sessions
            .lock()
            .entry(session_id.to_string())
            .or_default();
    }

    /// Appends an exchange, dropping the oldest ones past the bound.
    pub fn record(&self, session_id: &str, exchange: Exchange) {
        let mut sessions = self.sessions.lock();
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push_back(exchange);
        while history.len() > self.max_exchanges {
            history.pop_front();
        }
    }

    /// The last `n` exchanges, oldest first.
    pub fn recent(&self, session_id: &str, n: usize) -> Vec<Exchange> {
        let sessions = self.sessions.lock();
        sessions
            .get(session_id)
            .map(|history| {
                let skip = history.len().saturating_sub(n);
                history.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default()
    }

    /// `None` if the session was never seen (or was cleared).
    pub fn summary(&self, session_id: &str) -> Option<SessionSummary> {
        let sessions = self.sessions.lock();
        let history = sessions.get(session_id)?;

        let topics: BTreeSet<Topic> = history.iter().map(|e| e.topic).collect();
        let skip = history.len().saturating_sub(SUMMARY_RECENT);

        Some(SessionSummary {
            total_messages: history.len(),
            conversation_start: history.front().map(|e| e.timestamp),
            last_activity: history.back().map(|e| e.timestamp),
            topics_discussed: topics.into_iter().collect(),
            recent_messages: history.iter().skip(skip).cloned().collect(),
        })
    }

    /// Returns whether the session existed.
    pub fn clear(&self, session_id: &str) -> bool {
        self.sessions.lock().remove(session_id).is_some()
    }
}

/// Renders exchanges as a `User:`/`Bot:` transcript for prompts.
pub fn transcript(exchanges: &[Exchange]) -> String {
    exchanges
        .iter()
        .map(|e| format!("User: {}\nBot: {}", e.user, e.bot))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_bounded() {
        let store = SessionStore::new(3);
        for i in 0..5 {
            store.record("s", Exchange::new(&format!("q{i}"), "a", Topic::General));
        }
        let all = store.recent("s", 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].user, "q2");
        assert_eq!(all[2].user, "q4");
    }

    #[test]
    fn test_recent_returns_tail_in_order() {
        let store = SessionStore::new(50);
        for i in 0..4 {
            store.record("s", Exchange::new(&format!("q{i}"), "a", Topic::General));
        }
        let users: Vec<_> = store.recent("s", 2).into_iter().map(|e| e.user).collect();
        assert_eq!(users, vec!["q2", "q3"]);
        assert!(store.recent("unknown", 2).is_empty());
    }

    #[test]
    fn test_summary_of_unknown_session_is_none() {
        let store = SessionStore::new(50);
        assert!(store.summary("nope").is_none());
    }

    #[test]
    fn test_summary_of_empty_session() {
        let store = SessionStore::new(50);
        store.ensure("s");
        let summary = store.summary("s").unwrap();
        assert_eq!(summary.total_messages, 0);
        assert!(summary.conversation_start.is_none());
        assert!(summary.topics_discussed.is_empty());
    }

    #[test]
    fn test_summary_collects_unique_topics_and_recent_five() {
        let store = SessionStore::new(50);
        for i in 0..7 {
            let topic = if i % 2 == 0 { Topic::General } else { Topic::ResumeAdvice };
            store.record("s", Exchange::new(&format!("q{i}"), "a", topic));
        }
        let summary = store.summary("s").unwrap();
        assert_eq!(summary.total_messages, 7);
        assert_eq!(summary.topics_discussed, vec![Topic::ResumeAdvice, Topic::General]);
        assert_eq!(summary.recent_messages.len(), 5);
        assert_eq!(summary.recent_messages[0].user, "q2");
        assert!(summary.conversation_start <= summary.last_activity);
    }

    #[test]
    fn test_clear_reports_existence() {
        let store = SessionStore::new(50);
        store.ensure("s");
        assert!(store.clear("s"));
        assert!(!store.clear("s"));
        assert!(store.summary("s").is_none());
    }

    #[test]
    fn test_transcript_format() {
        let text = transcript(&[
            Exchange::new("hi", "hello", Topic::General),
            Exchange::new("cv?", "sure", Topic::ResumeAdvice),
        ]);
        assert_eq!(text, "User: hi\nBot: hello\nUser: cv?\nBot: sure");
    }

    #[test]
    fn test_exchange_serializes_topic_as_type() {
        let json = serde_json::to_value(Exchange::new("q", "a", Topic::WebSearch)).unwrap();
        assert_eq!(json["type"], "web_search");
    }
}
