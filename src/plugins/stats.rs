//! Admin-only usage statistics.

use tracing::error;

use crate::bot::dispatcher::AppState;
use crate::dialogs::ERROR_NOTICE;
use crate::models::TextMessage;
use crate::storage::ActivitySummary;

pub const ACCESS_DENIED: &str = "🔒 У вас нет доступа к этой команде.";
pub const EMPTY: &str = "📊 Статистика пока пуста.";

fn render(summary: &ActivitySummary) -> String {
    let top = summary
        .top_actions
        .iter()
        .map(|(action, count)| format!("{}: {}", action, count))
        .collect::<Vec<_>>()
        .join("\n");

    let mut text = format!(
        "📊 Общая статистика:\n\
         👥 Уникальных пользователей: {}\n\
         📝 Всего записей: {}\n\n\
         🔝 Топ-5 команд:\n{}\n\n\
         Последние 5 записей:\n",
        summary.unique_users, summary.total_records, top
    );
    for record in &summary.recent {
        text.push_str(&format!(
            "👤 {} ({})\n🕒 {}\n📝 {}\n───────────────\n",
            record.username, record.user_id, record.timestamp, record.action
        ));
    }
    text
}

pub async fn stats(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    if !state.is_admin(msg.identity) {
        state.say(msg.peer, ACCESS_DENIED).await;
        return Ok(());
    }

    let reply = match state.activity.summary().await {
        Ok(summary) if summary.is_empty() => EMPTY.to_string(),
        Ok(summary) => render(&summary),
        Err(e) => {
            error!("Failed to read usage log: {}", e);
            ERROR_NOTICE.to_string()
        }
    };
    state.say(msg.peer, reply).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Identity, Peer};
    use crate::storage::ActivityRecord;
    use crate::testing::{Harness, text};

    #[test]
    fn summary_rendering() {
        let summary = ActivitySummary {
            unique_users: 2,
            total_records: 3,
            top_actions: vec![("/start".to_string(), 2), ("/aqi".to_string(), 1)],
            recent: vec![ActivityRecord {
                user_id: "7".to_string(),
                username: "@anna".to_string(),
                action: "/aqi".to_string(),
                timestamp: "2024-05-01 10:00:00".to_string(),
            }],
        };
        let text = render(&summary);
        assert!(text.contains("👥 Уникальных пользователей: 2"));
        assert!(text.contains("🔝 Топ-5 команд:\n/start: 2\n/aqi: 1"));
        assert!(text.ends_with("👤 @anna (7)\n🕒 2024-05-01 10:00:00\n📝 /aqi\n───────────────\n"));
    }

    #[tokio::test]
    async fn only_admin_may_read() {
        let h = Harness::new();
        stats(&h.state, &text(Identity(2), Peer(2), "/stats")).await.unwrap();
        assert_eq!(h.transport.last_text(), ACCESS_DENIED);

        stats(&h.state, &text(Identity(1), Peer(1), "/stats")).await.unwrap();
        assert_eq!(h.transport.last_text(), EMPTY);
    }

    #[tokio::test]
    async fn read_failure_hides_details() {
        let h = Harness::new();
        h.activity.fail_reads();

        stats(&h.state, &text(Identity(1), Peer(1), "/stats")).await.unwrap();
        let reply = h.transport.last_text();
        assert_eq!(reply, ERROR_NOTICE);
        assert!(!reply.contains("user_statistics.csv"));
    }
}
