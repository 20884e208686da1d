//! Inquiry intake rules: demo follow-up timestamps and message previews.

use crate::status::DemoStatus;
use crate::types::Timestamp;

/// Characters shown in a message preview before the ellipsis.
pub const PREVIEW_LENGTH: usize = 50;

/// Messages returned by the admin inbox listing.
pub const INBOX_LIMIT: i64 = 50;

/// First [`PREVIEW_LENGTH`] characters of a message, with `...` appended when
/// the message is longer.
pub fn message_preview(message: &str) -> String {
    let mut chars = message.char_indices();
    match chars.nth(PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}

/// Compute `contacted_at` after a status change.
///
/// Stamped only on the first move into `contacted`; an existing stamp is
/// never overwritten or cleared.
pub fn resolve_contacted_at(
    status: DemoStatus,
    current: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    match (status, current) {
        (_, Some(existing)) => Some(existing),
        (DemoStatus::Contacted, None) => Some(now),
        (_, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn short_message_is_unchanged() {
        assert_eq!(message_preview("Hello"), "Hello");
        let exact = "x".repeat(PREVIEW_LENGTH);
        assert_eq!(message_preview(&exact), exact);
    }

    #[test]
    fn long_message_is_truncated() {
        let long = "y".repeat(PREVIEW_LENGTH + 10);
        let preview = message_preview(&long);
        assert_eq!(preview, format!("{}...", "y".repeat(PREVIEW_LENGTH)));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let long = "é".repeat(PREVIEW_LENGTH + 1);
        assert_eq!(
            message_preview(&long),
            format!("{}...", "é".repeat(PREVIEW_LENGTH))
        );
    }

    #[test]
    fn contacted_stamped_on_first_transition_only() {
        let first = Utc::now() - Duration::days(1);
        let later = Utc::now();

        let stamped = resolve_contacted_at(DemoStatus::Contacted, None, first);
        assert_eq!(stamped, Some(first));

        let moved_on = resolve_contacted_at(DemoStatus::Completed, stamped, later);
        assert_eq!(moved_on, Some(first));

        let again = resolve_contacted_at(DemoStatus::Contacted, moved_on, later);
        assert_eq!(again, Some(first));
    }

    #[test]
    fn other_statuses_do_not_stamp() {
        assert_eq!(
            resolve_contacted_at(DemoStatus::Pending, None, Utc::now()),
            None
        );
    }
}
