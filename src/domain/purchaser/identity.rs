//! Purchaser identity resolution.
//!
//! A checkout session never carries the purchaser's Telegram id directly, so
//! it is recovered from the strongest available signal:
//!
//! 1. a numeric custom checkout field the buyer filled in
//! 2. a numeric id planted in session metadata at session creation
//! 3. a buyer email whose local part is entirely numeric

use crate::domain::payment::CheckoutSession;

use super::profile::normalize_username;

/// Custom field keys buyers have entered their id under, in priority order.
const ID_CUSTOM_FIELD_KEYS: [&str; 4] = [
    "telegram_user_id",
    "myidbot",
    "yourtelegramid",
    "yourtelegramidmyidbot",
];

/// Metadata keys a session creator may have planted the id under.
const ID_METADATA_KEYS: [&str; 2] = ["telegram_user_id", "user_id"];

/// Resolves the purchaser's Telegram id from a checkout session.
pub fn resolve_purchaser_id(session: &CheckoutSession) -> Option<i64> {
    for key in ID_CUSTOM_FIELD_KEYS {
        if let Some(id) = session.custom_text(key).and_then(parse_telegram_id) {
            return Some(id);
        }
    }

    for key in ID_METADATA_KEYS {
        if let Some(id) = session.metadata_value(key).and_then(parse_telegram_id) {
            return Some(id);
        }
    }

    session
        .email()
        .and_then(|email| email.split_once('@'))
        .and_then(|(local, _)| parse_telegram_id(local))
}

/// Resolves the purchaser's username from custom fields or metadata.
pub fn resolve_username(session: &CheckoutSession) -> Option<String> {
    session
        .custom_text("username")
        .or_else(|| session.metadata_value("username"))
        .and_then(normalize_username)
}

/// Parses a strictly-numeric Telegram id.
fn parse_telegram_id(raw: &str) -> Option<i64> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(value: serde_json::Value) -> CheckoutSession {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn custom_field_id_wins_over_metadata_and_email() {
        let s = session(serde_json::json!({
            "id": "cs_1",
            "custom_fields": [{ "key": "myidbot", "text": { "value": "111" } }],
            "metadata": { "telegram_user_id": "222" },
            "customer_details": { "email": "333@example.com" }
        }));
        assert_eq!(resolve_purchaser_id(&s), Some(111));
    }

    #[test]
    fn metadata_id_wins_over_email() {
        let s = session(serde_json::json!({
            "id": "cs_1",
            "metadata": { "user_id": "222" },
            "customer_details": { "email": "333@example.com" }
        }));
        assert_eq!(resolve_purchaser_id(&s), Some(222));
    }

    #[test]
    fn numeric_email_local_part_is_last_resort() {
        let s = session(serde_json::json!({
            "id": "cs_1",
            "customer_details": { "email": "424242@example.com" }
        }));
        assert_eq!(resolve_purchaser_id(&s), Some(424242));
    }

    #[test]
    fn non_numeric_signals_are_skipped() {
        let s = session(serde_json::json!({
            "id": "cs_1",
            "custom_fields": [{ "key": "telegram_user_id", "text": { "value": "@buyer" } }],
            "metadata": { "telegram_user_id": "12ab34" },
            "customer_details": { "email": "buyer@example.com" }
        }));
        assert_eq!(resolve_purchaser_id(&s), None);
    }

    #[test]
    fn malformed_custom_field_falls_through_to_metadata() {
        let s = session(serde_json::json!({
            "id": "cs_1",
            "custom_fields": [{ "key": "telegram_user_id", "text": { "value": "n/a" } }],
            "metadata": { "telegram_user_id": "99" }
        }));
        assert_eq!(resolve_purchaser_id(&s), Some(99));
    }

    #[test]
    fn zero_and_negative_ids_rejected() {
        assert_eq!(parse_telegram_id("0"), None);
        assert_eq!(parse_telegram_id("-5"), None);
        assert_eq!(parse_telegram_id("42"), Some(42));
    }

    #[test]
    fn username_from_custom_field_gets_at_prefix() {
        let s = session(serde_json::json!({
            "id": "cs_1",
            "custom_fields": [{ "key": "username", "text": { "value": "buyer" } }]
        }));
        assert_eq!(resolve_username(&s), Some("@buyer".to_string()));
    }

    #[test]
    fn username_falls_back_to_metadata() {
        let s = session(serde_json::json!({
            "id": "cs_1",
            "metadata": { "username": "@meta_buyer" }
        }));
        assert_eq!(resolve_username(&s), Some("@meta_buyer".to_string()));
    }
}
