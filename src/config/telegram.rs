//! Telegram bot configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token (from @BotFather, `<bot_id>:<secret>`)
    pub bot_token: String,

    /// Public HTTPS URL the bot webhook should be registered under
    pub webhook_url: Option<String>,

    /// Admin chat ids to notify about sales (comma-separated)
    pub admin_ids: Option<String>,
}

impl TelegramConfig {
    /// Admin chat ids parsed from the comma-separated list
    pub fn admin_id_list(&self) -> Vec<i64> {
        self.admin_ids
            .as_ref()
            .map(|s| {
                s.split(',')
                    .filter_map(|part| part.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.is_empty() {
            return Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"));
        }
        // BotFather tokens are always `<numeric id>:<secret>`
        let mut parts = self.bot_token.splitn(2, ':');
        let id_part = parts.next().unwrap_or_default();
        let secret_part = parts.next().unwrap_or_default();
        if id_part.is_empty()
            || secret_part.is_empty()
            || !id_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidBotToken);
        }

        if let Some(ids) = &self.admin_ids {
            for part in ids.split(',') {
                let part = part.trim();
                if !part.is_empty() && part.parse::<i64>().is_err() {
                    return Err(ValidationError::InvalidAdminId(part.to_string()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> TelegramConfig {
        TelegramConfig {
            bot_token: "123456:ABC-def_ghi".to_string(),
            webhook_url: None,
            admin_ids: Some("111, 222,333".to_string()),
        }
    }

    #[test]
    fn test_admin_id_list_parsing() {
        let config = valid_config();
        assert_eq!(config.admin_id_list(), vec![111, 222, 333]);
    }

    #[test]
    fn test_admin_id_list_empty() {
        let config = TelegramConfig {
            admin_ids: None,
            ..valid_config()
        };
        assert!(config.admin_id_list().is_empty());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_token() {
        let config = TelegramConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_malformed_token() {
        let config = TelegramConfig {
            bot_token: "not-a-token".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_admin_id() {
        let config = TelegramConfig {
            admin_ids: Some("111,abc".to_string()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAdminId(_))
        ));
    }
}
