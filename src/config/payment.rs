//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe webhooks + pricing mode)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Active pricing mode
    #[serde(default)]
    pub pricing_mode: PricingMode,

    /// Stripe price id sold as the basic plan
    pub basic_price_id: Option<String>,

    /// Stripe price id sold as the premium plan
    pub premium_price_id: Option<String>,
}

/// Which price table the deployment is selling from
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Stripe test-mode prices at real nominal amounts
    #[default]
    Test,
    /// Live prices at real nominal amounts
    Live,
    /// Live smoke-test prices where every plan costs the same nominal dollar
    LiveOneDollar,
}

impl PricingMode {
    /// True when all plans share one nominal amount, so the amount
    /// heuristic cannot distinguish them
    pub fn is_uniform_nominal(&self) -> bool {
        matches!(self, PricingMode::LiveOneDollar)
    }

    /// True when charges run against the Stripe test environment
    pub fn is_test_mode(&self) -> bool {
        matches!(self, PricingMode::Test)
    }
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__STRIPE_WEBHOOK_SECRET",
            ));
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        for price_id in [&self.basic_price_id, &self.premium_price_id]
            .into_iter()
            .flatten()
        {
            if !price_id.starts_with("price_") {
                return Err(ValidationError::InvalidPriceId(price_id.clone()));
            }
        }

        Ok(())
    }
}
