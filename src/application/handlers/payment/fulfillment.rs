//! Fulfillment dispatcher.
//!
//! Delivers what a settled purchase bought. Basic purchasers get the intro
//! video followed by the course documents in fixed order; premium purchasers
//! get a single confirmation and a human follow-up. Every artifact send is
//! fault-isolated: one failure never stops the rest of the sequence.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::payment::{Plan, BASIC_INTRO_VIDEO};
use crate::ports::Messenger;

const BASIC_WELCOME: &str =
    "Payment received! 🎉 Your meal plan course is on its way, one module at a time.";

const PREMIUM_CONFIRMATION: &str = "Payment received! 🎉 Your personal program is being \
     prepared. Our team will contact you within 24 hours.";

/// Outcome of one artifact in the delivery sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactStatus {
    Sent,
    /// No matching file in the artifact directory; the purchaser got a
    /// "temporarily unavailable" notice in this slot.
    SkippedMissing,
    Failed(String),
}

/// One entry of the delivery sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactDelivery {
    pub name: String,
    pub status: ArtifactStatus,
}

/// What a fulfillment run actually delivered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FulfillmentReport {
    pub deliveries: Vec<ArtifactDelivery>,
}

impl FulfillmentReport {
    pub fn sent_count(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|d| d.status == ArtifactStatus::Sent)
            .count()
    }

    pub fn missing(&self) -> Vec<&str> {
        self.deliveries
            .iter()
            .filter(|d| d.status == ArtifactStatus::SkippedMissing)
            .map(|d| d.name.as_str())
            .collect()
    }
}

/// Delivers purchased content to the purchaser's chat.
pub struct FulfillmentDispatcher {
    messenger: Arc<dyn Messenger>,
    artifact_dir: PathBuf,
    send_delay: Duration,
    followup_form_url: Option<String>,
}

impl FulfillmentDispatcher {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        artifact_dir: PathBuf,
        send_delay: Duration,
        followup_form_url: Option<String>,
    ) -> Self {
        Self {
            messenger,
            artifact_dir,
            send_delay,
            followup_form_url,
        }
    }

    /// The messenger backing this dispatcher.
    pub fn messenger(&self) -> &Arc<dyn Messenger> {
        &self.messenger
    }

    /// Runs the fulfillment policy for a plan.
    pub async fn deliver(&self, plan: Plan, chat_id: i64) -> FulfillmentReport {
        match plan {
            Plan::Basic => self.deliver_basic(chat_id).await,
            Plan::Premium => self.deliver_premium(chat_id).await,
        }
    }

    async fn deliver_premium(&self, chat_id: i64) -> FulfillmentReport {
        if let Err(e) = self.messenger.send_message(chat_id, PREMIUM_CONFIRMATION).await {
            tracing::error!(chat_id, error = %e, "failed to send premium confirmation");
        }
        FulfillmentReport::default()
    }

    async fn deliver_basic(&self, chat_id: i64) -> FulfillmentReport {
        let files = self.list_artifacts().await;
        let mut report = FulfillmentReport::default();

        if let Err(e) = self.messenger.send_message(chat_id, BASIC_WELCOME).await {
            tracing::error!(chat_id, error = %e, "failed to send course welcome");
        }
        self.pace().await;

        // Intro video opens the sequence
        report.deliveries.push(
            self.deliver_artifact(chat_id, BASIC_INTRO_VIDEO, &files, true)
                .await,
        );

        for module in Plan::Basic.course_modules() {
            self.pace().await;
            report
                .deliveries
                .push(self.deliver_artifact(chat_id, module, &files, false).await);
        }

        if let Some(url) = &self.followup_form_url {
            self.pace().await;
            let text = format!(
                "That's the whole course! Please fill in this short form so we can \
                 tailor the next steps: {url}"
            );
            if let Err(e) = self.messenger.send_message(chat_id, &text).await {
                tracing::error!(chat_id, error = %e, "failed to send follow-up form link");
            }
        }

        tracing::info!(
            chat_id,
            sent = report.sent_count(),
            missing = report.missing().len(),
            "course delivery finished"
        );
        report
    }

    /// Sends one artifact, or the unavailable notice when no file matches.
    async fn deliver_artifact(
        &self,
        chat_id: i64,
        name: &str,
        files: &[PathBuf],
        as_video: bool,
    ) -> ArtifactDelivery {
        let Some(path) = find_artifact(files, name) else {
            tracing::warn!(chat_id, artifact = name, "artifact missing from directory");
            let notice = format!(
                "One part of your course (\"{name}\") is temporarily unavailable. \
                 We will send it to you as soon as possible."
            );
            if let Err(e) = self.messenger.send_message(chat_id, &notice).await {
                tracing::error!(chat_id, error = %e, "failed to send unavailable notice");
            }
            return ArtifactDelivery {
                name: name.to_string(),
                status: ArtifactStatus::SkippedMissing,
            };
        };

        let sent = if as_video {
            self.messenger.send_video(chat_id, &path).await
        } else {
            self.messenger.send_document(chat_id, &path).await
        };

        match sent {
            Ok(()) => ArtifactDelivery {
                name: name.to_string(),
                status: ArtifactStatus::Sent,
            },
            Err(e) => {
                tracing::error!(chat_id, artifact = name, error = %e, "artifact send failed");
                ArtifactDelivery {
                    name: name.to_string(),
                    status: ArtifactStatus::Failed(e.to_string()),
                }
            }
        }
    }

    async fn list_artifacts(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        match tokio::fs::read_dir(&self.artifact_dir).await {
            Ok(mut entries) => {
                while let Ok(Some(entry)) = entries.next_entry().await {
                    let path = entry.path();
                    if path.is_file() {
                        files.push(path);
                    }
                }
            }
            Err(e) => {
                tracing::error!(dir = %self.artifact_dir.display(), error = %e,
                    "cannot read artifact directory");
            }
        }
        files
    }

    async fn pace(&self) {
        if !self.send_delay.is_zero() {
            tokio::time::sleep(self.send_delay).await;
        }
    }
}

/// Case-insensitive substring match of `needle` against file stems.
fn find_artifact(files: &[PathBuf], needle: &str) -> Option<PathBuf> {
    let needle = needle.to_lowercase();
    files
        .iter()
        .find(|path| {
            file_stem(path)
                .map(|stem| stem.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .cloned()
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
