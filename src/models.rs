//! Frontend Models
//!
//! Data structures matching the host's catalog payloads.

use chrono::NaiveDate;
use paged_query::{AppId, AspectRatio, CollectionId, Keyed};
use serde::{Deserialize, Serialize};

/// Owning app, top-level selector entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogApp {
    pub id: AppId,
    pub name: String,
}

/// Distribution state of one creative on one ad account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStatus {
    Uploaded,
    Uploading,
    NotUploaded,
    UploadError,
    Removing,
    PartiallyDeleted,
    DeleteError,
    Skipped,
}

impl DistributionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DistributionStatus::Uploaded => "Uploaded",
            DistributionStatus::Uploading => "Uploading",
            DistributionStatus::NotUploaded => "Not Uploaded",
            DistributionStatus::UploadError => "Upload Error",
            DistributionStatus::Removing => "Removing",
            DistributionStatus::PartiallyDeleted => "Partially Deleted",
            DistributionStatus::DeleteError => "Delete Error",
            DistributionStatus::Skipped => "Skipped",
        }
    }

    /// CSS modifier for the status badge
    pub fn css_class(&self) -> &'static str {
        match self {
            DistributionStatus::Uploaded => "status-uploaded",
            DistributionStatus::Uploading => "status-uploading",
            DistributionStatus::NotUploaded => "status-not-uploaded",
            DistributionStatus::UploadError => "status-upload-error",
            DistributionStatus::Removing => "status-removing",
            DistributionStatus::PartiallyDeleted => "status-partially-deleted",
            DistributionStatus::DeleteError => "status-delete-error",
            DistributionStatus::Skipped => "status-skipped",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            DistributionStatus::UploadError
                | DistributionStatus::DeleteError
                | DistributionStatus::PartiallyDeleted
        )
    }

    /// Settled states; nothing left to do on the account
    pub fn is_done(&self) -> bool {
        matches!(self, DistributionStatus::Uploaded | DistributionStatus::Skipped)
    }
}

/// One ad account a creative is distributed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_name: String,
    pub status: DistributionStatus,
    #[serde(default)]
    pub skip_reason: Option<String>,
}

/// One ad platform and its accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Platform {
    pub fn error_count(&self) -> usize {
        self.accounts.iter().filter(|a| a.status.is_error()).count()
    }

    pub fn uploaded_count(&self) -> usize {
        self.accounts.iter().filter(|a| a.status == DistributionStatus::Uploaded).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.accounts.iter().filter(|a| a.status == DistributionStatus::Skipped).count()
    }

    /// Every account settled (uploaded or skipped)
    pub fn is_settled(&self) -> bool {
        self.accounts.iter().all(|a| a.status.is_done())
    }

    /// CSS modifier for the platform header: errors win over progress
    pub fn health_class(&self) -> &'static str {
        if self.error_count() > 0 {
            "platform-error"
        } else if self.is_settled() {
            "platform-done"
        } else {
            "platform-pending"
        }
    }
}

/// Parent-scope entry: a named group of creatives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub creative_count: u32,
    #[serde(default)]
    pub error_count: u32,
    pub created_at: NaiveDate,
}

impl Keyed for Collection {
    type Key = CollectionId;

    fn key(&self) -> CollectionId {
        self.id
    }
}

/// Item-scope entry: one creative and where it is distributed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    pub id: u32,
    pub name: String,
    pub ratio: AspectRatio,
    pub resolution: String,
    pub campaigns: u32,
    pub impressions: u64,
    pub clicks: u64,
    pub duration: String,
    pub platforms: Vec<Platform>,
    /// CSS color for the thumbnail placeholder
    pub thumbnail: String,
    pub created_at: NaiveDate,
}

impl Keyed for Creative {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

/// Account roll-up shown on a creative card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountSummary {
    pub total: usize,
    pub uploaded: usize,
    pub errors: usize,
}

impl Creative {
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.platforms.iter().flat_map(|p| p.accounts.iter())
    }

    pub fn summary(&self) -> AccountSummary {
        self.accounts().fold(AccountSummary::default(), |mut s, a| {
            s.total += 1;
            if a.status == DistributionStatus::Uploaded {
                s.uploaded += 1;
            }
            if a.status.is_error() {
                s.errors += 1;
            }
            s
        })
    }

    /// Copy with one account retried: a failed upload goes back to
    /// uploading, a failed removal goes back to removing. Other states are
    /// left alone.
    pub fn with_retried(&self, platform: &str, account_idx: usize) -> Creative {
        self.with_account(platform, account_idx, |status| match status {
            DistributionStatus::UploadError => DistributionStatus::Uploading,
            DistributionStatus::DeleteError | DistributionStatus::PartiallyDeleted => {
                DistributionStatus::Removing
            }
            other => other,
        })
    }

    /// Copy with a pending removal cancelled
    pub fn with_cancelled(&self, platform: &str, account_idx: usize) -> Creative {
        self.with_account(platform, account_idx, |status| match status {
            DistributionStatus::Removing => DistributionStatus::Uploaded,
            other => other,
        })
    }

    fn with_account(
        &self,
        platform: &str,
        account_idx: usize,
        next: impl Fn(DistributionStatus) -> DistributionStatus,
    ) -> Creative {
        let mut updated = self.clone();
        if let Some(account) = updated
            .platforms
            .iter_mut()
            .find(|p| p.name == platform)
            .and_then(|p| p.accounts.get_mut(account_idx))
        {
            account.status = next(account.status);
        }
        updated
    }
}
