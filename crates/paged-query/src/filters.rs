//! Catalog Filter Parameters
//!
//! The parameter record both catalog scopes are queried with. Compared
//! field by field: any difference starts a new generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Owning app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub u32);

/// Parent collection of the item scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(pub u32);

/// Distribution status filter.
///
/// What the source is expected to match, over the accounts in scope (all
/// accounts, or only the selected account):
/// - `Errors`: any account in upload_error, delete_error or partially_deleted
/// - `Uploading`: any account uploading or not yet uploaded
/// - `Skipped`: any account skipped
/// - `Complete`: every account uploaded or skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Errors,
    Uploading,
    Skipped,
    Complete,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Errors,
        StatusFilter::Uploading,
        StatusFilter::Skipped,
        StatusFilter::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Errors => "errors",
            StatusFilter::Uploading => "uploading",
            StatusFilter::Skipped => "skipped",
            StatusFilter::Complete => "complete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All statuses",
            StatusFilter::Errors => "Has errors",
            StatusFilter::Uploading => "In progress",
            StatusFilter::Skipped => "Has skipped",
            StatusFilter::Complete => "Complete",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "errors" => StatusFilter::Errors,
            "uploading" => StatusFilter::Uploading,
            "skipped" => StatusFilter::Skipped,
            "complete" => StatusFilter::Complete,
            _ => StatusFilter::All,
        }
    }
}

/// Aspect ratio of a creative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "16:9")]
    Horizontal,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Vertical,
        AspectRatio::Horizontal,
        AspectRatio::Square,
        AspectRatio::Portrait,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Vertical => "9:16",
            AspectRatio::Horizontal => "16:9",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "4:5",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        AspectRatio::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Nominal pixel size for this ratio
    pub fn resolution(&self) -> &'static str {
        match self {
            AspectRatio::Vertical => "1080×1920",
            AspectRatio::Horizontal => "1920×1080",
            AspectRatio::Square => "1080×1080",
            AspectRatio::Portrait => "1080×1350",
        }
    }
}

/// Everything that shapes one scope's result set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilters {
    /// Settled free-text query (never the raw keystrokes)
    pub search: String,
    pub status: StatusFilter,
    /// `None` = all accounts
    pub account: Option<String>,
    /// `None` = all ratios
    pub ratio: Option<AspectRatio>,
    /// Only items created on or after this day
    pub created_after: Option<NaiveDate>,
    pub app: AppId,
    /// Set only for the item scope
    pub collection: Option<CollectionId>,
}

impl CatalogFilters {
    /// Unfiltered collection scope of an app
    pub fn for_app(app: AppId) -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            account: None,
            ratio: None,
            created_after: None,
            app,
            collection: None,
        }
    }
}

/// Parse the value of an `<input type="date">` (`YYYY-MM-DD`); blank or
/// malformed input means no bound.
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wise_equality() {
        let a = CatalogFilters::for_app(AppId(1));
        let mut b = CatalogFilters::for_app(AppId(1));
        assert_eq!(a, b);

        b.search = "x".to_string();
        assert_ne!(a, b);

        let mut c = a.clone();
        c.app = AppId(2);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serializes_for_ipc() {
        let mut f = CatalogFilters::for_app(AppId(1));
        f.ratio = Some(AspectRatio::Vertical);
        f.created_after = NaiveDate::from_ymd_opt(2024, 3, 1);
        f.status = StatusFilter::Complete;

        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["ratio"], "9:16");
        assert_eq!(json["createdAfter"], "2024-03-01");
        assert_eq!(json["status"], "complete");
        assert_eq!(json["app"], 1);
        assert!(json["collection"].is_null());
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("  "), None);
        assert_eq!(parse_date_input("2024-13-40"), None);
        assert_eq!(parse_date_input("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_option_round_trips() {
        for status in StatusFilter::ALL {
            assert_eq!(StatusFilter::from_str(status.as_str()), status);
        }
        assert_eq!(StatusFilter::from_str("bogus"), StatusFilter::All);
        assert_eq!(AspectRatio::from_str("4:5"), Some(AspectRatio::Portrait));
        assert_eq!(AspectRatio::from_str("all"), None);
    }
}
