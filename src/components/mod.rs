//! UI Components
//!
//! Catalog views and their building blocks.

mod app_selector;
mod filter_bar;
mod list_status;
mod collection_list;
mod creative_list;

pub use app_selector::AppSelector;
pub use filter_bar::FilterBar;
pub use list_status::{ListFooter, ResultHeader};
pub use collection_list::{CollectionQuery, CollectionsView};
pub use creative_list::ItemsView;
