//! View state
//!
//! Framework-free state machines behind each screen. The frontend owns one
//! of these per mounted page and renders from it.

mod crud;
mod dashboard;
mod date_filter;
mod donations;
mod form;
mod navigation;
mod notice;

pub use crud::{delete_prompt, Confirm, CrudView, FetchTicket, RemoveOutcome, WriteKind, WriteOp};
pub use dashboard::{
    dashboard_stats, format_inr, recent, Dashboard, DashboardStats, StatCard, StatValue,
    StaticSnapshot, Trend, RECENT_LIMIT,
};
pub use date_filter::{filter_by_date, DateFilter, DateRange};
pub use donations::{total, DonationsView};
pub use form::FormState;
pub use navigation::{NavigationShell, Page, PageContent};
pub use notice::{Notice, NoticeLevel, Notices};
