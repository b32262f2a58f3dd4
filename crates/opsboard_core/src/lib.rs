//! Core of the team operations board.
//! This crate owns the entity stores, reference resolution, statistics and
//! change notification consumed by presentation layers.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AuthConfig, BoardConfig, ConfigError};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::attendance::{AttendanceDraft, AttendanceRecord, AttendanceStatistics};
pub use model::employee::{Employee, EmployeeDraft, EmployeePatch};
pub use model::entity::{Entity, EntityId, EntityKind};
pub use model::manager::{Manager, ManagerRole};
pub use model::mom::{
    content_preview, parse_attendees, MeetingMinutes, MeetingMinutesDraft, MeetingMinutesPatch,
};
pub use model::quest::{Quest, QuestDraft, QuestPatch, QuestStatus};
pub use model::task::{Task, TaskDraft, TaskPatch, TaskStatus};
pub use model::validation::ValidationError;
pub use repo::attendance_repo::AttendanceLog;
pub use repo::manager_repo::ManagerDirectory;
pub use repo::notify::{ChangeEvent, ChangeKind, ChangeNotifier, Subscription};
pub use repo::store::{
    EmployeeStore, EntityStore, MomStore, QuestStore, StoreError, StoreResult, TaskStore,
};
pub use service::auth::{AuthError, AuthSession};
pub use service::board::{Board, DashboardSummary, SeedData};
pub use service::calendar::DateWindow;
pub use service::resolver::{DanglingReference, ReferenceResolver, Resolved};
pub use service::stats::{
    compare_names, completion_rate, growth_percent, MonthlyAttendance, QuestTaskCounts,
    RecentActivity, TaskStatusCounts, WeeklyGrowth,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
