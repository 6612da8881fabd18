pub mod history_repo;
pub mod scan_history_repo;
pub mod session_repo;
pub mod snapshot_repo;
pub mod template_repo;
pub mod user_repo;

pub use session_repo::SessionRepository;
pub use snapshot_repo::SnapshotRepository;
pub use user_repo::UserRepository;
