pub mod de;
pub mod from_row;
pub mod history;
pub mod scalar;
pub mod scan_history;
pub mod snapshot;
pub mod template;
pub mod user;

pub use from_row::FromSqliteRow;
pub use history::HistoryRecord;
pub use scalar::Scalar;
pub use scan_history::ScanHistoryRecord;
pub use snapshot::{ImportSummary, Snapshot};
pub use template::{ExerciseSet, NamedExercise, Template};
pub use user::{Credentials, User, UserResponse};
