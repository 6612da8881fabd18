/// Git description stamped by `build.rs`.
pub const GIT_VERSION: &str = env!("GIT_VERSION");
