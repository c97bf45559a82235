pub mod probe;
pub mod report;
pub mod server;

// Re-export commonly used types
pub use probe::{probe_startup, ProbeOptions, StartupOutcome};
pub use report::{CheckStatus, SmokeReport};
pub use server::ServerSpec;
