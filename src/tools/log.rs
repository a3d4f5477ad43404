use chrono::Local;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

pub enum LogServiceType {
    Detection,
    Comparison,
    Viewer,
    Config,
    Other
}
impl LogServiceType {
    fn as_str(&self) -> &'static str {
        match self {
            LogServiceType::Detection => "DETECTION",
            LogServiceType::Comparison => "COMPARISON",
            LogServiceType::Viewer => "VIEWER",
            LogServiceType::Config => "CONFIG",
            LogServiceType::Other => "OTHER"
        }
    }
}

struct LocalClock;

impl FormatTime for LocalClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_timer(LocalClock)
        .with_target(false)
        .try_init();
}

pub fn log_info(service: LogServiceType, message: String) {
    tracing::info!("{} - {}", service.as_str(), message)
}

pub fn log_warn(service: LogServiceType, message: String) {
    tracing::warn!("{} - {}", service.as_str(), message)
}

pub fn log_error(service: LogServiceType, message: String) {
    tracing::error!("{} - {}", service.as_str(), message)
}
