/// Logs a line tagged with the originating component. Timestamp, level,
/// pid, and tid come from the fern formatter; the macro only adds the
/// `[component]` prefix so lines from different subsystems can be told
/// apart in one stream.
///
/// Usage:
/// ```rust
/// sentinel_log!(Level::Info, "engine", "Engine started");
/// sentinel_log!(Level::Error, "config", "Config load failed: {}", err);
/// ```
#[macro_export]
macro_rules! sentinel_log {
    ($level:expr, $component:expr, $fmt:expr $(, $($arg:tt)+)?) => {
        log::log!(
            $level,
            concat!("[", $component, "] ", $fmt)
            $(, $($arg)+)?
        )
    };
}
