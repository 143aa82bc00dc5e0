//! Timestamped logging with quiet-mode env switches.

use chrono::Local;

fn is_quiet() -> bool {
    if std::env::var("MAZDOOR_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
    {
        return true;
    }
    std::env::var("MAZDOOR_LOG")
        .map(|v| {
            let v = v.to_lowercase();
            v == "quiet" || v == "error"
        })
        .unwrap_or(false)
}

/// Log to stdout unless quiet mode is on.
pub fn log(message: &str) {
    if is_quiet() {
        return;
    }
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("[{}] {}", timestamp, message);
}

/// Errors always reach stderr, quiet or not.
pub fn log_error(message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    eprintln!("[{}] {}", timestamp, message);
}
