//! Optional config from .mazdoorrc or ~/.mazdoorrc (JSON). Merged with env and CLI.

use std::path::Path;

/// Optional config from file. CLI and env override these.
#[derive(Default, Debug)]
pub struct Config {
    pub workers: Option<usize>,
    pub quiet: Option<bool>,
    pub thread_name: Option<String>,
}

/// Load config from .mazdoorrc in dir, then ~/.mazdoorrc. Missing or
/// invalid file = default.
pub fn load_config(dir: &Path) -> Config {
    let mut cfg = Config::default();
    let home = dirs_home();
    let candidates = [
        dir.join(".mazdoorrc"),
        home.map(|h| h.join(".mazdoorrc")).unwrap_or_else(|| dir.join(".none")),
    ];
    for path in &candidates {
        if path.is_file() {
            if let Ok(s) = std::fs::read_to_string(path) {
                if let Ok(v) = serde_json::from_str::<serde_json::Value>(&s) {
                    if let Some(w) = v.get("workers").and_then(|x| x.as_u64()) {
                        cfg.workers = Some(w as usize);
                    }
                    if let Some(q) = v.get("quiet").and_then(|x| x.as_bool()) {
                        cfg.quiet = Some(q);
                    }
                    if let Some(t) = v.get("threadName").and_then(|x| x.as_str()) {
                        cfg.thread_name = Some(t.to_string());
                    }
                }
            }
            break;
        }
    }
    cfg
}

fn dirs_home() -> Option<std::path::PathBuf> {
    #[cfg(unix)]
    {
        std::env::var("HOME").ok().map(std::path::PathBuf::from)
    }
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(std::path::PathBuf::from)
    }
}

/// Worker count with precedence CLI > MAZDOOR_WORKERS > file > CPU count.
pub fn effective_workers(cli: Option<usize>, cfg: &Config) -> usize {
    if let Some(n) = cli {
        return n;
    }
    if let Ok(v) = std::env::var("MAZDOOR_WORKERS") {
        if let Ok(n) = v.trim().parse::<usize>() {
            return n;
        }
    }
    cfg.workers.unwrap_or_else(|| num_cpus::get().max(1))
}

/// Quiet flag with precedence CLI > MAZDOOR_QUIET > file > off.
pub fn effective_quiet(cli: bool, cfg: &Config) -> bool {
    if cli {
        return true;
    }
    if let Ok(v) = std::env::var("MAZDOOR_QUIET") {
        return v == "1" || v.eq_ignore_ascii_case("true");
    }
    cfg.quiet.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(".mazdoorrc"),
            r#"{"workers": 6, "quiet": true, "threadName": "crew"}"#,
        )
        .unwrap();

        let cfg = load_config(tmp.path());
        assert_eq!(cfg.workers, Some(6));
        assert_eq!(cfg.quiet, Some(true));
        assert_eq!(cfg.thread_name.as_deref(), Some("crew"));
    }

    #[test]
    fn test_invalid_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".mazdoorrc"), "not json at all").unwrap();

        let cfg = load_config(tmp.path());
        assert!(cfg.workers.is_none());
        assert!(cfg.quiet.is_none());
    }

    #[test]
    fn test_missing_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = load_config(tmp.path());
        assert!(cfg.workers.is_none());
    }

    #[test]
    fn test_cli_wins_over_file() {
        let cfg = Config {
            workers: Some(2),
            ..Default::default()
        };
        assert_eq!(effective_workers(Some(9), &cfg), 9);
        assert!(effective_quiet(true, &Config::default()));
    }

    #[test]
    fn test_file_workers_used_without_cli() {
        std::env::remove_var("MAZDOOR_WORKERS");
        let cfg = Config {
            workers: Some(3),
            ..Default::default()
        };
        assert_eq!(effective_workers(None, &cfg), 3);
    }

    #[test]
    fn test_default_workers_is_positive() {
        std::env::remove_var("MAZDOOR_WORKERS");
        assert!(effective_workers(None, &Config::default()) >= 1);
    }
}
