use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn wizard_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/wizard.log")
}

/// Appends one JSON line to `path`. Logging never fails the caller.
pub fn append_wizard_log(path: &Path, level: &str, event: &str, message: &str) {
    let payload = serde_json::json!({
        "timestamp": now_secs(),
        "level": level,
        "event": event,
        "message": message,
    });

    let Ok(line) = serde_json::to_string(&payload) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn append_wizard_log_writes_json_lines() {
        let dir = tempdir().expect("tempdir");
        let path = wizard_log_path(dir.path());
        append_wizard_log(&path, "info", "wizard.transition.applied", "landing -> entry");
        append_wizard_log(&path, "warn", "wizard.transition.rejected", "busy");

        let raw = fs::read_to_string(&path).expect("read log");
        let lines: Vec<serde_json::Value> = raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "wizard.transition.applied");
        assert_eq!(lines[1]["level"], "warn");
        assert_eq!(lines[1]["message"], "busy");
    }
}
