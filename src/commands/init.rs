use std::path::Path;

use crate::db::Database;

/// Ids become URL path segments, so prefixes stay to a plain alphabet.
fn validate_prefix(prefix: &str) -> Result<(), String> {
    let valid = !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(format!(
            "invalid id prefix {prefix:?}: use letters, digits, '-' or '_'"
        ))
    }
}

/// Create (or re-open) the reference server's database and store the id prefix.
pub fn run(db_path: &Path, prefix: &str) -> Result<(), String> {
    validate_prefix(prefix)?;

    let existed = db_path.exists();
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
    }

    let db = Database::open(db_path)?;
    db.migrate()?;
    db.set_config("prefix", prefix)?;

    if existed {
        let count = db.list_tasks()?.len();
        println!(
            "Task database at {} already holds {count} task(s); id prefix is now {prefix}",
            db_path.display()
        );
    } else {
        println!("Created task database at {}", db_path.display());
        println!("New tasks get ids like {}", db.generate_id()?);
    }
    Ok(())
}
