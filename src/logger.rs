use std::fs::OpenOptions;
use std::path::Path;

/// Sends `log` output to `path`; the terminal belongs to the UI. The level
/// comes from `RUST_LOG` and defaults to `info`. Calling this again once a
/// logger is installed is a no-op.
pub fn init(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialised");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_twice() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("logs").join("quiz_debug.log");
        init(&path).unwrap();
        init(&path).unwrap();
        log::info!("Test log message");
        assert!(path.exists());
    }
}
