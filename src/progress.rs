// Byte progress over the input dump using indicatif.
// When disabled every method is a no-op, so callers never branch on it.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

pub struct InputProgress {
    bar: Option<ProgressBar>,
}

impl InputProgress {
    // Size the bar from the file metadata; an unreadable size just yields an
    // empty bar, the real open error is reported by the reader.
    pub fn new(path: &Path, enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let bar = ProgressBar::new(size);
        bar.set_style(progress_style());
        bar.set_prefix(basename(path));
        Self { bar: Some(bar) }
    }

    pub fn disabled() -> Self {
        Self { bar: None }
    }

    pub fn inc(&self, bytes: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(bytes);
        }
    }

    // Run `f` with the bar hidden so stdout lines do not tear it.
    pub fn suspend<F: FnOnce()>(&self, f: F) {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    // A disabled bar counts as finished.
    pub fn is_finished(&self) -> bool {
        self.bar.as_ref().map_or(true, ProgressBar::is_finished)
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:20} {bytes:>10}/{total_bytes:<10} [{bar:50}] {percent:>3}%",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█ ")
}

fn basename(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
