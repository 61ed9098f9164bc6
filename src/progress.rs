use indicatif::{ProgressBar, ProgressStyle};

/// Batches smaller than this run without a bar
const PROGRESS_THRESHOLD: u64 = 10;

const TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Progress bar shared by the batch workers
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(total: u64, enabled: bool) -> Self {
        if !enabled || total < PROGRESS_THRESHOLD {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            bar.set_style(style.progress_chars("=>-"));
        }
        Self { bar: Some(bar) }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Advance by one settled file
    pub fn file_done(&self, name: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(name.to_string());
            bar.inc(1);
        }
    }

    /// Run `f` with the bar hidden so terminal output does not tear it
    pub fn suspend<F: FnOnce()>(&self, f: F) {
        match self.bar {
            Some(ref bar) => bar.suspend(f),
            None => f(),
        }
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
