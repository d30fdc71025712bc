//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for batch generation runs
///
/// Shows one bar per run for small batches and adds a single batch bar
/// once the file count would spam the terminal. Individual bars track
/// observation attempts against the solver's attempt budget.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    run_bars: Vec<ProgressBar>,
    /// Stores (`filename`, `attempts`, `budget`) for rolling window display
    run_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            run_bars: Vec::new(),
            run_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(ATTEMPT_STYLE.clone());
            self.run_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Configure the progress display for a new run
    pub fn start_run(&mut self, index: usize, path: &Path, budget: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.run_states.len() {
            self.run_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.run_states.get_mut(index) {
            *state = (display_name, 0, budget);
        }
        self.refresh();
    }

    /// Report the current observation attempt count for a run
    pub fn update_attempts(&mut self, index: usize, attempts: usize) {
        if let Some(state) = self.run_states.get_mut(index) {
            state.1 = attempts;
        }
        self.refresh();
    }

    /// Mark a run as completed and advance the batch bar
    pub fn complete_run(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.run_states.get_mut(index) {
            let budget = state.2;
            state.0 = format!("✓ {}", state.0);
            state.1 = budget;
        }
        self.refresh();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recently started runs on the available bars
    fn refresh(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .run_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start = active.len().saturating_sub(self.run_bars.len());
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, (name, attempts, budget)) in self.run_bars.iter().zip(visible) {
            bar.set_length(*budget as u64);
            bar.set_position((*attempts).min(*budget) as u64);
            let width = budget.to_string().len();
            bar.set_message(name.clone());
            bar.set_prefix(format!("{attempts:>width$}/{budget}"));
        }

        for bar in self.run_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
