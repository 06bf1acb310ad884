//! Progress reporting for coordination rounds

use colored::Colorize;
use council_application::{CoordinationProgress, CoordinationStage};
use council_domain::AdvisorId;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a coordination round with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn gather_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: CoordinationStage) -> &'static str {
        match stage {
            CoordinationStage::Routing => "Choosing advisors",
            CoordinationStage::Gathering => "Consulting advisors",
            CoordinationStage::Resolving => "Comparing advice",
            CoordinationStage::Extracting => "Extracting actions",
        }
    }

    fn advisor_status(advisor: AdvisorId, success: bool, cached: bool) -> String {
        match (success, cached) {
            (true, true) => format!("{} {} (cached)", "v".green(), advisor.display_name()),
            (true, false) => format!("{} {}", "v".green(), advisor.display_name()),
            (false, _) => format!("{} {}", "x".red(), advisor.display_name()),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinationProgress for ProgressReporter {
    fn on_stage_start(&self, stage: CoordinationStage, total_tasks: usize) {
        let pb = if stage == CoordinationStage::Gathering {
            let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
            pb.set_style(Self::gather_style());
            pb
        } else {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("...");

        *self.stage_bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn on_advisor_complete(&self, advisor: AdvisorId, success: bool, cached: bool) {
        if let Some(pb) = self.stage_bar.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            pb.set_message(Self::advisor_status(advisor, success, cached));
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: CoordinationStage) {
        if let Some(pb) = self
            .stage_bar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            if stage == CoordinationStage::Gathering {
                pb.finish_with_message(format!("{}", "done".green()));
            } else {
                pb.finish_and_clear();
            }
        }
    }
}

/// Plain line-based progress on stderr, for non-interactive terminals
pub struct SimpleProgress;

impl CoordinationProgress for SimpleProgress {
    fn on_stage_start(&self, stage: CoordinationStage, total_tasks: usize) {
        let name = ProgressReporter::stage_display_name(stage);
        if stage == CoordinationStage::Gathering {
            eprintln!("{} {} ({} advisors)", "->".cyan(), name.bold(), total_tasks);
        } else {
            eprintln!("{} {}", "->".cyan(), name.bold());
        }
    }

    fn on_advisor_complete(&self, advisor: AdvisorId, success: bool, cached: bool) {
        eprintln!("  {}", ProgressReporter::advisor_status(advisor, success, cached));
    }

    fn on_stage_complete(&self, _stage: CoordinationStage) {}
}
