//! Console output formatter for coordinated results

use colored::Colorize;
use council_domain::{ActionItem, AgentResponse, CoordinatedResult, OutputFormat};

/// Formats coordinated results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn ANSI colors on or off for everything rendered afterwards
    pub fn set_color(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// Render in the requested format
    pub fn render(result: &CoordinatedResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Summary => Self::format_summary(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete result
    pub fn format(result: &CoordinatedResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Advisor Council"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Advisors:".cyan().bold(),
            result
                .responding_agents
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.push_str(&format!(
            "{} {:.0}% ({}/{} answered)\n",
            "Confidence:".cyan().bold(),
            result.confidence_score * 100.0,
            result.succeeded_count(),
            result.responding_agents.len()
        ));

        output.push_str(&Self::section_header("Head Coach"));
        output.push_str(&format!("\n{}\n", result.primary_message));

        output.push_str(&Self::section_header("Advisor Insights"));
        for response in &result.agent_insights {
            output.push_str(&Self::insight(response));
        }

        if !result.consensus_recommendations.is_empty() {
            output.push_str(&format!("\n{}\n", "Areas of Consensus:".green().bold()));
            for point in &result.consensus_recommendations {
                output.push_str(&format!("  * {}\n", point));
            }
        }

        if !result.conflicts_resolved.is_empty() {
            output.push_str(&format!("\n{}\n", "Resolved Disagreements:".yellow().bold()));
            for point in &result.conflicts_resolved {
                output.push_str(&format!("  * {}\n", point));
            }
        }

        output.push_str(&Self::actions(&result.action_items));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &CoordinatedResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Primary message and action items only
    pub fn format_summary(result: &CoordinatedResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Advisor Council ===".cyan().bold()));
        output.push_str(&format!("{}\n", result.primary_message));
        output.push_str(&Self::actions(&result.action_items));

        let failed: Vec<_> = result
            .responding_agents
            .iter()
            .filter(|a| !a.succeeded)
            .map(|a| a.name.as_str())
            .collect();
        if !failed.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Unavailable:".dimmed(),
                failed.join(", ").dimmed()
            ));
        }

        output
    }

    fn insight(response: &AgentResponse) -> String {
        let name = response.advisor_id.display_name();
        if response.is_error() {
            return format!(
                "\n{}\n{}\n",
                format!("── {} ──", name).red().bold(),
                response.message
            );
        }

        let mut title = format!("── {} ({:.0}%) ──", name, response.confidence * 100.0);
        if response.is_cached() {
            title.push_str(" [cached]");
        }
        format!("\n{}\n{}\n", title.yellow().bold(), response.message)
    }

    fn actions(items: &[ActionItem]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let mut output = format!("\n{}\n", "Action Items:".cyan().bold());
        for (index, item) in items.iter().enumerate() {
            let exercises = item.exercises();
            let detail = if exercises.is_empty() {
                String::new()
            } else {
                format!(" [{}]", exercises.join(", "))
            };
            output.push_str(&format!(
                "  {}. {}{} {}\n",
                index + 1,
                item.label.bold(),
                detail,
                format!(
                    "(priority {}, {:.0}%, {})",
                    item.priority,
                    item.confidence * 100.0,
                    item.source.display_name()
                )
                .dimmed()
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "═".repeat(60);
        format!(
            "{}\n{}\n{}",
            line.cyan(),
            format!("  {}", title).cyan().bold(),
            line.cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("▶ {}", title).magenta().bold())
    }

    fn footer() -> String {
        format!("\n{}\n", "═".repeat(60).cyan())
    }
}
