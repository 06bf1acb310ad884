//! Prompt templates for advisor consultation and assisted routing

use crate::advisor::AdvisorId;
use crate::core::query::Query;

/// Templates for the prompts sent to advisors
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt establishing an advisor's role
    pub fn advisor_system(advisor: AdvisorId) -> &'static str {
        match advisor {
            AdvisorId::Safety => {
                r#"You are the Safety Advisor on an athlete's coaching team.
You focus on injury risk, pain signals and when training must stop or change.
If the athlete reports pain, prioritise protecting the affected area.
Give concrete, conservative advice as a short bulleted list of recommendations."#
            }
            AdvisorId::Recovery => {
                r#"You are the Recovery Advisor on an athlete's coaching team.
You focus on rest, sleep, soreness, mobility and training load management.
Give concrete advice as a short bulleted list of recommendations."#
            }
            AdvisorId::Nutrition => {
                r#"You are the Nutrition Advisor on an athlete's coaching team.
You focus on meals, hydration, macronutrients and fuelling around training.
Give concrete advice as a short bulleted list of recommendations."#
            }
            AdvisorId::Scheduling => {
                r#"You are the Scheduling Advisor on an athlete's coaching team.
You focus on when workouts happen, weekly structure and fitting training around life.
Give concrete advice as a short bulleted list of recommendations."#
            }
            AdvisorId::Coach => {
                r#"You are the Head Coach of an athlete's coaching team.
You give the overall answer to the athlete's question, drawing on training, recovery, nutrition and safety.
Be direct and practical. End with a short bulleted list of recommendations."#
            }
        }
    }

    /// User prompt carrying the query and any session facts
    pub fn advisor_query(query: &Query) -> String {
        let mut prompt = format!("Athlete question:\n{}\n", query.text());

        if !query.context().is_empty() {
            prompt.push_str("\nKnown context:\n");
            for (key, value) in query.context().iter() {
                prompt.push_str(&format!("- {}: {}\n", key, value));
            }
        }

        prompt
    }

    /// Prompt asking the primary advisor which specialists to consult
    pub fn routing(query_text: &str) -> String {
        let mut menu: Vec<&str> = AdvisorId::SPECIALISTS.iter().map(|a| a.as_str()).collect();
        menu.sort_unstable();

        format!(
            r#"An athlete asked: "{}"

Which specialist advisors should be consulted? Choose from: {}.
Answer with a JSON array of names only, for example ["recovery", "nutrition"].
Answer [] if none are needed."#,
            query_text,
            menu.join(", ")
        )
    }
}
