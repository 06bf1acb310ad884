//! Route Advisors use case
//!
//! Decides which advisors take part in a coordination round.
//!
//! ```text
//! explicit list? ──yes──► parsed list (invalid ids dropped)
//!      │no
//! comprehensive? ──yes──► every advisor
//!      │no
//! heuristic tier ─► assisted tier (best effort) ─► context force-adds
//!      ─► keyword fallback (< 2 specialists) ─► primary advisor
//! ```

use crate::ports::advisor_gateway::AdvisorGateway;
use council_domain::core::query::{
    COMPREHENSIVE_ASSESSMENT, INCLUDE_PRIMARY, INJURY_CONCERN, PAIN_REPORTED, REQUEST_TYPE,
    SINGLE_ADVISOR_MODE,
};
use council_domain::{AdvisorId, Context, HeuristicRouter, PromptTemplate, Query, extract_category_array};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Advisor selection for one query
pub struct AdvisorRouter<G: AdvisorGateway + 'static> {
    gateway: Arc<G>,
    heuristic: HeuristicRouter,
    assisted: bool,
    routing_timeout: Duration,
}

impl<G: AdvisorGateway + 'static> AdvisorRouter<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            heuristic: HeuristicRouter::new(),
            assisted: true,
            routing_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_assisted(mut self, enabled: bool) -> Self {
        self.assisted = enabled;
        self
    }

    pub fn with_routing_timeout(mut self, timeout: Duration) -> Self {
        self.routing_timeout = timeout;
        self
    }

    /// Select the advisors for `query`.
    ///
    /// An explicit list is returned as given, minus unknown identifiers and
    /// repeats. Otherwise the result is in canonical advisor order, and is
    /// identical across calls whenever the assisted tier is disabled.
    pub async fn route(&self, query: &Query, explicit: Option<&[String]>) -> Vec<AdvisorId> {
        if let Some(ids) = explicit {
            return Self::parse_explicit(ids);
        }

        let context = query.context();
        if context.get_str(REQUEST_TYPE) == Some(COMPREHENSIVE_ASSESSMENT) {
            debug!("Comprehensive assessment requested, consulting every advisor");
            return AdvisorId::ALL.to_vec();
        }

        let single = context.flag(SINGLE_ADVISOR_MODE);
        let heuristic = self.heuristic.classify(query.text());
        debug!(
            advisors = ?heuristic.advisors,
            pain_branch = heuristic.pain_branch,
            "Heuristic routing"
        );
        let mut selected = heuristic.advisors;

        if self.assisted {
            selected.extend(self.assisted_selection(query).await);
        }

        if context.flag(PAIN_REPORTED) || context.flag(INJURY_CONCERN) {
            selected.insert(AdvisorId::Safety);
            selected.insert(AdvisorId::Recovery);
        }

        if !single && specialist_count(&selected) < 2 {
            let recall = self.heuristic.keyword_pass(query.text());
            debug!(advisors = ?recall, "Too few advisors selected, adding keyword matches");
            selected.extend(recall);
        }

        if !single || context.flag(INCLUDE_PRIMARY) || selected.is_empty() {
            selected.insert(AdvisorId::PRIMARY);
        }

        selected.into_iter().collect()
    }

    fn parse_explicit(ids: &[String]) -> Vec<AdvisorId> {
        let mut advisors = Vec::with_capacity(ids.len());
        for id in ids {
            match id.parse::<AdvisorId>() {
                Ok(advisor) if !advisors.contains(&advisor) => advisors.push(advisor),
                Ok(_) => {}
                Err(e) => warn!("Dropping advisor identifier: {}", e),
            }
        }
        advisors
    }

    /// Ask the primary advisor which specialists to consult.
    ///
    /// Every failure is logged and yields an empty selection.
    async fn assisted_selection(&self, query: &Query) -> Vec<AdvisorId> {
        let prompt = match Query::try_new(PromptTemplate::routing(query.text()), Context::new()) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Assisted routing skipped: {}", e);
                return Vec::new();
            }
        };

        let call = self.gateway.invoke(AdvisorId::PRIMARY, &prompt);
        let reply = match tokio::time::timeout(self.routing_timeout, call).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!("Assisted routing failed: {}", e);
                return Vec::new();
            }
            Err(_) => {
                warn!(
                    "Assisted routing timed out after {:?}",
                    self.routing_timeout
                );
                return Vec::new();
            }
        };

        match extract_category_array(&reply) {
            Ok(selection) => {
                for name in &selection.rejected {
                    warn!("Assisted routing proposed non-routable advisor '{}'", name);
                }
                debug!(advisors = ?selection.advisors, "Assisted routing");
                selection.advisors
            }
            Err(e) => {
                warn!("Assisted routing reply ignored: {}", e);
                Vec::new()
            }
        }
    }
}

fn specialist_count(selected: &BTreeSet<AdvisorId>) -> usize {
    selected.iter().filter(|a| !a.is_primary()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Script, ScriptedGateway};
    use serde_json::json;

    fn router(gateway: ScriptedGateway) -> AdvisorRouter<ScriptedGateway> {
        AdvisorRouter::new(Arc::new(gateway)).with_assisted(false)
    }

    fn query(text: &str) -> Query {
        Query::try_new(text, Context::new()).unwrap()
    }

    // ==================== Explicit advisors ====================

    #[tokio::test]
    async fn test_explicit_list_returned_unchanged() {
        let r = router(ScriptedGateway::new());
        let ids = vec!["nutrition".to_string(), "safety".to_string()];
        let advisors = r.route(&query("anything"), Some(&ids)).await;
        assert_eq!(advisors, vec![AdvisorId::Nutrition, AdvisorId::Safety]);
    }

    #[tokio::test]
    async fn test_explicit_list_drops_invalid_ids() {
        let r = router(ScriptedGateway::new());
        let ids = vec![
            "coach".to_string(),
            "astrologer".to_string(),
            "coach".to_string(),
        ];
        let advisors = r.route(&query("anything"), Some(&ids)).await;
        assert_eq!(advisors, vec![AdvisorId::Coach]);
    }

    // ==================== Heuristic tier ====================

    #[tokio::test]
    async fn test_knee_pain_routes_to_safety_and_primary() {
        let r = router(ScriptedGateway::new());
        let advisors = r.route(&query("my knee hurts during squats"), None).await;
        assert_eq!(advisors, vec![AdvisorId::Safety, AdvisorId::Coach]);
    }

    #[tokio::test]
    async fn test_workout_today_routes_to_scheduling_and_primary() {
        let r = router(ScriptedGateway::new());
        let advisors = r.route(&query("what's my workout today"), None).await;
        assert_eq!(advisors, vec![AdvisorId::Scheduling, AdvisorId::Coach]);
    }

    #[tokio::test]
    async fn test_routing_is_deterministic() {
        let r = router(ScriptedGateway::new());
        let q = Query::try_new(
            "I'm tired and sore, what should I eat before tomorrow's session?",
            Context::new().with("injury_concern", json!(false)),
        )
        .unwrap();
        let first = r.route(&q, None).await;
        for _ in 0..5 {
            assert_eq!(r.route(&q, None).await, first);
        }
    }

    #[tokio::test]
    async fn test_keyword_fallback_tops_up_pain_branch() {
        let r = router(ScriptedGateway::new());
        let advisors = r
            .route(
                &query("my shoulder hurts, should I eat more protein today?"),
                None,
            )
            .await;
        assert_eq!(
            advisors,
            vec![
                AdvisorId::Safety,
                AdvisorId::Nutrition,
                AdvisorId::Scheduling,
                AdvisorId::Coach
            ]
        );
    }

    // ==================== Context flags ====================

    #[tokio::test]
    async fn test_comprehensive_assessment_selects_all() {
        let r = router(ScriptedGateway::new());
        let q = Query::try_new(
            "How am I doing?",
            Context::new().with("request_type", json!("comprehensive_assessment")),
        )
        .unwrap();
        assert_eq!(r.route(&q, None).await, AdvisorId::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_pain_reported_forces_safety_and_recovery() {
        let r = router(ScriptedGateway::new());
        let q = Query::try_new(
            "what should I eat tonight",
            Context::new().with("pain_reported", json!(true)),
        )
        .unwrap();
        let advisors = r.route(&q, None).await;
        assert!(advisors.contains(&AdvisorId::Safety));
        assert!(advisors.contains(&AdvisorId::Recovery));
        assert!(advisors.contains(&AdvisorId::Nutrition));
        assert_eq!(advisors.last(), Some(&AdvisorId::Coach));
    }

    #[tokio::test]
    async fn test_single_advisor_mode_omits_primary() {
        let r = router(ScriptedGateway::new());
        let q = Query::try_new(
            "what should I eat tonight",
            Context::new().with("single_advisor_mode", json!(true)),
        )
        .unwrap();
        assert_eq!(r.route(&q, None).await, vec![AdvisorId::Nutrition]);
    }

    #[tokio::test]
    async fn test_single_advisor_mode_with_primary_requested() {
        let r = router(ScriptedGateway::new());
        let q = Query::try_new(
            "what should I eat tonight",
            Context::new()
                .with("single_advisor_mode", json!(true))
                .with("include_primary", json!(true)),
        )
        .unwrap();
        assert_eq!(
            r.route(&q, None).await,
            vec![AdvisorId::Nutrition, AdvisorId::Coach]
        );
    }

    // ==================== Assisted tier ====================

    #[tokio::test]
    async fn test_assisted_tier_adds_advisors() {
        let gateway = ScriptedGateway::new()
            .with_routing_reply(Script::Reply(r#"I'd ask ["nutrition", "recovery"]."#.into()));
        let r = AdvisorRouter::new(Arc::new(gateway)).with_assisted(true);
        let advisors = r.route(&query("my knee hurts during squats"), None).await;
        assert_eq!(
            advisors,
            vec![
                AdvisorId::Safety,
                AdvisorId::Recovery,
                AdvisorId::Nutrition,
                AdvisorId::Coach
            ]
        );
    }

    #[tokio::test]
    async fn test_assisted_tier_cannot_add_primary() {
        let gateway = ScriptedGateway::new()
            .with_routing_reply(Script::Reply(r#"["nutrition", "coach"]"#.into()));
        let r = AdvisorRouter::new(Arc::new(gateway)).with_assisted(true);
        let q = Query::try_new(
            "what should I eat tonight",
            Context::new().with("single_advisor_mode", json!(true)),
        )
        .unwrap();
        assert_eq!(r.route(&q, None).await, vec![AdvisorId::Nutrition]);
    }

    #[tokio::test]
    async fn test_assisted_tier_garbage_is_ignored() {
        let gateway = ScriptedGateway::new()
            .with_routing_reply(Script::Reply("Hard to say, maybe [astrology]".into()));
        let r = AdvisorRouter::new(Arc::new(gateway)).with_assisted(true);
        let advisors = r.route(&query("my knee hurts during squats"), None).await;
        assert_eq!(advisors, vec![AdvisorId::Safety, AdvisorId::Coach]);
    }

    #[tokio::test]
    async fn test_assisted_tier_timeout_falls_back() {
        let gateway = ScriptedGateway::new().with_routing_reply(Script::Delayed(
            Duration::from_secs(10),
            r#"["nutrition"]"#.into(),
        ));
        let gateway = Arc::new(gateway);
        let r = AdvisorRouter::new(Arc::clone(&gateway))
            .with_assisted(true)
            .with_routing_timeout(Duration::from_millis(20));

        let started = std::time::Instant::now();
        let advisors = r.route(&query("what's my workout today"), None).await;
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(advisors, vec![AdvisorId::Scheduling, AdvisorId::Coach]);
        assert_eq!(gateway.routing_calls(), 1);
    }

    #[tokio::test]
    async fn test_assisted_tier_skipped_for_explicit_list() {
        let gateway = Arc::new(ScriptedGateway::new());
        let r = AdvisorRouter::new(Arc::clone(&gateway)).with_assisted(true);
        let ids = vec!["safety".to_string()];
        r.route(&query("anything"), Some(&ids)).await;
        assert_eq!(gateway.routing_calls(), 0);
    }
}
