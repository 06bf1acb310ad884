//! Coordinate use case
//!
//! Orchestrates a full coordination round: route, gather, resolve, extract.

use super::gather_responses::{GatherError, ResponseGatherer};
use super::route_advisors::AdvisorRouter;
use crate::config::CoordinationParams;
use crate::ports::advisor_gateway::AdvisorGateway;
use crate::ports::progress::{CoordinationProgress, CoordinationStage, NoProgress};
use crate::ports::response_cache::ResponseCache;
use council_domain::core::query::{EMERGENCY, INCLUDE_PRIMARY, SEVERITY, SINGLE_ADVISOR_MODE};
use council_domain::coordination::mean_confidence;
use council_domain::{
    AdvisorId, AdvisorSummary, ConsensusResolver, Context, CoordinatedResult, DomainError,
    PatternActionExtractor, PrefixSimilarity, Query, merge_actions,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur during coordination
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Primary advisor '{0}' is not part of this round")]
    MissingPrimary(AdvisorId),

    #[error("No advisors selected")]
    NoAdvisors,

    #[error("Coordination cancelled")]
    Cancelled,

    #[error(transparent)]
    InvalidQuery(#[from] DomainError),
}

impl From<GatherError> for CoordinateError {
    fn from(e: GatherError) -> Self {
        match e {
            GatherError::Cancelled => CoordinateError::Cancelled,
        }
    }
}

/// Input for the Coordinate use case
#[derive(Debug, Clone)]
pub struct CoordinateInput {
    /// The query and its session context
    pub query: Query,
    /// Advisor identifiers pinned by the caller, bypassing routing
    pub explicit_advisors: Option<Vec<String>>,
}

impl CoordinateInput {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            explicit_advisors: None,
        }
    }

    pub fn with_advisors(mut self, advisors: Vec<String>) -> Self {
        self.explicit_advisors = Some(advisors);
        self
    }

    /// Emergency round: the safety-first advisor subset, with the context
    /// annotated as an emergency of the given severity.
    pub fn emergency(
        text: impl Into<String>,
        context: Context,
        severity: &str,
    ) -> Result<Self, DomainError> {
        let context = context
            .with(EMERGENCY, true)
            .with(SEVERITY, severity.to_string());
        let query = Query::try_new(text, context)?;
        let advisors = AdvisorId::EMERGENCY
            .iter()
            .map(|a| a.as_str().to_string())
            .collect();
        Ok(Self::new(query).with_advisors(advisors))
    }
}

/// Use case for running a coordination round
pub struct CoordinateUseCase<G: AdvisorGateway + 'static> {
    router: AdvisorRouter<G>,
    gatherer: ResponseGatherer<G>,
    extractor: PatternActionExtractor,
    resolver: ConsensusResolver,
    params: CoordinationParams,
}

impl<G: AdvisorGateway + 'static> CoordinateUseCase<G> {
    pub fn new(gateway: Arc<G>, cache: Arc<dyn ResponseCache>, params: CoordinationParams) -> Self {
        let router = AdvisorRouter::new(Arc::clone(&gateway))
            .with_assisted(params.assisted_routing)
            .with_routing_timeout(params.routing_timeout);
        let gatherer = ResponseGatherer::new(gateway, cache)
            .with_default_confidence(params.default_confidence);
        let resolver = ConsensusResolver::new(params.consensus_threshold)
            .with_similarity(PrefixSimilarity::new(params.similarity_prefix_chars));

        Self {
            router,
            gatherer,
            extractor: PatternActionExtractor::new(),
            resolver,
            params,
        }
    }

    pub fn params(&self) -> &CoordinationParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: CoordinateInput) -> Result<CoordinatedResult, CoordinateError> {
        self.execute_with_progress(input, &NoProgress, &CancellationToken::new())
            .await
    }

    /// Run an emergency round for `text`
    pub async fn coordinate_emergency(
        &self,
        text: &str,
        context: Context,
        severity: &str,
    ) -> Result<CoordinatedResult, CoordinateError> {
        let input = CoordinateInput::emergency(text, context, severity)?;
        self.execute(input).await
    }

    /// A round always needs the primary advisor, so single-advisor mode keeps
    /// it unless the caller opted out with an explicit `include_primary`.
    /// Only routing sees the adjusted context; advisors get the original.
    fn routing_query(query: &Query) -> Query {
        let context = query.context();
        if context.flag(SINGLE_ADVISOR_MODE) && context.get(INCLUDE_PRIMARY).is_none() {
            query.with_context_entry(INCLUDE_PRIMARY, true)
        } else {
            query.clone()
        }
    }

    /// Execute the use case with progress callbacks and cancellation
    pub async fn execute_with_progress(
        &self,
        input: CoordinateInput,
        progress: &dyn CoordinationProgress,
        cancel: &CancellationToken,
    ) -> Result<CoordinatedResult, CoordinateError> {
        let query = &input.query;
        info!("Coordinating query ({} chars)", query.text().len());

        // Stage 1: Routing
        progress.on_stage_start(CoordinationStage::Routing, 1);
        let routing_query = Self::routing_query(query);
        let advisors = tokio::select! {
            _ = cancel.cancelled() => return Err(CoordinateError::Cancelled),
            advisors = self.router.route(&routing_query, input.explicit_advisors.as_deref()) => advisors,
        };
        progress.on_stage_complete(CoordinationStage::Routing);
        info!("Routed to {:?}", advisors);

        if advisors.is_empty() {
            return Err(CoordinateError::NoAdvisors);
        }
        // Every requested advisor yields a response, so the primary one is
        // present afterwards exactly when it is requested now.
        if !advisors.contains(&AdvisorId::PRIMARY) {
            return Err(CoordinateError::MissingPrimary(AdvisorId::PRIMARY));
        }

        // Stage 2: Gathering
        progress.on_stage_start(CoordinationStage::Gathering, advisors.len());
        let mut responses = self
            .gatherer
            .gather(&advisors, query, self.params.deadline, cancel, progress)
            .await?;
        responses.sort_by_key(|r| r.advisor_id);
        progress.on_stage_complete(CoordinationStage::Gathering);

        let primary_message = responses
            .iter()
            .find(|r| r.advisor_id == AdvisorId::PRIMARY)
            .map(|r| r.message.clone())
            .ok_or(CoordinateError::MissingPrimary(AdvisorId::PRIMARY))?;

        // Stage 3: Consensus
        progress.on_stage_start(CoordinationStage::Resolving, responses.len());
        let outcome = self.resolver.resolve(&responses);
        let conflicts_resolved =
            outcome.resolve_conflicts(self.params.resolution_policy, AdvisorId::PRIMARY);
        debug!(
            consensus = outcome.consensus.len(),
            conflicts = outcome.conflicts.len(),
            resolved = conflicts_resolved.len(),
            "Consensus resolved"
        );
        progress.on_stage_complete(CoordinationStage::Resolving);

        // Stage 4: Actions
        progress.on_stage_start(CoordinationStage::Extracting, responses.len());
        let action_items = merge_actions(
            &responses,
            &self.extractor,
            query.context(),
            self.params.max_action_items,
        );
        progress.on_stage_complete(CoordinationStage::Extracting);

        let responding_agents = responses.iter().map(AdvisorSummary::from).collect();
        let confidence_score = mean_confidence(&responses);
        info!(
            "Coordination complete: {} responses, {} actions, confidence {:.2}",
            responses.len(),
            action_items.len(),
            confidence_score
        );

        Ok(CoordinatedResult {
            primary_message,
            agent_insights: responses,
            consensus_recommendations: outcome.consensus,
            action_items,
            conflicts_resolved,
            confidence_score,
            responding_agents,
        })
    }
}
