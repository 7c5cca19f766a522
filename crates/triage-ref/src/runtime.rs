//! Wiring for a complete triage runtime.
//!
//! `Runtime::build` loads the rule tables (embedded, or from files named on
//! the command line), then assembles the service over an in-memory store and
//! audit log. The store and audit handles stay inspectable after the service
//! takes its boxed clones.

use std::path::PathBuf;

use tracing::info;

use triage_audit::InMemoryAuditWriter;
use triage_contracts::error::TriageResult;
use triage_core::{ServiceConfig, TriageService};
use triage_recommend::KeywordRecommendationEngine;
use triage_scoring::WeightedScoringEngine;
use triage_store::InMemorySessionStore;
use triage_verify::InvariantVerifier;

/// Where to load rule tables from. `None` means the embedded defaults.
#[derive(Debug, Clone, Default)]
pub struct RuleSources {
    pub scoring: Option<PathBuf>,
    pub recommendations: Option<PathBuf>,
}

impl RuleSources {
    pub fn load_scoring(&self) -> TriageResult<WeightedScoringEngine> {
        match &self.scoring {
            Some(path) => {
                info!(path = %path.display(), "loading scoring rules");
                WeightedScoringEngine::from_file(path)
            }
            None => WeightedScoringEngine::embedded(),
        }
    }

    pub fn load_recommendations(&self) -> TriageResult<KeywordRecommendationEngine> {
        match &self.recommendations {
            Some(path) => {
                info!(path = %path.display(), "loading recommendation rules");
                KeywordRecommendationEngine::from_file(path)
            }
            None => KeywordRecommendationEngine::embedded(),
        }
    }
}

/// A ready-to-use service plus handles onto its store and audit log.
pub struct Runtime {
    pub service: TriageService,
    pub store: InMemorySessionStore,
    pub audit: InMemoryAuditWriter,
}

impl Runtime {
    pub fn build(rules: &RuleSources, log_id: &str) -> TriageResult<Self> {
        Self::build_with_config(rules, log_id, ServiceConfig::default())
    }

    pub fn build_with_config(
        rules: &RuleSources,
        log_id: &str,
        config: ServiceConfig,
    ) -> TriageResult<Self> {
        let store = InMemorySessionStore::new();
        let audit = InMemoryAuditWriter::new(log_id);

        let service = TriageService::new(
            Box::new(rules.load_scoring()?),
            Box::new(rules.load_recommendations()?),
            Box::new(store.clone()),
            Box::new(audit.clone()),
            Box::new(InvariantVerifier::new()),
        )
        .with_config(config);

        Ok(Self {
            service,
            store,
            audit,
        })
    }
}
