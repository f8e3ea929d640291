//! The `generate` run: load snapshots, plan, write the operation log.

use std::path::PathBuf;

use anyhow::Context;
use resolver_ops_core::rules::RuleKind;
use resolver_ops_core::{
    apply_operations, plan_operations, OperationPlan, PlanSummary, ReplayStats, Snapshot,
};
use resolver_ops_snapshot::{load_snapshot, write_operation_log};

use crate::config::GeneratorConfig;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub operations: usize,
    pub summary: PlanSummary,
    /// Present when verification was requested.
    pub verification: Option<Verification>,
}

/// Result of replaying a plan in memory and planning again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub applied: usize,
    pub ignored: usize,
    /// Operations a second run over the replayed snapshot would emit.
    pub residual: usize,
}

/// Run the generator once.
///
/// Nothing is written unless every snapshot loads and every rule succeeds.
pub async fn generate(config: &GeneratorConfig) -> anyhow::Result<GenerateReport> {
    let files = config.snapshot_files();
    let snapshot = load_snapshot(&files)
        .await
        .with_context(|| format!("loading snapshot from {}", config.data_dir.display()))?;

    let plan = plan_operations(&snapshot).context("planning corrective operations")?;
    for rule in RuleKind::ORDER {
        tracing::info!(rule = %rule, operations = plan.summary.count(rule), "Rule evaluated");
    }

    write_operation_log(&config.output, &plan.operations)
        .await
        .context("writing operation log")?;

    let verification = if config.verify {
        Some(verify(snapshot, &plan)?)
    } else {
        None
    };

    Ok(GenerateReport {
        output: config.output.clone(),
        operations: plan.operations.len(),
        summary: plan.summary,
        verification,
    })
}

/// Replay `plan` over `snapshot` and count what is left to do.
pub fn verify(mut snapshot: Snapshot, plan: &OperationPlan) -> anyhow::Result<Verification> {
    let ReplayStats { applied, ignored } =
        apply_operations(&mut snapshot, &plan.operations).context("replaying operation log")?;
    let residual = plan_operations(&snapshot)
        .context("planning over replayed snapshot")?
        .operations
        .len();

    if residual == 0 {
        tracing::info!(applied, ignored, "Replayed log converges in one pass");
    } else {
        tracing::warn!(
            applied,
            ignored,
            residual,
            "A second run would still emit operations",
        );
    }

    Ok(Verification {
        applied,
        ignored,
        residual,
    })
}
