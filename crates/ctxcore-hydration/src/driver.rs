//! The Hydration Driver (spec.md §4.2): role filtering, the per-manifest
//! token budget, and the `HydratedContext` assembly.

use std::sync::Arc;

use ctxcore_domain::ports::SymbolIndex;
use ctxcore_domain::value_objects::{ContextManifest, ContextRef, HydratedContext, HydrationStats};
use ctxcore_expansion::{hydrate, ExpansionEngine};
use tokio_util::sync::CancellationToken;

use crate::config::DriverConfig;
use crate::format;

/// Produces a `HydratedContext` from a manifest and load-time configuration,
/// against a shared, read-only `SymbolIndex`.
pub struct HydrationDriver {
    index: Arc<dyn SymbolIndex>,
    engine: ExpansionEngine,
}

impl HydrationDriver {
    /// Build a driver over the given index.
    pub fn new(index: Arc<dyn SymbolIndex>) -> Self {
        let engine = ExpansionEngine::new(Arc::clone(&index));
        Self { index, engine }
    }

    /// Run the full algorithm of spec.md §4.2 against `manifest`.
    ///
    /// `cancel`, when supplied, is checked between top-level refs (spec.md
    /// §5) — never mid-extraction of a single ref.
    pub async fn hydrate(
        &self,
        manifest: &ContextManifest,
        config: &DriverConfig,
        cancel: Option<&CancellationToken>,
    ) -> HydratedContext {
        let filtered = filter_by_role(&manifest.refs, &config.include, &config.exclude);

        let mut refs = Vec::new();
        let mut warnings = Vec::new();
        let mut running_total: usize = 0;
        let mut truncated = false;
        let mut symbols_hydrated = 0usize;
        let mut expansions_applied = 0usize;

        for ctx_ref in &filtered {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    break;
                }
            }

            if config.has_budget() && running_total >= config.max_tokens {
                warnings.push(format!(
                    "Truncated: reached token limit of {}",
                    config.max_tokens
                ));
                truncated = true;
                break;
            }

            match hydrate(&self.index, ctx_ref).await {
                Ok(Some((mut hydrated, symbol_id))) => {
                    symbols_hydrated += 1;
                    running_total += hydrated.tokens();

                    if !ctx_ref.expand.is_empty() {
                        let remaining = remaining_budget(config, running_total);
                        let (applied, spent) = self
                            .engine
                            .apply_expansions(
                                &mut hydrated,
                                symbol_id.as_ref(),
                                &ctx_ref.expand,
                                remaining,
                            )
                            .await;
                        symbols_hydrated += count_expanded(&hydrated);
                        expansions_applied += applied;
                        running_total += spent;
                    }

                    refs.push(hydrated);
                }
                Ok(None) => {
                    tracing::debug!(file = %ctx_ref.file, symbol = ?ctx_ref.symbol, "symbol not found");
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to hydrate {}:{}: {err}",
                        ctx_ref.file,
                        ctx_ref.symbol.as_deref().unwrap_or("")
                    ));
                }
            }
        }

        format::apply(&mut refs, config.format);

        let stats = HydrationStats {
            refs_loaded: filtered.len(),
            symbols_hydrated,
            expansions_applied,
            tokens_approx: running_total,
            truncated,
        };

        tracing::info!(
            refs_loaded = stats.refs_loaded,
            tokens_approx = stats.tokens_approx,
            truncated = stats.truncated,
            "hydration run complete"
        );

        for warning in &warnings {
            tracing::warn!(%warning);
        }

        HydratedContext {
            task: manifest.task.clone(),
            refs,
            warnings,
            stats,
        }
    }
}

fn remaining_budget(config: &DriverConfig, running_total: usize) -> usize {
    if !config.has_budget() {
        return usize::MAX;
    }
    config.max_tokens.saturating_sub(running_total)
}

fn count_expanded(hydrated: &ctxcore_domain::value_objects::HydratedRef) -> usize {
    hydrated
        .expanded
        .values()
        .flat_map(|children| children.iter())
        .map(|child| 1 + count_expanded(child))
        .sum()
}

/// Filter `refs` by role: exclude takes priority over include (spec.md
/// §4.2's role filter policy).
fn filter_by_role<'a>(
    refs: &'a [ContextRef],
    include: &std::collections::BTreeSet<String>,
    exclude: &std::collections::BTreeSet<String>,
) -> Vec<&'a ContextRef> {
    refs.iter()
        .filter(|r| {
            let role = r.role.as_deref();
            if let Some(role) = role {
                if exclude.contains(role) {
                    return false;
                }
            }
            if include.is_empty() {
                return true;
            }
            role.is_some_and(|role| include.contains(role))
        })
        .collect()
}
