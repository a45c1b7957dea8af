//! Recursive `callers`/`callees` relationship walk with cycle detection
//! (spec.md §4.3.3, §4.3.5, §9).

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use ctxcore_domain::ports::SymbolIndex;
use ctxcore_domain::value_objects::{HydratedRef, PurityInfo, SymbolId};

use crate::hydrate::hydrate_symbol;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Running token budget, decremented as children are hydrated. Iteration
/// stops once the remainder is `<= 0` (spec.md §4.3.3).
pub struct Budget(pub i64);

impl Budget {
    pub fn has_room(&self) -> bool {
        self.0 > 0
    }

    pub fn spend(&mut self, tokens: usize) {
        self.0 -= tokens as i64;
    }
}

/// Walk `callers` of `id` to `depth`, threading a shared visited set so a
/// symbol never reappears on a root-to-leaf path (breaks self-recursion and
/// longer cycles alike).
pub fn walk_callers<'a>(
    index: &'a Arc<dyn SymbolIndex>,
    id: &'a SymbolId,
    depth: u32,
    visited: &'a mut HashSet<SymbolId>,
    budget: &'a mut Budget,
) -> BoxFuture<'a, Vec<HydratedRef>> {
    Box::pin(async move {
        walk_directed(index, id, depth, visited, budget, Direction::Callers).await
    })
}

/// Walk `callees` of `id` to `depth`. Internal callees only; external calls
/// named in `id`'s purity record are appended as synthesized refs outside
/// this recursive walk (see [`crate::directives::external_callees`]).
pub fn walk_callees<'a>(
    index: &'a Arc<dyn SymbolIndex>,
    id: &'a SymbolId,
    depth: u32,
    visited: &'a mut HashSet<SymbolId>,
    budget: &'a mut Budget,
) -> BoxFuture<'a, Vec<HydratedRef>> {
    Box::pin(async move {
        walk_directed(index, id, depth, visited, budget, Direction::Callees).await
    })
}

#[derive(Clone, Copy)]
enum Direction {
    Callers,
    Callees,
}

fn walk_directed<'a>(
    index: &'a Arc<dyn SymbolIndex>,
    id: &'a SymbolId,
    depth: u32,
    visited: &'a mut HashSet<SymbolId>,
    budget: &'a mut Budget,
    direction: Direction,
) -> BoxFuture<'a, Vec<HydratedRef>> {
    Box::pin(async move {
        if depth == 0 || !budget.has_room() {
            return Vec::new();
        }
        let neighbor_ids = match direction {
            Direction::Callers => index.get_callers(id).await,
            Direction::Callees => index.get_callees(id).await,
        };
        let Ok(neighbor_ids) = neighbor_ids else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for neighbor_id in neighbor_ids {
            if !budget.has_room() {
                break;
            }
            if !visited.insert(neighbor_id.clone()) {
                continue;
            }
            let Ok(symbol) = index.get_enhanced_symbol(&neighbor_id).await else {
                continue;
            };
            let Ok(mut hydrated) = hydrate_symbol(index, &symbol).await else {
                continue;
            };
            budget.spend(hydrated.tokens());

            if depth > 1 {
                let children = match direction {
                    Direction::Callers => {
                        walk_callers(index, &neighbor_id, depth - 1, visited, budget).await
                    }
                    Direction::Callees => {
                        walk_callees(index, &neighbor_id, depth - 1, visited, budget).await
                    }
                };
                if !children.is_empty() {
                    let key = match direction {
                        Direction::Callers => "callers",
                        Direction::Callees => "callees",
                    };
                    hydrated.expanded.insert(key.to_string(), children);
                }
            }
            out.push(hydrated);
        }
        out
    })
}

/// Synthesize external-call children from `purity.external_calls`
/// (spec.md §4.3.3's `callees` entry): no source, `is_external=true`,
/// purity category `external_call`.
pub fn external_callees(purity: Option<&PurityInfo>) -> Vec<HydratedRef> {
    let Some(purity) = purity else {
        return Vec::new();
    };
    purity
        .external_calls
        .iter()
        .map(|qualified| {
            let symbol = qualified.rsplit('.').next().unwrap_or(qualified);
            HydratedRef {
                file: qualified.clone(),
                symbol: Some(symbol.to_string()),
                is_external: true,
                purity: Some(PurityInfo::external_call()),
                ..Default::default()
            }
        })
        .collect()
}
