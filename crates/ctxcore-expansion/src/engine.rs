//! Wires reference hydration, relationship-edge walking, and the in-place
//! `doc`/`signature` reductions into a single entry point for the driver
//! (spec.md §4.2 step 3, §4.3.3).

use std::collections::HashSet;
use std::sync::Arc;

use ctxcore_domain::ports::SymbolIndex;
use ctxcore_domain::value_objects::{DirectiveKind, ExpansionDirective, HydratedRef, SymbolId};
use ctxcore_extractor::{first_code_line, leading_comment_block};

use crate::directives;
use crate::walk::{external_callees, walk_callees, walk_callers, Budget};

/// Applies expansion directives against a resolved symbol, holding the
/// `SymbolIndex` port the whole engine is built against.
pub struct ExpansionEngine {
    index: Arc<dyn SymbolIndex>,
}

impl ExpansionEngine {
    /// Build an engine over the given index.
    pub fn new(index: Arc<dyn SymbolIndex>) -> Self {
        Self { index }
    }

    /// Apply every directive in `directives` to `hydrated`, mutating it in
    /// place (in-place directives) or populating `hydrated.expanded`
    /// (relationship directives). Returns `(directives_applied, tokens_spent)`
    /// so the driver can keep its own running token total in sync (spec.md
    /// §4.2 step c).
    ///
    /// Directives on a ref with no resolved `symbol_id` (a line-range or
    /// declaration-scan fallback hydration, spec.md §4.3.1) are no-ops: every
    /// relationship edge this engine walks starts from an index symbol.
    pub async fn apply_expansions(
        &self,
        hydrated: &mut HydratedRef,
        symbol_id: Option<&SymbolId>,
        directives: &[ExpansionDirective],
        remaining_tokens: usize,
    ) -> (usize, usize) {
        let mut applied = 0;
        let mut budget = Budget(remaining_tokens as i64);

        for directive in directives {
            if directive.kind.is_in_place() {
                if self.apply_in_place(hydrated, directive.kind) {
                    applied += 1;
                }
                continue;
            }

            let Some(id) = symbol_id else {
                continue;
            };
            if !budget.has_room() {
                break;
            }

            let children = self.walk(id, *directive, &mut budget).await;
            if let Some(children) = children {
                if !children.is_empty() {
                    hydrated
                        .expanded
                        .insert(directive.kind.as_str().to_string(), children);
                    applied += 1;
                }
            }
        }

        let spent = (remaining_tokens as i64 - budget.0).max(0) as usize;
        (applied, spent)
    }

    fn apply_in_place(&self, hydrated: &mut HydratedRef, kind: DirectiveKind) -> bool {
        match kind {
            DirectiveKind::Doc => {
                let doc = leading_comment_block(&hydrated.source);
                if doc.is_empty() {
                    false
                } else {
                    hydrated.source = doc;
                    true
                }
            }
            DirectiveKind::Signature => {
                hydrated.source = first_code_line(&hydrated.source);
                true
            }
            _ => false,
        }
    }

    async fn walk(
        &self,
        id: &SymbolId,
        directive: ExpansionDirective,
        budget: &mut Budget,
    ) -> Option<Vec<HydratedRef>> {
        match directive.kind {
            DirectiveKind::Callers => {
                let mut visited = HashSet::from([id.clone()]);
                Some(walk_callers(&self.index, id, directive.depth, &mut visited, budget).await)
            }
            DirectiveKind::Callees => {
                let mut visited = HashSet::from([id.clone()]);
                let mut children =
                    walk_callees(&self.index, id, directive.depth, &mut visited, budget).await;
                let purity = self.index.get_side_effect_info(id).await.ok().flatten();
                children.extend(external_callees(purity.as_ref()));
                Some(children)
            }
            DirectiveKind::Implementations => {
                Some(directives::implementations(&self.index, id, budget).await)
            }
            DirectiveKind::Interface => Some(directives::interface(&self.index, id, budget).await),
            DirectiveKind::Siblings => {
                let symbol = self.index.get_enhanced_symbol(id).await.ok()?;
                Some(directives::siblings(&self.index, &symbol).await)
            }
            DirectiveKind::TypeDeps => {
                let symbol = self.index.get_enhanced_symbol(id).await.ok()?;
                Some(directives::type_deps(&self.index, &symbol, budget).await)
            }
            DirectiveKind::Tests => {
                let symbol = self.index.get_enhanced_symbol(id).await.ok()?;
                Some(directives::tests(&self.index, &symbol).await)
            }
            DirectiveKind::Doc | DirectiveKind::Signature => None,
        }
    }
}
