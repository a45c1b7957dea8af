//! # Expansion Engine
//!
//! Resolves a `ContextRef` to hydrated source (`hydrate`) and walks the
//! relationship edges named by its expansion directives outward from the
//! resolved symbol (`ExpansionEngine`), against the external Symbol Index
//! port defined in `ctxcore-domain`.
//!
//! Holds no opinion on manifests, token budgets across an entire run, or
//! output formatting — those belong to `ctxcore-hydration`.

mod directives;
mod engine;
mod hydrate;
mod walk;

pub use engine::ExpansionEngine;
pub use hydrate::{hydrate, hydrate_symbol, Hydrated};
pub use walk::Budget;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Arc;

    use async_trait::async_trait;
    use ctxcore_domain::error::Result;
    use ctxcore_domain::ports::SymbolIndex;
    use ctxcore_domain::value_objects::{
        ContextRef, ExpansionDirective, FileId, FileInfo, PurityInfo, PurityLevel, Symbol,
        SymbolId, SymbolKind,
    };
    use tempfile::TempDir;

    use super::*;

    /// In-memory `SymbolIndex` built from a fixed call graph. Source files
    /// are written to a real temp directory so the extractor's disk reads
    /// resolve the same way they would against a live workspace.
    struct FakeIndex {
        _dir: TempDir,
        symbols: HashMap<String, Symbol>,
        files: HashMap<String, FileInfo>,
        callers: HashMap<String, Vec<String>>,
        callees: HashMap<String, Vec<String>>,
        purity: HashMap<String, PurityInfo>,
    }

    impl FakeIndex {
        fn new() -> Self {
            Self {
                _dir: TempDir::new().expect("create temp dir"),
                symbols: HashMap::new(),
                files: HashMap::new(),
                callers: HashMap::new(),
                callees: HashMap::new(),
                purity: HashMap::new(),
            }
        }

        fn with_symbol(mut self, name: &str, file: &str, start: usize, end: usize) -> Self {
            self.symbols.insert(
                name.to_string(),
                Symbol {
                    id: SymbolId::new(name),
                    name: name.to_string(),
                    kind: SymbolKind::Function,
                    file_id: FileId::new(file),
                    start_line: start,
                    end_line: end,
                    receiver_type: None,
                    signature: None,
                    is_exported: true,
                },
            );
            self
        }

        /// Write `content` to `name` under this index's temp directory and
        /// register the resulting absolute path as a known file.
        fn with_file(mut self, name: &str, content: &str) -> Self {
            let path = self._dir.path().join(name);
            fs::write(&path, content).expect("write fixture file");
            let path = path.to_string_lossy().into_owned();
            self.files.insert(
                name.to_string(),
                FileInfo {
                    id: FileId::new(name),
                    path,
                    language: None,
                },
            );
            self
        }

        fn with_edge(mut self, caller: &str, callee: &str) -> Self {
            self.callees
                .entry(caller.to_string())
                .or_default()
                .push(callee.to_string());
            self.callers
                .entry(callee.to_string())
                .or_default()
                .push(caller.to_string());
            self
        }
    }

    #[async_trait]
    impl SymbolIndex for FakeIndex {
        async fn find_symbols_by_name(&self, name: &str) -> Result<Vec<Symbol>> {
            Ok(self.symbols.get(name).cloned().into_iter().collect())
        }

        async fn get_callers(&self, id: &SymbolId) -> Result<Vec<SymbolId>> {
            Ok(self
                .callers
                .get(id.as_str())
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(SymbolId::new)
                .collect())
        }

        async fn get_callees(&self, id: &SymbolId) -> Result<Vec<SymbolId>> {
            Ok(self
                .callees
                .get(id.as_str())
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(SymbolId::new)
                .collect())
        }

        async fn get_implementors_with_quality(
            &self,
            _id: &SymbolId,
        ) -> Result<Vec<(SymbolId, f64)>> {
            Ok(Vec::new())
        }

        async fn get_implemented_interfaces_with_quality(
            &self,
            _id: &SymbolId,
        ) -> Result<Vec<(SymbolId, f64)>> {
            Ok(Vec::new())
        }

        async fn get_base_types(&self, _id: &SymbolId) -> Result<Vec<SymbolId>> {
            Ok(Vec::new())
        }

        async fn get_derived_types(&self, _id: &SymbolId) -> Result<Vec<SymbolId>> {
            Ok(Vec::new())
        }

        async fn get_enhanced_symbol(&self, id: &SymbolId) -> Result<Symbol> {
            self.symbols
                .get(id.as_str())
                .cloned()
                .ok_or_else(|| ctxcore_domain::error::Error::not_found(id.to_string()))
        }

        async fn get_file_info(&self, file_id: &FileId) -> Result<FileInfo> {
            self.files
                .get(file_id.as_str())
                .cloned()
                .ok_or_else(|| ctxcore_domain::error::Error::not_found(file_id.to_string()))
        }

        async fn get_side_effect_info(&self, id: &SymbolId) -> Result<Option<PurityInfo>> {
            Ok(self.purity.get(id.as_str()).cloned())
        }
    }

    fn call_cycle_index() -> FakeIndex {
        FakeIndex::new()
            .with_file("a.go", "func a() {\n  b()\n}\n")
            .with_file("b.go", "func b() {\n  a()\n}\n")
            .with_symbol("a", "a.go", 1, 3)
            .with_symbol("b", "b.go", 1, 3)
            .with_edge("b", "a")
            .with_edge("a", "b")
    }

    #[tokio::test]
    async fn callers_walk_breaks_cycle_at_depth_two() {
        let index: Arc<dyn SymbolIndex> = Arc::new(call_cycle_index());
        let ctx_ref = ContextRef::new("a.go".to_string(), Some("a".to_string()), None).unwrap();
        let (mut hydrated, symbol_id) = hydrate(&index, &ctx_ref).await.unwrap().unwrap();

        let engine = ExpansionEngine::new(index);
        let directives = vec![ExpansionDirective::parse("callers:2").unwrap()];
        let (applied, _spent) = engine
            .apply_expansions(&mut hydrated, symbol_id.as_ref(), &directives, 10_000)
            .await;

        assert_eq!(applied, 1);
        let callers = hydrated.expanded.get("callers").unwrap();
        assert_eq!(callers.len(), 1);
        assert_eq!(callers[0].symbol.as_deref(), Some("b"));
        assert!(
            !callers[0].expanded.contains_key("callers"),
            "cycle back to a must not reappear under b"
        );
    }

    #[tokio::test]
    async fn callees_directive_appends_external_calls() {
        let mut index = FakeIndex::new()
            .with_file("a.go", "func a() {\n  fmt.Println(\"x\")\n}\n")
            .with_symbol("a", "a.go", 1, 3);
        index.purity.insert(
            "a".to_string(),
            PurityInfo {
                is_pure: false,
                level: PurityLevel::SideEffecting,
                score: 0.2,
                categories: Default::default(),
                impurity_reasons: vec!["calls fmt.Println".to_string()],
                external_calls: vec!["fmt.Println".to_string()],
            },
        );
        let index: Arc<dyn SymbolIndex> = Arc::new(index);
        let ctx_ref = ContextRef::new("a.go".to_string(), Some("a".to_string()), None).unwrap();
        let (mut hydrated, symbol_id) = hydrate(&index, &ctx_ref).await.unwrap().unwrap();

        let engine = ExpansionEngine::new(index);
        let directives = vec![ExpansionDirective::parse("callees:1").unwrap()];
        engine
            .apply_expansions(&mut hydrated, symbol_id.as_ref(), &directives, 10_000)
            .await;

        let callees = hydrated.expanded.get("callees").unwrap();
        assert_eq!(callees.len(), 1);
        assert_eq!(callees[0].symbol.as_deref(), Some("Println"));
        assert!(callees[0].is_external);
    }

    #[tokio::test]
    async fn siblings_falls_back_to_whole_file_when_receiver_unknown() {
        let index = FakeIndex::new()
            .with_file(
                "t.go",
                "func (r *T) M1() {\n}\n\nfunc (r *T) M2() {\n}\n\nfunc Helper() {\n}\n",
            )
            .with_symbol("M1", "t.go", 1, 2);
        let index: Arc<dyn SymbolIndex> = Arc::new(index);
        let symbol = index
            .get_enhanced_symbol(&SymbolId::new("M1"))
            .await
            .unwrap();
        let siblings = directives::siblings(&index, &symbol).await;
        let names: Vec<_> = siblings.iter().filter_map(|h| h.symbol.clone()).collect();
        assert!(names.contains(&"M2".to_string()));
        assert!(!names.contains(&"M1".to_string()));
    }

    #[tokio::test]
    async fn doc_directive_reduces_source_to_leading_comment() {
        let index = FakeIndex::new()
            .with_file("a.go", "// Does a thing.\nfunc a() {\n  return\n}\n")
            .with_symbol("a", "a.go", 1, 4);
        let index: Arc<dyn SymbolIndex> = Arc::new(index);
        let ctx_ref = ContextRef::new("a.go".to_string(), Some("a".to_string()), None).unwrap();
        let (mut hydrated, symbol_id) = hydrate(&index, &ctx_ref).await.unwrap().unwrap();

        let engine = ExpansionEngine::new(index);
        let directives = vec![ExpansionDirective::parse("doc").unwrap()];
        let (applied, _spent) = engine
            .apply_expansions(&mut hydrated, symbol_id.as_ref(), &directives, 10_000)
            .await;

        assert_eq!(applied, 1);
        assert_eq!(hydrated.source, "// Does a thing.");
    }
}
