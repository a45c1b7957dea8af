//! Reference hydration: resolving a `ContextRef` to a `HydratedRef`
//! (spec.md §4.3.1).

use std::collections::BTreeMap;
use std::sync::Arc;

use ctxcore_domain::constants::DECLARATION_KEYWORDS;
use ctxcore_domain::error::Result;
use ctxcore_domain::ports::SymbolIndex;
use ctxcore_domain::value_objects::{ContextRef, HydratedRef, LineRange, Symbol, SymbolId};
use ctxcore_extractor::{extract_by_lines, first_code_line, read_file, scan_for_declaration};

/// Outcome of resolving a symbol identity alongside its hydrated text:
/// `Some(id)` when the index resolved a concrete symbol (so relationship
/// directives can be walked from it), `None` when hydration fell back to a
/// bare line range or declaration scan.
pub type Hydrated = (HydratedRef, Option<SymbolId>);

/// Resolve `ctx_ref` to hydrated source, following spec.md §4.3.1's
/// precedence: symbol lookup, then explicit line range, then a
/// declaration-line scan.
///
/// `Ok(None)` is spec.md §4.3.5's "missing symbol: empty result, not an
/// error" case. Genuine errors (`file-not-found`, `line-out-of-range`,
/// `underspecified-ref`) propagate for the driver to turn into a warning.
pub async fn hydrate(index: &Arc<dyn SymbolIndex>, ctx_ref: &ContextRef) -> Result<Option<Hydrated>> {
    if let Some(name) = &ctx_ref.symbol {
        let matches = index.find_symbols_by_name(name).await?;
        if let Some(symbol) = matches.into_iter().next() {
            return hydrate_from_symbol(index, ctx_ref, symbol).await.map(Some);
        }
    }

    if let Some(range) = ctx_ref.lines {
        let content = read_file(&ctx_ref.file)?;
        let (source, end) = extract_by_lines(&ctx_ref.file, &content, range)?;
        let hydrated = HydratedRef {
            file: ctx_ref.file.clone(),
            symbol: ctx_ref.symbol.clone(),
            role: ctx_ref.role.clone(),
            note: ctx_ref.note.clone(),
            lines: Some(LineRange {
                start: range.start,
                end,
            }),
            signature: Some(first_code_line(&source)),
            source,
            symbol_type: None,
            is_exported: false,
            purity: None,
            is_external: false,
            expanded: BTreeMap::new(),
        };
        return Ok(Some((hydrated, None)));
    }

    if let Some(name) = &ctx_ref.symbol {
        let content = read_file(&ctx_ref.file)?;
        let Some((body, start, end)) = scan_for_declaration(&content, name, DECLARATION_KEYWORDS)
        else {
            tracing::debug!(symbol = %name, file = %ctx_ref.file, "symbol not found by scan");
            return Ok(None);
        };
        let hydrated = HydratedRef {
            file: ctx_ref.file.clone(),
            symbol: Some(name.clone()),
            role: ctx_ref.role.clone(),
            note: ctx_ref.note.clone(),
            lines: Some(LineRange { start, end }),
            signature: Some(first_code_line(&body)),
            source: body,
            symbol_type: None,
            is_exported: false,
            purity: None,
            is_external: false,
            expanded: BTreeMap::new(),
        };
        return Ok(Some((hydrated, None)));
    }

    Err(ctxcore_domain::error::Error::underspecified_ref(
        ctx_ref.file.clone(),
    ))
}

async fn hydrate_from_symbol(
    index: &Arc<dyn SymbolIndex>,
    ctx_ref: &ContextRef,
    symbol: Symbol,
) -> Result<Hydrated> {
    let hydrated = hydrate_symbol(index, &symbol).await?;
    let mut hydrated = hydrated;
    hydrated.role = ctx_ref.role.clone();
    hydrated.note = ctx_ref.note.clone();
    Ok((hydrated, Some(symbol.id)))
}

/// Hydrate a `HydratedRef` directly from an already-resolved index symbol,
/// used both for top-level symbol matches and for expansion children.
pub async fn hydrate_symbol(index: &Arc<dyn SymbolIndex>, symbol: &Symbol) -> Result<HydratedRef> {
    let file_info = index.get_file_info(&symbol.file_id).await?;
    let content = read_file(&file_info.path)?;
    let (source, end) = extract_by_lines(
        &file_info.path,
        &content,
        LineRange {
            start: symbol.start_line,
            end: symbol.end_line,
        },
    )?;
    let purity = index.get_side_effect_info(&symbol.id).await.ok().flatten();
    Ok(HydratedRef {
        file: file_info.path,
        symbol: Some(symbol.name.clone()),
        role: None,
        note: None,
        lines: Some(LineRange {
            start: symbol.start_line,
            end,
        }),
        signature: Some(first_code_line(&source)),
        source,
        symbol_type: Some(symbol.kind),
        is_exported: symbol.is_exported,
        purity,
        is_external: false,
        expanded: BTreeMap::new(),
    })
}
