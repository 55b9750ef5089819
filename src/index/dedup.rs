use crate::engine::SearchEngine;

/// Removes every document whose term-set (ignoring frequencies) equals an
/// earlier, not-yet-marked document's term-set. Scans ids in insertion
/// order; removal is applied once at the end so the scan itself never
/// observes a document disappearing mid-comparison.
pub fn remove_duplicates(engine: &mut SearchEngine) {
    let ids: Vec<_> = engine.index().ids().collect();
    let mut marked = std::collections::HashSet::new();

    for (i, &first) in ids.iter().enumerate() {
        if marked.contains(&first) {
            continue;
        }
        let Some(first_terms) = engine.index().term_set(first) else {
            continue;
        };
        for &second in &ids[i + 1..] {
            if marked.contains(&second) {
                continue;
            }
            if engine.index().term_set(second).as_ref() == Some(&first_terms) {
                marked.insert(second);
            }
        }
    }

    for id in marked {
        engine.remove_document(id);
    }
}
