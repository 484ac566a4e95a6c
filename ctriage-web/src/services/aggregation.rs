//! Category distribution and result filtering

use ctriage_common::categories::ALL_CATEGORIES;
use ctriage_common::{Category, CategoryCount, ClassificationResult};

/// Count results per category
///
/// Every registered category starts at zero; unrecognized values get their
/// own counter keyed by the literal value. Zero counts are omitted and the
/// output is sorted by descending count. Ties keep registry order, then
/// first-seen order for unrecognized values.
pub fn aggregate(results: &[ClassificationResult]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Category::all()
        .iter()
        .map(|category| CategoryCount {
            category: category.as_str().to_string(),
            count: 0,
        })
        .collect();

    for result in results {
        let key = result.category.as_str();
        match counts.iter_mut().find(|entry| entry.category == key) {
            Some(entry) => entry.count += 1,
            None => {
                tracing::warn!(category = %key, "Unrecognized category returned by classifier");
                counts.push(CategoryCount {
                    category: key.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.retain(|entry| entry.count > 0);
    // sort_by is stable, so equal counts keep insertion order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Restrict results to one category
///
/// `"all"` returns every result unchanged; anything else is an exact match
/// against the category literal.
pub fn filter(results: &[ClassificationResult], selector: &str) -> Vec<ClassificationResult> {
    if selector == ALL_CATEGORIES {
        return results.to_vec();
    }
    results
        .iter()
        .filter(|result| result.category.as_str() == selector)
        .cloned()
        .collect()
}
