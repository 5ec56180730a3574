use std::collections::HashMap;

use super::{ResultType, SearchResult};

/// Rank of a type in the output; lower sorts first.
fn priority(kind: ResultType) -> u8 {
    match kind {
        ResultType::Class => 0,
        ResultType::Methods => 1,
        ResultType::Properties => 2,
        ResultType::Constructor => 3,
        _ => 4,
    }
}

/// Merge `primary` then `secondary`, collapse entries sharing a url, rank by
/// type and cap at `max`.
///
/// A duplicate replaces the kept entry only when it has strictly fewer empty
/// fields, so ties keep the earlier one. The entry stays at the position
/// where its url first appeared.
pub fn aggregate(
    primary: Vec<SearchResult>,
    secondary: Vec<SearchResult>,
    max: usize,
) -> Vec<SearchResult> {
    let mut merged: Vec<SearchResult> = Vec::with_capacity(primary.len() + secondary.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for result in primary.into_iter().chain(secondary) {
        match seen.get(&result.url) {
            Some(&idx) => {
                if result.empty_fields() < merged[idx].empty_fields() {
                    merged[idx] = result;
                }
            }
            None => {
                seen.insert(result.url.clone(), merged.len());
                merged.push(result);
            }
        }
    }

    merged.sort_by_key(|r| priority(r.kind));
    merged.truncate(max);
    merged
}
