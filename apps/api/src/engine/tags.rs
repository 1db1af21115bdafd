use std::collections::HashMap;

use serde::Serialize;

/// Average answer score of every question carrying a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagScore {
    pub tag: String,
    pub average: f64,
    pub count: u32,
}

/// Ranks tags by average score, highest first.
///
/// Each `(tags, score)` pair credits `score` to every tag in `tags`. Ties keep
/// the order in which tags were first seen, so the ranking is deterministic
/// for a given input order.
pub fn rank_tags<'a, I>(scored: I) -> Vec<TagScore>
where
    I: IntoIterator<Item = (&'a [String], u8)>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<(&'a str, u32, u32)> = Vec::new();

    for (tags, score) in scored {
        for tag in tags {
            let slot = *index.entry(tag.as_str()).or_insert_with(|| {
                totals.push((tag.as_str(), 0, 0));
                totals.len() - 1
            });
            totals[slot].1 += score as u32;
            totals[slot].2 += 1;
        }
    }

    let mut ranking: Vec<TagScore> = totals
        .into_iter()
        .map(|(tag, sum, count)| TagScore {
            tag: tag.to_string(),
            average: sum as f64 / count as f64,
            count,
        })
        .collect();

    // sort_by is stable: equal averages keep first-seen order.
    ranking.sort_by(|a, b| b.average.total_cmp(&a.average));
    ranking
}

/// The first `n` tags of a ranking.
pub fn top_tags(ranking: &[TagScore], n: usize) -> Vec<&str> {
    ranking.iter().take(n).map(|t| t.tag.as_str()).collect()
}
