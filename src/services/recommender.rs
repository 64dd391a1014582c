use crate::{error::AppResult, services::context::RecommenderContext};

/// Number of neighbors returned per query
pub const RECOMMENDATION_LIMIT: usize = 10;

/// A ranked row with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub score: f64,
}

/// Orders rows by score descending, dropping `query_row` by position
///
/// Equal scores keep ascending row order.
pub fn rank_neighbors(scores: &[f64], query_row: usize, limit: usize) -> Vec<Neighbor> {
    let mut rows: Vec<usize> = (0..scores.len()).collect();
    rows.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));

    rows.into_iter()
        .filter(|row| *row != query_row)
        .take(limit)
        .map(|row| Neighbor {
            row,
            score: scores[row],
        })
        .collect()
}

/// Top neighbors of a title with their scores
pub fn recommend_scored(query_title: &str, context: &RecommenderContext) -> AppResult<Vec<Neighbor>> {
    let row = context.row_of(query_title)?;
    let scores = context.index().row_scores(row);
    Ok(rank_neighbors(&scores, row, RECOMMENDATION_LIMIT))
}

/// Titles most similar to `query_title`, best first, at most ten
pub fn recommend(query_title: &str, context: &RecommenderContext) -> AppResult<Vec<String>> {
    let neighbors = recommend_scored(query_title, context)?;
    Ok(neighbors
        .iter()
        .filter_map(|n| context.catalog().get(n.row))
        .map(|record| record.title.clone())
        .collect())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::models::{Platform, RawTitle};
    use crate::services::{catalog::build_catalog, similarity::SimilarityMode};
    use proptest::prelude::*;

    /// Random descriptions plus a query row inside them
    fn catalog_and_query() -> impl Strategy<Value = (Vec<String>, usize, SimilarityMode)> {
        (1usize..30).prop_flat_map(|n| {
            (
                prop::collection::vec("([a-d]{2,3}, ?){0,5}", n),
                0..n,
                prop_oneof![Just(SimilarityMode::Eager), Just(SimilarityMode::Lazy)],
            )
        })
    }

    fn context(descriptions: &[String], mode: SimilarityMode) -> RecommenderContext {
        let rows = descriptions
            .iter()
            .enumerate()
            .map(|(i, description)| RawTitle {
                title: format!("Title {}", i),
                kind: "Movie".to_string(),
                description: description.clone(),
                ..Default::default()
            })
            .collect();
        let catalog = build_catalog(vec![(Platform::Hulu, rows)]).unwrap();
        RecommenderContext::build(catalog, mode).unwrap()
    }

    proptest! {
        #[test]
        fn prop_recommend_excludes_query_and_is_bounded(
            (descriptions, query, mode) in catalog_and_query()
        ) {
            let ctx = context(&descriptions, mode);
            let query_title = format!("Title {}", query);

            let titles = recommend(&query_title, &ctx).unwrap();
            prop_assert!(!titles.contains(&query_title));
            prop_assert_eq!(titles.len(), RECOMMENDATION_LIMIT.min(descriptions.len() - 1));
            prop_assert_eq!(&titles, &recommend(&query_title, &ctx).unwrap());
        }

        #[test]
        fn prop_rank_neighbors_sorted_descending(
            scores in prop::collection::vec((0u8..=10).prop_map(|s| f64::from(s) / 10.0), 1..40),
            limit in 0usize..15
        ) {
            let query = scores.len() / 2;
            let ranked = rank_neighbors(&scores, query, limit);

            prop_assert!(ranked.len() <= limit.min(scores.len() - 1));
            prop_assert!(ranked.iter().all(|n| n.row != query));
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].row < pair[1].row));
            }
        }
    }
}
