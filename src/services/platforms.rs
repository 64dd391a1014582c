use crate::{
    error::AppResult,
    models::{PlatformTally, TitleRecord},
    services::catalog::MergedCatalog,
};

/// Counts, per platform, how many of the given titles it carries
///
/// Titles are matched exactly against the catalog. A title whose catalog rows
/// disagree on membership fails the whole tally.
pub fn aggregate<S: AsRef<str>>(titles: &[S], catalog: &MergedCatalog) -> AppResult<PlatformTally> {
    let mut tally = PlatformTally::default();
    for title in titles {
        tally.add(catalog.flags_for(title.as_ref())?);
    }
    Ok(tally)
}

/// Counts platform membership over already-resolved catalog rows
///
/// Each row votes with its own flags, so rows that share a title never
/// conflict.
pub fn tally_records<'a, I>(records: I) -> PlatformTally
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    let mut tally = PlatformTally::default();
    for record in records {
        tally.add(record.platforms);
    }
    tally
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::models::{Platform, RawTitle};
    use crate::services::catalog::build_catalog;
    use proptest::prelude::*;

    /// Membership bitmask per title (never empty) and a pick of titles to tally
    fn memberships_and_picks() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
        prop::collection::vec(1u8..16, 1..20).prop_flat_map(|masks| {
            let n = masks.len();
            (Just(masks), prop::collection::vec(0..n, 0..=10))
        })
    }

    fn catalog(masks: &[u8]) -> MergedCatalog {
        let tables = Platform::ALL
            .iter()
            .enumerate()
            .map(|(bit, platform)| {
                let rows: Vec<RawTitle> = masks
                    .iter()
                    .enumerate()
                    .filter(|(_, mask)| **mask & (1u8 << bit) != 0)
                    .map(|(i, _)| RawTitle {
                        title: format!("T{}", i),
                        kind: "Movie".to_string(),
                        ..Default::default()
                    })
                    .collect();
                (*platform, rows)
            })
            .collect();
        build_catalog(tables).unwrap()
    }

    proptest! {
        #[test]
        fn prop_tally_counts_within_bounds((masks, picks) in memberships_and_picks()) {
            let catalog = catalog(&masks);
            let titles: Vec<String> = picks.iter().map(|i| format!("T{}", i)).collect();

            let tally = aggregate(&titles, &catalog).unwrap();
            for (bit, platform) in Platform::ALL.iter().enumerate() {
                let expected = picks.iter().filter(|i| masks[**i] & (1u8 << bit) != 0).count();
                prop_assert_eq!(tally.get(*platform) as usize, expected);
                prop_assert!(tally.get(*platform) as usize <= titles.len());
            }
        }

        #[test]
        fn prop_row_tally_matches_title_tally((masks, picks) in memberships_and_picks()) {
            let catalog = catalog(&masks);
            let titles: Vec<String> = picks.iter().map(|i| format!("T{}", i)).collect();
            let rows = titles.iter().map(|t| {
                catalog.records().iter().find(|r| &r.title == t).unwrap()
            });

            prop_assert_eq!(tally_records(rows), aggregate(&titles, &catalog).unwrap());
        }
    }
}
