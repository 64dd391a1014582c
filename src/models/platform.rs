use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use std::fmt::Display;

/// One of the four streaming catalogs a title can belong to
///
/// Declaration order is the tie-break order when ranking platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Netflix,
    Amazon,
    Hulu,
    Disney,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Netflix,
        Platform::Amazon,
        Platform::Hulu,
        Platform::Disney,
    ];

    /// Stable key used in JSON tallies and configuration
    pub fn key(self) -> &'static str {
        match self {
            Platform::Netflix => "netflix",
            Platform::Amazon => "amazon",
            Platform::Hulu => "hulu",
            Platform::Disney => "disney",
        }
    }

    /// Human-readable service name
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Netflix => "Netflix",
            Platform::Amazon => "Amazon Prime Video",
            Platform::Hulu => "Hulu",
            Platform::Disney => "Disney+",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Membership of a single title across the four catalogs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PlatformFlags {
    members: [bool; 4],
}

impl PlatformFlags {
    /// Flags with exactly one platform set
    pub fn only(platform: Platform) -> Self {
        let mut flags = Self::default();
        flags.insert(platform);
        flags
    }

    pub fn insert(&mut self, platform: Platform) {
        self.members[platform.slot()] = true;
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.members[platform.slot()]
    }

    /// Platforms carrying the title, in declaration order
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.contains(*p))
            .collect()
    }
}

/// Per-platform vote counts over a set of recommended titles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformTally {
    counts: [u32; 4],
}

impl PlatformTally {
    /// Adds one vote for every platform set in `flags`
    pub fn add(&mut self, flags: PlatformFlags) {
        for platform in Platform::ALL {
            if flags.contains(platform) {
                self.counts[platform.slot()] += 1;
            }
        }
    }

    pub fn get(&self, platform: Platform) -> u32 {
        self.counts[platform.slot()]
    }

    /// Platforms by vote count descending; ties keep declaration order
    pub fn ranked(&self) -> Vec<Platform> {
        let mut platforms = Platform::ALL.to_vec();
        // sort_by is stable, so equal counts stay in declaration order
        platforms.sort_by(|a, b| self.get(*b).cmp(&self.get(*a)));
        platforms
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, u32)> + '_ {
        Platform::ALL.into_iter().map(|p| (p, self.get(p)))
    }
}

impl Serialize for PlatformTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Platform::ALL.len()))?;
        for (platform, count) in self.iter() {
            map.serialize_entry(platform.key(), &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_display_names() {
        assert_eq!(Platform::Netflix.to_string(), "Netflix");
        assert_eq!(Platform::Amazon.to_string(), "Amazon Prime Video");
        assert_eq!(Platform::Hulu.to_string(), "Hulu");
        assert_eq!(Platform::Disney.to_string(), "Disney+");
    }

    #[test]
    fn test_platform_serde_lowercase() {
        let json = serde_json::to_string(&Platform::Disney).unwrap();
        assert_eq!(json, "\"disney\"");

        let parsed: Platform = serde_json::from_str("\"amazon\"").unwrap();
        assert_eq!(parsed, Platform::Amazon);
    }

    #[test]
    fn test_flags_insert() {
        let mut flags = PlatformFlags::only(Platform::Netflix);
        flags.insert(Platform::Hulu);
        flags.insert(Platform::Hulu);
        assert_eq!(flags.platforms(), vec![Platform::Netflix, Platform::Hulu]);
        assert!(!flags.contains(Platform::Amazon));
    }

    #[test]
    fn test_flags_default_is_empty() {
        assert!(PlatformFlags::default().platforms().is_empty());
    }

    #[test]
    fn test_tally_ranked_tie_break_by_declaration_order() {
        let mut tally = PlatformTally::default();
        tally.add(PlatformFlags::only(Platform::Disney));
        tally.add(PlatformFlags::only(Platform::Amazon));
        tally.add(PlatformFlags::only(Platform::Netflix));

        assert_eq!(
            tally.ranked(),
            vec![Platform::Netflix, Platform::Amazon, Platform::Disney, Platform::Hulu]
        );
    }

    #[test]
    fn test_tally_ranked_by_count() {
        let mut tally = PlatformTally::default();
        let mut both = PlatformFlags::only(Platform::Hulu);
        both.insert(Platform::Disney);
        tally.add(both);
        tally.add(PlatformFlags::only(Platform::Hulu));

        assert_eq!(tally.get(Platform::Hulu), 2);
        assert_eq!(tally.ranked()[0], Platform::Hulu);
        assert_eq!(tally.ranked()[1], Platform::Disney);
    }

    #[test]
    fn test_tally_serializes_as_map() {
        let mut tally = PlatformTally::default();
        tally.add(PlatformFlags::only(Platform::Netflix));

        let json = serde_json::to_value(tally).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "netflix": 1, "amazon": 0, "hulu": 0, "disney": 0 })
        );
    }
}
