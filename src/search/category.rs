//! Service categories and their keyword queries

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What the person is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    BarsAndClubs,
    Sports,
    ChemsexSupport,
    SexualHealthCentres,
    CommunityGroups,
}

impl Category {
    /// Every category, in the order the form lists them
    pub const ALL: [Category; 5] = [
        Self::BarsAndClubs,
        Self::Sports,
        Self::ChemsexSupport,
        Self::SexualHealthCentres,
        Self::CommunityGroups,
    ];

    /// Name shown in the form and stamped on every result
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BarsAndClubs => "Bars and Clubs",
            Self::Sports => "Sports",
            Self::ChemsexSupport => "Chemsex Support",
            Self::SexualHealthCentres => "Sexual Health Centres",
            Self::CommunityGroups => "Community Groups",
        }
    }

    /// URL/CLI friendly identifier
    pub fn slug(&self) -> &'static str {
        match self {
            Self::BarsAndClubs => "bars-and-clubs",
            Self::Sports => "sports",
            Self::ChemsexSupport => "chemsex-support",
            Self::SexualHealthCentres => "sexual-health-centres",
            Self::CommunityGroups => "community-groups",
        }
    }

    /// Boolean-OR keyword string sent to the nearby search
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::BarsAndClubs => {
                r#"(gay OR queer OR lgbt OR lgbtq OR lgbtq+ OR lesbian OR bi) (bar OR club OR pub OR nightlife OR nightclub OR venue OR cabaret OR "drag show" OR "drag queen" OR "drag king")"#
            }
            Self::Sports => {
                "(gay OR queer OR lgbt OR lgbtq OR lgbtq+ OR lesbian OR bi) (sports OR fitness OR gym OR swimming OR football OR rugby OR tennis OR volleyball OR athletics OR running OR basketball OR hockey OR cricket OR boxing)"
            }
            Self::ChemsexSupport => {
                r#"(gay OR queer OR lgbt OR msm) (chemsex OR "chem sex" OR chems OR "chem addiction" OR "chemsex support" OR "chem sex support")"#
            }
            Self::SexualHealthCentres => {
                r#"(gay OR queer OR lgbt OR lgbtq OR lgbtq+ OR lesbian OR bi OR msm) ("sexual health" OR std OR sti OR clinic OR "health centre" OR "health center" OR prep OR screening OR testing)"#
            }
            Self::CommunityGroups => {
                "(gay OR queer OR lgbt OR lgbtq OR lgbtq+ OR lesbian OR bi) (community OR support OR social OR group OR charity OR center OR centre OR youth OR pride OR meetup OR network)"
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|c| {
                c.slug() == wanted || c.display_name().to_lowercase().replace(' ', "-") == wanted
            })
            .ok_or_else(|| Error::InvalidCategory(s.to_string()))
    }
}

// Categories travel as their display name, which is also what the front end shows.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// List all available categories
pub fn available_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_display_name() {
        assert_eq!(
            Category::from_str("Sexual Health Centres").unwrap(),
            Category::SexualHealthCentres
        );
        assert_eq!(
            Category::from_str("bars and clubs").unwrap(),
            Category::BarsAndClubs
        );
    }

    #[test]
    fn test_from_slug() {
        assert_eq!(
            Category::from_str("chemsex-support").unwrap(),
            Category::ChemsexSupport
        );
        assert_eq!(
            Category::from_str("community_groups").unwrap(),
            Category::CommunityGroups
        );
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            Category::from_str("Brunch"),
            Err(Error::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_keywords_are_distinct() {
        let mut keywords: Vec<_> = Category::ALL.iter().map(|c| c.keyword()).collect();
        keywords.dedup();
        assert_eq!(keywords.len(), 5);
        assert!(Category::SexualHealthCentres
            .keyword()
            .contains(r#""sexual health""#));
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Category::Sports).unwrap();
        assert_eq!(json, r#""Sports""#);

        let parsed: Category = serde_json::from_str(r#""Community Groups""#).unwrap();
        assert_eq!(parsed, Category::CommunityGroups);

        assert!(serde_json::from_str::<Category>(r#""Karaoke""#).is_err());
    }
}
