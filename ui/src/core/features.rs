//! Physiological feature categories and the subject files charted for each.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Hr,
    Temp,
    Eda,
    Acc,
}

impl Feature {
    pub const ALL: [Feature; 4] = [Feature::Hr, Feature::Temp, Feature::Eda, Feature::Acc];

    /// Dropdown value / data directory name.
    pub fn key(&self) -> &'static str {
        match self {
            Feature::Hr => "hr",
            Feature::Temp => "temp",
            Feature::Eda => "eda",
            Feature::Acc => "acc",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Feature::Hr => "bpm",
            Feature::Temp => "°C",
            Feature::Eda => "μS",
            Feature::Acc => "g",
        }
    }

    /// Subject files compared for this feature, relative to the data root.
    pub fn file_paths(&self) -> &'static [&'static str] {
        match self {
            Feature::Hr => &["hr/hr_S5_Midterm2.csv", "hr/hr_S7_Midterm2.csv"],
            Feature::Temp => &["temp/temp_S7_Final.csv", "temp/temp_S8_Final.csv"],
            Feature::Eda => &["eda/eda_S6_Midterm1.csv", "eda/eda_S10_Midterm1.csv"],
            Feature::Acc => &["acc/acc_S3_Midterm2.csv", "acc/acc_S7_Midterm2.csv"],
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature `{0}`")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = raw.trim().to_ascii_lowercase();
        Feature::ALL
            .into_iter()
            .find(|feature| feature.key() == key)
            .ok_or_else(|| UnknownFeature(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for feature in Feature::ALL {
            assert_eq!(feature.key().parse::<Feature>(), Ok(feature));
        }
        assert_eq!(" HR ".parse::<Feature>(), Ok(Feature::Hr));
        assert!("bvp".parse::<Feature>().is_err());
        assert!("".parse::<Feature>().is_err());
    }

    #[test]
    fn every_feature_compares_a_pair_from_its_own_directory() {
        for feature in Feature::ALL {
            let paths = feature.file_paths();
            assert_eq!(paths.len(), 2);
            for path in paths {
                assert!(path.starts_with(&format!("{}/", feature.key())));
                assert!(path.ends_with(".csv"));
            }
        }
    }
}
