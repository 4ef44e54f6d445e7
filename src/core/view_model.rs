use serde::{Deserialize, Serialize};

use crate::core::PieDatum;
use crate::error::ChartResult;

/// Noun pair used to phrase counts in tooltips, e.g. `("connection", "connections")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub singular: String,
    pub plural: String,
}

impl Indicator {
    #[must_use]
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new("item", "items")
    }
}

/// Aggregate series plus one breakdown series per profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DonutViewModel {
    #[serde(rename = "globalData")]
    pub global_data: Vec<PieDatum>,
    #[serde(rename = "detailData", default)]
    pub detail_data: Vec<Vec<PieDatum>>,
}

impl DonutViewModel {
    #[must_use]
    pub fn new(global_data: Vec<PieDatum>, detail_data: Vec<Vec<PieDatum>>) -> Self {
        Self {
            global_data,
            detail_data,
        }
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Profile tag of a detail series, read from its first datum.
    #[must_use]
    pub fn profile_id(&self, series: usize) -> Option<&str> {
        self.detail_data
            .get(series)?
            .first()?
            .profil_id
            .as_deref()
    }
}

/// Reorders `detail` to follow the category order of `global`.
///
/// Detail entries whose `module_id` does not appear in `global` are dropped,
/// and so are global categories absent from `detail`.
#[must_use]
pub fn reconcile_detail(global: &[PieDatum], detail: &[PieDatum]) -> Vec<PieDatum> {
    global
        .iter()
        .filter_map(|reference| {
            detail
                .iter()
                .find(|candidate| candidate.module_id == reference.module_id)
                .cloned()
        })
        .collect()
}
