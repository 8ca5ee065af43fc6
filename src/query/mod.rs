use crate::cache::Snapshot;
use crate::propagate::PositionSample;

pub const MAX_PAGE_SIZE: usize = 1000;

/// Optional constraints on a satellite listing, combined with AND
#[derive(Debug, Clone, Default)]
pub struct SatelliteFilter {
    pub name: Option<String>,
    pub norad_id: Option<u32>,
    pub sat_type: Option<String>,
    pub mission: Option<String>,
    pub min_altitude: Option<f64>,
    pub max_altitude: Option<f64>,
}

impl SatelliteFilter {
    pub fn matches(&self, sample: &PositionSample) -> bool {
        contains_ci(Some(&sample.name), self.name.as_deref())
            && self.norad_id.is_none_or(|id| sample.norad_id == id)
            && contains_ci(sample.sat_type.as_deref(), self.sat_type.as_deref())
            && contains_ci(
                sample.mission_description.as_deref(),
                self.mission.as_deref(),
            )
            && self.min_altitude.is_none_or(|min| sample.altitude_km >= min)
            && self.max_altitude.is_none_or(|max| sample.altitude_km <= max)
    }
}

/// Case-insensitive substring test. An empty needle matches anything; a
/// missing haystack matches only an empty needle.
fn contains_ci(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None | Some("") => true,
        Some(needle) => haystack
            .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
    }
}

/// 1-indexed page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: usize,
    size: usize,
}

impl Page {
    /// Page numbers below 1 become 1; sizes are clamped to `1..=MAX_PAGE_SIZE`
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn offset(&self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }
}

/// Filtered, paginated view of a snapshot in snapshot order
pub fn query<'a>(
    snapshot: &'a Snapshot,
    filter: &SatelliteFilter,
    page: Page,
) -> Vec<&'a PositionSample> {
    snapshot
        .samples()
        .iter()
        .filter(|s| filter.matches(s))
        .skip(page.offset())
        .take(page.size())
        .collect()
}
