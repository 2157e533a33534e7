//! Grouping validated records into districts

use log::warn;
use rustc_hash::FxHashMap;

use crate::models::{District, SchoolRecord};

/// Partition records by district identifier
///
/// Districts come back in the order their first school appears; schools keep
/// their input order within a district.
#[must_use]
pub fn group_by_district(records: Vec<SchoolRecord>) -> Vec<District> {
    let mut slots: FxHashMap<String, usize> = FxHashMap::default();
    let mut districts: Vec<District> = Vec::new();

    for record in records {
        match slots.get(record.district_id()) {
            Some(&slot) => districts[slot].push(record),
            None => {
                slots.insert(record.district_id().to_string(), districts.len());
                districts.push(District::new(record));
            }
        }
    }

    for district in districts.iter().filter(|d| !d.has_consistent_metadata()) {
        warn!(
            "District {} has schools with differing name or state, using '{}' ({})",
            district.district_id(),
            district.district_name(),
            district.state_name()
        );
    }

    districts
}
