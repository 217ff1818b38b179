//! Groups zone records by region and reduces each group to a summary.
//!
//! Members of a group are always reduced in a fixed order (ascending zone
//! id, then field values), so the summaries are bit-identical no matter
//! how the input was ordered.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use firescape_region_models::{RegionLabel, RegionSummaries, RegionSummary, ZoneRecord};

use crate::AnalyticsError;

/// Groups records by the region their zone id classifies to.
///
/// Regions with no records are absent. Each group is sorted into the
/// canonical reduction order.
#[must_use]
pub fn group_zones(records: &[ZoneRecord]) -> BTreeMap<RegionLabel, Vec<&ZoneRecord>> {
    let mut groups: BTreeMap<RegionLabel, Vec<&ZoneRecord>> = BTreeMap::new();

    for record in records {
        groups.entry(record.region()).or_default().push(record);
    }

    for members in groups.values_mut() {
        members.sort_by(|a, b| canonical_order(a, b));
    }

    groups
}

/// Aggregates zone records into one [`RegionSummary`] per region present
/// in the input.
///
/// Zones that match no region are kept under [`RegionLabel::Unknown`].
/// An empty input yields an empty map.
///
/// # Errors
///
/// Returns [`AnalyticsError::ZeroArea`] if any zone's area is zero,
/// negative or not finite, [`AnalyticsError::InvalidStatistic`] if any
/// other statistic is negative or not finite, and
/// [`AnalyticsError::NonFiniteTotal`] if a region's sums overflow.
pub fn aggregate(records: &[ZoneRecord]) -> Result<RegionSummaries, AnalyticsError> {
    let summaries = group_zones(records)
        .into_iter()
        .map(|(region, members)| summarize(region, &members).map(|summary| (region, summary)))
        .collect::<Result<RegionSummaries, _>>()?;

    if let Some(unknown) = summaries.get(&RegionLabel::Unknown) {
        log::warn!(
            "{} zone(s) did not match any physiographic region and were grouped as Unknown",
            unknown.zone_count
        );
    }

    log::debug!(
        "Aggregated {} zone records into {} regions",
        records.len(),
        summaries.len()
    );

    Ok(summaries)
}

#[allow(clippy::cast_precision_loss)]
fn summarize(
    region: RegionLabel,
    members: &[&ZoneRecord],
) -> Result<RegionSummary, AnalyticsError> {
    let mut total_area = 0.0;
    let mut total_fires: u64 = 0;
    let mut total_burned = 0.0;
    let mut total_rare_veg = 0.0;
    let mut percent_sum = 0.0;
    let mut weighted_precip = 0.0;

    for zone in members {
        check_zone(zone)?;

        total_area += zone.area_km2;
        total_fires = total_fires.saturating_add(zone.fire_count);
        total_burned += zone.burned_area_km2;
        total_rare_veg += zone.rare_veg_area_km2;
        percent_sum += zone.percent_rare_veg;
        weighted_precip += zone.precipitation_mm * zone.area_km2;
    }

    let sums = [
        total_area,
        total_burned,
        total_rare_veg,
        percent_sum,
        weighted_precip,
    ];
    if !sums.iter().all(|sum| sum.is_finite()) {
        return Err(AnalyticsError::NonFiniteTotal { region });
    }

    // Groups are never empty and every member area is positive, so
    // total_area > 0 here.
    let per_100_km2 = |total: f64| total / total_area * 100.0;

    let summary = RegionSummary {
        zone_count: members.len(),
        total_area_km2: total_area,
        total_fire_count: total_fires,
        total_burned_area_km2: total_burned,
        total_rare_veg_area_km2: total_rare_veg,
        fire_density: per_100_km2(total_fires as f64),
        burned_density: per_100_km2(total_burned),
        rare_veg_density: per_100_km2(total_rare_veg),
        mean_percent_rare_veg: percent_sum / members.len() as f64,
        mean_precipitation_mm: weighted_precip / total_area,
    };

    let derived = [
        summary.fire_density,
        summary.burned_density,
        summary.rare_veg_density,
        summary.mean_percent_rare_veg,
        summary.mean_precipitation_mm,
    ];
    if !derived.iter().all(|value| value.is_finite()) {
        return Err(AnalyticsError::NonFiniteTotal { region });
    }

    Ok(summary)
}

/// Rejects a zone whose area is not positive or whose other statistics
/// are negative or not finite.
fn check_zone(zone: &ZoneRecord) -> Result<(), AnalyticsError> {
    if !(zone.area_km2.is_finite() && zone.area_km2 > 0.0) {
        return Err(AnalyticsError::ZeroArea {
            zone_id: zone.zone_id.clone(),
            area_km2: zone.area_km2,
        });
    }

    let fields = [
        ("burned_area_km2", zone.burned_area_km2),
        ("rare_veg_area_km2", zone.rare_veg_area_km2),
        ("percent_rare_veg", zone.percent_rare_veg),
        ("precipitation_mm", zone.precipitation_mm),
    ];
    match fields
        .into_iter()
        .find(|(_, value)| !(value.is_finite() && *value >= 0.0))
    {
        Some((field, value)) => Err(AnalyticsError::InvalidStatistic {
            zone_id: zone.zone_id.clone(),
            field,
            value,
        }),
        None => Ok(()),
    }
}

fn canonical_order(a: &ZoneRecord, b: &ZoneRecord) -> Ordering {
    a.zone_id
        .cmp(&b.zone_id)
        .then_with(|| a.area_km2.total_cmp(&b.area_km2))
        .then_with(|| a.fire_count.cmp(&b.fire_count))
        .then_with(|| a.burned_area_km2.total_cmp(&b.burned_area_km2))
        .then_with(|| a.rare_veg_area_km2.total_cmp(&b.rare_veg_area_km2))
        .then_with(|| a.percent_rare_veg.total_cmp(&b.percent_rare_veg))
        .then_with(|| a.precipitation_mm.total_cmp(&b.precipitation_mm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use firescape_region_models::ZoneId;

    fn zone(id: i64, area: f64, fires: u64) -> ZoneRecord {
        ZoneRecord {
            fire_count: fires,
            ..ZoneRecord::new(id, area)
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn fixture() -> Vec<ZoneRecord> {
        vec![
            ZoneRecord {
                burned_area_km2: 3.25,
                rare_veg_area_km2: 0.4,
                percent_rare_veg: 2.0,
                precipitation_mm: 180.0,
                ..zone(95, 10.0, 5)
            },
            ZoneRecord {
                burned_area_km2: 0.75,
                precipitation_mm: 120.0,
                ..zone(96, 30.0, 15)
            },
            ZoneRecord {
                burned_area_km2: 12.1,
                rare_veg_area_km2: 7.3,
                percent_rare_veg: 11.5,
                precipitation_mm: 40.0,
                ..zone(523, 812.4, 61)
            },
            ZoneRecord {
                burned_area_km2: 0.01,
                percent_rare_veg: 0.3,
                precipitation_mm: 22.0,
                ..zone(982, 1450.0, 2)
            },
            zone(250, 77.7, 9),
            ZoneRecord::new(ZoneId::Malformed("n/a".to_string()), 5.0),
        ]
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert_eq!(aggregate(&[]), Ok(RegionSummaries::new()));
    }

    #[test]
    fn two_redwood_zones() {
        let summaries = aggregate(&[zone(95, 10.0, 5), zone(96, 10.0, 15)]).unwrap();
        assert_eq!(summaries.len(), 1);

        let redwood = &summaries[&RegionLabel::NorthCoastRedwood];
        assert_eq!(redwood.zone_count, 2);
        assert_close(redwood.total_area_km2, 20.0);
        assert_eq!(redwood.total_fire_count, 20);
        assert_close(redwood.fire_density, 100.0);
    }

    #[test]
    fn derived_statistics() {
        let summaries = aggregate(&fixture()).unwrap();
        let redwood = &summaries[&RegionLabel::NorthCoastRedwood];

        assert_close(redwood.total_burned_area_km2, 4.0);
        assert_close(redwood.burned_density, 4.0 / 40.0 * 100.0);
        assert_close(redwood.total_rare_veg_area_km2, 0.4);
        assert_close(redwood.rare_veg_density, 1.0);
        // Plain mean over zones, a missing percentage counts as 0.
        assert_close(redwood.mean_percent_rare_veg, 1.0);
        // Area weighted: (180*10 + 120*30) / 40.
        assert_close(redwood.mean_precipitation_mm, 135.0);
    }

    #[test]
    fn regions_without_zones_are_absent() {
        let summaries = aggregate(&fixture()).unwrap();
        let regions: Vec<RegionLabel> = summaries.keys().copied().collect();
        assert_eq!(
            regions,
            vec![
                RegionLabel::NorthCoastRedwood,
                RegionLabel::WestSlopeCascadesSierra,
                RegionLabel::SocalDesert,
                RegionLabel::Unknown,
            ]
        );
    }

    #[test]
    fn unknown_zones_are_retained() {
        let summaries = aggregate(&fixture()).unwrap();
        let unknown = &summaries[&RegionLabel::Unknown];
        assert_eq!(unknown.zone_count, 2);
        assert_eq!(unknown.total_fire_count, 9);
        assert_close(unknown.total_area_km2, 82.7);
    }

    #[test]
    fn input_order_does_not_matter() {
        let records = fixture();
        let expected = aggregate(&records).unwrap();

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed).unwrap(), expected);

        for shift in 1..records.len() {
            let mut rotated = records.clone();
            rotated.rotate_left(shift);
            assert_eq!(aggregate(&rotated).unwrap(), expected, "rotation {shift}");
        }

        let mut interleaved = records.clone();
        interleaved.swap(0, 3);
        interleaved.swap(1, 5);
        assert_eq!(aggregate(&interleaved).unwrap(), expected);
    }

    #[test]
    fn zero_area_is_an_error() {
        let result = aggregate(&[zone(95, 10.0, 5), zone(97, 0.0, 3)]);
        assert_eq!(
            result,
            Err(AnalyticsError::ZeroArea {
                zone_id: ZoneId::Seed(97),
                area_km2: 0.0,
            })
        );
    }

    #[test]
    fn zero_area_without_fires_is_still_an_error() {
        assert!(matches!(
            aggregate(&[zone(130, 0.0, 0)]),
            Err(AnalyticsError::ZeroArea { .. })
        ));
    }

    #[test]
    fn negative_and_nan_area_are_errors() {
        assert!(matches!(
            aggregate(&[zone(130, -2.0, 1)]),
            Err(AnalyticsError::ZeroArea { .. })
        ));
        assert!(matches!(
            aggregate(&[zone(130, f64::NAN, 1)]),
            Err(AnalyticsError::ZeroArea { .. })
        ));
    }

    #[test]
    fn no_summary_value_is_non_finite() {
        for summary in aggregate(&fixture()).unwrap().values() {
            for value in [
                summary.fire_density,
                summary.burned_density,
                summary.rare_veg_density,
                summary.mean_percent_rare_veg,
                summary.mean_precipitation_mm,
            ] {
                assert!(value.is_finite());
            }
        }
    }

    #[test]
    fn non_finite_statistics_are_errors() {
        let burned = ZoneRecord {
            burned_area_km2: f64::NAN,
            ..zone(95, 10.0, 1)
        };
        assert!(matches!(
            aggregate(&[burned]),
            Err(AnalyticsError::InvalidStatistic {
                field: "burned_area_km2",
                ..
            })
        ));

        let precip = ZoneRecord {
            precipitation_mm: f64::INFINITY,
            ..zone(523, 10.0, 1)
        };
        assert!(matches!(
            aggregate(&[precip]),
            Err(AnalyticsError::InvalidStatistic {
                field: "precipitation_mm",
                ..
            })
        ));

        let rare = ZoneRecord {
            rare_veg_area_km2: -1.0,
            ..zone(523, 10.0, 1)
        };
        assert_eq!(
            aggregate(&[rare]),
            Err(AnalyticsError::InvalidStatistic {
                zone_id: ZoneId::Seed(523),
                field: "rare_veg_area_km2",
                value: -1.0,
            })
        );
    }

    #[test]
    fn overflowing_totals_are_errors() {
        let records = vec![zone(95, 1e308, 0), zone(96, 1e308, 0)];
        assert_eq!(
            aggregate(&records),
            Err(AnalyticsError::NonFiniteTotal {
                region: RegionLabel::NorthCoastRedwood
            })
        );

        let wet = ZoneRecord {
            precipitation_mm: 1e300,
            ..zone(961, 1e300, 0)
        };
        assert!(matches!(
            aggregate(&[wet]),
            Err(AnalyticsError::NonFiniteTotal {
                region: RegionLabel::CentralValley
            })
        ));
    }

    #[test]
    fn groups_are_sorted_by_zone_id() {
        let records = vec![zone(150, 1.0, 0), zone(101, 1.0, 0), zone(120, 1.0, 0)];
        let groups = group_zones(&records);
        let ids: Vec<ZoneId> = groups[&RegionLabel::CentralCoast]
            .iter()
            .map(|record| record.zone_id.clone())
            .collect();
        assert_eq!(ids, vec![ZoneId::Seed(101), ZoneId::Seed(120), ZoneId::Seed(150)]);
    }
}
