//! Geographic clustering of places into day-sized groups.
//!
//! A first pass groups places into regions: everything within
//! [`MAX_SAME_DAY_KM`] of a region's seed place belongs to that region.
//! The regions are then distributed across the requested number of days,
//! merging leftovers into their nearest cluster or splitting oversized
//! regions as the day count demands. The day count always wins: a
//! one-day trip yields one cluster however far apart its places are.

use geo::Coord;

use tripweaver_core::distance::{centroid, haversine_km};
use tripweaver_core::place::PlaceKnowledge;

/// Maximum distance in kilometres between a region seed and its members.
pub const MAX_SAME_DAY_KM: f64 = 100.0;

/// Partition `places` into at most `num_days` geographically coherent
/// clusters.
///
/// Returns fewer clusters than days when the places cannot usefully fill
/// them (callers schedule the remaining days empty). Never returns an
/// empty cluster.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripweaver_core::{PlaceCategory, PlaceKnowledge};
/// use tripweaver_planner::cluster::cluster_into_days;
///
/// let places = vec![
///     PlaceKnowledge::new("north", Coord { x: 73.8, y: 15.5 }, PlaceCategory::Fort, 90),
///     PlaceKnowledge::new("south", Coord { x: 73.8, y: 16.9 }, PlaceCategory::Beach, 90),
/// ];
/// // A single-day trip keeps even distant places together.
/// let clusters = cluster_into_days(&places, 1);
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].len(), 2);
/// ```
#[must_use]
pub fn cluster_into_days(places: &[PlaceKnowledge], num_days: usize) -> Vec<Vec<PlaceKnowledge>> {
    if num_days == 0 {
        return Vec::new();
    }
    if places.len() <= num_days {
        return places.iter().map(|p| vec![p.clone()]).collect();
    }

    let regions = group_by_region(places);
    if regions.len() > num_days {
        log::warn!(
            "{} geographic regions but only {num_days} days; some regions will share days",
            regions.len()
        );
    }

    let mut clusters: Vec<Vec<PlaceKnowledge>> = Vec::new();

    if regions.len() >= num_days {
        let mut regions = regions.into_iter();
        clusters.extend(regions.by_ref().take(num_days));
        for region in regions {
            let from = centroid_of(&region);
            // First-found wins on equal distances.
            let nearest = clusters
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    haversine_km(from, centroid_of(a)).total_cmp(&haversine_km(from, centroid_of(b)))
                })
                .map(|(idx, _)| idx);
            if let Some(idx) = nearest {
                clusters[idx].extend(region);
            }
        }
    } else {
        let days_per_region = num_days.div_ceil(regions.len());
        for region in regions {
            if region.len() <= days_per_region || clusters.len() >= num_days.saturating_sub(1) {
                clusters.push(region);
            } else {
                let share = days_per_region.min(num_days - clusters.len());
                clusters.extend(split_region(region, share));
            }
        }

        // Spend leftover day capacity by bisecting the largest cluster,
        // first-found on ties, until nothing splittable remains.
        while clusters.len() < num_days {
            let mut largest_idx = 0;
            let mut largest_len = 0;
            for (idx, cluster) in clusters.iter().enumerate() {
                if cluster.len() > largest_len {
                    largest_len = cluster.len();
                    largest_idx = idx;
                }
            }
            if largest_len <= 2 {
                break;
            }
            let tail = clusters[largest_idx].split_off(largest_len.div_ceil(2));
            clusters.push(tail);
        }
    }

    clusters.retain(|c| !c.is_empty());
    clusters
}

/// Group places into regions by distance from each region's seed.
///
/// The first unassigned place seeds a region; every other unassigned
/// place within [`MAX_SAME_DAY_KM`] of that seed joins it. Membership is
/// judged against the seed, not a recomputed centroid. Regions come back
/// sorted largest first.
fn group_by_region(places: &[PlaceKnowledge]) -> Vec<Vec<PlaceKnowledge>> {
    let mut assigned = vec![false; places.len()];
    let mut regions: Vec<Vec<PlaceKnowledge>> = Vec::new();

    for seed_idx in 0..places.len() {
        if assigned[seed_idx] {
            continue;
        }
        assigned[seed_idx] = true;
        let seed = &places[seed_idx];
        let mut region = vec![seed.clone()];

        for (idx, other) in places.iter().enumerate() {
            if assigned[idx] {
                continue;
            }
            if haversine_km(seed.location, other.location) <= MAX_SAME_DAY_KM {
                region.push(other.clone());
                assigned[idx] = true;
            }
        }

        regions.push(region);
    }

    regions.sort_by(|a, b| b.len().cmp(&a.len()));
    regions
}

/// Split one region into `num_days` clusters by nearest-neighbour growth.
///
/// Each cluster grows from a seed by repeatedly absorbing the unassigned
/// place nearest its running centroid, up to the region's per-day share.
fn split_region(region: Vec<PlaceKnowledge>, num_days: usize) -> Vec<Vec<PlaceKnowledge>> {
    if region.len() <= num_days {
        return region.into_iter().map(|p| vec![p]).collect();
    }

    let per_day = region.len().div_ceil(num_days);
    let mut assigned = vec![false; region.len()];
    let mut remaining = region.len();
    let mut clusters = Vec::new();

    for _ in 0..num_days {
        if remaining == 0 {
            break;
        }
        let Some(seed_idx) = assigned.iter().position(|taken| !taken) else {
            break;
        };
        assigned[seed_idx] = true;
        remaining -= 1;
        let mut cluster = vec![region[seed_idx].clone()];

        while cluster.len() < per_day && remaining > 0 {
            let from = centroid_of(&cluster);
            let mut nearest: Option<(usize, f64)> = None;
            for (idx, place) in region.iter().enumerate() {
                if assigned[idx] {
                    continue;
                }
                let dist = haversine_km(from, place.location);
                if nearest.map_or(true, |(_, best)| dist < best) {
                    nearest = Some((idx, dist));
                }
            }
            let Some((next, _)) = nearest else { break };
            assigned[next] = true;
            remaining -= 1;
            cluster.push(region[next].clone());
        }

        clusters.push(cluster);
    }

    clusters
}

fn centroid_of(places: &[PlaceKnowledge]) -> Coord<f64> {
    let coords: Vec<Coord<f64>> = places.iter().map(|p| p.location).collect();
    centroid(&coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use tripweaver_core::place::PlaceCategory;
    use tripweaver_core::test_support::place;

    /// A tight group of `count` landmarks around the given latitude.
    fn tight_group(prefix: &str, lat: f64, count: usize) -> Vec<PlaceKnowledge> {
        (0..count)
            .map(|i| {
                place(
                    &format!("{prefix}-{i}"),
                    73.80 + (i as f64) * 0.01,
                    lat,
                    PlaceCategory::Landmark,
                )
            })
            .collect()
    }

    fn names(cluster: &[PlaceKnowledge]) -> Vec<&str> {
        cluster.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn fewer_places_than_days_become_singletons() {
        let places = tight_group("a", 15.5, 3);
        let clusters = cluster_into_days(&places, 5);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn one_region_per_day_when_counts_match() {
        let mut places = tight_group("north", 15.5, 3);
        places.extend(tight_group("south", 16.9, 3));
        let clusters = cluster_into_days(&places, 2);
        assert_eq!(clusters.len(), 2);
        assert_eq!(names(&clusters[0]), vec!["north-0", "north-1", "north-2"]);
        assert_eq!(names(&clusters[1]), vec!["south-0", "south-1", "south-2"]);
    }

    #[test]
    fn single_day_trips_never_split() {
        let places = vec![
            place("north", 73.8, 15.5, PlaceCategory::Fort),
            place("south", 73.8, 16.9, PlaceCategory::Beach),
        ];
        let clusters = cluster_into_days(&places, 1);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 2);
    }

    #[test]
    fn leftover_regions_merge_into_the_nearest_cluster() {
        // Three regions, two days: the smallest (farthest south) region
        // must join whichever cluster centroid is closer.
        let mut places = tight_group("north", 15.5, 3);
        places.extend(tight_group("mid", 16.9, 2));
        places.push(place("far-south", 73.8, 18.2, PlaceCategory::Beach));
        let clusters = cluster_into_days(&places, 2);
        assert_eq!(clusters.len(), 2);
        let mid_cluster = clusters
            .iter()
            .find(|c| c.iter().any(|p| p.name == "mid-0"))
            .expect("mid region present");
        assert!(mid_cluster.iter().any(|p| p.name == "far-south"));
    }

    #[test]
    fn oversized_region_splits_across_extra_days() {
        let places = tight_group("a", 15.5, 6);
        let clusters = cluster_into_days(&places, 3);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn leftover_capacity_bisects_the_largest_cluster() {
        let mut places = tight_group("big", 15.5, 6);
        places.extend(tight_group("small", 16.9, 2));
        let clusters = cluster_into_days(&places, 4);
        assert_eq!(clusters.len(), 4);
        let total: usize = clusters.iter().map(Vec::len).sum();
        assert_eq!(total, 8);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn clustering_partitions_the_input(#[case] num_days: usize) {
        let mut places = tight_group("north", 15.5, 4);
        places.extend(tight_group("south", 16.9, 3));
        let clusters = cluster_into_days(&places, num_days);
        let mut clustered: Vec<String> = clusters
            .iter()
            .flat_map(|c| c.iter().map(|p| p.name.clone()))
            .collect();
        clustered.sort();
        let mut expected: Vec<String> = places.iter().map(|p| p.name.clone()).collect();
        expected.sort();
        assert_eq!(clustered, expected);
    }

    #[test]
    fn zero_days_yields_no_clusters() {
        let places = tight_group("a", 15.5, 2);
        assert!(cluster_into_days(&places, 0).is_empty());
    }
}
