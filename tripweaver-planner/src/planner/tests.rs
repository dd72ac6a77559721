use chrono::NaiveDate;
use rstest::rstest;

use tripweaver_core::place::PlaceCategory;
use tripweaver_core::test_support::{place, BrokenOptimizer, IdentityOptimizer};
use tripweaver_core::trip::{PlanRequest, TripDates};

use super::*;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date")
}

fn dates(days: u32) -> TripDates {
    TripDates::new(date(2), date(1 + days)).expect("valid range")
}

/// Three landmarks around each of two latitudes ~155 km apart.
fn two_region_places() -> Vec<PlaceKnowledge> {
    let mut places: Vec<PlaceKnowledge> = (0..3)
        .map(|i| {
            place(
                &format!("north-{i}"),
                73.80 + f64::from(i) * 0.01,
                15.5,
                PlaceCategory::Landmark,
            )
        })
        .collect();
    places.extend((0..3).map(|i| {
        place(
            &format!("south-{i}"),
            73.80 + f64::from(i) * 0.01,
            16.9,
            PlaceCategory::Landmark,
        )
    }));
    places
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(7)]
fn emits_one_day_per_requested_day(#[case] requested: u32) {
    let request =
        PlanRequest::new(two_region_places(), dates(requested), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");
    assert_eq!(itinerary.days.len(), requested as usize);
    assert_eq!(itinerary.summary.days, requested);
    for (index, day) in itinerary.days.iter().enumerate() {
        let expected = u32::try_from(index).expect("small index") + 1;
        assert_eq!(day.day, expected);
        assert!(day.activities.iter().all(|a| a.day == expected));
    }
}

#[test]
fn day_dates_advance_from_the_start() {
    let request = PlanRequest::new(two_region_places(), dates(3), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");
    let dates: Vec<_> = itinerary.days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date(2), date(3), date(4)]);
}

#[test]
fn rejects_an_empty_request() {
    let request = PlanRequest {
        places: Vec::new(),
        dates: dates(1),
        budget: None,
    };
    let err = ItineraryPlanner::default()
        .plan(&request)
        .expect_err("no places");
    assert_eq!(err, PlanError::InvalidRequest(PlanRequestError::EmptyPlaces));
}

#[test]
fn two_regions_fill_two_days_end_to_end() {
    let request = PlanRequest::new(two_region_places(), dates(2), None).expect("valid request");
    let itinerary = ItineraryPlanner::new(IdentityOptimizer)
        .plan(&request)
        .expect("plans");

    assert_eq!(itinerary.days.len(), 2);
    let day_one: Vec<_> = itinerary.days[0].visits().map(|v| v.name.clone()).collect();
    let day_two: Vec<_> = itinerary.days[1].visits().map(|v| v.name.clone()).collect();
    assert_eq!(day_one.len(), 3);
    assert_eq!(day_two.len(), 3);
    assert!(day_one.iter().all(|name| name.starts_with("north")));
    assert!(day_two.iter().all(|name| name.starts_with("south")));
}

#[test]
fn route_lists_visit_coordinates_in_schedule_order() {
    let request = PlanRequest::new(two_region_places(), dates(2), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");
    let expected: Vec<_> = itinerary
        .days
        .iter()
        .flat_map(|d| d.visits().map(|v| v.location))
        .collect();
    assert_eq!(itinerary.route, expected);
    assert_eq!(
        itinerary.route.len(),
        itinerary.summary.places_visited as usize
    );
}

#[test]
fn summary_totals_cost_and_averages_fatigue() {
    let request = PlanRequest::new(two_region_places(), dates(2), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");

    let cost: u32 = itinerary.days.iter().map(|d| d.cost).sum();
    assert_eq!(itinerary.summary.total_cost, cost);

    let fatigue: i32 = itinerary.days.iter().map(|d| d.fatigue).sum();
    let average = (f64::from(fatigue) / 2.0).round() as i32;
    assert_eq!(itinerary.summary.average_daily_fatigue, average);
}

#[test]
fn missing_categories_keep_their_fixed_order() {
    let places = vec![
        place("fort", 73.8, 15.5, PlaceCategory::Fort),
        place("club", 73.81, 15.5, PlaceCategory::Nightlife),
    ];
    let request = PlanRequest::new(places, dates(1), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");
    assert_eq!(
        itinerary.summary.missing_categories,
        vec![
            PlaceCategory::Beach,
            PlaceCategory::Restaurant,
            PlaceCategory::Landmark,
        ]
    );
}

#[test]
fn accommodation_counts_for_coverage_but_is_never_visited() {
    let places = vec![
        place("hotel", 73.8, 15.5, PlaceCategory::Accommodation),
        place("beach", 73.81, 15.5, PlaceCategory::Beach),
    ];
    let request = PlanRequest::new(places, dates(1), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");
    assert_eq!(itinerary.summary.places_visited, 1);
    assert!(itinerary
        .days
        .iter()
        .flat_map(|d| d.visits())
        .all(|v| v.name == "beach"));
    // Beach is present, so only restaurant and landmark are missing.
    assert_eq!(
        itinerary.summary.missing_categories,
        vec![PlaceCategory::Restaurant, PlaceCategory::Landmark]
    );
}

#[test]
fn broken_optimizer_falls_back_to_input_order() {
    let request = PlanRequest::new(two_region_places(), dates(2), None).expect("valid request");
    let broken = ItineraryPlanner::new(BrokenOptimizer)
        .plan(&request)
        .expect("plans");
    let pinned = ItineraryPlanner::new(IdentityOptimizer)
        .plan(&request)
        .expect("plans");
    assert_eq!(broken, pinned);
}

#[test]
fn planning_is_deterministic() {
    let budget = tripweaver_core::Budget {
        total: 20_000,
        currency: "INR".into(),
        per_person: false,
    };
    let request =
        PlanRequest::new(two_region_places(), dates(3), Some(budget)).expect("valid request");
    let planner = ItineraryPlanner::default();
    let first = planner.plan(&request).expect("plans");
    let second = planner.plan(&request).expect("plans");
    assert_eq!(first, second);
}

#[test]
fn extra_days_beyond_clusters_are_empty_but_present() {
    let places = vec![place("fort", 73.8, 15.5, PlaceCategory::Fort)];
    let request = PlanRequest::new(places, dates(3), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");
    assert_eq!(itinerary.days.len(), 3);
    assert_eq!(itinerary.days[0].visits().count(), 1);
    assert!(itinerary.days[1].activities.is_empty());
    assert!(itinerary.days[2].activities.is_empty());
}

#[rstest]
#[case(vec![0, 1, 2], 3, true)]
#[case(vec![2, 0, 1], 3, true)]
#[case(vec![0, 1], 3, false)]
#[case(vec![0, 0, 1], 3, false)]
#[case(vec![0, 1, 3], 3, false)]
fn permutation_check(#[case] order: Vec<usize>, #[case] len: usize, #[case] expected: bool) {
    assert_eq!(is_permutation(&order, len), expected);
}

#[test]
fn visits_never_overlap_within_a_day() {
    let request = PlanRequest::new(two_region_places(), dates(1), None).expect("valid request");
    let itinerary = ItineraryPlanner::default().plan(&request).expect("plans");
    for day in &itinerary.days {
        let visits: Vec<_> = day.visits().collect();
        for pair in visits.windows(2) {
            assert!(
                pair[1].start >= pair[0].end,
                "visit {} starts before {} ends",
                pair[1].name,
                pair[0].name
            );
        }
        let kinds_sorted = day
            .activities
            .windows(2)
            .all(|w| w[0].start <= w[1].start);
        assert!(kinds_sorted, "activities must be time-ordered");
    }
}
