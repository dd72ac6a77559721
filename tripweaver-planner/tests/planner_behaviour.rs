use std::cell::RefCell;

use chrono::NaiveDate;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use tripweaver_core::test_support::place;
use tripweaver_core::{
    ClockTime, GeneratedItinerary, PlaceCategory, PlanRequest, TripDates,
};
use tripweaver_planner::ItineraryPlanner;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date")
}

fn trip_dates(days: u32) -> TripDates {
    TripDates::new(date(2), date(1 + days)).expect("valid range")
}

#[fixture]
fn request() -> RefCell<Option<PlanRequest>> {
    RefCell::new(None)
}

#[fixture]
fn itinerary() -> RefCell<Option<GeneratedItinerary>> {
    RefCell::new(None)
}

#[given("a two-day trip with three places in each of two distant regions")]
fn given_two_regions(#[from(request)] request: &RefCell<Option<PlanRequest>>) {
    let mut places: Vec<_> = (0..3)
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
    let built = PlanRequest::new(places, trip_dates(2), None).expect("valid request");
    *request.borrow_mut() = Some(built);
}

#[given("a one-day trip with two places 150 km apart")]
fn given_distant_pair(#[from(request)] request: &RefCell<Option<PlanRequest>>) {
    let places = vec![
        place("north", 73.8, 15.5, PlaceCategory::Fort),
        place("south", 73.8, 16.85, PlaceCategory::Landmark),
    ];
    let built = PlanRequest::new(places, trip_dates(1), None).expect("valid request");
    *request.borrow_mut() = Some(built);
}

#[given("a one-day trip with a place that cannot fit its opening hours")]
fn given_overlong_place(#[from(request)] request: &RefCell<Option<PlanRequest>>) {
    let mut museum = place("museum", 73.8, 15.5, PlaceCategory::Landmark);
    museum.visit_minutes = 600;
    museum.opening_hours = Some(tripweaver_core::OpeningHours {
        open: ClockTime::from_hm(9, 0),
        close: ClockTime::from_hm(17, 0),
    });
    let built = PlanRequest::new(vec![museum], trip_dates(1), None).expect("valid request");
    *request.borrow_mut() = Some(built);
}

#[when("I plan the itinerary")]
fn when_plan(
    #[from(request)] request: &RefCell<Option<PlanRequest>>,
    #[from(itinerary)] itinerary: &RefCell<Option<GeneratedItinerary>>,
) {
    let request = request.borrow();
    let request = request.as_ref().expect("request prepared by a given step");
    let planned = ItineraryPlanner::default().plan(request).expect("plans");
    *itinerary.borrow_mut() = Some(planned);
}

#[then("each day covers exactly one region")]
fn then_one_region_per_day(#[from(itinerary)] itinerary: &RefCell<Option<GeneratedItinerary>>) {
    let itinerary = itinerary.borrow();
    let itinerary = itinerary.as_ref().expect("itinerary planned");
    assert_eq!(itinerary.days.len(), 2);
    for day in &itinerary.days {
        let names: Vec<_> = day.visits().map(|v| v.name.clone()).collect();
        assert_eq!(names.len(), 3);
        let north = names.iter().filter(|n| n.starts_with("north")).count();
        assert!(
            north == 0 || north == names.len(),
            "day {} mixes regions: {names:?}",
            day.day
        );
    }
}

#[then("the single day visits both places")]
fn then_both_places_kept(#[from(itinerary)] itinerary: &RefCell<Option<GeneratedItinerary>>) {
    let itinerary = itinerary.borrow();
    let itinerary = itinerary.as_ref().expect("itinerary planned");
    assert_eq!(itinerary.days.len(), 1);
    assert_eq!(itinerary.days[0].visits().count(), 2);
}

#[then("the day contains no visits")]
fn then_no_visits(#[from(itinerary)] itinerary: &RefCell<Option<GeneratedItinerary>>) {
    let itinerary = itinerary.borrow();
    let itinerary = itinerary.as_ref().expect("itinerary planned");
    assert_eq!(itinerary.days.len(), 1);
    assert_eq!(itinerary.days[0].visits().count(), 0);
    assert_eq!(itinerary.summary.places_visited, 0);
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn two_regions_two_days(
    request: RefCell<Option<PlanRequest>>,
    itinerary: RefCell<Option<GeneratedItinerary>>,
) {
    let _ = (request, itinerary);
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn single_day_distant_places(
    request: RefCell<Option<PlanRequest>>,
    itinerary: RefCell<Option<GeneratedItinerary>>,
) {
    let _ = (request, itinerary);
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn overlong_visit_skipped(
    request: RefCell<Option<PlanRequest>>,
    itinerary: RefCell<Option<GeneratedItinerary>>,
) {
    let _ = (request, itinerary);
}
