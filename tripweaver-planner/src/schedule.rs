//! Single-day scheduling: visits, travel legs, meals and crowd tags.
//!
//! The scheduler is a best-effort heuristic with no hard failure paths:
//! a place that cannot fit the clock or its opening hours is skipped, a
//! meal with no venue left to book is omitted, and the day simply carries
//! whatever survived.

use std::collections::HashSet;

use chrono::NaiveDate;

use tripweaver_core::activity::{ActivityKind, CrowdLevel, ScheduledActivity, TravelLeg, TravelMode};
use tripweaver_core::distance::{haversine_km, round_to_tenth};
use tripweaver_core::itinerary::{DayItinerary, Recommendation};
use tripweaver_core::place::{NearbyEatery, PeakWindow, PlaceCategory, PlaceKnowledge};
use tripweaver_core::time::{ClockTime, TimeSlot, DAY_END, MORNING_START};
use tripweaver_core::trip::Budget;

/// Pause between a visit ending and the next departure.
const VISIT_BUFFER_MINUTES: u16 = 15;
/// Shortest travel leg worth modelling.
const MIN_TRAVEL_MINUTES: u16 = 15;
/// Effective pace of roughly 20 km/h including stops.
const TRAVEL_MINUTES_PER_KM: f64 = 3.0;
/// Legs longer than this go by car rather than auto-rickshaw.
const CAR_THRESHOLD_KM: f64 = 5.0;
/// Meals rest the travellers.
const MEAL_FATIGUE: i16 = -10;

/// A meal the scheduler tries to book at a fixed time of day.
struct MealSlot {
    label: &'static str,
    start: ClockTime,
    minutes: u16,
    cost: u32,
    prefer_cafe: bool,
}

const BREAKFAST: MealSlot = MealSlot {
    label: "Breakfast",
    start: ClockTime::from_hm(7, 30),
    minutes: 45,
    cost: 250,
    prefer_cafe: true,
};
const MORNING_SNACK: MealSlot = MealSlot {
    label: "Morning Tea",
    start: ClockTime::from_hm(10, 30),
    minutes: 20,
    cost: 100,
    prefer_cafe: true,
};
const LUNCH: MealSlot = MealSlot {
    label: "Lunch",
    start: ClockTime::from_hm(12, 30),
    minutes: 60,
    cost: 400,
    prefer_cafe: false,
};
const EVENING_SNACK: MealSlot = MealSlot {
    label: "Refreshments",
    start: ClockTime::from_hm(16, 30),
    minutes: 20,
    cost: 150,
    prefer_cafe: true,
};
const DINNER: MealSlot = MealSlot {
    label: "Dinner",
    start: ClockTime::from_hm(19, 30),
    minutes: 75,
    cost: 600,
    prefer_cafe: false,
};

/// Build the schedule for one day's cluster of places.
///
/// `trip_days` feeds the budget split when estimating costs for places
/// without a known entry fee. The returned activities are ordered by
/// start time and visits never overlap one another.
#[must_use]
pub fn build_day(
    day: u32,
    date: NaiveDate,
    places: &[PlaceKnowledge],
    budget: Option<&Budget>,
    trip_days: u32,
) -> DayItinerary {
    let mut activities: Vec<ScheduledActivity> = Vec::new();
    let mut clock = MORNING_START;
    let mut fatigue: i32 = 0;
    let mut cost: u32 = 0;

    let mut ordered: Vec<&PlaceKnowledge> = places.iter().collect();
    ordered.sort_by_key(|p| p.preferred_time());

    for place in ordered {
        if place.category == PlaceCategory::Accommodation {
            continue;
        }

        let mut start = clock;
        if let Some(floor) = place.preferred_time().start_floor() {
            start = start.max(floor);
        }
        let open = place.opening_hours.map_or(MORNING_START, |h| h.open);
        let close = place.opening_hours.map_or(DAY_END, |h| h.close);
        start = start.max(open);
        if start.plus(place.visit_minutes) > close {
            continue;
        }
        if start >= DAY_END && place.category != PlaceCategory::Nightlife {
            continue;
        }

        if let Some(prev) = activities.last() {
            let km = haversine_km(prev.location, place.location);
            let minutes = travel_minutes(km);
            let depart = clock;
            start = start.max(depart.plus(minutes));
            let leg_fatigue = travel_fatigue(minutes);
            activities.push(ScheduledActivity {
                day,
                name: format!("Travel to {}", place.name),
                category: PlaceCategory::Destination,
                location: place.location,
                kind: ActivityKind::Travel,
                slot: TimeSlot::of(depart),
                start: depart,
                end: start,
                minutes: depart.until(start),
                fatigue: leg_fatigue,
                cost: 0,
                crowd: None,
                note: None,
                travel: Some(TravelLeg {
                    distance_km: round_to_tenth(km),
                    minutes,
                    mode: if km > CAR_THRESHOLD_KM {
                        TravelMode::Car
                    } else {
                        TravelMode::Auto
                    },
                }),
            });
            fatigue += i32::from(leg_fatigue);
        }

        let end = start.plus(place.visit_minutes);
        let visit_cost = place
            .entry_fee
            .unwrap_or_else(|| estimate_cost(place.category, budget, trip_days));
        activities.push(ScheduledActivity {
            day,
            name: place.name.clone(),
            category: place.category,
            location: place.location,
            kind: ActivityKind::Visit,
            slot: TimeSlot::of(start),
            start,
            end,
            minutes: place.visit_minutes,
            fatigue: place.category.fatigue(),
            cost: visit_cost,
            crowd: Some(crowd_level(start, &place.peak_hours)),
            note: place.best_time.clone(),
            travel: None,
        });
        cost = cost.saturating_add(visit_cost);
        fatigue += i32::from(place.category.fatigue());
        clock = end.plus(VISIT_BUFFER_MINUTES);
    }

    let travel_km = visit_distance(&activities);
    let recommendations = day_recommendations(places);
    let meal_cost = insert_meals(&mut activities, day, places);

    DayItinerary {
        day,
        date,
        activities,
        fatigue,
        cost: cost.saturating_add(meal_cost),
        travel_km: round_to_tenth(travel_km),
        recommendations,
    }
}

/// Travel time for a leg, floored at [`MIN_TRAVEL_MINUTES`].
fn travel_minutes(km: f64) -> u16 {
    let rounded = (km * TRAVEL_MINUTES_PER_KM).round() as u16;
    rounded.max(MIN_TRAVEL_MINUTES)
}

/// One fatigue point per ten minutes on the road, rounded.
fn travel_fatigue(minutes: u16) -> i16 {
    ((minutes + 5) / 10) as i16
}

/// Cost estimate for a visit with no known entry fee.
fn estimate_cost(category: PlaceCategory, budget: Option<&Budget>, trip_days: u32) -> u32 {
    match budget {
        Some(budget) => {
            let daily = f64::from(budget.total) / f64::from(trip_days.max(1));
            (daily * category.budget_share()).round() as u32
        }
        None => category.default_cost(),
    }
}

/// Judge crowding at `start` against the place's known peaks.
fn crowd_level(start: ClockTime, peaks: &[PeakWindow]) -> CrowdLevel {
    if peaks.iter().any(|p| p.start <= start && start <= p.end) {
        return CrowdLevel::High;
    }
    if peaks
        .iter()
        .any(|p| start.minutes().abs_diff(p.start.minutes()) < 60)
    {
        return CrowdLevel::Medium;
    }
    CrowdLevel::Low
}

/// Sum of distances between consecutive visits.
fn visit_distance(activities: &[ScheduledActivity]) -> f64 {
    let coords: Vec<_> = activities
        .iter()
        .filter(|a| a.is_visit())
        .map(|a| a.location)
        .collect();
    coords
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}

/// Suggest venues for categories the day does not cover.
///
/// Currently one rule: a day without a restaurant visit gets the first
/// nearby eatery suggested. Capped at three records.
fn day_recommendations(places: &[PlaceKnowledge]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let has_restaurant = places
        .iter()
        .any(|p| p.category == PlaceCategory::Restaurant);
    if !has_restaurant {
        if let Some(eatery) = places.iter().flat_map(|p| &p.nearby_eateries).next() {
            recommendations.push(Recommendation {
                name: eatery.name.clone(),
                category: PlaceCategory::Restaurant,
                location: eatery.location,
                distance_km: eatery.distance_km,
                reason: "No restaurant in your plan - consider this nearby option".to_owned(),
                score: 0.8,
            });
        }
    }

    recommendations.truncate(3);
    recommendations
}

/// Which meals the day's activity span plausibly covers.
fn meals_for_span(first: ClockTime, last: ClockTime) -> Vec<&'static MealSlot> {
    let mut meals = Vec::new();
    if first <= BREAKFAST.start.plus(60) {
        meals.push(&BREAKFAST);
    }
    if first <= MORNING_SNACK.start && last >= MORNING_SNACK.start {
        meals.push(&MORNING_SNACK);
    }
    if first <= LUNCH.start && last.plus(30) >= LUNCH.start {
        meals.push(&LUNCH);
    }
    if first <= EVENING_SNACK.start && last >= EVENING_SNACK.start {
        meals.push(&EVENING_SNACK);
    }
    if last.plus(60) >= DINNER.start {
        meals.push(&DINNER);
    }
    meals
}

/// Insert meal activities into the day, returning their total cost.
///
/// The activity span is measured before any meal lands, so a late first
/// visit still suppresses breakfast. Each venue is used at most once per
/// day; when the pool runs dry the meal is dropped, never erred.
fn insert_meals(activities: &mut Vec<ScheduledActivity>, day: u32, places: &[PlaceKnowledge]) -> u32 {
    let pool: Vec<&NearbyEatery> = places.iter().flat_map(|p| &p.nearby_eateries).collect();
    if pool.is_empty() {
        return 0;
    }

    let first = activities.first().map_or(MORNING_START, |a| a.start);
    let last = activities.last().map_or(DAY_END, |a| a.end);

    let mut used: HashSet<&str> = HashSet::new();
    let mut meal_cost: u32 = 0;

    for meal in meals_for_span(first, last) {
        let Some(eatery) = pick_eatery(&pool, &used, meal.prefer_cafe) else {
            continue;
        };
        let position = activities
            .iter()
            .position(|a| a.start > meal.start)
            .unwrap_or(activities.len());
        activities.insert(position, meal_activity(day, meal, eatery));
        used.insert(eatery.name.as_str());
        meal_cost = meal_cost.saturating_add(meal.cost);
    }

    // Guarantee chronological order whatever the insertion points did.
    activities.sort_by_key(|a| a.start);
    meal_cost
}

/// Choose the best unused venue for a meal.
///
/// Cafe preference first, then rating descending, then distance
/// ascending; the sort is stable so ties keep pool order.
fn pick_eatery<'a>(
    pool: &[&'a NearbyEatery],
    used: &HashSet<&str>,
    prefer_cafe: bool,
) -> Option<&'a NearbyEatery> {
    let mut available: Vec<&'a NearbyEatery> = pool
        .iter()
        .copied()
        .filter(|e| !used.contains(e.name.as_str()))
        .collect();
    if available.is_empty() {
        return None;
    }

    available.sort_by(|a, b| {
        let a_cafe = a.is_cafe();
        let b_cafe = b.is_cafe();
        if a_cafe != b_cafe {
            if prefer_cafe {
                return b_cafe.cmp(&a_cafe);
            }
            return a_cafe.cmp(&b_cafe);
        }
        b.rating
            .unwrap_or(0.0)
            .total_cmp(&a.rating.unwrap_or(0.0))
            .then_with(|| {
                a.distance_km
                    .unwrap_or(0.0)
                    .total_cmp(&b.distance_km.unwrap_or(0.0))
            })
    });

    available.first().copied()
}

fn meal_activity(day: u32, meal: &MealSlot, eatery: &NearbyEatery) -> ScheduledActivity {
    ScheduledActivity {
        day,
        name: eatery.name.clone(),
        category: PlaceCategory::Restaurant,
        location: eatery.location,
        kind: ActivityKind::Meal,
        slot: TimeSlot::of(meal.start),
        start: meal.start,
        end: meal.start.plus(meal.minutes),
        minutes: meal.minutes,
        fatigue: MEAL_FATIGUE,
        cost: meal.cost,
        crowd: None,
        note: Some(meal.label.to_owned()),
        travel: None,
    }
}
