//! Itinerary route planner.
//!
//! Orders stops with a greedy nearest-neighbor walk seeded at the first input
//! stop, then cuts the walk into contiguous day buckets. This is a heuristic:
//! no optimality, time windows or travel modes.

use tracing::debug;

use crate::models::DayPlan;
use crate::traits::{DistanceMetric, Stop};

/// One day of a planned route.
#[derive(Debug, Clone)]
pub struct PlannedDay<'a, S> {
    /// 1-based day number.
    pub day: u32,
    pub stops: Vec<&'a S>,
    /// Distance between consecutive stops of this day.
    pub distance_km: f64,
}

#[derive(Debug, Clone)]
pub struct RoutePlan<'a, S> {
    pub days: Vec<PlannedDay<'a, S>>,
    /// Sum of the per-day distances, unrounded.
    pub total_distance_km: f64,
}

impl<'a, S> RoutePlan<'a, S>
where
    S: Stop,
    S::Id: ToString,
{
    pub fn day_plans(&self) -> Vec<DayPlan> {
        self.days
            .iter()
            .map(|day| DayPlan {
                day: day.day,
                place_ids: day.stops.iter().map(|stop| stop.id().to_string()).collect(),
            })
            .collect()
    }
}

/// Greedy nearest-neighbor ordering.
///
/// Starts from `stops[0]` and keeps appending the closest remaining stop to
/// the last one appended. Ties go to the stop that comes first in the
/// remaining pool, so identical points keep their input order. O(n²).
pub fn order_by_proximity<'a, S, M>(stops: &'a [S], metric: &M) -> Vec<&'a S>
where
    S: Stop,
    M: DistanceMetric,
{
    let mut remaining: Vec<&S> = stops.iter().collect();
    if remaining.is_empty() {
        return Vec::new();
    }

    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while !remaining.is_empty() {
        let last = ordered[ordered.len() - 1].location();

        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for (index, candidate) in remaining.iter().enumerate() {
            let distance = metric.distance_km(last, candidate.location());
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }

        ordered.push(remaining.remove(best_index));
    }

    ordered
}

/// Stops per day bucket: `ceil(n / days)`, never less than 1.
pub fn per_day(n: usize, days: usize) -> usize {
    let days = days.max(1);
    (n / days + usize::from(n % days != 0)).max(1)
}

/// Cuts an ordered route into at most `days` contiguous buckets.
///
/// Earlier days are filled first, so the last day may be short. Once a day
/// after the first would be empty no further days are produced; the first day
/// is always present, even for an empty route. `days == 0` is treated as 1.
pub fn split_into_days<'a, S, M>(ordered: &[&'a S], days: usize, metric: &M) -> RoutePlan<'a, S>
where
    S: Stop,
    M: DistanceMetric,
{
    let days = days.max(1);
    let per_day = per_day(ordered.len(), days);

    let mut planned = Vec::new();
    let mut total_distance_km = 0.0;

    for index in 0..days {
        let start = index.saturating_mul(per_day).min(ordered.len());
        let end = start.saturating_add(per_day).min(ordered.len());
        let stops = &ordered[start..end];

        if stops.is_empty() && index >= 1 {
            break;
        }

        let distance_km: f64 = stops
            .windows(2)
            .map(|pair| metric.distance_km(pair[0].location(), pair[1].location()))
            .sum();
        total_distance_km += distance_km;

        planned.push(PlannedDay {
            day: index as u32 + 1,
            stops: stops.to_vec(),
            distance_km,
        });
    }

    RoutePlan {
        days: planned,
        total_distance_km,
    }
}

/// Orders `stops` by proximity and splits them across `days`.
pub fn plan<'a, S, M>(stops: &'a [S], days: usize, metric: &M) -> RoutePlan<'a, S>
where
    S: Stop,
    M: DistanceMetric,
{
    let ordered = order_by_proximity(stops, metric);
    let route = split_into_days(&ordered, days, metric);

    debug!(
        stops = stops.len(),
        requested_days = days,
        planned_days = route.days.len(),
        total_distance_km = route.total_distance_km,
        "planned route"
    );

    route
}

/// Rounds a distance to two decimals, exact halves to even.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round_ties_even() / 100.0
}
