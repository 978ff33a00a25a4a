use crate::engine::labels::Label;
use crate::time::{DateTime, SECONDS_PER_DAY};
use crate::transit_data::{
    RoutePointConnection, RoutePointIdx, RouteIdx, StopTime, TransitData, VehicleJourneyIdx,
};

/// The direction of a search, as a set of primitives consumed by the
/// scan loop, the transfer relaxer and the destination tracker.
///
/// `Forward` looks for the earliest arrival after a departure instant,
/// `Backward` for the latest departure before an arrival instant. Both
/// are zero-sized and monomorphized through the engine.
pub trait Direction {
    const CLOCKWISE: bool;

    /// The sentinel every label starts from.
    fn worst() -> DateTime;

    /// Strict improvement under this direction's ordering.
    fn better(a: &DateTime, b: &DateTime) -> bool;

    /// Move `instant` by `seconds` away from the search origin.
    fn combine(instant: &DateTime, seconds: u32) -> DateTime;

    /// The instant a label is compared by.
    fn instant(label: &Label) -> DateTime;

    /// Does position `a` have to be scanned before position `b` ?
    fn queue_better(a: usize, b: usize) -> bool;

    /// Move the working datetime through `stop_time` when riding.
    fn ride_update(working: &mut DateTime, stop_time: &StopTime);

    /// Move the working datetime to the instant the vehicle can be
    /// caught at `stop_time`.
    fn board_update(working: &mut DateTime, stop_time: &StopTime);

    /// May a passenger leave the vehicle here ?
    fn exit_allowed(stop_time: &StopTime) -> bool;

    /// May a passenger catch the vehicle here ?
    fn enter_allowed(stop_time: &StopTime) -> bool;

    /// The first trip of `route` catchable at `order` from `bound`,
    /// honoring each trip's validity pattern on the candidate day.
    /// Ties are broken toward the trip serving the position first
    /// in this direction.
    fn best_trip(
        data: &TransitData,
        route: RouteIdx,
        order: usize,
        bound: &DateTime,
    ) -> Option<VehicleJourneyIdx>;

    /// Positions of a route scanned from `from`, in scan order.
    fn positions(nb_of_positions: usize, from: usize) -> PositionIter;

    /// Route-path connections leaving a route point, in this
    /// direction.
    fn connections(data: &TransitData, route_point: RoutePointIdx) -> &[RoutePointConnection];
}

pub struct Forward;

pub struct Backward;

impl Direction for Forward {
    const CLOCKWISE: bool = true;

    fn worst() -> DateTime {
        DateTime::INF
    }

    fn better(a: &DateTime, b: &DateTime) -> bool {
        a < b
    }

    fn combine(instant: &DateTime, seconds: u32) -> DateTime {
        instant.add_seconds(seconds)
    }

    fn instant(label: &Label) -> DateTime {
        label.arrival
    }

    fn queue_better(a: usize, b: usize) -> bool {
        a < b
    }

    fn ride_update(working: &mut DateTime, stop_time: &StopTime) {
        working.update(stop_time.arrival_time);
    }

    fn board_update(working: &mut DateTime, stop_time: &StopTime) {
        working.update(stop_time.departure_time);
    }

    fn exit_allowed(stop_time: &StopTime) -> bool {
        stop_time.drop_off_allowed
    }

    fn enter_allowed(stop_time: &StopTime) -> bool {
        stop_time.pick_up_allowed
    }

    fn best_trip(
        data: &TransitData,
        route: RouteIdx,
        order: usize,
        bound: &DateTime,
    ) -> Option<VehicleJourneyIdx> {
        if bound.is_sentinel() {
            return None;
        }
        let mut best: Option<(DateTime, VehicleJourneyIdx)> = None;
        for vehicle_journey in data.vehicle_journeys_of_route(route) {
            let stop_time = data.stop_time(data.stop_time_idx(*vehicle_journey, order));
            if !Self::enter_allowed(stop_time) {
                continue;
            }
            let mut candidate = *bound;
            candidate.update(stop_time.departure_time);
            let service_day = candidate.date() - (stop_time.departure_time / SECONDS_PER_DAY) as i32;
            if !data
                .validity_pattern_of(*vehicle_journey)
                .is_allowed(service_day)
            {
                continue;
            }
            let improves = match &best {
                None => true,
                Some((best_departure, _)) => candidate < *best_departure,
            };
            if improves {
                best = Some((candidate, *vehicle_journey));
            }
        }
        best.map(|(_, vehicle_journey)| vehicle_journey)
    }

    fn positions(nb_of_positions: usize, from: usize) -> PositionIter {
        PositionIter::Up(from..nb_of_positions)
    }

    fn connections(data: &TransitData, route_point: RoutePointIdx) -> &[RoutePointConnection] {
        data.connections_forward_of(route_point)
    }
}

impl Direction for Backward {
    const CLOCKWISE: bool = false;

    fn worst() -> DateTime {
        DateTime::MIN
    }

    fn better(a: &DateTime, b: &DateTime) -> bool {
        a > b
    }

    fn combine(instant: &DateTime, seconds: u32) -> DateTime {
        instant.sub_seconds(seconds)
    }

    fn instant(label: &Label) -> DateTime {
        label.departure
    }

    fn queue_better(a: usize, b: usize) -> bool {
        a > b
    }

    fn ride_update(working: &mut DateTime, stop_time: &StopTime) {
        working.update_reverse(stop_time.departure_time);
    }

    fn board_update(working: &mut DateTime, stop_time: &StopTime) {
        working.update_reverse(stop_time.arrival_time);
    }

    fn exit_allowed(stop_time: &StopTime) -> bool {
        stop_time.pick_up_allowed
    }

    fn enter_allowed(stop_time: &StopTime) -> bool {
        stop_time.drop_off_allowed
    }

    fn best_trip(
        data: &TransitData,
        route: RouteIdx,
        order: usize,
        bound: &DateTime,
    ) -> Option<VehicleJourneyIdx> {
        if bound.is_sentinel() {
            return None;
        }
        let mut best: Option<(DateTime, VehicleJourneyIdx)> = None;
        for vehicle_journey in data.vehicle_journeys_of_route(route) {
            let stop_time = data.stop_time(data.stop_time_idx(*vehicle_journey, order));
            if !Self::enter_allowed(stop_time) {
                continue;
            }
            let mut candidate = *bound;
            candidate.update_reverse(stop_time.arrival_time);
            let service_day = candidate.date() - (stop_time.arrival_time / SECONDS_PER_DAY) as i32;
            if !data
                .validity_pattern_of(*vehicle_journey)
                .is_allowed(service_day)
            {
                continue;
            }
            let improves = match &best {
                None => true,
                Some((best_arrival, _)) => candidate >= *best_arrival,
            };
            if improves {
                best = Some((candidate, *vehicle_journey));
            }
        }
        best.map(|(_, vehicle_journey)| vehicle_journey)
    }

    fn positions(_nb_of_positions: usize, from: usize) -> PositionIter {
        PositionIter::Down((0..=from).rev())
    }

    fn connections(data: &TransitData, route_point: RoutePointIdx) -> &[RoutePointConnection] {
        data.connections_backward_of(route_point)
    }
}

/// Route positions in scan order: ascending forward, descending
/// backward.
pub enum PositionIter {
    Up(std::ops::Range<usize>),
    Down(std::iter::Rev<std::ops::RangeInclusive<usize>>),
}

impl Iterator for PositionIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            PositionIter::Up(range) => range.next(),
            PositionIter::Down(range) => range.next(),
        }
    }
}
