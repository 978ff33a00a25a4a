use fixedbitset::FixedBitSet;
use log::{debug, trace};

use crate::config::RequestParams;
use crate::engine::best_dest::BestDestination;
use crate::engine::direction::Direction;
use crate::engine::labels::{Label, LabelStore};
use crate::filters::Filters;
use crate::time::DateTime;
use crate::transit_data::{
    walking_duration, RouteIdx, RoutePointIdx, StopPointIdx, TransitData, VehicleJourneyIdx,
};

/// A seeded departure (forward) or arrival (backward) at one route
/// point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Seed {
    pub route_point: RoutePointIdx,
    pub instant: DateTime,
}

/// One search session.
///
/// Owns every piece of mutable state of the search (label arrays,
/// queue, marked bitsets, destination tracker) and borrows the
/// timetable read-only. Sessions are cheap to reuse : all state is
/// reset in place at the start of each query. A session must not be
/// shared between concurrent queries; spawn one session per thread
/// against the same timetable instead.
pub struct Raptor<'data> {
    pub(crate) data: &'data TransitData,
    pub(crate) params: RequestParams,
    pub(crate) labels: LabelStore,
    pub(crate) best_dest: BestDestination,
    // entry position for scanning each route, None when the route
    // has nothing new
    pub(crate) queue: Vec<Option<usize>>,
    pub(crate) marked_route_points: FixedBitSet,
    pub(crate) marked_stop_points: FixedBitSet,
    pub(crate) valid_routes: FixedBitSet,
    // current round
    pub(crate) count: usize,
}

impl<'data> Raptor<'data> {
    pub fn new(data: &'data TransitData) -> Self {
        Self::with_params(data, RequestParams::default())
    }

    pub fn with_params(data: &'data TransitData, params: RequestParams) -> Self {
        Self {
            data,
            params,
            labels: LabelStore::new(data.nb_of_route_points()),
            best_dest: BestDestination::new(),
            queue: vec![None; data.nb_of_routes()],
            marked_route_points: FixedBitSet::with_capacity(data.nb_of_route_points()),
            marked_stop_points: FixedBitSet::with_capacity(data.nb_of_stop_points()),
            valid_routes: FixedBitSet::with_capacity(data.nb_of_routes()),
            count: 0,
        }
    }

    /// Keeps the routes having at least one journey allowed on `day`
    /// or a neighboring day, minus the routes rejected by `filters`.
    pub(crate) fn set_valid_routes(&mut self, day: i32, filters: &Filters) {
        let data = self.data;
        self.valid_routes.clear();
        for route_idx in 0..data.nb_of_routes() {
            let route = RouteIdx { idx: route_idx };
            if filters.is_route_forbidden(route, data) {
                continue;
            }
            let has_valid_journey = data
                .vehicle_journeys_of_route(route)
                .iter()
                .any(|vehicle_journey| {
                    data.validity_pattern_of(*vehicle_journey)
                        .is_allowed_nearby(day)
                });
            if has_valid_journey {
                self.valid_routes.insert(route_idx);
            }
        }
        debug!(
            "day {} : {} valid routes out of {}",
            day,
            self.valid_routes.count_ones(..),
            data.nb_of_routes()
        );
    }

    /// Resets the session state and seeds the searched instants.
    ///
    /// With `clear == false` the label arrays and the destination
    /// tracker survive from the previous run, which lets profile
    /// queries reuse the work of later departures.
    pub(crate) fn clear_and_init<D: Direction>(
        &mut self,
        seeds: &[Seed],
        destinations: &[(StopPointIdx, f64)],
        bound: DateTime,
        clear: bool,
    ) {
        let data = self.data;
        // an unbounded reverse query is expressed with INF by callers
        let bound = if !D::CLOCKWISE && bound == DateTime::INF {
            DateTime::MIN
        } else {
            bound
        };

        for entry in self.queue.iter_mut() {
            *entry = None;
        }
        if clear {
            self.labels.reset(data.nb_of_route_points(), D::worst());
            self.best_dest.reinit(data.nb_of_route_points(), bound);
        }
        self.marked_route_points.clear();
        self.marked_stop_points.clear();

        for seed in seeds {
            let label = Label::origin(seed.instant);
            self.labels.write(0, seed.route_point, label);
            self.queue_mark::<D>(seed.route_point);
            if !seed.instant.is_sentinel() {
                self.marked_stop_points
                    .insert(data.stop_point_of(seed.route_point).idx);
            }
        }

        for (stop_point, distance) in destinations {
            let egress_duration = walking_duration(*distance);
            for route_point in data.route_points_at(*stop_point) {
                if !self.valid_routes.contains(data.route_of(*route_point).idx) {
                    continue;
                }
                let best_instant = D::instant(self.labels.best(*route_point));
                if bound == D::worst() || D::better(&bound, &best_instant) {
                    self.best_dest.add_destination(*route_point, egress_duration);
                    // pre-prune : interior labels worse than the bound
                    // at a destination are useless
                    let mut pruned = *self.labels.best(*route_point);
                    pruned.arrival = bound;
                    pruned.departure = bound;
                    self.labels.write_best(*route_point, pruned);
                }
            }
        }
    }

    /// Updates the scan entry position of the route serving
    /// `route_point`.
    pub(crate) fn queue_mark<D: Direction>(&mut self, route_point: RoutePointIdx) {
        let route = self.data.route_of(route_point);
        let order = self.data.order_of(route_point);
        let entry = &mut self.queue[route.idx];
        match entry {
            None => *entry = Some(order),
            Some(current) => {
                if D::queue_better(order, *current) {
                    *entry = Some(order);
                }
            }
        }
    }

    /// One round of route scanning. Returns true when no label was
    /// improved, i.e. the search reached its fixed point.
    fn scan_routes<D: Direction>(&mut self, global_pruning: bool) -> bool {
        let data = self.data;
        let mut fixed_point = true;
        for route_idx in 0..data.nb_of_routes() {
            let start_order = match self.queue[route_idx].take() {
                Some(order) => order,
                None => continue,
            };
            if !self.valid_routes.contains(route_idx) {
                continue;
            }
            let route = RouteIdx { idx: route_idx };
            let route_points = data.route_points_of_route(route);

            let mut onboard: Option<VehicleJourneyIdx> = None;
            let mut boarding_route_point: Option<RoutePointIdx> = None;
            let mut working = D::worst();
            let mut boarding_zone: Option<u16> = None;

            for order in D::positions(route_points.len(), start_order) {
                let route_point = route_points[order];

                // alight attempt
                if let (Some(trip), Some(boarded_at)) = (onboard, boarding_route_point) {
                    let stop_time_idx = data.stop_time_idx(trip, order);
                    let stop_time = data.stop_time(stop_time_idx);
                    D::ride_update(&mut working, stop_time);
                    // leaving the vehicle inside the zone it was
                    // boarded in is not allowed
                    let zone_excluded = boarding_zone.is_some()
                        && boarding_zone == stop_time.local_traffic_zone;
                    if !zone_excluded {
                        let best_local = D::instant(self.labels.best(route_point));
                        let best_global = D::instant(&self.best_dest.best);
                        let bound = if !global_pruning || D::better(&best_local, &best_global) {
                            best_local
                        } else {
                            best_global
                        };
                        if D::better(&working, &bound) && D::exit_allowed(stop_time) {
                            let label = Label::vehicle(working, boarded_at, stop_time_idx);
                            self.labels.write(self.count, route_point, label);
                            if !self.best_dest.offer::<D>(route_point, &label, self.count) {
                                self.marked_route_points.insert(route_point.idx);
                                self.marked_stop_points
                                    .insert(data.stop_point_of(route_point).idx);
                                fixed_point = false;
                            }
                        } else if working == bound
                            && D::exit_allowed(stop_time)
                            && !self.labels.label(self.count - 1, route_point).is_initialized()
                        {
                            // first discovery at the exact cutoff :
                            // recorded when the destination takes it,
                            // so the tie can still be reconstructed
                            let label = Label::vehicle(working, boarded_at, stop_time_idx);
                            if self.best_dest.offer::<D>(route_point, &label, self.count) {
                                self.labels.write(self.count, route_point, label);
                            }
                        }
                    }
                }

                // board attempt, from the labels of the previous round
                let previous = *self.labels.label(self.count - 1, route_point);
                if previous.is_initialized() {
                    let previous_instant = D::instant(&previous);
                    let can_board = match onboard {
                        None => true,
                        Some(trip) => {
                            let stop_time = data.stop_time(data.stop_time_idx(trip, order));
                            let mut catchable = working;
                            D::board_update(&mut catchable, stop_time);
                            !D::better(&catchable, &previous_instant)
                        }
                    };
                    if can_board {
                        let has_trip = D::best_trip(data, route, order, &previous_instant);
                        if let Some(trip) = has_trip {
                            if onboard != Some(trip) {
                                let stop_time = data.stop_time(data.stop_time_idx(trip, order));
                                onboard = Some(trip);
                                boarding_route_point = Some(route_point);
                                working = previous_instant;
                                D::board_update(&mut working, stop_time);
                                boarding_zone = stop_time.local_traffic_zone;
                            }
                        }
                    }
                }
            }
        }
        fixed_point
    }

    /// The round loop : scan, relax route-path connections, relax
    /// foot paths, until a round improves nothing.
    pub(crate) fn raptor_loop<D: Direction>(&mut self, global_pruning: bool) {
        self.count = 0;
        // let the seeded stop points reach their neighborhoods
        self.walking::<D>();
        let max_rounds = usize::from(self.params.max_nb_of_legs);
        loop {
            self.count += 1;
            self.labels.ensure_round(self.count, D::worst());
            self.marked_route_points.clear();
            self.marked_stop_points.clear();
            let fixed_point = self.scan_routes::<D>(global_pruning);
            self.route_path_connections::<D>();
            self.walking::<D>();
            trace!(
                "round {} done, fixed_point = {}, destination reached = {}",
                self.count,
                fixed_point,
                self.best_dest.is_reached()
            );
            if fixed_point || self.count >= max_rounds {
                break;
            }
        }
    }
}
