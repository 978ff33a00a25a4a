use log::{debug, warn};

use crate::engine::direction::{Backward, Direction, Forward};
use crate::engine::raptor::{Raptor, Seed};
use crate::filters::Filters;
use crate::response::Path;
use crate::time::DateTime;
use crate::transit_data::{walking_duration, StopAreaIdx, StopPointIdx};

/// A label of a finished run worth re-anchoring a refinement run on :
/// the route point and instant to seed, and the final instant
/// (access/egress walking included) it achieved.
struct Anchor {
    seed: Seed,
    cutoff: DateTime,
}

impl<'data> Raptor<'data> {
    /// Expands both stop areas into zero-distance stop points and
    /// delegates to [`Raptor::compute_all`] (clockwise) or
    /// [`Raptor::compute_reverse_all`].
    pub fn compute(
        &mut self,
        origin: StopAreaIdx,
        destination: StopAreaIdx,
        departure_time: u32,
        departure_day: u32,
        clockwise: bool,
    ) -> Vec<Path> {
        let data = self.data;
        if origin.idx >= data.nb_of_stop_areas() || destination.idx >= data.nb_of_stop_areas() {
            warn!("compute called with an out of range stop area");
            return Vec::new();
        }
        let origins: Vec<(StopPointIdx, f64)> = data
            .stop_points_of_area(origin)
            .iter()
            .map(|stop_point| (*stop_point, 0.0))
            .collect();
        let destinations: Vec<(StopPointIdx, f64)> = data
            .stop_points_of_area(destination)
            .iter()
            .map(|stop_point| (*stop_point, 0.0))
            .collect();
        let instant = DateTime::new(departure_day as i32, departure_time);
        if clockwise {
            self.compute_all(&origins, &destinations, instant, DateTime::INF, &Filters::empty())
        } else {
            self.compute_reverse_all(
                &origins,
                &destinations,
                instant,
                DateTime::MIN,
                &Filters::empty(),
            )
        }
    }

    /// Earliest-arrival query : establishes the destination cut with
    /// a forward pass, tightens the origin side with a backward pass
    /// per anchor, then reconstructs from a forward re-run of each
    /// refined departure.
    pub fn compute_all(
        &mut self,
        origins: &[(StopPointIdx, f64)],
        destinations: &[(StopPointIdx, f64)],
        departure: DateTime,
        bound: DateTime,
        filters: &Filters,
    ) -> Vec<Path> {
        debug!("compute_all, departure at {}", departure);
        self.set_valid_routes(departure.date(), filters);
        let seeds = self.seeds_from::<Forward>(origins, &departure);
        if seeds.is_empty() {
            return Vec::new();
        }
        self.clear_and_init::<Forward>(&seeds, destinations, bound, true);
        let global_pruning = self.params.global_pruning;
        self.raptor_loop::<Forward>(global_pruning);
        if !self.best_dest.is_reached() {
            debug!("no destination reached");
            return Vec::new();
        }

        let anchors = self.anchors::<Forward>(destinations);
        let mut result = Vec::new();
        for anchor in &anchors {
            self.clear_and_init::<Backward>(&[anchor.seed], origins, departure, true);
            self.raptor_loop::<Backward>(true);
            if !self.best_dest.is_reached() {
                continue;
            }
            let refinements = self.anchors::<Backward>(origins);
            for refinement in &refinements {
                self.clear_and_init::<Forward>(&[refinement.seed], destinations, bound, true);
                self.raptor_loop::<Forward>(true);
                result.extend(self.make_paths_forward(destinations, anchor.cutoff));
            }
        }
        debug!("compute_all found {} paths before filtering", result.len());
        pareto_filter(result)
    }

    /// Latest-departure query anchored on an arrival instant :
    /// establishes the origin cut with a backward pass, then refines
    /// and reconstructs with a forward pass per anchor.
    pub fn compute_reverse_all(
        &mut self,
        origins: &[(StopPointIdx, f64)],
        destinations: &[(StopPointIdx, f64)],
        arrival: DateTime,
        bound: DateTime,
        filters: &Filters,
    ) -> Vec<Path> {
        debug!("compute_reverse_all, arrival at {}", arrival);
        self.set_valid_routes(arrival.date(), filters);
        let seeds = self.seeds_from::<Backward>(destinations, &arrival);
        if seeds.is_empty() {
            return Vec::new();
        }
        self.clear_and_init::<Backward>(&seeds, origins, bound, true);
        let global_pruning = self.params.global_pruning;
        self.raptor_loop::<Backward>(global_pruning);
        if !self.best_dest.is_reached() {
            debug!("no origin reached");
            return Vec::new();
        }

        let anchors = self.anchors::<Backward>(origins);
        let mut result = Vec::new();
        for anchor in &anchors {
            self.clear_and_init::<Forward>(&[anchor.seed], destinations, arrival, true);
            self.raptor_loop::<Forward>(true);
            if self.best_dest.is_reached() {
                result.extend(self.make_paths_forward(destinations, arrival));
            }
        }
        pareto_filter(result)
    }

    /// Profile query : one refined path per departure instant, label
    /// arrays reused across the establishing passes.
    pub fn compute_all_profile(
        &mut self,
        origins: &[(StopPointIdx, f64)],
        destinations: &[(StopPointIdx, f64)],
        departures: &[DateTime],
        bound: DateTime,
    ) -> Vec<Path> {
        let mut instants: Vec<DateTime> = departures.to_vec();
        instants.sort_unstable();
        instants.dedup();
        if instants.is_empty() {
            return Vec::new();
        }
        self.set_valid_routes(instants[0].date(), &Filters::empty());

        // establish, from the latest departure down, reusing labels
        let mut bests = Vec::new();
        let mut clear = true;
        for departure in instants.iter().rev() {
            let seeds = self.seeds_from::<Forward>(origins, departure);
            self.clear_and_init::<Forward>(&seeds, destinations, bound, clear);
            self.raptor_loop::<Forward>(false);
            bests.push((*departure, self.best_dest.clone()));
            clear = false;
        }

        // refine each departure independently
        let mut result = Vec::new();
        for (departure, best) in bests.into_iter().rev() {
            let anchor_route_point = match best.best_route_point {
                Some(route_point) => route_point,
                None => continue,
            };
            let final_arrival = best.best.arrival;
            let egress_duration = best.egress(anchor_route_point).unwrap_or(0);
            let anchor_seed = Seed {
                route_point: anchor_route_point,
                instant: final_arrival.sub_seconds(egress_duration),
            };
            self.clear_and_init::<Backward>(&[anchor_seed], origins, departure, true);
            self.raptor_loop::<Backward>(true);
            if !self.best_dest.is_reached() {
                continue;
            }
            let refinements = self.anchors::<Backward>(origins);
            let refinement = match refinements.last() {
                Some(anchor) => anchor.seed,
                None => continue,
            };
            self.clear_and_init::<Forward>(&[refinement], destinations, bound, true);
            self.raptor_loop::<Forward>(true);
            if let Some(path) = self.make_paths_forward(destinations, final_arrival).pop() {
                result.push(path);
            }
        }
        result
    }

    /// Expands query places into per-route-point seeds, the instant
    /// moved by the access/egress walking duration.
    fn seeds_from<D: Direction>(
        &self,
        places: &[(StopPointIdx, f64)],
        instant: &DateTime,
    ) -> Vec<Seed> {
        let data = self.data;
        let mut seeds = Vec::new();
        for (stop_point, distance) in places {
            if stop_point.idx >= data.nb_of_stop_points() {
                warn!("query references an out of range stop point, ignored");
                continue;
            }
            let at_stop = D::combine(instant, walking_duration(*distance));
            for route_point in data.route_points_at(*stop_point) {
                seeds.push(Seed {
                    route_point: *route_point,
                    instant: at_stop,
                });
            }
        }
        seeds
    }

    /// For each round of the run that just ended, the place label
    /// achieving the best final instant, deduplicated.
    fn anchors<D: Direction>(&self, places: &[(StopPointIdx, f64)]) -> Vec<Anchor> {
        let data = self.data;
        let mut result: Vec<Anchor> = Vec::new();
        for round in 1..=self.count {
            if round >= self.labels.nb_of_rounds() {
                break;
            }
            let mut candidate: Option<Anchor> = None;
            for (stop_point, distance) in places {
                if stop_point.idx >= data.nb_of_stop_points() {
                    continue;
                }
                let walk_duration = walking_duration(*distance);
                for route_point in data.route_points_at(*stop_point) {
                    let label = self.labels.label(round, *route_point);
                    if !label.is_initialized() {
                        continue;
                    }
                    let instant = D::instant(label);
                    let final_instant = D::combine(&instant, walk_duration);
                    let improves = match &candidate {
                        None => true,
                        Some(existing) => D::better(&final_instant, &existing.cutoff),
                    };
                    if improves {
                        candidate = Some(Anchor {
                            seed: Seed {
                                route_point: *route_point,
                                instant,
                            },
                            cutoff: final_instant,
                        });
                    }
                }
            }
            if let Some(anchor) = candidate {
                let duplicate = result.iter().any(|existing| {
                    existing.seed.route_point == anchor.seed.route_point
                        && existing.cutoff == anchor.cutoff
                });
                if !duplicate {
                    result.push(anchor);
                }
            }
        }
        result
    }
}

/// Keeps one copy of each path and drops the ones dominated on
/// (arrival instant, number of changes).
fn pareto_filter(mut paths: Vec<Path>) -> Vec<Path> {
    paths.sort_by(|a, b| {
        (a.first_departure(), a.last_arrival(), a.nb_changes).cmp(&(
            b.first_departure(),
            b.last_arrival(),
            b.nb_changes,
        ))
    });
    paths.dedup();
    let kept: Vec<Path> = paths
        .iter()
        .enumerate()
        .filter(|(i, path)| {
            let dominated = paths.iter().enumerate().any(|(j, other)| {
                *i != j
                    && other.last_arrival() <= path.last_arrival()
                    && other.nb_changes <= path.nb_changes
                    && (other.last_arrival() < path.last_arrival()
                        || other.nb_changes < path.nb_changes)
            });
            !dominated
        })
        .map(|(_, path)| path.clone())
        .collect();
    kept
}
