use crate::engine::labels::{Label, LabelKind};
use crate::engine::raptor::Raptor;
use crate::response::{Path, PathItem, PathItemKind};
use crate::time::DateTime;
use crate::transit_data::{walking_duration, RoutePointIdx, StopPointIdx, StopTimeIdx};

impl<'data> Raptor<'data> {
    /// Extracts the Pareto set of paths from the labels of a forward
    /// run : one path per round whose final arrival (egress walking
    /// included) strictly improves on the previous one, starting
    /// under `cutoff`.
    pub(crate) fn make_paths_forward(
        &self,
        destinations: &[(StopPointIdx, f64)],
        cutoff: DateTime,
    ) -> Vec<Path> {
        let data = self.data;
        let mut result = Vec::new();
        let mut best_final = cutoff;
        let mut emitted = false;
        for round in 1..=self.count {
            if round >= self.labels.nb_of_rounds() {
                break;
            }
            let mut candidate: Option<(DateTime, RoutePointIdx)> = None;
            for (stop_point, distance) in destinations {
                let egress_duration = walking_duration(*distance);
                for route_point in data.route_points_at(*stop_point) {
                    let label = self.labels.label(round, *route_point);
                    if !label.is_initialized() {
                        continue;
                    }
                    let final_arrival = label.arrival.add_seconds(egress_duration);
                    let in_cut = if emitted {
                        final_arrival < best_final
                    } else {
                        final_arrival <= best_final
                    };
                    if !in_cut {
                        continue;
                    }
                    let improves = match &candidate {
                        None => true,
                        Some((best, _)) => final_arrival < *best,
                    };
                    if improves {
                        candidate = Some((final_arrival, *route_point));
                    }
                }
            }
            if let Some((final_arrival, route_point)) = candidate {
                result.push(self.make_path(route_point, round, false));
                best_final = final_arrival;
                emitted = true;
            }
        }
        result
    }

    /// Mirror of [`Raptor::make_paths_forward`] over the labels of a
    /// backward run : one path per round whose final departure
    /// (access walking included) strictly improves, starting over
    /// `cutoff`.
    pub(crate) fn make_paths_reverse(
        &self,
        destinations: &[(StopPointIdx, f64)],
        cutoff: DateTime,
    ) -> Vec<Path> {
        let data = self.data;
        let mut result = Vec::new();
        let mut best_final = cutoff;
        let mut emitted = false;
        for round in 1..=self.count {
            if round >= self.labels.nb_of_rounds() {
                break;
            }
            let mut candidate: Option<(DateTime, RoutePointIdx)> = None;
            for (stop_point, distance) in destinations {
                let access_duration = walking_duration(*distance);
                for route_point in data.route_points_at(*stop_point) {
                    let label = self.labels.label(round, *route_point);
                    if !label.is_initialized() {
                        continue;
                    }
                    let final_departure = label.departure.sub_seconds(access_duration);
                    let in_cut = if emitted {
                        final_departure > best_final
                    } else {
                        final_departure >= best_final
                    };
                    if !in_cut {
                        continue;
                    }
                    let improves = match &candidate {
                        None => true,
                        Some((best, _)) => final_departure > *best,
                    };
                    if improves {
                        candidate = Some((final_departure, *route_point));
                    }
                }
            }
            if let Some((final_departure, route_point)) = candidate {
                result.push(self.make_path(route_point, round, true));
                best_final = final_departure;
                emitted = true;
            }
        }
        result
    }

    /// Walks the label history backward from `destination`, reached
    /// at `round`, and rebuilds the sequence of segments.
    ///
    /// With `reverse == false` the labels come from a forward run and
    /// the collected segments are reversed at the end ; with
    /// `reverse == true` they come from a backward run and are
    /// already in travel order.
    pub(crate) fn make_path(
        &self,
        destination: RoutePointIdx,
        round: usize,
        reverse: bool,
    ) -> Path {
        let data = self.data;
        let mut items: Vec<PathItem> = Vec::new();
        let mut k = round;
        let mut current = destination;

        loop {
            let label = *self.labels.label(k, current);
            match label.kind {
                LabelKind::Origin | LabelKind::Uninitialized => break,
                LabelKind::TransferWalk
                | LabelKind::TransferExtension
                | LabelKind::TransferGuarantee => {
                    let predecessor = match label.boarded_from {
                        Some(route_point) => route_point,
                        None => break,
                    };
                    let predecessor_label = self.labels.label(k, predecessor);
                    let (departure, arrival) = if reverse {
                        (label.departure, predecessor_label.arrival)
                    } else {
                        (predecessor_label.arrival, label.departure)
                    };
                    let kind = match label.kind {
                        LabelKind::TransferExtension => PathItemKind::Extension,
                        LabelKind::TransferGuarantee => PathItemKind::Guarantee,
                        _ => PathItemKind::Walking,
                    };
                    items.push(PathItem {
                        kind,
                        stop_points: vec![
                            data.stop_point_of(current),
                            data.stop_point_of(predecessor),
                        ],
                        arrivals: Vec::new(),
                        departures: Vec::new(),
                        vehicle_journey: None,
                        departure,
                        arrival,
                    });
                    current = predecessor;
                }
                LabelKind::Vehicle => {
                    let (stop_time, boarded_at) = match (label.stop_time, label.boarded_from) {
                        (Some(stop_time), Some(boarded_at)) => (stop_time, boarded_at),
                        _ => break,
                    };
                    items.push(self.make_vehicle_item(stop_time, boarded_at, &label, reverse));
                    current = boarded_at;
                    if k == 0 {
                        break;
                    }
                    k -= 1;
                }
            }
        }

        if !reverse {
            items.reverse();
            for item in items.iter_mut() {
                item.stop_points.reverse();
                item.arrivals.reverse();
                item.departures.reverse();
            }
        }

        let duration = match (items.first(), items.last()) {
            (Some(first), Some(last)) => last.arrival.seconds_since(&first.departure),
            _ => 0,
        };
        let nb_changes = if items.len() > 2 {
            items[1..items.len() - 1]
                .iter()
                .filter(|item| item.kind == PathItemKind::Walking)
                .count()
        } else {
            0
        };
        let visited = self
            .labels
            .best_labels()
            .iter()
            .filter(|label| label.is_initialized())
            .count();
        let percent_visited = (100 * visited / data.nb_of_stop_points().max(1)) as u32;

        Path {
            items,
            duration,
            nb_changes,
            percent_visited,
        }
    }

    /// Replays the trip's stop times from the label's alighting
    /// point back to its boarding point.
    fn make_vehicle_item(
        &self,
        alight_stop_time: StopTimeIdx,
        boarded_at: RoutePointIdx,
        label: &Label,
        reverse: bool,
    ) -> PathItem {
        let data = self.data;
        let mut stop_points = Vec::new();
        let mut arrivals = Vec::new();
        let mut departures = Vec::new();

        let vehicle_journey = data.stop_time(alight_stop_time).vehicle_journey;
        let mut working = if reverse {
            label.departure
        } else {
            label.arrival
        };
        let mut current = alight_stop_time;
        let mut first = true;
        loop {
            let stop_time = data.stop_time(current);
            let route_point = stop_time.route_point;
            stop_points.push(data.stop_point_of(route_point));
            if !reverse {
                if first {
                    arrivals.push(working);
                    let mut departure = working;
                    departure.update(stop_time.departure_time);
                    departures.push(departure);
                } else {
                    working.update_reverse(stop_time.departure_time);
                    departures.push(working);
                    working.update_reverse(stop_time.arrival_time);
                    arrivals.push(working);
                }
            } else if first {
                departures.push(working);
                let mut arrival = working;
                arrival.update_reverse(stop_time.arrival_time);
                arrivals.push(arrival);
            } else {
                working.update(stop_time.arrival_time);
                arrivals.push(working);
                working.update(stop_time.departure_time);
                departures.push(working);
            }
            first = false;
            if route_point == boarded_at {
                break;
            }
            current = if reverse {
                StopTimeIdx {
                    idx: current.idx + 1,
                }
            } else {
                StopTimeIdx {
                    idx: current.idx - 1,
                }
            };
        }

        let (departure, arrival) = if reverse {
            (
                departures.first().copied().unwrap_or(working),
                arrivals.last().copied().unwrap_or(working),
            )
        } else {
            (
                departures.last().copied().unwrap_or(working),
                arrivals.first().copied().unwrap_or(working),
            )
        };

        PathItem {
            kind: PathItemKind::PublicTransport,
            stop_points,
            arrivals,
            departures,
            vehicle_journey: Some(vehicle_journey),
            departure,
            arrival,
        }
    }
}
