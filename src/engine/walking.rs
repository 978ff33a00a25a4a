use crate::engine::direction::Direction;
use crate::engine::labels::{Label, LabelKind};
use crate::engine::raptor::Raptor;
use crate::transit_data::{ConnectionKind, RoutePointIdx, StopPointIdx};
use crate::MIN_TRANSFER_DURATION;

impl<'data> Raptor<'data> {
    /// Relaxes pedestrian transfers from every stop point marked
    /// during the current round : first between the route points of
    /// the stop itself (constant minimum transfer time), then along
    /// the precomputed foot paths leaving it.
    ///
    /// Walked-to route points are not marked again : foot paths are a
    /// precomputed closure, walking twice in a row brings nothing.
    pub(crate) fn walking<D: Direction>(&mut self) {
        let data = self.data;
        let marked: Vec<usize> = self.marked_stop_points.ones().collect();
        for stop_point_idx in marked {
            let stop_point = StopPointIdx {
                idx: stop_point_idx,
            };

            // the route point reached best at this stop, walks start
            // from it
            let mut best_instant = D::worst();
            let mut has_best_route_point: Option<RoutePointIdx> = None;
            for route_point in data.route_points_at(stop_point) {
                let label = self.labels.label(self.count, *route_point);
                let comparable = matches!(label.kind, LabelKind::Vehicle | LabelKind::Origin);
                if comparable && D::better(&D::instant(label), &best_instant) {
                    best_instant = D::instant(label);
                    has_best_route_point = Some(*route_point);
                }
            }
            let best_route_point = match has_best_route_point {
                Some(route_point) => route_point,
                None => continue,
            };

            // change of route within the stop point
            let reachable = D::combine(&best_instant, MIN_TRANSFER_DURATION);
            for route_point in data.route_points_at(stop_point) {
                let route_point = *route_point;
                if route_point == best_route_point {
                    continue;
                }
                if D::better(&reachable, &D::instant(self.labels.best(route_point))) {
                    let label = Label::transfer(reachable, best_route_point, LabelKind::TransferWalk);
                    self.labels.write(self.count, route_point, label);
                    if !self.best_dest.offer::<D>(route_point, &label, self.count) {
                        self.queue_mark::<D>(route_point);
                    }
                }
            }

            // foot paths towards other stop points
            let mut previous_duration: Option<u32> = None;
            let mut reached = D::worst();
            for foot_path in data.footpaths_from(stop_point) {
                for route_point in data.route_points_at(foot_path.to) {
                    let route_point = *route_point;
                    if route_point == best_route_point {
                        continue;
                    }
                    if previous_duration != Some(foot_path.duration) {
                        reached = D::combine(&best_instant, foot_path.duration);
                        previous_duration = Some(foot_path.duration);
                    }
                    let best_known = D::instant(self.labels.best(route_point));
                    // the equality case is deliberate : it lets a
                    // same-instant foot path take over the label, which
                    // reconstruction relies on for ties
                    if D::better(&reached, &best_known) || reached == best_known {
                        let label =
                            Label::transfer(reached, best_route_point, LabelKind::TransferWalk);
                        self.labels.write(self.count, route_point, label);
                        if !self.best_dest.offer::<D>(route_point, &label, self.count) {
                            self.queue_mark::<D>(route_point);
                        }
                    }
                }
            }
        }
    }

    /// Relaxes the scheduled route-point connections (stay-seated
    /// extensions and guaranteed transfers) from every route point
    /// marked by the scan of the current round.
    pub(crate) fn route_path_connections<D: Direction>(&mut self) {
        let data = self.data;
        let mut to_mark: Vec<RoutePointIdx> = Vec::new();
        for route_point_idx in self.marked_route_points.ones() {
            let route_point = RoutePointIdx {
                idx: route_point_idx,
            };
            let label = *self.labels.label(self.count, route_point);
            if label.kind != LabelKind::Vehicle {
                continue;
            }
            for connection in D::connections(data, route_point) {
                let reached = D::combine(&D::instant(&label), connection.duration);
                if D::better(&reached, &D::instant(self.labels.best(connection.destination))) {
                    let kind = match connection.kind {
                        ConnectionKind::Extension => LabelKind::TransferExtension,
                        ConnectionKind::Guarantee => LabelKind::TransferGuarantee,
                    };
                    let new_label = Label::transfer(reached, route_point, kind);
                    self.labels.write(self.count, connection.destination, new_label);
                    to_mark.push(connection.destination);
                }
            }
        }
        for route_point in to_mark {
            self.marked_route_points.insert(route_point.idx);
            self.queue_mark::<D>(route_point);
        }
    }
}
