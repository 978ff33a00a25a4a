use crate::engine::direction::Direction;
use crate::engine::labels::{Label, LabelKind};
use crate::time::DateTime;
use crate::transit_data::RoutePointIdx;

/// Tracks the best label reaching any destination route point,
/// egress walking included.
///
/// Also serves as the global upper bound of the scan loop : before a
/// destination is reached, its best instant is the query bound.
#[derive(Clone)]
pub struct BestDestination {
    // egress walking duration, for destination route points only
    egress: Vec<Option<u32>>,
    pub best: Label,
    pub best_route_point: Option<RoutePointIdx>,
    pub best_round: usize,
}

impl BestDestination {
    pub fn new() -> Self {
        Self {
            egress: Vec::new(),
            best: Label::uninitialized(DateTime::INF),
            best_route_point: None,
            best_round: 0,
        }
    }

    pub fn reinit(&mut self, nb_of_route_points: usize, bound: DateTime) {
        self.egress.clear();
        self.egress.resize(nb_of_route_points, None);
        self.best = Label::uninitialized(bound);
        self.best_route_point = None;
        self.best_round = 0;
    }

    pub fn add_destination(&mut self, route_point: RoutePointIdx, egress_duration: u32) {
        self.egress[route_point.idx] = Some(egress_duration);
    }

    pub fn egress(&self, route_point: RoutePointIdx) -> Option<u32> {
        self.egress[route_point.idx]
    }

    pub fn is_reached(&self) -> bool {
        self.best_route_point.is_some()
    }

    /// Offers a label written at `route_point` during round `k`.
    ///
    /// Returns true when the label lands on a destination and improves
    /// the tracked best, meaning the caller may skip marking it for
    /// further propagation. An instant exactly equal to the initial
    /// bound is accepted while nothing has been tracked yet, so that a
    /// search anchored at the optimum can rediscover it.
    pub fn offer<D: Direction>(&mut self, route_point: RoutePointIdx, label: &Label, k: usize) -> bool {
        let egress_duration = match self.egress[route_point.idx] {
            Some(duration) => duration,
            None => return false,
        };
        let instant = D::instant(label);
        let final_instant = D::combine(&instant, egress_duration);
        let current = D::instant(&self.best);
        let improves = D::better(&final_instant, &current)
            || (self.best.kind == LabelKind::Uninitialized
                && final_instant == current
                && !final_instant.is_sentinel());
        if !improves {
            return false;
        }
        self.best = Label {
            arrival: final_instant,
            departure: final_instant,
            ..*label
        };
        self.best_route_point = Some(route_point);
        self.best_round = k;
        true
    }
}
