use crate::time::DateTime;
use crate::transit_data::{RoutePointIdx, StopTimeIdx};

/// How a route point was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Uninitialized,
    /// Seeded from the query origins.
    Origin,
    /// Alighted from a vehicle; `stop_time` records where.
    Vehicle,
    /// Walked from `boarded_from`, either within a stop point or
    /// along a foot path.
    TransferWalk,
    /// Stayed seated through a route-path extension.
    TransferExtension,
    /// Used a guaranteed connection.
    TransferGuarantee,
}

/// The best way found so far to be at a route point within a given
/// number of vehicle legs.
#[derive(Debug, Clone, Copy)]
pub struct Label {
    pub arrival: DateTime,
    pub departure: DateTime,
    pub kind: LabelKind,
    /// The route point boarded or walked from.
    pub boarded_from: Option<RoutePointIdx>,
    /// The stop time used to alight. Unset for walking labels.
    pub stop_time: Option<StopTimeIdx>,
}

impl Label {
    pub fn uninitialized(worst: DateTime) -> Self {
        Self {
            arrival: worst,
            departure: worst,
            kind: LabelKind::Uninitialized,
            boarded_from: None,
            stop_time: None,
        }
    }

    pub fn origin(instant: DateTime) -> Self {
        Self {
            arrival: instant,
            departure: instant,
            kind: LabelKind::Origin,
            boarded_from: None,
            stop_time: None,
        }
    }

    pub fn vehicle(instant: DateTime, boarded_from: RoutePointIdx, stop_time: StopTimeIdx) -> Self {
        Self {
            arrival: instant,
            departure: instant,
            kind: LabelKind::Vehicle,
            boarded_from: Some(boarded_from),
            stop_time: Some(stop_time),
        }
    }

    pub fn transfer(instant: DateTime, from: RoutePointIdx, kind: LabelKind) -> Self {
        debug_assert!(matches!(
            kind,
            LabelKind::TransferWalk | LabelKind::TransferExtension | LabelKind::TransferGuarantee
        ));
        Self {
            arrival: instant,
            departure: instant,
            kind,
            boarded_from: Some(from),
            stop_time: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.kind != LabelKind::Uninitialized
    }
}

/// Per-round label arrays plus the best-known summary across rounds.
///
/// The store never checks domination itself : callers compare against
/// `best` under the direction's ordering before writing.
pub struct LabelStore {
    rounds: Vec<Vec<Label>>,
    best: Vec<Label>,
}

impl LabelStore {
    pub fn new(nb_of_route_points: usize) -> Self {
        Self {
            rounds: vec![vec![Label::uninitialized(DateTime::INF); nb_of_route_points]],
            best: vec![Label::uninitialized(DateTime::INF); nb_of_route_points],
        }
    }

    /// Drops every label and leaves a single uninitialized round,
    /// reusing the allocated arrays.
    pub fn reset(&mut self, nb_of_route_points: usize, worst: DateTime) {
        self.rounds.truncate(1);
        let first = &mut self.rounds[0];
        first.clear();
        first.resize(nb_of_route_points, Label::uninitialized(worst));
        self.best.clear();
        self.best.resize(nb_of_route_points, Label::uninitialized(worst));
    }

    /// Makes sure round `k` exists, appending uninitialized layers
    /// as needed.
    pub fn ensure_round(&mut self, k: usize, worst: DateTime) {
        let nb_of_route_points = self.best.len();
        while self.rounds.len() <= k {
            self.rounds
                .push(vec![Label::uninitialized(worst); nb_of_route_points]);
        }
    }

    pub fn nb_of_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn round(&self, k: usize) -> &[Label] {
        &self.rounds[k]
    }

    pub fn label(&self, k: usize, route_point: RoutePointIdx) -> &Label {
        &self.rounds[k][route_point.idx]
    }

    pub fn best(&self, route_point: RoutePointIdx) -> &Label {
        &self.best[route_point.idx]
    }

    pub fn best_labels(&self) -> &[Label] {
        &self.best
    }

    /// Stores `label` both in round `k` and in the best summary.
    pub fn write(&mut self, k: usize, route_point: RoutePointIdx, label: Label) {
        self.rounds[k][route_point.idx] = label;
        self.best[route_point.idx] = label;
    }

    /// Overwrites only the best summary; used to pre-prune
    /// destinations with the query bound.
    pub fn write_best(&mut self, route_point: RoutePointIdx, label: Label) {
        self.best[route_point.idx] = label;
    }
}
