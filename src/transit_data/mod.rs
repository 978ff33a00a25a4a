// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

pub mod calendar;

use crate::time::DateTime;
use chrono::NaiveDateTime;
use thiserror::Error;

pub use calendar::{walking_duration, Calendar, ValidityPattern};

/// A physical boarding location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopPointIdx {
    pub(crate) idx: usize,
}

/// A group of stop points exposed to callers as one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopAreaIdx {
    pub(crate) idx: usize,
}

/// An ordered sequence of stops served identically by one or more
/// vehicle journeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteIdx {
    pub(crate) idx: usize,
}

/// One stop point as served by one route: a (route, position) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutePointIdx {
    pub(crate) idx: usize,
}

/// One timetabled traversal of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleJourneyIdx {
    pub(crate) idx: usize,
}

/// A (vehicle journey, position) tuple in the flat stop-time table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopTimeIdx {
    pub(crate) idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineIdx {
    pub(crate) idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeIdx {
    pub(crate) idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidityPatternIdx {
    pub(crate) idx: usize,
}

#[derive(Debug)]
pub(crate) struct StopAreaData {
    pub id: String,
    pub stop_points: Vec<StopPointIdx>,
}

#[derive(Debug)]
pub(crate) struct StopPointData {
    pub id: String,
    pub stop_area: StopAreaIdx,
    pub route_points: Vec<RoutePointIdx>,
    // slice of the foot-path table leaving this stop point
    pub footpaths_first: usize,
    pub footpaths_count: usize,
}

#[derive(Debug)]
pub(crate) struct RouteData {
    pub id: String,
    pub line: LineIdx,
    pub mode: ModeIdx,
    // contiguous, position i of the route is route_points[i]
    pub route_points: Vec<RoutePointIdx>,
    pub vehicle_journeys: Vec<VehicleJourneyIdx>,
}

#[derive(Debug)]
pub(crate) struct RoutePointData {
    pub route: RouteIdx,
    pub order: usize,
    pub stop_point: StopPointIdx,
}

#[derive(Debug)]
pub(crate) struct VehicleJourneyData {
    pub id: String,
    pub route: RouteIdx,
    pub validity_pattern: ValidityPatternIdx,
    // stop time at position i is stop_times[first_stop_time + i]
    pub first_stop_time: usize,
    pub nb_of_stop_times: usize,
}

#[derive(Debug, Clone)]
pub struct StopTime {
    pub arrival_time: u32,
    pub departure_time: u32,
    pub pick_up_allowed: bool,
    pub drop_off_allowed: bool,
    pub local_traffic_zone: Option<u16>,
    pub(crate) vehicle_journey: VehicleJourneyIdx,
    pub(crate) route_point: RoutePointIdx,
}

#[derive(Debug)]
pub(crate) struct FootPath {
    pub from: StopPointIdx,
    pub to: StopPointIdx,
    pub duration: u32,
}

/// A scheduled connection between two route points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// The vehicle itself continues as another route (stay seated).
    Extension,
    /// The connecting vehicle waits for the incoming one.
    Guarantee,
}

#[derive(Debug, Clone)]
pub(crate) struct RoutePointConnection {
    pub destination: RoutePointIdx,
    pub duration: u32,
    pub kind: ConnectionKind,
}

#[derive(Debug)]
pub(crate) struct LineData {
    pub id: String,
}

#[derive(Debug)]
pub(crate) struct ModeData {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("vehicle journey {vehicle_journey} references the unknown calendar {calendar}")]
    UnknownCalendar {
        vehicle_journey: String,
        calendar: String,
    },
    #[error("vehicle journeys {first} and {second} serve route {route} with different stop sequences")]
    RouteStopMismatch {
        route: String,
        first: String,
        second: String,
    },
    #[error("unknown stop point {0}")]
    UnknownStopPoint(String),
    #[error("unknown route {0}")]
    UnknownRoute(String),
    #[error("route {route} does not serve stop point {stop_point}")]
    StopNotOnRoute { route: String, stop_point: String },
}

/// The immutable timetable consumed by the engine.
///
/// Built once (see [`crate::model_builder::ModelBuilder`]) and then shared
/// read-only by any number of search sessions.
pub struct TransitData {
    pub(crate) stop_areas: Vec<StopAreaData>,
    pub(crate) stop_points: Vec<StopPointData>,
    pub(crate) routes: Vec<RouteData>,
    pub(crate) route_points: Vec<RoutePointData>,
    pub(crate) vehicle_journeys: Vec<VehicleJourneyData>,
    pub(crate) stop_times: Vec<StopTime>,
    pub(crate) validity_patterns: Vec<ValidityPattern>,
    pub(crate) lines: Vec<LineData>,
    pub(crate) modes: Vec<ModeData>,
    // foot paths sorted by origin stop point, then duration;
    // stop_points[sp].footpaths_first/count slice into this table
    pub(crate) foot_paths: Vec<FootPath>,
    // outgoing connections, indexed by the origin route point
    pub(crate) connections_forward: Vec<Vec<RoutePointConnection>>,
    // incoming connections, indexed by the destination route point
    pub(crate) connections_backward: Vec<Vec<RoutePointConnection>>,
    pub(crate) calendar: Calendar,
}

impl TransitData {
    pub fn nb_of_stop_areas(&self) -> usize {
        self.stop_areas.len()
    }

    pub fn nb_of_stop_points(&self) -> usize {
        self.stop_points.len()
    }

    pub fn nb_of_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn nb_of_route_points(&self) -> usize {
        self.route_points.len()
    }

    pub fn nb_of_vehicle_journeys(&self) -> usize {
        self.vehicle_journeys.len()
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn stop_area_idx(&self, id: &str) -> Option<StopAreaIdx> {
        self.stop_areas
            .iter()
            .position(|sa| sa.id == id)
            .map(|idx| StopAreaIdx { idx })
    }

    pub fn stop_point_idx(&self, id: &str) -> Option<StopPointIdx> {
        self.stop_points
            .iter()
            .position(|sp| sp.id == id)
            .map(|idx| StopPointIdx { idx })
    }

    pub fn route_idx(&self, id: &str) -> Option<RouteIdx> {
        self.routes
            .iter()
            .position(|route| route.id == id)
            .map(|idx| RouteIdx { idx })
    }

    pub fn stop_area_id(&self, stop_area: StopAreaIdx) -> &str {
        &self.stop_areas[stop_area.idx].id
    }

    pub fn stop_point_id(&self, stop_point: StopPointIdx) -> &str {
        &self.stop_points[stop_point.idx].id
    }

    pub fn vehicle_journey_id(&self, vehicle_journey: VehicleJourneyIdx) -> &str {
        &self.vehicle_journeys[vehicle_journey.idx].id
    }

    pub fn stop_points_of_area(&self, stop_area: StopAreaIdx) -> &[StopPointIdx] {
        &self.stop_areas[stop_area.idx].stop_points
    }

    pub fn stop_point_of(&self, route_point: RoutePointIdx) -> StopPointIdx {
        self.route_points[route_point.idx].stop_point
    }

    pub fn route_of(&self, route_point: RoutePointIdx) -> RouteIdx {
        self.route_points[route_point.idx].route
    }

    pub fn order_of(&self, route_point: RoutePointIdx) -> usize {
        self.route_points[route_point.idx].order
    }

    pub(crate) fn route_points_at(&self, stop_point: StopPointIdx) -> &[RoutePointIdx] {
        &self.stop_points[stop_point.idx].route_points
    }

    pub(crate) fn route_points_of_route(&self, route: RouteIdx) -> &[RoutePointIdx] {
        &self.routes[route.idx].route_points
    }

    pub(crate) fn vehicle_journeys_of_route(&self, route: RouteIdx) -> &[VehicleJourneyIdx] {
        &self.routes[route.idx].vehicle_journeys
    }

    pub(crate) fn stop_time_idx(
        &self,
        vehicle_journey: VehicleJourneyIdx,
        order: usize,
    ) -> StopTimeIdx {
        let vj = &self.vehicle_journeys[vehicle_journey.idx];
        debug_assert!(order < vj.nb_of_stop_times);
        StopTimeIdx {
            idx: vj.first_stop_time + order,
        }
    }

    pub(crate) fn stop_time(&self, stop_time: StopTimeIdx) -> &StopTime {
        &self.stop_times[stop_time.idx]
    }

    pub(crate) fn validity_pattern_of(
        &self,
        vehicle_journey: VehicleJourneyIdx,
    ) -> &ValidityPattern {
        let vj = &self.vehicle_journeys[vehicle_journey.idx];
        &self.validity_patterns[vj.validity_pattern.idx]
    }

    pub(crate) fn footpaths_from(&self, stop_point: StopPointIdx) -> &[FootPath] {
        let sp = &self.stop_points[stop_point.idx];
        &self.foot_paths[sp.footpaths_first..sp.footpaths_first + sp.footpaths_count]
    }

    pub(crate) fn connections_forward_of(
        &self,
        route_point: RoutePointIdx,
    ) -> &[RoutePointConnection] {
        &self.connections_forward[route_point.idx]
    }

    pub(crate) fn connections_backward_of(
        &self,
        route_point: RoutePointIdx,
    ) -> &[RoutePointConnection] {
        &self.connections_backward[route_point.idx]
    }

    pub(crate) fn line_id_of_route(&self, route: RouteIdx) -> &str {
        &self.lines[self.routes[route.idx].line.idx].id
    }

    pub(crate) fn mode_id_of_route(&self, route: RouteIdx) -> &str {
        &self.modes[self.routes[route.idx].mode.idx].id
    }

    pub(crate) fn route_id(&self, route: RouteIdx) -> &str {
        &self.routes[route.idx].id
    }

    /// Converts a wall-clock datetime into an engine instant,
    /// if it falls within the calendar.
    pub fn datetime(&self, datetime: &NaiveDateTime) -> Option<DateTime> {
        self.calendar.make_datetime(datetime)
    }

    /// Converts an engine instant back to a wall-clock datetime.
    pub fn to_naive_datetime(&self, datetime: &DateTime) -> NaiveDateTime {
        self.calendar.to_naive_datetime(datetime)
    }
}
