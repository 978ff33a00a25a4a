// Copyright (C) 2017 Kisio Digital and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! Provides an easy way to create a [`TransitData`]
//!
//! ```
//! # use sleipnir::model_builder::ModelBuilder;
//!
//! # fn main() {
//!  let data = ModelBuilder::default()
//!      .vj("toto", |vj| {
//!          vj.route("1")
//!            .st("A", "10:00:00", "10:01:00")
//!            .st("B", "11:00:00", "11:01:00");
//!      })
//!      .vj("tata", |vj| {
//!          vj.st("A", "10:00:00", "10:01:00")
//!            .st("D", "11:00:00", "11:01:00");
//!      })
//!      .build();
//! # }
//! ```

use crate::time::parse_time_of_day;
use crate::transit_data::{
    Calendar, ConnectionKind, FootPath, LineData, LineIdx, ModeData, ModeIdx, ModelError,
    RouteData, RouteIdx, RoutePointConnection, RoutePointData, RoutePointIdx, StopAreaData,
    StopAreaIdx, StopPointData, StopPointIdx, StopTime, TransitData, ValidityPattern,
    ValidityPatternIdx, VehicleJourneyData, VehicleJourneyIdx,
};
use chrono::NaiveDate;

const DEFAULT_CALENDAR_ID: &str = "default_service";
const DEFAULT_LINE_ID: &str = "default_line";
const DEFAULT_MODE_ID: &str = "default_physical_mode";

/// Builder used to easily create a [`TransitData`].
/// Note: if not explicitly set, all the vehicle journeys
/// will be attached to a default calendar covering the whole
/// validity period.
pub struct ModelBuilder {
    first_date: NaiveDate,
    last_date: NaiveDate,
    calendars: Vec<(String, Vec<NaiveDate>)>,
    vehicle_journeys: Vec<VehicleJourneySpec>,
    footpaths: Vec<(String, String, u32)>,
    connections: Vec<ConnectionSpec>,
}

struct VehicleJourneySpec {
    id: String,
    route: Option<String>,
    line: Option<String>,
    mode: Option<String>,
    calendar: String,
    stops: Vec<StopTimeSpec>,
}

/// One row of a vehicle journey under construction.
pub struct StopTimeSpec {
    pub stop_point: String,
    pub arrival_time: u32,
    pub departure_time: u32,
    pub pick_up_allowed: bool,
    pub drop_off_allowed: bool,
    pub local_traffic_zone: Option<u16>,
}

struct ConnectionSpec {
    from_route: String,
    from_stop: String,
    to_route: String,
    to_stop: String,
    duration: u32,
    kind: ConnectionKind,
}

/// Builder used to create and modify a new vehicle journey.
pub struct VehicleJourneyBuilder<'a> {
    spec: &'a mut VehicleJourneySpec,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new("2020-01-01", "2020-01-02")
    }
}

impl ModelBuilder {
    pub fn new(start_validity_period: impl AsDate, end_validity_period: impl AsDate) -> Self {
        let first_date = start_validity_period.as_date();
        let last_date = end_validity_period.as_date();
        assert!(first_date <= last_date);
        let dates: Vec<NaiveDate> = first_date
            .iter_days()
            .take_while(|date| *date <= last_date)
            .collect();
        Self {
            first_date,
            last_date,
            calendars: vec![(DEFAULT_CALENDAR_ID.to_string(), dates)],
            vehicle_journeys: Vec::new(),
            footpaths: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Add a new Calendar or change an existing one
    ///
    /// ```
    /// # use sleipnir::model_builder::ModelBuilder;
    ///
    /// # fn main() {
    /// let data = ModelBuilder::new("2020-01-01", "2020-01-10")
    ///      .calendar("c1", &["2020-01-01", "2020-01-02"])
    ///      .vj("toto", |vj| {
    ///          vj.calendar("c1")
    ///            .st("A", "10:00:00", "10:00:00")
    ///            .st("B", "11:00:00", "11:00:00");
    ///      })
    ///      .build();
    /// # }
    /// ```
    pub fn calendar(mut self, id: &str, dates: &[impl AsDate]) -> Self {
        let dates: Vec<NaiveDate> = dates.iter().map(AsDate::as_date).collect();
        if let Some(entry) = self.calendars.iter_mut().find(|(name, _)| name == id) {
            entry.1.extend(dates);
        } else {
            self.calendars.push((id.to_string(), dates));
        }
        self
    }

    /// Add a new vehicle journey to the model
    pub fn vj<F>(mut self, id: &str, vj_initer: F) -> Self
    where
        F: FnOnce(VehicleJourneyBuilder<'_>),
    {
        assert!(
            self.vehicle_journeys.iter().all(|vj| vj.id != id),
            "vj {} already exists",
            id
        );
        let mut spec = VehicleJourneySpec {
            id: id.to_string(),
            route: None,
            line: None,
            mode: None,
            calendar: DEFAULT_CALENDAR_ID.to_string(),
            stops: Vec::new(),
        };
        vj_initer(VehicleJourneyBuilder { spec: &mut spec });
        self.vehicle_journeys.push(spec);
        self
    }

    /// Declare a pedestrian transfer between two stop points.
    /// Both walking directions are added.
    pub fn footpath(mut self, from_stop_id: &str, to_stop_id: &str, duration: u32) -> Self {
        self.footpaths
            .push((from_stop_id.to_string(), to_stop_id.to_string(), duration));
        self
    }

    /// Declare a scheduled connection between a route point of one
    /// route and a route point of another.
    pub fn connection(
        mut self,
        from: (&str, &str),
        to: (&str, &str),
        duration: u32,
        kind: ConnectionKind,
    ) -> Self {
        self.connections.push(ConnectionSpec {
            from_route: from.0.to_string(),
            from_stop: from.1.to_string(),
            to_route: to.0.to_string(),
            to_stop: to.1.to_string(),
            duration,
            kind,
        });
        self
    }

    /// Consume the builder to create a timetable.
    /// Panics on an inconsistent model; see [`ModelBuilder::try_build`].
    pub fn build(self) -> TransitData {
        self.try_build()
            .unwrap_or_else(|err| panic!("invalid model : {}", err))
    }

    pub fn try_build(self) -> Result<TransitData, ModelError> {
        let calendar = Calendar::new(self.first_date, self.last_date);

        let mut stop_areas: Vec<StopAreaData> = Vec::new();
        let mut stop_points: Vec<StopPointData> = Vec::new();
        let mut routes: Vec<RouteData> = Vec::new();
        let mut route_points: Vec<RoutePointData> = Vec::new();
        let mut vehicle_journeys: Vec<VehicleJourneyData> = Vec::new();
        let mut stop_times: Vec<StopTime> = Vec::new();
        let mut validity_patterns: Vec<ValidityPattern> = Vec::new();
        let mut lines: Vec<LineData> = Vec::new();
        let mut modes: Vec<ModeData> = Vec::new();

        let find_or_create_stop_point = |stop_points: &mut Vec<StopPointData>,
                                             stop_areas: &mut Vec<StopAreaData>,
                                             id: &str|
         -> StopPointIdx {
            if let Some(idx) = stop_points.iter().position(|sp| sp.id == id) {
                return StopPointIdx { idx };
            }
            let stop_area_id = format!("sa:{}", id);
            let stop_area = StopAreaIdx {
                idx: stop_areas.len(),
            };
            stop_areas.push(StopAreaData {
                id: stop_area_id,
                stop_points: Vec::new(),
            });
            let idx = StopPointIdx {
                idx: stop_points.len(),
            };
            stop_areas[stop_area.idx].stop_points.push(idx);
            stop_points.push(StopPointData {
                id: id.to_string(),
                stop_area,
                route_points: Vec::new(),
                footpaths_first: 0,
                footpaths_count: 0,
            });
            idx
        };

        let get_or_insert_pattern =
            |patterns: &mut Vec<ValidityPattern>, dates: &[NaiveDate]| -> ValidityPatternIdx {
                let mut allowed_days = vec![false; usize::from(calendar.nb_of_days())];
                for date in dates {
                    // dates outside the validity period are ignored
                    if let Some(day) = calendar.day_of(date) {
                        allowed_days[day as usize] = true;
                    }
                }
                let candidate = ValidityPattern::new(allowed_days);
                if let Some(idx) = patterns.iter().position(|pattern| *pattern == candidate) {
                    return ValidityPatternIdx { idx };
                }
                let idx = ValidityPatternIdx {
                    idx: patterns.len(),
                };
                patterns.push(candidate);
                idx
            };

        for spec in &self.vehicle_journeys {
            let route_id = spec
                .route
                .clone()
                .unwrap_or_else(|| format!("route_{}", spec.id));

            let calendar_dates = self
                .calendars
                .iter()
                .find(|(id, _)| *id == spec.calendar)
                .map(|(_, dates)| dates.as_slice())
                .ok_or_else(|| ModelError::UnknownCalendar {
                    vehicle_journey: spec.id.clone(),
                    calendar: spec.calendar.clone(),
                })?;
            let validity_pattern = get_or_insert_pattern(&mut validity_patterns, calendar_dates);

            let route_idx = match routes.iter().position(|route| route.id == route_id) {
                Some(idx) => {
                    let route = &routes[idx];
                    let same_stops = route.route_points.len() == spec.stops.len()
                        && route.route_points.iter().zip(spec.stops.iter()).all(
                            |(rp, stop_spec)| {
                                stop_points[route_points[rp.idx].stop_point.idx].id
                                    == stop_spec.stop_point
                            },
                        );
                    if !same_stops {
                        let first_vj = route.vehicle_journeys[0];
                        return Err(ModelError::RouteStopMismatch {
                            route: route_id,
                            first: vehicle_journeys[first_vj.idx].id.clone(),
                            second: spec.id.clone(),
                        });
                    }
                    RouteIdx { idx }
                }
                None => {
                    let line_id = spec
                        .line
                        .clone()
                        .unwrap_or_else(|| DEFAULT_LINE_ID.to_string());
                    let line = match lines.iter().position(|line| line.id == line_id) {
                        Some(idx) => LineIdx { idx },
                        None => {
                            let idx = LineIdx { idx: lines.len() };
                            lines.push(LineData { id: line_id });
                            idx
                        }
                    };
                    let mode_id = spec
                        .mode
                        .clone()
                        .unwrap_or_else(|| DEFAULT_MODE_ID.to_string());
                    let mode = match modes.iter().position(|mode| mode.id == mode_id) {
                        Some(idx) => ModeIdx { idx },
                        None => {
                            let idx = ModeIdx { idx: modes.len() };
                            modes.push(ModeData { id: mode_id });
                            idx
                        }
                    };
                    let idx = RouteIdx { idx: routes.len() };
                    let mut new_route_points = Vec::with_capacity(spec.stops.len());
                    for (order, stop_spec) in spec.stops.iter().enumerate() {
                        let stop_point = find_or_create_stop_point(
                            &mut stop_points,
                            &mut stop_areas,
                            &stop_spec.stop_point,
                        );
                        let route_point = RoutePointIdx {
                            idx: route_points.len(),
                        };
                        route_points.push(RoutePointData {
                            route: idx,
                            order,
                            stop_point,
                        });
                        stop_points[stop_point.idx].route_points.push(route_point);
                        new_route_points.push(route_point);
                    }
                    routes.push(RouteData {
                        id: route_id,
                        line,
                        mode,
                        route_points: new_route_points,
                        vehicle_journeys: Vec::new(),
                    });
                    idx
                }
            };

            let vj_idx = VehicleJourneyIdx {
                idx: vehicle_journeys.len(),
            };
            let first_stop_time = stop_times.len();
            for (order, stop_spec) in spec.stops.iter().enumerate() {
                stop_times.push(StopTime {
                    arrival_time: stop_spec.arrival_time,
                    departure_time: stop_spec.departure_time,
                    pick_up_allowed: stop_spec.pick_up_allowed,
                    drop_off_allowed: stop_spec.drop_off_allowed,
                    local_traffic_zone: stop_spec.local_traffic_zone,
                    vehicle_journey: vj_idx,
                    route_point: routes[route_idx.idx].route_points[order],
                });
            }
            vehicle_journeys.push(VehicleJourneyData {
                id: spec.id.clone(),
                route: route_idx,
                validity_pattern,
                first_stop_time,
                nb_of_stop_times: spec.stops.len(),
            });
            routes[route_idx.idx].vehicle_journeys.push(vj_idx);
        }

        // foot paths, both directions, grouped by origin then duration
        let mut foot_paths: Vec<FootPath> = Vec::new();
        for (from_id, to_id, duration) in &self.footpaths {
            let from = stop_points
                .iter()
                .position(|sp| sp.id == *from_id)
                .map(|idx| StopPointIdx { idx })
                .ok_or_else(|| ModelError::UnknownStopPoint(from_id.clone()))?;
            let to = stop_points
                .iter()
                .position(|sp| sp.id == *to_id)
                .map(|idx| StopPointIdx { idx })
                .ok_or_else(|| ModelError::UnknownStopPoint(to_id.clone()))?;
            foot_paths.push(FootPath {
                from,
                to,
                duration: *duration,
            });
            foot_paths.push(FootPath {
                from: to,
                to: from,
                duration: *duration,
            });
        }
        foot_paths.sort_by_key(|fp| (fp.from, fp.duration));
        for (idx, fp) in foot_paths.iter().enumerate() {
            let sp = &mut stop_points[fp.from.idx];
            if sp.footpaths_count == 0 {
                sp.footpaths_first = idx;
            }
            sp.footpaths_count += 1;
        }

        let mut connections_forward: Vec<Vec<RoutePointConnection>> =
            vec![Vec::new(); route_points.len()];
        let mut connections_backward: Vec<Vec<RoutePointConnection>> =
            vec![Vec::new(); route_points.len()];
        for spec in &self.connections {
            let resolve = |route_id: &str, stop_id: &str| -> Result<RoutePointIdx, ModelError> {
                let route = routes
                    .iter()
                    .find(|route| route.id == route_id)
                    .ok_or_else(|| ModelError::UnknownRoute(route_id.to_string()))?;
                route
                    .route_points
                    .iter()
                    .find(|rp| stop_points[route_points[rp.idx].stop_point.idx].id == stop_id)
                    .copied()
                    .ok_or_else(|| ModelError::StopNotOnRoute {
                        route: route_id.to_string(),
                        stop_point: stop_id.to_string(),
                    })
            };
            let from = resolve(&spec.from_route, &spec.from_stop)?;
            let to = resolve(&spec.to_route, &spec.to_stop)?;
            connections_forward[from.idx].push(RoutePointConnection {
                destination: to,
                duration: spec.duration,
                kind: spec.kind,
            });
            connections_backward[to.idx].push(RoutePointConnection {
                destination: from,
                duration: spec.duration,
                kind: spec.kind,
            });
        }

        Ok(TransitData {
            stop_areas,
            stop_points,
            routes,
            route_points,
            vehicle_journeys,
            stop_times,
            validity_patterns,
            lines,
            modes,
            foot_paths,
            connections_forward,
            connections_backward,
            calendar,
        })
    }
}

impl<'a> VehicleJourneyBuilder<'a> {
    /// Set the route of the vj. Journeys sharing a route must serve
    /// the same stop sequence.
    pub fn route(self, id: &str) -> Self {
        self.spec.route = Some(id.to_string());
        self
    }

    pub fn line(self, id: &str) -> Self {
        self.spec.line = Some(id.to_string());
        self
    }

    pub fn mode(self, id: &str) -> Self {
        self.spec.mode = Some(id.to_string());
        self
    }

    /// Set the calendar (service id) of the vj.
    pub fn calendar(self, id: &str) -> Self {
        self.spec.calendar = id.to_string();
        self
    }

    /// Add a stop time to the vehicle journey.
    ///
    /// Note: if the arrival/departure literals are not in the
    /// `hh:mm:ss` format, this conversion will fail.
    pub fn st(self, name: &str, arrival: impl IntoTime, departure: impl IntoTime) -> Self {
        self.st_mut(name, arrival, departure, |_st| {})
    }

    pub fn st_mut<F>(
        self,
        name: &str,
        arrival: impl IntoTime,
        departure: impl IntoTime,
        st_muter: F,
    ) -> Self
    where
        F: FnOnce(&mut StopTimeSpec),
    {
        let mut stop_time = StopTimeSpec {
            stop_point: name.to_string(),
            arrival_time: arrival.into_time(),
            departure_time: departure.into_time(),
            pick_up_allowed: true,
            drop_off_allowed: true,
            local_traffic_zone: None,
        };
        st_muter(&mut stop_time);
        self.spec.stops.push(stop_time);
        self
    }
}

pub trait IntoTime {
    fn into_time(&self) -> u32;
}

impl IntoTime for u32 {
    fn into_time(&self) -> u32 {
        *self
    }
}

impl IntoTime for &str {
    // Note: if the string is not in the right format, this conversion will fail
    fn into_time(&self) -> u32 {
        parse_time_of_day(self).expect("invalid time format")
    }
}

pub trait AsDate {
    fn as_date(&self) -> NaiveDate;
}

impl AsDate for NaiveDate {
    fn as_date(&self) -> NaiveDate {
        *self
    }
}

impl AsDate for &str {
    // Note: if the string is not in the right format, this conversion will fail
    fn as_date(&self) -> NaiveDate {
        self.parse().expect("invalid date format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_journeys_by_route() {
        let data = ModelBuilder::default()
            .vj("toto", |vj| {
                vj.route("1")
                    .st("A", "10:00:00", "10:00:00")
                    .st("B", "10:30:00", "10:30:00");
            })
            .vj("tata", |vj| {
                vj.route("1")
                    .st("A", "11:00:00", "11:00:00")
                    .st("B", "11:30:00", "11:30:00");
            })
            .build();
        assert_eq!(data.nb_of_routes(), 1);
        assert_eq!(data.nb_of_vehicle_journeys(), 2);
        assert_eq!(data.nb_of_route_points(), 2);
        assert_eq!(data.nb_of_stop_points(), 2);
        assert!(data.stop_area_idx("sa:A").is_some());
    }

    #[test]
    fn rejects_route_with_diverging_stops() {
        let result = ModelBuilder::default()
            .vj("toto", |vj| {
                vj.route("1")
                    .st("A", "10:00:00", "10:00:00")
                    .st("B", "10:30:00", "10:30:00");
            })
            .vj("tata", |vj| {
                vj.route("1")
                    .st("A", "11:00:00", "11:00:00")
                    .st("C", "11:30:00", "11:30:00");
            })
            .try_build();
        assert!(matches!(result, Err(ModelError::RouteStopMismatch { .. })));
    }

    #[test]
    fn rejects_unknown_calendar() {
        let result = ModelBuilder::default()
            .vj("toto", |vj| {
                vj.calendar("nope")
                    .st("A", "10:00:00", "10:00:00")
                    .st("B", "10:30:00", "10:30:00");
            })
            .try_build();
        assert!(matches!(result, Err(ModelError::UnknownCalendar { .. })));
    }

    #[test]
    fn footpaths_are_indexed_by_origin() {
        let data = ModelBuilder::default()
            .vj("toto", |vj| {
                vj.st("A", "10:00:00", "10:00:00")
                    .st("B", "10:30:00", "10:30:00");
            })
            .vj("tata", |vj| {
                vj.st("C", "11:00:00", "11:00:00")
                    .st("D", "11:30:00", "11:30:00");
            })
            .footpath("B", "C", 60)
            .build();
        let b = data.stop_point_idx("B").unwrap();
        let c = data.stop_point_idx("C").unwrap();
        assert_eq!(data.footpaths_from(b).len(), 1);
        assert_eq!(data.footpaths_from(b)[0].to, c);
        assert_eq!(data.footpaths_from(c).len(), 1);
        assert_eq!(data.footpaths_from(c)[0].to, b);
        assert!(data.footpaths_from(data.stop_point_idx("A").unwrap()).is_empty());
    }
}
