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

use crate::time::DateTime;
use crate::transit_data::{StopPointIdx, TransitData, VehicleJourneyIdx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathItemKind {
    PublicTransport,
    Walking,
    Extension,
    Guarantee,
}

/// One segment of an itinerary.
///
/// For a public transport segment, `stop_points`, `arrivals` and
/// `departures` list every served stop in travel order; for the other
/// kinds only the two endpoints are listed and the time vectors are
/// empty. `departure` and `arrival` always bound the whole segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    pub kind: PathItemKind,
    pub stop_points: Vec<StopPointIdx>,
    pub arrivals: Vec<DateTime>,
    pub departures: Vec<DateTime>,
    pub vehicle_journey: Option<VehicleJourneyIdx>,
    /// Start instant of the segment.
    pub departure: DateTime,
    /// End instant of the segment.
    pub arrival: DateTime,
}

/// An itinerary : an ordered list of segments plus aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub items: Vec<PathItem>,
    /// Seconds between the first departure and the last arrival.
    pub duration: i64,
    /// Number of interior walking segments.
    pub nb_changes: usize,
    /// Share of stop points carrying a label when the search ended.
    /// Diagnostic only.
    pub percent_visited: u32,
}

impl Path {
    pub fn first_departure(&self) -> Option<DateTime> {
        self.items.first().map(|item| item.departure)
    }

    pub fn last_arrival(&self) -> Option<DateTime> {
        self.items.last().map(|item| item.arrival)
    }

    /// Identifier of the first vehicle used, handy in tests and logs.
    pub fn first_vehicle_journey<'data>(&self, data: &'data TransitData) -> Option<&'data str> {
        self.items
            .iter()
            .find_map(|item| item.vehicle_journey)
            .map(|vehicle_journey| data.vehicle_journey_id(vehicle_journey))
    }

    pub fn print(&self, data: &TransitData) -> Result<String, std::fmt::Error> {
        let mut result = String::new();
        self.write(data, &mut result)?;
        Ok(result)
    }

    pub fn write<Writer: std::fmt::Write>(
        &self,
        data: &TransitData,
        writer: &mut Writer,
    ) -> Result<(), std::fmt::Error> {
        writeln!(writer, "*** New path ***")?;
        if let (Some(departure), Some(arrival)) = (self.first_departure(), self.last_arrival()) {
            writeln!(
                writer,
                "Departure : {}",
                data.calendar().to_pretty_string(&departure)
            )?;
            writeln!(
                writer,
                "Arrival : {}",
                data.calendar().to_pretty_string(&arrival)
            )?;
        }
        writeln!(
            writer,
            "Duration : {}s, changes : {}",
            self.duration, self.nb_changes
        )?;
        for item in &self.items {
            self.write_item(item, data, writer)?;
        }
        Ok(())
    }

    fn write_item<Writer: std::fmt::Write>(
        &self,
        item: &PathItem,
        data: &TransitData,
        writer: &mut Writer,
    ) -> Result<(), std::fmt::Error> {
        let kind = match item.kind {
            PathItemKind::PublicTransport => "public transport",
            PathItemKind::Walking => "walking",
            PathItemKind::Extension => "extension",
            PathItemKind::Guarantee => "guarantee",
        };
        let from = item
            .stop_points
            .first()
            .map(|stop_point| data.stop_point_id(*stop_point))
            .unwrap_or("?");
        let to = item
            .stop_points
            .last()
            .map(|stop_point| data.stop_point_id(*stop_point))
            .unwrap_or("?");
        match item.vehicle_journey {
            Some(vehicle_journey) => writeln!(
                writer,
                "{} ({}) from {} at {} to {} at {}",
                kind,
                data.vehicle_journey_id(vehicle_journey),
                from,
                data.calendar().to_pretty_string(&item.departure),
                to,
                data.calendar().to_pretty_string(&item.arrival),
            ),
            None => writeln!(
                writer,
                "{} from {} at {} to {} at {}",
                kind,
                from,
                data.calendar().to_pretty_string(&item.departure),
                to,
                data.calendar().to_pretty_string(&item.arrival),
            ),
        }
    }
}
