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

use crate::transit_data::{RouteIdx, TransitData};
use log::warn;

pub enum VehicleFilter<'a> {
    Line(&'a str),
    Route(&'a str),
    Mode(&'a str),
}

impl<'a> VehicleFilter<'a> {
    pub fn applies_on(&self, route: RouteIdx, data: &TransitData) -> bool {
        match self {
            VehicleFilter::Line(id) => data.line_id_of_route(route) == *id,
            VehicleFilter::Route(id) => data.route_id(route) == *id,
            VehicleFilter::Mode(id) => data.mode_id_of_route(route) == *id,
        }
    }
}

/// The user-forbidden part of a query : routes matching one of these
/// filters are left out of the valid-routes bitset.
pub struct Filters<'a> {
    forbidden: Vec<VehicleFilter<'a>>,
}

impl<'a> Filters<'a> {
    pub fn empty() -> Self {
        Self {
            forbidden: Vec::new(),
        }
    }

    /// Parses `(category, external_code)` pairs, with category one of
    /// "line", "route" or "mode". Unknown categories are ignored.
    pub fn new<Forbidden>(forbidden: Forbidden) -> Self
    where
        Forbidden: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filters = Vec::new();
        for (category, external_code) in forbidden {
            match category {
                "line" => filters.push(VehicleFilter::Line(external_code)),
                "route" => filters.push(VehicleFilter::Route(external_code)),
                "mode" => filters.push(VehicleFilter::Mode(external_code)),
                _ => {
                    warn!("unknown forbidden category {}, ignored", category);
                }
            }
        }
        Self { forbidden: filters }
    }

    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
    }

    // if *one* forbidden filter applies, then the route is invalid
    pub fn is_route_forbidden(&self, route: RouteIdx, data: &TransitData) -> bool {
        self.forbidden
            .iter()
            .any(|filter| filter.applies_on(route, data))
    }
}
