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
#![allow(dead_code)]

use sleipnir::chrono::NaiveDateTime;
use sleipnir::log::debug;
use sleipnir::{DateTime, Filters, Path, Raptor, StopPointIdx, TransitData};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Engine instant for a `2020-01-01T08:00:00` style literal.
pub fn datetime(data: &TransitData, literal: &str) -> DateTime {
    let naive: NaiveDateTime = literal.parse().expect("invalid datetime literal");
    data.datetime(&naive)
        .expect("datetime outside of the calendar")
}

pub fn stop_point(data: &TransitData, id: &str) -> StopPointIdx {
    data.stop_point_idx(id)
        .unwrap_or_else(|| panic!("no stop point {}", id))
}

/// Zero-distance single origin/destination earliest-arrival query.
pub fn solve(data: &TransitData, from: &str, to: &str, departure: &str) -> Vec<Path> {
    solve_with_filters(data, from, to, departure, &Filters::empty())
}

pub fn solve_with_filters(
    data: &TransitData,
    from: &str,
    to: &str,
    departure: &str,
    filters: &Filters,
) -> Vec<Path> {
    let origins = vec![(stop_point(data, from), 0.0)];
    let destinations = vec![(stop_point(data, to), 0.0)];
    let mut raptor = Raptor::new(data);
    let paths = raptor.compute_all(
        &origins,
        &destinations,
        datetime(data, departure),
        DateTime::INF,
        filters,
    );
    for path in &paths {
        debug!("{}", path.print(data).unwrap());
    }
    paths
}

pub fn stop_ids(data: &TransitData, stop_points: &[StopPointIdx]) -> Vec<String> {
    stop_points
        .iter()
        .map(|stop_point| data.stop_point_id(*stop_point).to_string())
        .collect()
}
