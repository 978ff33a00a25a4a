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

mod utils;

use anyhow::Error;
use sleipnir::model_builder::ModelBuilder;
use sleipnir::{DateTime, Filters, Raptor, TransitData};
use utils::{datetime, init_logger, solve, stop_point};

fn transfer_network() -> TransitData {
    ModelBuilder::default()
        .vj("first", |vj| {
            vj.route("r1")
                .st("A", "08:00:00", "08:00:00")
                .st("X", "08:05:00", "08:05:00");
        })
        .vj("second", |vj| {
            vj.route("r2")
                .st("X", "08:10:00", "08:10:00")
                .st("B", "08:20:00", "08:20:00");
        })
        .build()
}

#[test]
fn test_arrive_before() -> Result<(), Error> {
    init_logger();
    let data = transfer_network();
    let origins = vec![(stop_point(&data, "A"), 0.0)];
    let destinations = vec![(stop_point(&data, "B"), 0.0)];

    let mut raptor = Raptor::new(&data);
    let paths = raptor.compute_reverse_all(
        &origins,
        &destinations,
        datetime(&data, "2020-01-01T08:30:00"),
        DateTime::MIN,
        &Filters::empty(),
    );

    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(path.nb_changes, 1);
    assert_eq!(
        path.first_departure(),
        Some(datetime(&data, "2020-01-01T08:00:00"))
    );
    assert_eq!(
        path.last_arrival(),
        Some(datetime(&data, "2020-01-01T08:20:00"))
    );
    Ok(())
}

#[test]
fn test_arrive_before_too_early_is_empty() -> Result<(), Error> {
    init_logger();
    let data = transfer_network();
    let origins = vec![(stop_point(&data, "A"), 0.0)];
    let destinations = vec![(stop_point(&data, "B"), 0.0)];

    let mut raptor = Raptor::new(&data);
    let paths = raptor.compute_reverse_all(
        &origins,
        &destinations,
        datetime(&data, "2020-01-01T08:15:00"),
        DateTime::MIN,
        &Filters::empty(),
    );
    assert!(paths.is_empty());
    Ok(())
}

#[test]
fn test_forward_and_reverse_agree_on_the_arrival() -> Result<(), Error> {
    init_logger();
    let data = transfer_network();

    let forward = solve(&data, "A", "B", "2020-01-01T08:00:00");
    assert_eq!(forward.len(), 1);
    let forward_arrival = forward[0].last_arrival().unwrap();

    let origins = vec![(stop_point(&data, "A"), 0.0)];
    let destinations = vec![(stop_point(&data, "B"), 0.0)];
    let mut raptor = Raptor::new(&data);
    let reverse = raptor.compute_reverse_all(
        &origins,
        &destinations,
        datetime(&data, "2020-01-01T09:00:00"),
        DateTime::MIN,
        &Filters::empty(),
    );
    assert_eq!(reverse.len(), 1);
    assert_eq!(reverse[0].last_arrival().unwrap(), forward_arrival);
    Ok(())
}

#[test]
fn test_compute_counter_clockwise() -> Result<(), Error> {
    init_logger();
    let data = transfer_network();
    let origin = data.stop_area_idx("sa:A").unwrap();
    let destination = data.stop_area_idx("sa:B").unwrap();

    let mut raptor = Raptor::new(&data);
    let paths = raptor.compute(origin, destination, 8 * 3600 + 1800, 0, false);

    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths[0].first_departure(),
        Some(datetime(&data, "2020-01-01T08:00:00"))
    );
    Ok(())
}
