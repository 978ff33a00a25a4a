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
use sleipnir::TransitData;
use utils::{init_logger, solve};

fn zoned_network() -> TransitData {
    // A and B share local traffic zone 1, C is free of any zone
    ModelBuilder::new("2020-01-01", "2020-01-01")
        .vj("toto", |vj| {
            vj.st_mut("A", "08:00:00", "08:00:00", |st| {
                st.local_traffic_zone = Some(1);
            })
            .st_mut("B", "08:10:00", "08:10:00", |st| {
                st.local_traffic_zone = Some(1);
            })
            .st("C", "08:20:00", "08:20:00");
        })
        .build()
}

#[test]
fn test_no_boarding_and_alighting_within_one_zone() -> Result<(), Error> {
    init_logger();
    let data = zoned_network();
    let paths = solve(&data, "A", "B", "2020-01-01T08:00:00");
    assert!(paths.is_empty());
    Ok(())
}

#[test]
fn test_leaving_the_zone_is_allowed() -> Result<(), Error> {
    init_logger();
    let data = zoned_network();
    let paths = solve(&data, "A", "C", "2020-01-01T08:00:00");
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].duration, 1200);
    Ok(())
}

#[test]
fn test_another_route_may_serve_the_zone() -> Result<(), Error> {
    init_logger();
    // same zoned trip, plus a later zone-free one on another route
    let data = ModelBuilder::new("2020-01-01", "2020-01-01")
        .vj("zoned", |vj| {
            vj.route("r1")
                .st_mut("A", "08:00:00", "08:00:00", |st| {
                    st.local_traffic_zone = Some(1);
                })
                .st_mut("B", "08:10:00", "08:10:00", |st| {
                    st.local_traffic_zone = Some(1);
                });
        })
        .vj("free", |vj| {
            vj.route("r2")
                .st("A", "08:15:00", "08:15:00")
                .st("B", "08:25:00", "08:25:00");
        })
        .build();

    let paths = solve(&data, "A", "B", "2020-01-01T08:00:00");
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].first_vehicle_journey(&data), Some("free"));
    Ok(())
}
