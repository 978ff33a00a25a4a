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
use rstest::rstest;
use sleipnir::model_builder::ModelBuilder;
use sleipnir::TransitData;
use utils::{datetime, init_logger, solve};

fn even_days_network() -> TransitData {
    // one trip, allowed on the 2nd and 4th of January only
    ModelBuilder::new("2020-01-01", "2020-01-05")
        .calendar("even_days", &["2020-01-02", "2020-01-04"])
        .vj("toto", |vj| {
            vj.calendar("even_days")
                .st("A", "08:00:00", "08:00:00")
                .st("B", "08:10:00", "08:10:00");
        })
        .build()
}

#[rstest]
#[case("2020-01-02T08:00:00", 1)]
#[case("2020-01-03T08:00:00", 0)]
#[case("2020-01-04T08:00:00", 1)]
#[case("2020-01-05T08:00:00", 0)]
fn test_trip_runs_on_its_days_only(
    #[case] departure: &str,
    #[case] expected_nb_of_paths: usize,
) -> Result<(), Error> {
    init_logger();
    let data = even_days_network();
    let paths = solve(&data, "A", "B", departure);
    assert_eq!(paths.len(), expected_nb_of_paths);
    Ok(())
}

#[test]
fn test_next_valid_day_is_not_substituted() -> Result<(), Error> {
    init_logger();
    let data = even_days_network();
    // on the 3rd the route passes the nearby-day validity check, but
    // the trip itself must not be boarded on an odd day
    let paths = solve(&data, "A", "B", "2020-01-03T07:00:00");
    assert!(paths.is_empty());
    Ok(())
}

#[test]
fn test_trip_through_midnight() -> Result<(), Error> {
    init_logger();
    let data = ModelBuilder::new("2020-01-01", "2020-01-03")
        .calendar("day_one", &["2020-01-01"])
        .vj("owl", |vj| {
            vj.calendar("day_one")
                .st("A", "23:50:00", "23:50:00")
                .st("B", "24:10:00", "24:10:00");
        })
        .build();

    let paths = solve(&data, "A", "B", "2020-01-01T23:45:00");
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(
        path.first_departure(),
        Some(datetime(&data, "2020-01-01T23:50:00"))
    );
    assert_eq!(
        path.last_arrival(),
        Some(datetime(&data, "2020-01-02T00:10:00"))
    );
    assert_eq!(path.duration, 1200);
    Ok(())
}

#[test]
fn test_overnight_trip_boardable_after_midnight() -> Result<(), Error> {
    init_logger();
    // the trip starts on the 1st but serves X after midnight ; a query
    // on the 2nd can still board it there thanks to the nearby-day
    // route validity
    let data = ModelBuilder::new("2020-01-01", "2020-01-03")
        .calendar("day_one", &["2020-01-01"])
        .vj("owl", |vj| {
            vj.calendar("day_one")
                .st("A", "23:50:00", "23:50:00")
                .st("X", "24:20:00", "24:20:00")
                .st("B", "24:40:00", "24:40:00");
        })
        .build();

    let paths = solve(&data, "X", "B", "2020-01-02T00:00:00");
    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths[0].first_departure(),
        Some(datetime(&data, "2020-01-02T00:20:00"))
    );
    Ok(())
}
