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
use sleipnir::{Filters, TransitData};
use utils::{init_logger, solve_with_filters};

fn one_line_network() -> TransitData {
    ModelBuilder::default()
        .vj("toto", |vj| {
            vj.route("route-a")
                .line("LineA")
                .mode("Bus")
                .st("A", "08:00:00", "08:00:00")
                .st("B", "08:10:00", "08:10:00");
        })
        .build()
}

#[test]
fn test_forbidden_line() -> Result<(), Error> {
    init_logger();
    let data = one_line_network();
    let filters = Filters::new(vec![("line", "LineA")]);
    let paths = solve_with_filters(&data, "A", "B", "2020-01-01T08:00:00", &filters);
    assert!(paths.is_empty());
    Ok(())
}

#[test]
fn test_forbidden_route() -> Result<(), Error> {
    init_logger();
    let data = one_line_network();
    let filters = Filters::new(vec![("route", "route-a")]);
    let paths = solve_with_filters(&data, "A", "B", "2020-01-01T08:00:00", &filters);
    assert!(paths.is_empty());
    Ok(())
}

#[test]
fn test_forbidden_mode() -> Result<(), Error> {
    init_logger();
    let data = one_line_network();
    let filters = Filters::new(vec![("mode", "Bus")]);
    let paths = solve_with_filters(&data, "A", "B", "2020-01-01T08:00:00", &filters);
    assert!(paths.is_empty());
    Ok(())
}

#[test]
fn test_non_matching_filter_keeps_the_route() -> Result<(), Error> {
    init_logger();
    let data = one_line_network();
    let filters = Filters::new(vec![("line", "AnotherLine")]);
    let paths = solve_with_filters(&data, "A", "B", "2020-01-01T08:00:00", &filters);
    assert_eq!(paths.len(), 1);
    Ok(())
}

#[test]
fn test_unknown_category_is_ignored() -> Result<(), Error> {
    init_logger();
    let data = one_line_network();
    let filters = Filters::new(vec![("network", "LineA")]);
    assert!(filters.is_empty());
    let paths = solve_with_filters(&data, "A", "B", "2020-01-01T08:00:00", &filters);
    assert_eq!(paths.len(), 1);
    Ok(())
}

#[test]
fn test_forbidden_line_leaves_an_alternative() -> Result<(), Error> {
    init_logger();
    // a slower journey on another line survives the filter
    let data = ModelBuilder::default()
        .vj("fast", |vj| {
            vj.route("route-a")
                .line("LineA")
                .st("A", "08:00:00", "08:00:00")
                .st("B", "08:10:00", "08:10:00");
        })
        .vj("slow", |vj| {
            vj.route("route-b")
                .line("LineB")
                .st("A", "08:05:00", "08:05:00")
                .st("B", "08:30:00", "08:30:00");
        })
        .build();

    let filters = Filters::new(vec![("line", "LineA")]);
    let paths = solve_with_filters(&data, "A", "B", "2020-01-01T08:00:00", &filters);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].first_vehicle_journey(&data), Some("slow"));
    Ok(())
}
