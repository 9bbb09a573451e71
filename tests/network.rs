mod common;

use common::{Op, Recorder};
use lab_canvas::geometry::{curve_control, Direction, Oscillator, Point};
use lab_canvas::network::{project, DensityPulse, Train};
use lab_canvas::paint::ACCENT;
use lab_canvas::topology::{
    curve_sign, CategoryTier, LineSpec, CENTRAL, LINES, MAJOR_STATION_SIZE, STATIONS,
};
use lab_canvas::{ConfigError, NetworkMap, Scene, VizConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn map_with(config: &VizConfig, seed: u64) -> (NetworkMap, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let map = NetworkMap::new(config, 1000.0, 800.0, &mut rng).expect("valid topology");
    (map, rng)
}

fn quiet_config() -> VizConfig {
    VizConfig {
        pulse_spawn_probability_central: 0.0,
        pulse_spawn_probability_random: 0.0,
        ..VizConfig::default()
    }
}

#[test]
fn default_topology_is_valid() {
    assert_eq!(VizConfig::default().validate(), Ok(()));
    assert_eq!(STATIONS.iter().filter(|s| s.id == CENTRAL).count(), 1);
}

#[test]
fn train_population_follows_category() {
    assert_eq!(CategoryTier::for_category(1).train_count, 3);
    assert_eq!(CategoryTier::for_category(2).train_count, 3);
    assert_eq!(CategoryTier::for_category(3).train_count, 2);
    assert_eq!(CategoryTier::for_category(5).train_count, 2);
    assert_eq!(CategoryTier::for_category(6).train_count, 1);
    assert_eq!(CategoryTier::for_category(16).train_count, 1);
    assert!(CategoryTier::for_category(1).train_size > CategoryTier::for_category(4).train_size);

    let (map, _) = map_with(&VizConfig::default(), 1);
    let expected: usize = LINES
        .iter()
        .map(|line| CategoryTier::for_category(line.category).train_count)
        .sum();
    assert_eq!(expected, 46);
    assert_eq!(map.trains().len(), expected);
    for (index, line) in map.lines().iter().enumerate() {
        let on_line = map.trains().iter().filter(|t| t.line == index).count();
        assert_eq!(on_line, line.tier.train_count);
    }
}

#[test]
fn train_bounces_at_the_far_end() {
    let mut train = Train {
        line: 0,
        motion: Oscillator::new(0.998, Direction::Forward, 0.005),
        size: 3.5,
    };
    assert!(train.advance());
    assert_eq!(train.progress(), 1.0);
    assert_eq!(train.direction(), Direction::Reverse);

    assert!(!train.advance());
    assert!((train.progress() - 0.995).abs() < 1e-12);
}

#[test]
fn train_bounces_at_the_start() {
    let mut train = Train {
        line: 0,
        motion: Oscillator::new(0.003, Direction::Reverse, 0.005),
        size: 1.8,
    };
    assert!(train.advance());
    assert_eq!(train.progress(), 0.0);
    assert_eq!(train.direction(), Direction::Forward);
}

#[test]
fn trains_reflect_only_at_the_bounds() {
    let (mut map, mut rng) = map_with(&quiet_config(), 2);
    for _ in 0..3_000 {
        let before: Vec<Direction> = map.trains().iter().map(Train::direction).collect();
        map.update(&mut rng);
        for (train, was) in map.trains().iter().zip(before) {
            let p = train.progress();
            assert!((0.0..=1.0).contains(&p));
            let flipped = train.direction() != was;
            assert_eq!(flipped, p == 0.0 || p == 1.0, "progress {p}");
        }
    }
}

#[test]
fn trail_trails_behind_the_train() {
    let train = Train {
        line: 0,
        motion: Oscillator::new(0.5, Direction::Forward, 0.01),
        size: 2.0,
    };
    let trail: Vec<f64> = train.trail().collect();
    assert_eq!(trail.len(), 6);
    assert!(trail.windows(2).all(|w| w[1] < w[0]));
    assert!(trail[0] < 0.5);

    let parked = Train {
        motion: Oscillator::new(0.01, Direction::Forward, 0.01),
        ..train
    };
    assert!(parked.trail().all(|t| (0.0..=1.0).contains(&t)));
}

#[test]
fn pulse_is_culled_after_its_last_frame() {
    let (mut map, _) = map_with(&quiet_config(), 3);
    map.pulses_mut()
        .push(DensityPulse::new(Point::new(500.0, 400.0), 100.0));

    let mut last_opacity = 1.0;
    for _ in 0..66 {
        map.advance_pulses();
        let pulse = map.pulses()[0];
        assert!(pulse.opacity <= last_opacity);
        last_opacity = pulse.opacity;
    }
    assert_eq!(map.pulses().len(), 1);
    assert_eq!(map.pulses()[0].radius, 99.0);

    map.advance_pulses();
    assert!(map.pulses().is_empty());
}

#[test]
fn pulses_are_removed_in_place_keeping_order() {
    let (mut map, _) = map_with(&quiet_config(), 4);
    for max in [2.5, 50.0, 2.0, 80.0] {
        map.pulses_mut()
            .push(DensityPulse::new(Point::new(0.0, 0.0), max));
    }
    map.advance_pulses();
    map.advance_pulses();
    let left: Vec<f64> = map.pulses().iter().map(|p| p.max_radius).collect();
    assert_eq!(left, vec![50.0, 80.0]);
}

#[test]
fn certain_spawn_emits_from_central_and_a_random_station() {
    let config = VizConfig {
        pulse_spawn_probability_central: 1.0,
        pulse_spawn_probability_random: 0.0,
        ..VizConfig::default()
    };
    let (mut map, mut rng) = map_with(&config, 5);
    map.spawn_pulses(&mut rng);
    assert_eq!(map.pulses().len(), 1);
    assert_eq!(map.pulses()[0].origin, map.station_pos(map.central()));
    assert_eq!(map.pulses()[0].max_radius, config.central_pulse_max_radius);

    let config = VizConfig {
        pulse_spawn_probability_random: 1.0,
        ..config
    };
    let (mut map, mut rng) = map_with(&config, 6);
    map.spawn_pulses(&mut rng);
    assert_eq!(map.pulses().len(), 2);
    let random = map.pulses()[1];
    assert!((0..map.stations().len()).any(|i| map.station_pos(i) == random.origin));
}

#[test]
fn resize_clears_pulses_and_rebuilds_trains() {
    let config = VizConfig {
        pulse_spawn_probability_central: 1.0,
        ..VizConfig::default()
    };
    let (mut map, mut rng) = map_with(&config, 7);
    map.update(&mut rng);
    assert!(!map.pulses().is_empty());

    let trains = map.trains().len();
    map.resize(640.0, 360.0, &mut rng);
    assert!(map.pulses().is_empty());
    assert_eq!(map.trains().len(), trains);
    assert_eq!(map.size(), (640.0, 360.0));
}

#[test]
fn pointer_on_central_highlights_it() {
    let (mut map, _) = map_with(&quiet_config(), 8);
    let central = map.central();
    let at = map.station_pos(central);

    assert_eq!(map.nearest_station(at, 1e-6), Some((central, 0.0)));
    assert_eq!(map.nearest_station(Point::new(-500.0, -500.0), 40.0), None);

    assert_eq!(map.hovered_station(), None);
    map.set_pointer(Some(Point::new(at.x + 3.0, at.y - 4.0)));
    assert_eq!(map.hovered_station(), Some(central));

    let mut painter = Recorder::default();
    map.draw(&mut painter);
    // core radius for a size 1.0 station is 7, highlight sits 8 outside it
    assert!(painter.arcs().contains(&(at, 15.0)));

    map.set_pointer(None);
    let mut painter = Recorder::default();
    map.draw(&mut painter);
    assert!(!painter.arcs().contains(&(at, 15.0)));
}

#[test]
fn frame_draws_every_line_halo_and_train() {
    let (map, _) = map_with(&quiet_config(), 9);
    let mut painter = Recorder::default();
    map.draw(&mut painter);

    assert_eq!(
        painter.count(|op| matches!(op, Op::Quad(..))),
        map.lines().len()
    );
    assert_eq!(
        painter.count(|op| matches!(op, Op::Gradient(..))),
        map.stations().len()
    );
    assert!(matches!(painter.ops[1], Op::FillRect { w, h, .. } if w == 1000.0 && h == 800.0));
    // dashes are always switched back off
    assert_eq!(
        painter.ops.iter().rev().find(|op| matches!(op, Op::Dash(_))),
        Some(&Op::Dash(vec![]))
    );
}

#[test]
fn unknown_station_fails_construction() {
    let config = VizConfig {
        line_table: vec![LineSpec {
            from: CENTRAL,
            to: "nowhere",
            category: 3,
        }],
        ..VizConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(10);
    let err = NetworkMap::new(&config, 100.0, 100.0, &mut rng).unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownStation {
            line: 0,
            station: "nowhere".to_string()
        }
    );
    assert_eq!(err.to_string(), "line 0 references unknown station 'nowhere'");
}

#[test]
fn invalid_tables_are_rejected() {
    let bad_category = VizConfig {
        line_table: vec![LineSpec {
            from: CENTRAL,
            to: "ueno",
            category: 17,
        }],
        ..VizConfig::default()
    };
    assert_eq!(
        bad_category.validate(),
        Err(ConfigError::CategoryOutOfRange {
            line: 0,
            category: 17
        })
    );

    let mut stations = STATIONS.to_vec();
    stations.push(STATIONS[1]);
    let duplicate = VizConfig {
        station_table: stations,
        ..VizConfig::default()
    };
    assert_eq!(
        duplicate.validate(),
        Err(ConfigError::DuplicateStation("ueno".to_string()))
    );

    let no_central = VizConfig {
        station_table: STATIONS[1..].to_vec(),
        line_table: Vec::new(),
        ..VizConfig::default()
    };
    assert_eq!(no_central.validate(), Err(ConfigError::MissingCentral));

    let frozen = VizConfig {
        pulse_radius_step: 0.0,
        ..VizConfig::default()
    };
    assert_eq!(
        frozen.validate(),
        Err(ConfigError::NonPositive("pulse_radius_step"))
    );

    let greedy = VizConfig {
        pulse_spawn_probability_random: 1.5,
        ..VizConfig::default()
    };
    assert_eq!(
        greedy.validate(),
        Err(ConfigError::NotAProbability("pulse_spawn_probability_random"))
    );
}

#[test]
fn projection_uses_the_minor_dimension() {
    let shinjuku = STATIONS.iter().find(|s| s.id == "shinjuku").unwrap();
    let p = project(shinjuku, 1000.0, 800.0);
    assert!((p.x - 324.0).abs() < 1e-9);
    assert_eq!(p.y, 400.0);
}

#[test]
fn trail_folds_back_after_a_bounce() {
    let train = Train {
        line: 0,
        motion: Oscillator::new(1.0, Direction::Reverse, 0.01),
        size: 2.0,
    };
    let trail: Vec<f64> = train.trail().collect();
    for (k, t) in trail.iter().enumerate() {
        let expected = 1.0 - 0.04 * (k + 1) as f64;
        assert!((t - expected).abs() < 1e-9, "point {k} at {t}");
    }

    let start = Train {
        motion: Oscillator::new(0.0, Direction::Forward, 0.01),
        ..train
    };
    let trail: Vec<f64> = start.trail().collect();
    assert!(trail.windows(2).all(|w| w[1] > w[0]));
    assert!(trail.iter().all(|t| *t > 0.0));
}

#[test]
#[should_panic]
fn station_pos_rejects_an_index_past_the_table() {
    let (map, _) = map_with(&quiet_config(), 12);
    map.station_pos(map.stations().len());
}

#[test]
fn only_the_central_station_gets_a_dashed_ring() {
    let (mut map, mut rng) = map_with(&quiet_config(), 13);
    for _ in 0..3 {
        map.update(&mut rng);
        let mut painter = Recorder::default();
        map.draw(&mut painter);
        assert_eq!(painter.count(|op| *op == Op::Dash(vec![3.0, 4.0])), 1);
    }
}

#[test]
fn major_stations_get_an_outer_ring() {
    let (map, _) = map_with(&quiet_config(), 14);
    let mut painter = Recorder::default();
    map.draw(&mut painter);

    let majors = STATIONS
        .iter()
        .filter(|s| s.size >= MAJOR_STATION_SIZE)
        .count();
    assert_eq!(majors, 7);
    assert_eq!(
        painter.count(|op| *op == Op::Stroke(ACCENT.alpha(0.3), 1.0)),
        majors
    );

    let arcs = painter.arcs();
    for (index, station) in STATIONS.iter().enumerate() {
        let at = map.station_pos(index);
        let core = 2.5 + station.size * 4.5;
        let ringed = arcs
            .iter()
            .any(|(c, r)| *c == at && *r >= core + 2.0 && *r <= core + 6.0);
        assert_eq!(ringed, station.size >= MAJOR_STATION_SIZE, "{}", station.id);
    }
}

#[test]
fn lines_bend_to_alternating_sides_by_category() {
    let (map, _) = map_with(&quiet_config(), 15);
    let mut painter = Recorder::default();
    map.draw(&mut painter);

    let mut curves = Vec::new();
    let mut start = None;
    for op in &painter.ops {
        match op {
            Op::MoveTo(p) => start = Some(*p),
            Op::Quad(control, end) => curves.push((start, *control, *end)),
            _ => {}
        }
    }
    assert_eq!(curves.len(), LINES.len());

    let index = |id: &str| STATIONS.iter().position(|s| s.id == id).expect("known station");
    for (spec, (start, control, end)) in LINES.iter().zip(curves) {
        let a = project(&STATIONS[index(spec.from)], 1000.0, 800.0);
        let b = project(&STATIONS[index(spec.to)], 1000.0, 800.0);
        let bend = CategoryTier::for_category(spec.category).curve * curve_sign(spec.category);
        assert_eq!(start, Some(a));
        assert_eq!(end, b);
        assert!(control.distance(curve_control(a, b, bend)) < 1e-9);

        // even categories bend to one side of the travel direction, odd ones to the other
        let side = (b.x - a.x) * (control.y - a.y) - (b.y - a.y) * (control.x - a.x);
        assert_eq!(side > 0.0, spec.category % 2 == 0, "{} -> {}", spec.from, spec.to);
    }
}
