//! Hero "railway network" map: stations joined by curved lines, trains
//! shuttling along them, density halos and expanding activity pulses.

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::VizConfig;
use crate::error::ConfigError;
use crate::geometry::{
    curve_control, quadratic_bezier, reflect_unit, Direction, Oscillator, Point,
};
use crate::paint::{Painter, ACCENT, INK, PAPER};
use crate::scene::Scene;
use crate::topology::{curve_sign, CategoryTier, Station, CENTRAL, MAJOR_STATION_SIZE};

const FADE_ALPHA: f64 = 0.25;
const GRID_CELLS: usize = 10;
const GUIDE_RINGS: usize = 4;
const LOOP_LINE_RADIUS: f64 = 0.22;
const TRAIL_POINTS: usize = 6;
const TRAIL_SPACING: f64 = 4.0;
const HIGHLIGHT_MARGIN: f64 = 8.0;

/// Screen position of `station` on a `width` x `height` surface.
///
/// The station offset is scaled by the smaller dimension and measured from
/// the surface centre.
pub fn project(station: &Station, width: f64, height: f64) -> Point {
    let scale = width.min(height);
    Point::new(
        width / 2.0 + station.x * scale,
        height / 2.0 + station.y * scale,
    )
}

/// A line with both endpoints resolved to station indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: usize,
    pub to: usize,
    pub category: u8,
    pub tier: CategoryTier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Train {
    pub line: usize,
    /// Progress along the line in `[0, 1]` and travel direction.
    pub motion: Oscillator,
    pub size: f64,
}

impl Train {
    pub fn progress(&self) -> f64 {
        self.motion.value
    }

    pub fn direction(&self) -> Direction {
        self.motion.direction
    }

    /// Move along the line, bouncing off either end.
    pub fn advance(&mut self) -> bool {
        self.motion.step()
    }

    /// Progress values of the trail behind the train, newest first.
    ///
    /// Points that would fall past an end are folded back, so right after a
    /// bounce the trail still follows the path the train came along.
    pub fn trail(&self) -> impl Iterator<Item = f64> + '_ {
        let back = self.motion.speed * TRAIL_SPACING * self.motion.direction.sign();
        (1..=TRAIL_POINTS).map(move |k| reflect_unit(self.motion.value - back * k as f64))
    }
}

/// An expanding ring that fades out as it approaches `max_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPulse {
    pub origin: Point,
    pub radius: f64,
    pub max_radius: f64,
    pub opacity: f64,
}

impl DensityPulse {
    pub fn new(origin: Point, max_radius: f64) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius,
            opacity: 1.0,
        }
    }

    /// Grow by `step`. Returns `false` once the pulse has outlived its radius.
    pub fn advance(&mut self, step: f64) -> bool {
        self.radius += step;
        self.opacity = (1.0 - self.radius / self.max_radius).max(0.0);
        self.radius <= self.max_radius
    }
}

#[derive(Debug, Clone)]
pub struct NetworkMap {
    width: f64,
    height: f64,
    stations: Vec<Station>,
    lines: Vec<Line>,
    central: usize,
    trains: Vec<Train>,
    pulses: Vec<DensityPulse>,
    pointer: Option<Point>,
    time: f64,
    pulse_spawn_probability_central: f64,
    pulse_spawn_probability_random: f64,
    pulse_radius_step: f64,
    central_pulse_max_radius: f64,
    random_pulse_max_radius: f64,
    pointer_capture_radius: f64,
}

impl NetworkMap {
    /// Build the map, rejecting a topology whose lines name unknown stations.
    pub fn new<R: Rng + ?Sized>(
        config: &VizConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let lines = config
            .line_table
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let resolve = |id: &'static str| {
                    config
                        .station_index(id)
                        .ok_or_else(|| ConfigError::UnknownStation {
                            line: index,
                            station: id.to_string(),
                        })
                };
                Ok(Line {
                    from: resolve(spec.from)?,
                    to: resolve(spec.to)?,
                    category: spec.category,
                    tier: CategoryTier::for_category(spec.category),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let central = config
            .station_index(CENTRAL)
            .ok_or(ConfigError::MissingCentral)?;

        let mut map = NetworkMap {
            width: 0.0,
            height: 0.0,
            stations: config.station_table.clone(),
            lines,
            central,
            trains: Vec::new(),
            pulses: Vec::new(),
            pointer: None,
            time: 0.0,
            pulse_spawn_probability_central: config.pulse_spawn_probability_central,
            pulse_spawn_probability_random: config.pulse_spawn_probability_random,
            pulse_radius_step: config.pulse_radius_step,
            central_pulse_max_radius: config.central_pulse_max_radius,
            random_pulse_max_radius: config.random_pulse_max_radius,
            pointer_capture_radius: config.pointer_capture_radius,
        };
        map.resize(width, height, rng);
        Ok(map)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn pulses(&self) -> &[DensityPulse] {
        &self.pulses
    }

    pub fn pulses_mut(&mut self) -> &mut Vec<DensityPulse> {
        &mut self.pulses
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn central(&self) -> usize {
        self.central
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Screen position of the station at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `self.stations().len()`.
    pub fn station_pos(&self, index: usize) -> Point {
        project(&self.stations[index], self.width, self.height)
    }

    /// Start, control and end points of the curve drawn for `line`.
    pub fn line_curve(&self, line: &Line) -> (Point, Point, Point) {
        let a = self.station_pos(line.from);
        let b = self.station_pos(line.to);
        let control = curve_control(a, b, line.tier.curve * curve_sign(line.category));
        (a, control, b)
    }

    pub fn train_pos(&self, train: &Train) -> Point {
        self.point_on_line(train.line, train.progress())
    }

    fn point_on_line(&self, line: usize, t: f64) -> Point {
        let (a, control, b) = self.line_curve(&self.lines[line]);
        quadratic_bezier(a, control, b, t)
    }

    /// Station closest to `point` that lies within `radius`, with its distance.
    pub fn nearest_station(&self, point: Point, radius: f64) -> Option<(usize, f64)> {
        (0..self.stations.len())
            .map(|i| (i, self.station_pos(i).distance(point)))
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Station under the last recorded pointer position.
    pub fn hovered_station(&self) -> Option<usize> {
        let pointer = self.pointer?;
        self.nearest_station(pointer, self.pointer_capture_radius)
            .map(|(index, _)| index)
    }

    fn build_trains<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.trains.clear();
        for (index, line) in self.lines.iter().enumerate() {
            let tier = line.tier;
            for k in 0..tier.train_count {
                let progress = (k as f64 + rng.gen::<f64>() * 0.5) / tier.train_count as f64;
                let direction = if rng.gen::<bool>() {
                    Direction::Forward
                } else {
                    Direction::Reverse
                };
                let speed = tier.base_speed * (1.0 + rng.gen::<f64>() * 0.5);
                self.trains.push(Train {
                    line: index,
                    motion: Oscillator::new(progress, direction, speed),
                    size: tier.train_size,
                });
            }
        }
    }

    pub fn advance_trains(&mut self) {
        for train in &mut self.trains {
            train.advance();
        }
    }

    /// Maybe start a pulse at the central station and, independently, at a
    /// random station.
    pub fn spawn_pulses<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.gen::<f64>() < self.pulse_spawn_probability_central {
            let origin = self.station_pos(self.central);
            self.pulses
                .push(DensityPulse::new(origin, self.central_pulse_max_radius));
        }
        if !self.stations.is_empty() && rng.gen::<f64>() < self.pulse_spawn_probability_random {
            let origin = self.station_pos(rng.gen_range(0..self.stations.len()));
            self.pulses
                .push(DensityPulse::new(origin, self.random_pulse_max_radius));
        }
    }

    /// Grow every pulse and drop those past their maximum radius, in place.
    pub fn advance_pulses(&mut self) {
        let step = self.pulse_radius_step;
        self.pulses.retain_mut(|pulse| pulse.advance(step));
    }

    fn draw_background<P: Painter + ?Sized>(&self, painter: &mut P) {
        let (w, h) = (self.width, self.height);
        painter.set_stroke(INK.alpha(0.035), 1.0);
        for k in 0..=GRID_CELLS {
            let f = k as f64 / GRID_CELLS as f64;
            painter.line(Point::new(w * f, 0.0), Point::new(w * f, h));
            painter.line(Point::new(0.0, h * f), Point::new(w, h * f));
        }

        let center = Point::new(w / 2.0, h / 2.0);
        let minor = w.min(h);
        painter.set_stroke(INK.alpha(0.06), 1.0);
        painter.set_line_dash(&[2.0, 6.0]);
        for k in 1..=GUIDE_RINGS {
            painter.stroke_circle(center, minor * k as f64 / 8.0);
        }
        painter.set_line_dash(&[]);

        painter.set_stroke(ACCENT.alpha(0.18), 2.0);
        painter.stroke_circle(center, minor * LOOP_LINE_RADIUS);
    }

    fn draw_halos<P: Painter + ?Sized>(&self, painter: &mut P) {
        let minor = self.width.min(self.height);
        for (i, station) in self.stations.iter().enumerate() {
            let wobble = (self.time * 0.03 + i as f64).sin() * 0.08 * station.density;
            let radius = minor * (0.05 + 0.1 * station.density) * (1.0 + wobble);
            painter.fill_radial_gradient(
                self.station_pos(i),
                radius,
                &[
                    (0.0, ACCENT.alpha(0.12 * station.density)),
                    (1.0, ACCENT.alpha(0.0)),
                ],
            );
        }
    }

    fn draw_lines<P: Painter + ?Sized>(&self, painter: &mut P) {
        for line in &self.lines {
            let color = if line.category <= 2 { ACCENT } else { INK };
            let (a, control, b) = self.line_curve(line);
            painter.set_stroke(color.alpha(line.tier.opacity), line.tier.thickness);
            painter.begin_path();
            painter.move_to(a);
            painter.quadratic_curve_to(control, b);
            painter.stroke();
        }
    }

    fn draw_trains<P: Painter + ?Sized>(&self, painter: &mut P) {
        for train in &self.trains {
            for (k, t) in train.trail().enumerate() {
                let fade = 1.0 - (k + 1) as f64 / (TRAIL_POINTS + 1) as f64;
                painter.set_fill(ACCENT.alpha(0.5 * fade));
                painter.fill_circle(self.point_on_line(train.line, t), train.size * (0.4 + 0.5 * fade));
            }
            painter.set_fill(ACCENT.alpha(0.9));
            painter.fill_circle(self.train_pos(train), train.size);
        }
    }

    fn core_radius(station: &Station) -> f64 {
        2.5 + station.size * 4.5
    }

    fn draw_stations<P: Painter + ?Sized>(&self, painter: &mut P) {
        for (i, station) in self.stations.iter().enumerate() {
            let at = self.station_pos(i);
            let core = Self::core_radius(station);

            if station.size >= MAJOR_STATION_SIZE {
                let swell = (self.time * 0.05 + i as f64).sin() * 2.0;
                painter.set_stroke(ACCENT.alpha(0.3), 1.0);
                painter.stroke_circle(at, core + 4.0 + swell);
            }

            painter.set_fill(if i == self.central { ACCENT } else { INK });
            painter.fill_circle(at, core);
            painter.set_fill(PAPER);
            painter.fill_circle(at, core * 0.4);

            if i == self.central {
                let turn = self.time * 0.01;
                painter.set_stroke(ACCENT.alpha(0.6), 1.0);
                painter.set_line_dash(&[3.0, 4.0]);
                painter.begin_path();
                painter.arc(at, core + 10.0, turn, turn + TAU);
                painter.stroke();
                painter.set_line_dash(&[]);
            }
        }
    }

    fn draw_pulses<P: Painter + ?Sized>(&self, painter: &mut P) {
        for pulse in &self.pulses {
            painter.set_stroke(ACCENT.alpha(pulse.opacity * 0.6), 1.5);
            painter.stroke_circle(pulse.origin, pulse.radius);
        }
    }

    fn draw_highlight<P: Painter + ?Sized>(&self, painter: &mut P) {
        if let Some(index) = self.hovered_station() {
            let core = Self::core_radius(&self.stations[index]);
            painter.set_stroke(ACCENT.alpha(0.8), 1.5);
            painter.stroke_circle(self.station_pos(index), core + HIGHLIGHT_MARGIN);
        }
    }
}

impl Scene for NetworkMap {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        // pulse origins are in screen space
        self.pulses.clear();
        self.build_trains(rng);
        log::debug!(
            "network map {}x{}: {} lines, {} trains",
            self.width,
            self.height,
            self.lines.len(),
            self.trains.len()
        );
    }

    fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.time += 1.0;
        self.advance_trains();
        self.spawn_pulses(rng);
        self.advance_pulses();
    }

    fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.set_line_dash(&[]);
        painter.fill_rect(0.0, 0.0, self.width, self.height, PAPER.alpha(FADE_ALPHA));
        self.draw_background(painter);
        self.draw_halos(painter);
        self.draw_lines(painter);
        self.draw_trains(painter);
        self.draw_stations(painter);
        self.draw_pulses(painter);
        self.draw_highlight(painter);
    }

    fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }
}
