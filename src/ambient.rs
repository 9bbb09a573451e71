//! Ambient geometric background: a drifting particle swarm, a handful of
//! slowly animated shapes and rotating radial grid lines, painted over a
//! translucent fill so everything leaves fading trails.

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::VizConfig;
use crate::geometry::{regular_polygon, wrap, Direction, Oscillator, Point};
use crate::paint::{Painter, ACCENT, INK, PAPER};
use crate::scene::Scene;

const FADE_ALPHA: f64 = 0.12;
const PARTICLE_SPEED: f64 = 0.3;
const CONNECTION_ALPHA: f64 = 0.12;
const POLYGON_SIDES: usize = 6;
const POLYGON_RINGS: usize = 4;
const SATELLITES: usize = 3;
const EXPANDING_RINGS: u32 = 5;
const RING_STAGGER_FRAMES: u32 = 40;
const RING_GROWTH: f64 = 0.6;
const TRIANGLES: usize = 8;
const GRID_LINES: usize = 12;
const GRID_SPIN: f64 = 0.0008;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    fn random<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        Particle {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: rng.gen_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            vy: rng.gen_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            radius: rng.gen_range(0.6..=2.0),
            opacity: rng.gen_range(0.15..=0.5),
        }
    }

    /// Move by one velocity step, re-entering from the opposite edge.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x = wrap(self.x + self.vx, width);
        self.y = wrap(self.y + self.vy, height);
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Decorative shapes orbiting the surface centre.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Hexagon drawn as nested rings turning in alternate directions.
    RotatingPolygon {
        radius: f64,
        rotation: f64,
        angular_speed: f64,
        breath: Oscillator,
        opacity: f64,
    },
    OrbitingSatellite {
        orbit_radius: f64,
        angle: f64,
        angular_speed: f64,
        size: f64,
        opacity: f64,
    },
    /// Grows from the centre to `max_radius`, then starts over.
    ExpandingRing {
        radius: f64,
        max_radius: f64,
        growth: f64,
        delay: u32,
        opacity: f64,
    },
    /// Bobs above and below `anchor` by up to `float_amplitude`.
    FloatingTriangle {
        anchor: Point,
        size: f64,
        rotation: f64,
        angular_speed: f64,
        float: Oscillator,
        float_amplitude: f64,
        opacity: f64,
    },
}

/// Vertical offset of a floating triangle, eased so it slows at both ends.
pub fn float_offset(float: &Oscillator, amplitude: f64) -> f64 {
    let t = float.value;
    let eased = t * t * (3.0 - 2.0 * t);
    (eased * 2.0 - 1.0) * amplitude
}

impl Shape {
    pub fn update(&mut self) {
        match self {
            Shape::RotatingPolygon {
                rotation,
                angular_speed,
                breath,
                ..
            } => {
                *rotation = (*rotation + *angular_speed) % TAU;
                breath.step();
            }
            Shape::OrbitingSatellite {
                angle,
                angular_speed,
                ..
            } => {
                *angle = (*angle + *angular_speed) % TAU;
            }
            Shape::ExpandingRing {
                radius,
                max_radius,
                growth,
                delay,
                ..
            } => {
                if *delay > 0 {
                    *delay -= 1;
                } else {
                    *radius += *growth;
                    if *radius >= *max_radius {
                        *radius = 0.0;
                    }
                }
            }
            Shape::FloatingTriangle {
                rotation,
                angular_speed,
                float,
                ..
            } => {
                *rotation = (*rotation + *angular_speed) % TAU;
                float.step();
            }
        }
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P, center: Point) {
        match *self {
            Shape::RotatingPolygon {
                radius,
                rotation,
                ref breath,
                opacity,
                ..
            } => {
                let scale = 0.9 + 0.2 * breath.value;
                for ring in 0..POLYGON_RINGS {
                    let k = ring as f64;
                    let turn = if ring % 2 == 0 { rotation } else { -rotation };
                    painter.set_stroke(ACCENT.alpha(opacity * (1.0 - 0.15 * k)), 1.0);
                    let points =
                        regular_polygon(center, radius * scale * (1.0 - 0.2 * k), POLYGON_SIDES, turn);
                    painter.stroke_polygon(&points);
                }
            }
            Shape::OrbitingSatellite {
                orbit_radius,
                angle,
                size,
                opacity,
                ..
            } => {
                painter.set_stroke(INK.alpha(opacity * 0.15), 0.5);
                painter.stroke_circle(center, orbit_radius);
                painter.set_fill(ACCENT.alpha(opacity));
                painter.fill_circle(center.polar(orbit_radius, angle), size);
            }
            Shape::ExpandingRing {
                radius,
                max_radius,
                delay,
                opacity,
                ..
            } => {
                if delay > 0 || radius <= 0.0 {
                    return;
                }
                let fade = 1.0 - radius / max_radius;
                painter.set_stroke(ACCENT.alpha(opacity * fade), 1.0);
                painter.stroke_circle(center, radius);
            }
            Shape::FloatingTriangle {
                anchor,
                size,
                rotation,
                ref float,
                float_amplitude,
                opacity,
                ..
            } => {
                let at = Point::new(anchor.x, anchor.y + float_offset(float, float_amplitude));
                painter.set_stroke(INK.alpha(opacity), 1.0);
                painter.stroke_polygon(&regular_polygon(at, size, 3, rotation));
            }
        }
    }
}

/// The full-page ambient background renderer.
#[derive(Debug, Clone)]
pub struct AmbientField {
    width: f64,
    height: f64,
    particle_density_divisor: f64,
    connection_distance: f64,
    particles: Vec<Particle>,
    shapes: Vec<Shape>,
    time: f64,
}

impl AmbientField {
    pub fn new<R: Rng + ?Sized>(config: &VizConfig, width: f64, height: f64, rng: &mut R) -> Self {
        let mut field = AmbientField {
            width: 0.0,
            height: 0.0,
            particle_density_divisor: config.particle_density_divisor,
            connection_distance: config.connection_distance,
            particles: Vec::new(),
            shapes: Vec::new(),
            time: 0.0,
        };
        field.resize(width, height, rng);
        field
    }

    /// One particle per `particle_density_divisor` px² of surface.
    pub fn particle_count(&self) -> usize {
        let area = self.width.max(0.0) * self.height.max(0.0);
        if self.particle_density_divisor > 0.0 && area.is_finite() {
            (area / self.particle_density_divisor).floor() as usize
        } else {
            0
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Frames elapsed since the last resize.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    fn build_shapes<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let minor = self.width.min(self.height);
        let major = self.width.max(self.height);
        let base = minor * 0.12;
        let center = self.center();

        self.shapes.clear();
        self.shapes.push(Shape::RotatingPolygon {
            radius: base,
            rotation: 0.0,
            angular_speed: 0.002,
            breath: Oscillator::new(0.5, Direction::Forward, 0.004),
            opacity: 0.35,
        });

        for k in 0..SATELLITES {
            let k = k as f64;
            self.shapes.push(Shape::OrbitingSatellite {
                orbit_radius: base * (1.25 + 0.35 * k),
                angle: rng.gen::<f64>() * TAU,
                angular_speed: 0.01 / (k + 1.0),
                size: 2.5 - 0.5 * k,
                opacity: 0.5 - 0.12 * k,
            });
        }

        for k in 0..EXPANDING_RINGS {
            self.shapes.push(Shape::ExpandingRing {
                radius: 0.0,
                max_radius: major * 0.35,
                growth: RING_GROWTH,
                delay: k * RING_STAGGER_FRAMES,
                opacity: 0.25,
            });
        }

        let circle = minor * 0.38;
        for k in 0..TRIANGLES {
            let angle = TAU * k as f64 / TRIANGLES as f64;
            self.shapes.push(Shape::FloatingTriangle {
                anchor: center.polar(circle, angle),
                size: rng.gen_range(6.0..=14.0),
                rotation: rng.gen::<f64>() * TAU,
                angular_speed: rng.gen_range(-0.01..=0.01),
                float: Oscillator::new(
                    rng.gen(),
                    if rng.gen() { Direction::Forward } else { Direction::Reverse },
                    rng.gen_range(0.005..=0.015),
                ),
                float_amplitude: rng.gen_range(4.0..=12.0),
                opacity: rng.gen_range(0.08..=0.2),
            });
        }
    }

    fn draw_connections<P: Painter + ?Sized>(&self, painter: &mut P) {
        let limit = self.connection_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position().distance(b.position());
                if distance < limit {
                    painter.set_stroke(INK.alpha((1.0 - distance / limit) * CONNECTION_ALPHA), 0.5);
                    painter.line(a.position(), b.position());
                }
            }
        }
    }

    fn draw_radial_grid<P: Painter + ?Sized>(&self, painter: &mut P) {
        let center = self.center();
        let reach = self.width.max(self.height);
        let spin = self.time * GRID_SPIN;
        painter.set_stroke(INK.alpha(0.03), 1.0);
        for k in 0..GRID_LINES {
            let angle = spin + TAU * k as f64 / GRID_LINES as f64;
            painter.line(center, center.polar(reach, angle));
        }
    }
}

impl Scene for AmbientField {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.time = 0.0;

        let count = self.particle_count();
        self.particles = (0..count)
            .map(|_| Particle::random(self.width, self.height, rng))
            .collect();
        self.build_shapes(rng);
        log::debug!(
            "ambient field {}x{}: {} particles, {} shapes",
            self.width,
            self.height,
            self.particles.len(),
            self.shapes.len()
        );
    }

    fn update<R: Rng + ?Sized>(&mut self, _rng: &mut R) {
        self.time += 1.0;
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
        for shape in &mut self.shapes {
            shape.update();
        }
    }

    fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.set_line_dash(&[]);
        painter.fill_rect(0.0, 0.0, self.width, self.height, PAPER.alpha(FADE_ALPHA));

        for particle in &self.particles {
            painter.set_fill(ACCENT.alpha(particle.opacity));
            painter.fill_circle(particle.position(), particle.radius);
        }
        self.draw_connections(painter);

        let center = self.center();
        for shape in &self.shapes {
            shape.draw(painter, center);
        }
        self.draw_radial_grid(painter);
    }
}
