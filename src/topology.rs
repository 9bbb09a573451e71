//! Static railway topology drawn by the hero network map.
//!
//! Positions are relative to the canvas centre in units of the smaller
//! canvas dimension, so the map keeps its shape on any aspect ratio.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub id: &'static str,
    pub x: f64,
    pub y: f64,
    /// Visual weight in `[0, 1]`; `>= 0.7` marks a major station.
    pub size: f64,
    /// Halo weight in `[0, 1]`.
    pub density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpec {
    pub from: &'static str,
    pub to: &'static str,
    /// 1 (most prominent) ..= 16.
    pub category: u8,
}

pub const CENTRAL: &str = "central";
pub const MAJOR_STATION_SIZE: f64 = 0.7;
pub const MAX_CATEGORY: u8 = 16;

const fn station(id: &'static str, x: f64, y: f64, size: f64, density: f64) -> Station {
    Station {
        id,
        x,
        y,
        size,
        density,
    }
}

const fn line(from: &'static str, to: &'static str, category: u8) -> LineSpec {
    LineSpec { from, to, category }
}

pub const STATIONS: [Station; 22] = [
    station(CENTRAL, 0.0, 0.0, 1.0, 1.0),
    // loop line
    station("ueno", 0.05, -0.21, 0.7, 0.7),
    station("ikebukuro", -0.16, -0.15, 0.8, 0.8),
    station("shinjuku", -0.22, 0.0, 1.0, 0.95),
    station("shibuya", -0.15, 0.16, 0.9, 0.9),
    station("shinagawa", 0.02, 0.22, 0.75, 0.7),
    station("akihabara", 0.12, -0.12, 0.5, 0.6),
    station("hamamatsucho", 0.14, 0.12, 0.4, 0.5),
    // suburbs
    station("kichijoji", -0.42, 0.02, 0.4, 0.4),
    station("nakano", -0.32, -0.01, 0.35, 0.35),
    station("omiya", -0.12, -0.46, 0.6, 0.5),
    station("akabane", -0.05, -0.33, 0.4, 0.35),
    station("kitasenju", 0.2, -0.3, 0.5, 0.45),
    station("funabashi", 0.46, -0.08, 0.45, 0.4),
    station("kinshicho", 0.26, -0.05, 0.35, 0.4),
    station("shinkiba", 0.24, 0.22, 0.3, 0.3),
    station("kawasaki", 0.0, 0.38, 0.55, 0.5),
    station("yokohama", -0.08, 0.48, 0.75, 0.6),
    station("futakotamagawa", -0.3, 0.3, 0.35, 0.35),
    station("shimokitazawa", -0.28, 0.12, 0.3, 0.35),
    station("haneda", 0.18, 0.4, 0.45, 0.3),
    station("nerima", -0.35, -0.2, 0.3, 0.3),
];

pub const LINES: [LineSpec; 32] = [
    line(CENTRAL, "shinjuku", 1),
    line(CENTRAL, "shinagawa", 1),
    line(CENTRAL, "ueno", 2),
    line("shinjuku", "shibuya", 2),
    line("ikebukuro", "shinjuku", 3),
    line("shibuya", "shinagawa", 3),
    line("ueno", "ikebukuro", 4),
    line("shinagawa", "kawasaki", 4),
    line("kawasaki", "yokohama", 5),
    line(CENTRAL, "akihabara", 5),
    line("akihabara", "ueno", 6),
    line(CENTRAL, "hamamatsucho", 6),
    line("hamamatsucho", "shinagawa", 7),
    line("akihabara", "kinshicho", 7),
    line("kinshicho", "funabashi", 8),
    line("shinjuku", "nakano", 8),
    line("nakano", "kichijoji", 9),
    line("ueno", "kitasenju", 9),
    line("ikebukuro", "akabane", 10),
    line("akabane", "omiya", 10),
    line("shibuya", "futakotamagawa", 11),
    line("shinjuku", "shimokitazawa", 11),
    line("hamamatsucho", "haneda", 12),
    line(CENTRAL, "shinkiba", 12),
    line("shinkiba", "haneda", 13),
    line("ikebukuro", "nerima", 13),
    line("kitasenju", "kinshicho", 14),
    line("shimokitazawa", "futakotamagawa", 14),
    line("futakotamagawa", "kawasaki", 15),
    line("nerima", "kichijoji", 15),
    line("omiya", "kitasenju", 16),
    line("yokohama", "haneda", 16),
];

/// Visual weight and train population for a line category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTier {
    pub thickness: f64,
    pub opacity: f64,
    /// Sideways bend as a fraction of the line length.
    pub curve: f64,
    pub train_count: usize,
    pub train_size: f64,
    pub base_speed: f64,
}

impl CategoryTier {
    pub fn for_category(category: u8) -> Self {
        match category {
            0..=2 => CategoryTier {
                thickness: 2.5,
                opacity: 0.55,
                curve: 0.08,
                train_count: 3,
                train_size: 3.5,
                base_speed: 0.003,
            },
            3..=5 => CategoryTier {
                thickness: 1.6,
                opacity: 0.38,
                curve: 0.12,
                train_count: 2,
                train_size: 2.6,
                base_speed: 0.0024,
            },
            _ => CategoryTier {
                thickness: 1.0,
                opacity: 0.22,
                curve: 0.16,
                train_count: 1,
                train_size: 1.8,
                base_speed: 0.0018,
            },
        }
    }
}

/// Even categories bend one way, odd categories the other.
pub fn curve_sign(category: u8) -> f64 {
    if category % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}
