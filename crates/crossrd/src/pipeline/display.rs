//! Stable URL keys and display colors for tracks.

use crate::family::{parse_hex_color, FamilyConfig};
use crate::subject::Subject;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

const MAX_KEY_LEN: usize = 24;
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

static NON_KEY_CHARS: OnceLock<Regex> = OnceLock::new();

fn non_key_chars() -> &'static Regex {
    NON_KEY_CHARS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("key pattern compiles"))
}

/// URL-safe key for `name`, suffixed `_2`, `_3`… until it is not in `used`.
pub fn generate_key(name: &str, used: &HashSet<String>) -> String {
    let lowered = name.to_lowercase();
    let replaced = non_key_chars().replace_all(&lowered, "_");
    let mut base: String = replaced.trim_matches('_').chars().take(MAX_KEY_LEN).collect();
    if base.is_empty() {
        base.push_str("track");
    }

    let mut key = base.clone();
    let mut suffix = 2;
    while used.contains(&key) {
        key = format!("{base}_{suffix}");
        suffix += 1;
    }
    key
}

/// `n` well-spread colors stepping the hue by the golden ratio.
pub fn golden_palette(n: usize) -> Vec<String> {
    (0..n)
        .map(|index| {
            let hue = (index as f64 * GOLDEN_RATIO_CONJUGATE).rem_euclid(1.0);
            to_hex(hsv_to_rgb(hue, 0.55, 0.72))
        })
        .collect()
}

/// Shade `index` within a base color's family. Unparseable bases are
/// returned unchanged.
pub fn shade_color(base: &str, index: usize) -> String {
    let Some([r, g, b]) = parse_hex_color(base) else {
        return base.to_string();
    };
    let (h, s, v) = rgb_to_hsv(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    );

    let h = (h + index as f64 * 0.03).rem_euclid(1.0);
    let s = (s + ((index % 3) as f64 - 1.0) * 0.1).clamp(0.25, 0.85);
    let v = (v + ((index % 2) as f64 * 0.08 - 0.04)).clamp(0.45, 0.85);
    to_hex(hsv_to_rgb(h, s, v))
}

fn to_hex((r, g, b): (f64, f64, f64)) -> String {
    let channel = |value: f64| (value * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let range = max - min;
    if min == max {
        return (0.0, 0.0, max);
    }
    let s = range / max;
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).trunc();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Hands out keys and colors in source order. Pinned overrides win; other
/// tracks get a shade of their profession color.
pub struct DisplayAssigner<'a> {
    config: &'a FamilyConfig,
    palette: Vec<String>,
    used_keys: HashSet<String>,
    shade_index: HashMap<String, usize>,
}

impl<'a> DisplayAssigner<'a> {
    pub fn new(config: &'a FamilyConfig, track_count: usize) -> Self {
        Self {
            config,
            palette: golden_palette(track_count.max(config.professions.len())),
            used_keys: HashSet::new(),
            shade_index: HashMap::new(),
        }
    }

    /// Color for a profession, falling back to its palette slot.
    pub fn profession_color(&self, position: usize, profession: &str) -> String {
        self.config
            .professions
            .get(profession)
            .and_then(|info| info.color.clone())
            .or_else(|| self.palette.get(position).cloned())
            .unwrap_or_else(|| golden_palette(position + 1)[position].clone())
    }

    /// Key and color for the subject at `position` in source order.
    pub fn assign(&mut self, position: usize, subject: &Subject) -> (String, String) {
        let (key, color) = match self.config.key_overrides.get(&subject.name) {
            Some(pinned) => (pinned.key.clone(), pinned.color.clone()),
            None => {
                let key = generate_key(&subject.name, &self.used_keys);
                let base = self.profession_color(position, &subject.profession);
                let index = self
                    .shade_index
                    .entry(subject.profession.clone())
                    .or_insert(0);
                let color = shade_color(&base, *index);
                *index += 1;
                (key, color)
            }
        };
        self.used_keys.insert(key.clone());
        (key, color)
    }
}
