//! Sector data model for the campus map.
//!
//! Sectors arrive fully populated from the hosting page as a JSON array
//! and are read-only afterwards. Registration order is the array order
//! and decides hit-test priority for overlapping polygons.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Sector {
    pub id: String,
    /// Flat comma-separated alternating x,y list in image-space pixels,
    /// e.g. "0,0,10,0,10,10,0,10". A trailing unpaired value is dropped.
    pub coords: String,
    /// Opaque marker descriptor, drawn at the polygon centroid.
    pub icon: String,
}

impl Sector {
    /// Parse `coords` into (x, y) pairs. Non-numeric entries become NaN
    /// and fall out of every containment comparison; malformed data is an
    /// external contract violation, not a runtime failure.
    pub fn points(&self) -> Vec<(f64, f64)> {
        let nums: Vec<f64> = self
            .coords
            .split(',')
            .map(|s| s.trim().parse::<f64>().unwrap_or(f64::NAN))
            .collect();
        nums.chunks_exact(2).map(|p| (p[0], p[1])).collect()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        point_in_polygon(x, y, &self.points())
    }
}

/// Even-odd ray cast. Fewer than 3 vertices contains nothing.
pub fn point_in_polygon(x: f64, y: f64, pts: &[(f64, f64)]) -> bool {
    if pts.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let (xi, yi) = pts[i];
        let (xj, yj) = pts[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Average of the vertices; where the sector icon is drawn.
pub fn polygon_centroid(pts: &[(f64, f64)]) -> Option<(f64, f64)> {
    if pts.is_empty() {
        return None;
    }
    let n = pts.len() as f64;
    let (sx, sy) = pts
        .iter()
        .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
    Some((sx / n, sy / n))
}

/// Ordered, read-only collection of sectors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectorRegistry {
    sectors: Vec<Sector>,
}

impl SectorRegistry {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let sectors: Vec<Sector> = serde_json::from_str(raw)?;
        Ok(Self { sectors })
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    /// First sector whose polygon contains the image-space point;
    /// registration order resolves overlaps, not area or z-order.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.contains(x, y))
    }
}
