//! Marching squares isoline extraction on 2D sections.
//!
//! Samples sit on the cell-center lattice of a [`Section2`]; output points are
//! in the same `(col, row)` index space and are mapped to world coordinates
//! with [`crate::SliceDescriptor::cell_to_world`].

use std::collections::{HashMap, VecDeque};

use glam::DVec2;

use crate::volume::Section2;

/// A connected isoline in cell-index space.
#[derive(Debug, Clone, PartialEq)]
pub struct Isoline {
    /// Level this line was extracted at.
    pub level: f64,
    /// Ordered points along the line.
    pub points: Vec<DVec2>,
    /// Whether the last point joins the first.
    pub closed: bool,
}

/// Identifies a lattice edge: `(vertical, col, row)` of its lower/left end.
type EdgeKey = (bool, usize, usize);

#[derive(Debug, Clone, Copy)]
struct Crossing {
    key: EdgeKey,
    point: DVec2,
}

/// Returns `n` evenly spaced levels strictly inside `(min, max)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn contour_levels(min: f64, max: f64, n: usize) -> Vec<f64> {
    if n == 0 || min.is_nan() || max.is_nan() || max <= min {
        return Vec::new();
    }
    let step = (max - min) / (n + 1) as f64;
    (1..=n).map(|i| min + step * i as f64).collect()
}

/// Band index of `value` among ascending `levels`: 0 below the first level,
/// `levels.len()` above the last.
#[must_use]
pub fn band_index(levels: &[f64], value: f64) -> usize {
    levels.partition_point(|&l| l <= value)
}

fn crossing(key: EdgeKey, a: DVec2, b: DVec2, va: f64, vb: f64, level: f64) -> Crossing {
    let t = if (vb - va).abs() < f64::EPSILON {
        0.5
    } else {
        ((level - va) / (vb - va)).clamp(0.0, 1.0)
    };
    Crossing {
        key,
        point: a.lerp(b, t),
    }
}

/// Extracts the unjoined segments of the `level` isoline.
///
/// Cells touching a NaN corner are skipped. Saddles are resolved with the
/// mean of the four corners.
#[must_use]
#[allow(clippy::cast_precision_loss)]
fn segments(section: &Section2<f64>, level: f64) -> Vec<(Crossing, Crossing)> {
    let (cols, rows) = (section.cols(), section.rows());
    if cols < 2 || rows < 2 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for row in 0..rows - 1 {
        for col in 0..cols - 1 {
            let bl = section.get(col, row);
            let br = section.get(col + 1, row);
            let tr = section.get(col + 1, row + 1);
            let tl = section.get(col, row + 1);
            if bl.is_nan() || br.is_nan() || tr.is_nan() || tl.is_nan() {
                continue;
            }

            let case = u8::from(bl >= level)
                | (u8::from(br >= level) << 1)
                | (u8::from(tr >= level) << 2)
                | (u8::from(tl >= level) << 3);
            if case == 0 || case == 15 {
                continue;
            }

            let (x, y) = (col as f64, row as f64);
            let p_bl = DVec2::new(x, y);
            let p_br = DVec2::new(x + 1.0, y);
            let p_tr = DVec2::new(x + 1.0, y + 1.0);
            let p_tl = DVec2::new(x, y + 1.0);

            let bottom = || crossing((false, col, row), p_bl, p_br, bl, br, level);
            let top = || crossing((false, col, row + 1), p_tl, p_tr, tl, tr, level);
            let left = || crossing((true, col, row), p_bl, p_tl, bl, tl, level);
            let right = || crossing((true, col + 1, row), p_br, p_tr, br, tr, level);

            match case {
                1 | 14 => out.push((left(), bottom())),
                2 | 13 => out.push((bottom(), right())),
                3 | 12 => out.push((left(), right())),
                4 | 11 => out.push((right(), top())),
                6 | 9 => out.push((bottom(), top())),
                7 | 8 => out.push((left(), top())),
                5 | 10 => {
                    let center_above = (bl + br + tr + tl) / 4.0 >= level;
                    // Case 5: bl and tr above. Case 10: br and tl above.
                    if (case == 5) == center_above {
                        out.push((left(), top()));
                        out.push((bottom(), right()));
                    } else {
                        out.push((left(), bottom()));
                        out.push((right(), top()));
                    }
                }
                _ => {}
            }
        }
    }
    out
}

/// Extracts the isolines of `section` at `level`, joined into polylines.
#[must_use]
pub fn isolines(section: &Section2<f64>, level: f64) -> Vec<Isoline> {
    let segs = segments(section, level);
    if segs.is_empty() {
        return Vec::new();
    }

    let mut by_edge: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (i, (a, b)) in segs.iter().enumerate() {
        by_edge.entry(a.key).or_default().push(i);
        by_edge.entry(b.key).or_default().push(i);
    }

    let mut used = vec![false; segs.len()];
    let mut lines = Vec::new();

    for start in 0..segs.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (a, b) = segs[start];
        let mut keys = VecDeque::from([a.key, b.key]);
        let mut points = VecDeque::from([a.point, b.point]);

        // Grow forward from the back, then backward from the front.
        for forward in [true, false] {
            loop {
                let tip = if forward { keys.back() } else { keys.front() };
                let Some(&tip) = tip else { break };
                let next = by_edge
                    .get(&tip)
                    .and_then(|ids| ids.iter().copied().find(|&i| !used[i]));
                let Some(next) = next else { break };
                used[next] = true;
                let (c, d) = segs[next];
                let far = if c.key == tip { d } else { c };
                if forward {
                    keys.push_back(far.key);
                    points.push_back(far.point);
                } else {
                    keys.push_front(far.key);
                    points.push_front(far.point);
                }
            }
        }

        let closed = keys.len() > 2 && keys.front() == keys.back();
        let mut points: Vec<DVec2> = points.into_iter().collect();
        if closed {
            points.pop();
        }
        lines.push(Isoline {
            level,
            points,
            closed,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn ramp_x(cols: usize, rows: usize) -> Section2<f64> {
        let data = (0..rows)
            .flat_map(|_| (0..cols).map(|c| c as f64))
            .collect();
        Section2::from_rows(cols, rows, data).unwrap()
    }

    #[test]
    fn test_levels() {
        let levels = contour_levels(0.0, 10.0, 4);
        assert_eq!(levels, vec![2.0, 4.0, 6.0, 8.0]);
        assert!(contour_levels(1.0, 1.0, 4).is_empty());
        assert!(contour_levels(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_band_index() {
        let levels = [1.0, 2.0, 3.0];
        assert_eq!(band_index(&levels, 0.5), 0);
        assert_eq!(band_index(&levels, 1.0), 1);
        assert_eq!(band_index(&levels, 2.5), 2);
        assert_eq!(band_index(&levels, 9.0), 3);
    }

    #[test]
    fn test_ramp_gives_straight_line() {
        let section = ramp_x(5, 4);
        let lines = isolines(&section, 1.5);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(!line.closed);
        assert_eq!(line.points.len(), 4);
        for p in &line.points {
            assert!((p.x - 1.5).abs() < 1e-12, "point {p:?} off the isoline");
        }
        let mut ys: Vec<f64> = line.points.iter().map(|p| p.y).collect();
        ys.sort_by(f64::total_cmp);
        assert_eq!(ys, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_closed_ring_around_peak() {
        let mut data = vec![0.0; 25];
        data[12] = 1.0;
        let section = Section2::from_rows(5, 5, data).unwrap();
        let lines = isolines(&section, 0.5);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        assert_eq!(lines[0].points.len(), 4);
    }

    #[test]
    fn test_no_crossing() {
        let section = Section2::from_rows(3, 3, vec![1.0; 9]).unwrap();
        assert!(isolines(&section, 2.0).is_empty());
        assert!(isolines(&section, 0.0).is_empty());
    }

    #[test]
    fn test_nan_cells_skipped() {
        let mut data = vec![0.0, 1.0, 0.0, 1.0];
        data[0] = f64::NAN;
        let section = Section2::from_rows(2, 2, data).unwrap();
        assert!(isolines(&section, 0.5).is_empty());
    }
}
