//! Centripetal Catmull-Rom spline through sampled arc points.
//!
//! Parameterization by arc length is approximated with a cumulative length
//! table so that `point_at(u)` moves at constant speed along the curve.

use foundation::math::Vec3;

/// Divisions used for the cumulative arc length table.
pub const LENGTH_DIVISIONS: usize = 200;

const MIN_KNOT_SPACING: f64 = 1e-4;
const TANGENT_DELTA: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    arc_lengths: Vec<f64>,
}

impl CatmullRomCurve {
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_lengths(LENGTH_DIVISIONS);
        curve
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Approximate total length of the curve.
    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at spline parameter `t` in [0, 1] (not arc-length uniform).
    pub fn point(&self, t: f64) -> Vec3 {
        let l = self.points.len();
        match l {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let p = (l - 1) as f64 * t;
        let mut index = p.floor() as usize;
        let mut weight = p - index as f64;
        if index >= l - 1 {
            index = l - 2;
            weight = 1.0;
        }

        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            p1 + (p1 - p2)
        };
        let p3 = if index + 2 < l {
            self.points[index + 2]
        } else {
            p2 + (p2 - p1)
        };

        let mut dt0 = p0.distance(p1).sqrt();
        let mut dt1 = p1.distance(p2).sqrt();
        let mut dt2 = p2.distance(p3).sqrt();
        if dt1 < MIN_KNOT_SPACING {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_SPACING {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_SPACING {
            dt2 = dt1;
        }

        let px = CubicPoly::nonuniform(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2);
        let py = CubicPoly::nonuniform(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2);
        let pz = CubicPoly::nonuniform(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2);
        Vec3::new(px.eval(weight), py.eval(weight), pz.eval(weight))
    }

    /// Point at arc-length fraction `u` in [0, 1].
    pub fn point_at(&self, u: f64) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u`.
    pub fn tangent_at(&self, u: f64) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// Unit tangent at spline parameter `t`, by central difference.
    pub fn tangent(&self, t: f64) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize()
    }

    /// Map an arc-length fraction to the spline parameter.
    pub fn u_to_t(&self, u: f64) -> f64 {
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        let total = self.length();
        let n = self.arc_lengths.len();
        if total <= 0.0 || n < 2 {
            return u;
        }

        let target = u * total;
        let i = self
            .arc_lengths
            .partition_point(|&len| len < target)
            .min(n - 1);
        if self.arc_lengths[i] == target || i == 0 {
            return i as f64 / (n - 1) as f64;
        }

        let before = self.arc_lengths[i - 1];
        let after = self.arc_lengths[i];
        let fraction = (target - before) / (after - before);
        (i as f64 - 1.0 + fraction) / (n - 1) as f64
    }

    fn compute_lengths(&self, divisions: usize) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut last = self.point(0.0);
        lengths.push(0.0);
        for d in 1..=divisions {
            let current = self.point(d as f64 / divisions as f64);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

/// Cubic `c0 + c1 t + c2 t^2 + c3 t^3` for one coordinate of one segment.
#[derive(Debug, Copy, Clone)]
struct CubicPoly {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl CubicPoly {
    fn hermite(x0: f64, x1: f64, t0: f64, t1: f64) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn nonuniform(x0: f64, x1: f64, x2: f64, x3: f64, dt0: f64, dt1: f64, dt2: f64) -> Self {
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        // rescale tangents for parametrization in [0, 1]
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    fn eval(&self, t: f64) -> f64 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

#[cfg(test)]
mod tests {
    use super::CatmullRomCurve;
    use foundation::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} vs {b}");
    }

    fn straight_line() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn interpolates_control_points() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 1.0, 1.0),
        ];
        let curve = CatmullRomCurve::new(points.clone());
        for (i, p) in points.iter().enumerate() {
            let q = curve.point(i as f64 / 2.0);
            assert_close(q.distance(*p), 0.0, 1e-9);
        }
    }

    #[test]
    fn straight_line_length_and_uniform_speed() {
        let curve = straight_line();
        assert_close(curve.length(), 3.0, 1e-6);
        let mid = curve.point_at(0.5);
        assert_close(mid.x, 1.5, 1e-3);
        let tangent = curve.tangent_at(0.3);
        assert_close(tangent.x, 1.0, 1e-9);
    }

    #[test]
    fn u_to_t_is_monotonic_and_bounded() {
        let curve = CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(5.0, 3.0, 0.0),
            Vec3::new(6.0, 3.0, 1.0),
        ]);
        let mut last = -1.0;
        for k in 0..=50 {
            let t = curve.u_to_t(k as f64 / 50.0);
            assert!(t >= last);
            assert!((0.0..=1.0).contains(&t));
            last = t;
        }
        assert_close(curve.u_to_t(0.0), 0.0, 1e-12);
        assert_close(curve.u_to_t(1.0), 1.0, 1e-12);
    }

    #[test]
    fn degenerate_curves_do_not_produce_nan() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let curve = CatmullRomCurve::new(vec![p, p, p]);
        assert_eq!(curve.length(), 0.0);
        assert!(curve.point_at(0.5).is_finite());
        assert_eq!(curve.point_at(0.7), p);

        let empty = CatmullRomCurve::new(Vec::new());
        assert_eq!(empty.point(0.5), Vec3::ZERO);
    }
}
