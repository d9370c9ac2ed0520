//! Pedotransfer functions
//!
//! Saxton & Rawls style regression chain from texture and organic carbon to
//! the DSSAT hydraulic coefficients. The steps feed each other in order; the
//! intermediate names follow the worksheet columns the regressions were
//! published in.

/// Hydraulic coefficients of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hydraulics {
    /// Lower limit (wilting point), cm3/cm3
    pub slll: f64,
    /// Drained upper limit (field capacity), cm3/cm3
    pub sdul: f64,
    /// Saturation, cm3/cm3
    pub ssat: f64,
    /// Saturated conductivity, cm/h
    pub sksat: f64,
    /// Bulk density, g/cm3
    pub sbdm: f64,
}

/// Water-content triple after a `delta_swc` adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterContent {
    pub sdul: f64,
    pub slll: f64,
    pub ssat: f64,
}

/// Lower limit is never pushed below this by an adjustment.
pub const SLLL_MIN: f64 = 0.04;

/// Minimum gap between saturation and field capacity after an adjustment.
pub const SSAT_SDUL_MIN_OFFSET: f64 = 0.05;

/// Derive hydraulic coefficients from clay %, silt %, organic carbon %
/// and coarse fragments %.
///
/// Field capacity is lifted to `slll + 0.01` when the regression puts it
/// below the lower limit. Conductivity is computed from the unclamped value.
pub fn ptransfer(clay: f64, silt: f64, oc: f64, cf: f64) -> Hydraulics {
    let g = clay / 100.0;
    let si = silt / 100.0;
    let f = 1.0 - g - si;
    let j = cf / 100.0;
    let h = oc;
    let density_factor = 1.0;

    // lower limit
    let w = -0.024 * f + 0.487 * g + 0.006 * h + 0.005 * f * h - 0.013 * g * h
        + 0.068 * f * g
        + 0.031;
    let x = w + 0.14 * w - 0.02;
    let slll = x;

    // drained upper limit
    let y = -0.251 * f + 0.195 * g + 0.011 * h + 0.006 * f * h - 0.027 * g * h
        + 0.452 * f * g
        + 0.299;
    let aa = 0.278 * f + 0.034 * g + 0.022 * h - 0.018 * f * h - 0.027 * g * h
        - 0.584 * f * g
        + 0.078;
    let z = y + (1.283 * y * y - 0.374 * y - 0.015);
    let ab = aa + (0.636 * aa - 0.107);
    let ac = ab + z;
    let ad = -0.097 * f + 0.043;
    let ae = ac + ad;
    let af = (1.0 - ae) * 2.65;
    let ag = af * density_factor;
    let ai = (1.0 - ag / 2.65) - (1.0 - af / 2.65);
    let aj = z + 0.2 * ai;
    let mut sdul = aj;

    // saturation
    let ah = 1.0 - ag / 2.65;
    let ssat = ah;

    // saturated conductivity
    let r = ag;
    let al = (aj.ln() - x.ln()) / (1500f64.ln() - 33f64.ln());
    let am = (1.0 - j) / (1.0 - j * (1.0 - 1.5 * (r / 2.65)));
    let ak = ah - aj;
    let an = 1930.0 * ak.powf(3.0 - al) * am;
    let sksat = an / 10.0;

    // bulk density
    let t = ((r / 2.65) * j) / (1.0 - j * (1.0 - r / 2.65));
    let u = t * 2.65 + (1.0 - t) * r;
    let sbdm = u;

    if sdul < slll {
        sdul = slll + 0.01;
    }

    Hydraulics {
        slll,
        sdul,
        ssat,
        sksat,
        sbdm,
    }
}

/// Shift available water by `delta`, splitting the change between field
/// capacity and lower limit.
///
/// No-op when the lower limit is already at or below `SLLL_MIN`.
pub fn swc_adjustment(sdul: f64, slll: f64, ssat: f64, delta: f64) -> WaterContent {
    if slll <= SLLL_MIN {
        return WaterContent { sdul, slll, ssat };
    }

    let swc = sdul - slll;
    let target = swc + delta;
    let mut slll_delta = 0.5 * (slll + target - sdul);
    if slll - slll_delta < SLLL_MIN {
        slll_delta = slll - SLLL_MIN;
    }
    let sdul = sdul + slll_delta;
    let slll = slll - slll_delta;

    let ssat = if ssat - sdul < SSAT_SDUL_MIN_OFFSET {
        sdul + SSAT_SDUL_MIN_OFFSET
    } else {
        ssat
    };

    WaterContent { sdul, slll, ssat }
}

/// Redistribute sand, clay and silt for a clay delta and an optional sand
/// cap. Returns the adjusted (clay, silt).
pub fn redistribute_texture(
    clay: f64,
    silt: f64,
    delta_cly: f64,
    slsnd_max: Option<f64>,
) -> (f64, f64) {
    let mut sand = (100.0 - clay - silt).max(0.0);
    if let Some(cap) = slsnd_max {
        sand = sand.min(cap);
    }
    let clay = (clay + delta_cly).max(0.0);
    let silt = (100.0 - sand - clay).max(0.0);
    (clay, silt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_loam_reference_values() {
        let h = ptransfer(20.0, 40.0, 1.0, 0.0);
        assert_relative_eq!(h.slll, 0.1277896, epsilon = 1e-12);
        assert_relative_eq!(h.sdul, 0.26323745902080004, epsilon = 1e-12);
        assert_relative_eq!(h.ssat, 0.4200379390208, epsilon = 1e-12);
        assert_relative_eq!(h.sksat, 1.0567093456328598, epsilon = 1e-9);
        assert_relative_eq!(h.sbdm, 1.53689946159488, epsilon = 1e-12);
    }

    #[test]
    fn test_coarse_fragments_reference_values() {
        let h = ptransfer(30.0, 30.0, 1.5, 5.0);
        assert_relative_eq!(h.slll, 0.1872634, epsilon = 1e-12);
        assert_relative_eq!(h.sdul, 0.3156723915602999, epsilon = 1e-12);
        assert_relative_eq!(h.ssat, 0.44088171156029987, epsilon = 1e-12);
        assert_relative_eq!(h.sksat, 0.4821323062874156, epsilon = 1e-9);
        assert_relative_eq!(h.sbdm, 1.515061612200519, epsilon = 1e-12);
    }

    #[test]
    fn test_sandy_reference_values() {
        let h = ptransfer(10.0, 10.0, 0.5, 0.0);
        assert_relative_eq!(h.slll, 0.0601306, epsilon = 1e-12);
        assert_relative_eq!(h.sdul, 0.1184300052723, epsilon = 1e-12);
        assert_relative_eq!(h.ssat, 0.40142108527230014, epsilon = 1e-12);
        assert_relative_eq!(h.sksat, 5.473110956926916, epsilon = 1e-9);
        assert_relative_eq!(h.sbdm, 1.5862341240284046, epsilon = 1e-12);
    }

    #[test]
    fn test_field_capacity_clamp() {
        // heavy organic clay: the regression puts field capacity under the
        // lower limit (0.305204352 < 0.307408)
        let h = ptransfer(60.0, 40.0, 20.0, 0.0);
        assert_relative_eq!(h.slll, 0.307408, epsilon = 1e-12);
        assert_eq!(h.sdul, h.slll + 0.01);
        assert_relative_eq!(h.ssat, 0.5919627520000001, epsilon = 1e-12);
        assert_relative_eq!(h.sksat, 4.540285909208403, epsilon = 1e-9);
        assert_relative_eq!(h.sbdm, 1.0812987071999998, epsilon = 1e-12);
    }

    #[test]
    fn test_hydraulic_ordering() {
        for clay in (0..=60).step_by(10) {
            for silt in (0..=(100 - clay)).step_by(10) {
                for oc in [0.1, 0.5, 1.0, 2.0] {
                    for cf in [0.0, 5.0, 20.0] {
                        let h = ptransfer(clay as f64, silt as f64, oc, cf);
                        assert!(h.slll < h.sdul, "clay {} silt {} oc {}", clay, silt, oc);
                        assert!(h.sdul < h.ssat, "clay {} silt {} oc {}", clay, silt, oc);

                        let w = swc_adjustment(h.sdul, h.slll, h.ssat, 0.05);
                        assert!(w.slll < w.sdul && w.sdul < w.ssat);
                    }
                }
            }
        }
    }

    #[test]
    fn test_swc_adjustment() {
        let w = swc_adjustment(0.30, 0.15, 0.45, 0.04);
        assert_relative_eq!(w.sdul, 0.32, epsilon = 1e-12);
        assert_relative_eq!(w.slll, 0.13, epsilon = 1e-12);
        assert_relative_eq!(w.ssat, 0.45, epsilon = 1e-12);

        // lower limit floor and saturation lift
        let w = swc_adjustment(0.30, 0.06, 0.33, 0.10);
        assert_relative_eq!(w.sdul, 0.32, epsilon = 1e-12);
        assert_relative_eq!(w.slll, 0.04, epsilon = 1e-12);
        assert_relative_eq!(w.ssat, 0.37, epsilon = 1e-12);
    }

    #[test]
    fn test_swc_adjustment_noop_below_floor() {
        let w = swc_adjustment(0.20, 0.04, 0.40, 0.10);
        assert_eq!(w, WaterContent { sdul: 0.20, slll: 0.04, ssat: 0.40 });
    }

    #[test]
    fn test_redistribute_texture() {
        let (clay, silt) = redistribute_texture(20.0, 40.0, 5.0, None);
        assert_relative_eq!(clay, 25.0);
        assert_relative_eq!(silt, 35.0);

        let (clay, silt) = redistribute_texture(10.0, 10.0, -20.0, Some(50.0));
        assert_relative_eq!(clay, 0.0);
        assert_relative_eq!(silt, 50.0);
    }
}
