//! Length units. Everything placed on a slide is measured in EMUs.

/// English Metric Units; 914 400 per inch.
pub type Emu = i64;

pub const EMU_PER_INCH: i64 = 914_400;
pub const EMU_PER_POINT: i64 = 12_700;

/// Inches to EMUs, rounded to the nearest unit.
pub fn inches(value: f64) -> Emu {
    (value * EMU_PER_INCH as f64).round() as Emu
}

/// Points to EMUs, rounded to the nearest unit.
pub fn points(value: f64) -> Emu {
    (value * EMU_PER_POINT as f64).round() as Emu
}

/// EMUs back to inches.
pub fn to_inches(value: Emu) -> f64 {
    value as f64 / EMU_PER_INCH as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(inches(1.0), 914_400);
        assert_eq!(inches(13.333), 12_191_695);
        assert_eq!(points(12.0), 152_400);
        assert!((to_inches(inches(7.5)) - 7.5).abs() < 1e-9);
    }
}
