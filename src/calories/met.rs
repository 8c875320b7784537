//! MET lookup for running
//!
//! Maps a running speed in km/h to a Metabolic Equivalent of Task value.
//! Bands are inclusive at the lower bound and exclusive at the upper bound;
//! the last band is open-ended.

/// A speed band with its MET value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetBand {
    /// Exclusive upper speed bound in km/h (`None` for the open-ended top band)
    pub below_kmh: Option<f64>,
    pub met: f64,
    pub label: &'static str,
}

/// Running MET bands in ascending speed order
pub const MET_BANDS: &[MetBand] = &[
    MetBand { below_kmh: Some(8.0), met: 8.0, label: "light jogging" },
    MetBand { below_kmh: Some(9.7), met: 9.0, label: "jogging" },
    MetBand { below_kmh: Some(11.3), met: 10.0, label: "steady running" },
    MetBand { below_kmh: Some(12.9), met: 11.0, label: "brisk running" },
    MetBand { below_kmh: Some(14.5), met: 12.5, label: "fast running" },
    MetBand { below_kmh: None, met: 14.0, label: "very fast running" },
];

/// Find the band a speed falls into
///
/// Negative speeds land in the lowest band. NaN compares false against every
/// bound and lands in the top band.
pub fn band_for_speed(speed_kmh: f64) -> &'static MetBand {
    MET_BANDS
        .iter()
        .find(|band| band.below_kmh.map_or(true, |upper| speed_kmh < upper))
        .unwrap_or(&MET_BANDS[MET_BANDS.len() - 1])
}

/// MET value for a running speed in km/h
pub fn met_for_speed(speed_kmh: f64) -> f64 {
    band_for_speed(speed_kmh).met
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(met_for_speed(7.99), 8.0);
        assert_eq!(met_for_speed(8.0), 9.0);
        assert_eq!(met_for_speed(9.69), 9.0);
        assert_eq!(met_for_speed(9.7), 10.0);
        assert_eq!(met_for_speed(11.3), 11.0);
        assert_eq!(met_for_speed(12.9), 12.5);
        assert_eq!(met_for_speed(14.49999), 12.5);
        assert_eq!(met_for_speed(14.5), 14.0);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(met_for_speed(0.0), 8.0);
        assert_eq!(met_for_speed(-3.0), 8.0);
        assert_eq!(met_for_speed(40.0), 14.0);
        assert_eq!(met_for_speed(f64::INFINITY), 14.0);
    }

    #[test]
    fn test_non_decreasing() {
        let mut previous = met_for_speed(0.0);
        let mut speed = 0.0;
        while speed < 25.0 {
            let met = met_for_speed(speed);
            assert!(met >= previous, "MET dropped at {} km/h", speed);
            previous = met;
            speed += 0.05;
        }
    }

    #[test]
    fn test_bands_ascending_with_open_top() {
        let bounds: Vec<f64> = MET_BANDS.iter().filter_map(|b| b.below_kmh).collect();
        assert!(bounds.windows(2).all(|w| w[0] < w[1]));
        assert!(MET_BANDS.last().map_or(false, |b| b.below_kmh.is_none()));
    }

    #[test]
    fn test_band_label() {
        assert_eq!(band_for_speed(10.0).label, "steady running");
    }
}
