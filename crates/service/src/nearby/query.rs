use common::geo::GeoPoint;
use models::errors::{FieldErrors, MSG_REQUIRED};

use crate::errors::ServiceError;

pub const MSG_INVALID_NUMBER: &str = "A valid number is required.";

/// Parsed nearby-search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub origin: GeoPoint,
    pub radius_km: f64,
}

impl NearbyQuery {
    /// Build a query from raw query-string values.
    ///
    /// `latitude` and `longitude` must be present, numeric and finite. `radius`
    /// is lenient: when absent or unparseable it becomes `default_radius_km`.
    /// An `inf` radius is kept and matches every shop.
    ///
    /// ```
    /// use service::nearby::NearbyQuery;
    /// let q = NearbyQuery::from_params(Some(" 28.70 "), Some("77.10"), Some("abc"), 5.0).unwrap();
    /// assert_eq!(q.origin.latitude, 28.70);
    /// assert_eq!(q.radius_km, 5.0);
    /// ```
    pub fn from_params(
        latitude: Option<&str>,
        longitude: Option<&str>,
        radius: Option<&str>,
        default_radius_km: f64,
    ) -> Result<Self, ServiceError> {
        let mut errs = FieldErrors::default();
        let lat = required_number(&mut errs, "latitude", latitude);
        let lon = required_number(&mut errs, "longitude", longitude);
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(ServiceError::Validation(errs));
        };
        let radius_km = radius
            .and_then(|r| r.trim().parse::<f64>().ok())
            .unwrap_or(default_radius_km);
        Ok(Self { origin: GeoPoint::new(lat, lon), radius_km })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn required_number(errs: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<f64> {
    match raw {
        None => {
            errs.add(field, MSG_REQUIRED);
            None
        }
        Some(r) => {
            let parsed = parse_number(r);
            if parsed.is_none() {
                errs.add(field, MSG_INVALID_NUMBER);
            }
            parsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(res: Result<NearbyQuery, ServiceError>) -> FieldErrors {
        match res {
            Err(ServiceError::Validation(e)) => e,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_coordinates_are_required() {
        let errs = field_errors(NearbyQuery::from_params(None, None, None, 5.0));
        assert_eq!(errs.get("latitude"), Some(&[MSG_REQUIRED.to_string()][..]));
        assert_eq!(errs.get("longitude"), Some(&[MSG_REQUIRED.to_string()][..]));
    }

    #[test]
    fn non_numeric_coordinates_fail() {
        let errs = field_errors(NearbyQuery::from_params(Some("north"), Some("77.1"), None, 5.0));
        assert_eq!(errs.get("latitude"), Some(&[MSG_INVALID_NUMBER.to_string()][..]));
        assert!(!errs.contains("longitude"));

        let errs = field_errors(NearbyQuery::from_params(Some("NaN"), Some(""), None, 5.0));
        assert!(errs.contains("latitude") && errs.contains("longitude"));
    }

    #[test]
    fn radius_falls_back_silently() -> Result<(), ServiceError> {
        for raw in [None, Some("abc"), Some(""), Some("5km")] {
            let q = NearbyQuery::from_params(Some("1"), Some("2"), raw, 5.0)?;
            assert_eq!(q.radius_km, 5.0, "radius {raw:?}");
        }
        let q = NearbyQuery::from_params(Some("1"), Some("2"), Some(" 0.25 "), 5.0)?;
        assert_eq!(q.radius_km, 0.25);
        Ok(())
    }

    #[test]
    fn infinite_radius_is_kept() -> Result<(), ServiceError> {
        for raw in ["inf", "Infinity", " +inf "] {
            let q = NearbyQuery::from_params(Some("1"), Some("2"), Some(raw), 5.0)?;
            assert_eq!(q.radius_km, f64::INFINITY, "radius {raw:?}");
        }
        Ok(())
    }

    #[test]
    fn coordinates_out_of_range_are_accepted() -> Result<(), ServiceError> {
        let q = NearbyQuery::from_params(Some("123"), Some("-400"), Some("0"), 5.0)?;
        assert_eq!(q.origin, GeoPoint::new(123.0, -400.0));
        assert_eq!(q.radius_km, 0.0);
        Ok(())
    }
}
