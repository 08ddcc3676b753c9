use axum::{extract::State, Json};
use serde::Deserialize;
use service::nearby::{NearbyQuery, NearbyShop};

use crate::{errors::JsonApiError, extract::ApiQuery, routes::auth::ServerState};

/// Raw query-string values; parsing happens in [`NearbyQuery::from_params`].
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyParams {
    /// Query latitude in degrees (required)
    pub latitude: Option<String>,
    /// Query longitude in degrees (required)
    pub longitude: Option<String>,
    /// Search radius in km; falls back to the configured default when absent or not a number
    pub radius: Option<String>,
}

impl NearbyParams {
    /// Collect raw query pairs. A repeated key keeps its last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "latitude" => params.latitude = Some(value),
                "longitude" => params.longitude = Some(value),
                "radius" => params.radius = Some(value),
                _ => {}
            }
        }
        params
    }
}

#[utoipa::path(
    get, path = "/nearby-shops", tag = "nearby",
    params(NearbyParams),
    responses(
        (status = 200, description = "Shops within the radius, nearest first", body = [crate::openapi::NearbyShopDoc]),
        (status = 400, description = "latitude/longitude missing or not a number", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn nearby_shops(
    State(state): State<ServerState>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> Result<Json<Vec<NearbyShop>>, JsonApiError> {
    let params = NearbyParams::from_pairs(pairs);
    let query = NearbyQuery::from_params(
        params.latitude.as_deref(),
        params.longitude.as_deref(),
        params.radius.as_deref(),
        state.default_radius_km,
    )?;
    Ok(Json(state.nearby.search(&query).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn repeated_keys_keep_last_value() {
        let p = NearbyParams::from_pairs(pairs(&[("latitude", "1"), ("latitude", "2"), ("longitude", "3"), ("page", "9")]));
        assert_eq!(p.latitude.as_deref(), Some("2"));
        assert_eq!(p.longitude.as_deref(), Some("3"));
        assert_eq!(p.radius, None);
    }
}
