use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::health::RootResponse;
use crate::cache::CacheStatus;
use crate::propagate::PositionSample;
use crate::trajectory::OrbitPoint;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::health::root,
        super::api::health::status,
        super::api::satellites::list_satellites,
        super::api::orbits::satellite_orbit,
    ),
    components(
        schemas(
            PositionSample,
            OrbitPoint,
            CacheStatus,
            ErrorResponse,
            RootResponse,
        )
    ),
    info(
        title = "Satellite Position API",
        description = "Cached satellite ground positions, future ground tracks and a \
                       WebSocket stream at /ws/satellite_positions",
        version = "0.1.0"
    ),
    tags(
        (name = "health", description = "Liveness and cache status"),
        (name = "satellites", description = "Satellite positions and orbits")
    )
)]
pub struct ApiDoc;
