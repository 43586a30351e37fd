use axum::Json;
use roundtrip_optimizer::{
    cost_matrix::CostMatrix,
    json::{OptimalRouteRequest, OptimalRouteResponse},
    solver,
};
use tracing::info;

use crate::error::ApiError;

/// `POST /algo`: run the requested TSP algorithm over the submitted
/// matrix and answer with the optimal visiting order.
pub async fn algo_handler(
    Json(body): Json<OptimalRouteRequest>,
) -> Result<Json<OptimalRouteResponse>, ApiError> {
    let algorithm = body.algorithm;

    // numDests must match the matrix shape before anything runs
    let matrix = CostMatrix::from_rows_with_size(body.dist_matrix, body.num_dests)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    info!(%algorithm, num_dests = body.num_dests, "optimal route requested");

    // the genetic solver can run for a while on larger instances
    let route = tokio::task::spawn_blocking(move || solver::optimal_route(algorithm, &matrix))
        .await
        .map_err(|error| ApiError::InternalServerError(error.to_string()))?;

    Ok(Json(OptimalRouteResponse {
        optimal_route: route.into_order(),
        algorithm_used: algorithm.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::app;

    async fn post_algo(body: Value) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/algo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_algo_returns_permutation() {
        let (status, body) = post_algo(json!({
            "numDests": 3,
            "distMatrix": [
                [0.0, 10.0, 1.0],
                [10.0, 0.0, 20.0],
                [1.0, 20.0, 0.0]
            ],
            "algorithm": "MST"
        }))
        .await;

        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["algorithm_used"], "MST");
        assert_eq!(body["optimal_route"], json!([0, 2, 1]));
    }

    #[tokio::test]
    async fn test_genetic_response_is_valid_permutation() {
        let (status, body) = post_algo(json!({
            "numDests": 4,
            "distMatrix": [
                [0.0, 1.0, 2.0, 3.0],
                [1.0, 0.0, 1.0, 2.0],
                [2.0, 1.0, 0.0, 1.0],
                [3.0, 2.0, 1.0, 0.0]
            ],
            "algorithm": "genetic"
        }))
        .await;

        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["algorithm_used"], "genetic");

        let mut route: Vec<u64> = body["optimal_route"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_u64().unwrap())
            .collect();
        assert_eq!(route.len(), 4);
        route.sort_unstable();
        assert_eq!(route, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_num_dests_mismatch_is_bad_request() {
        let (status, _) = post_algo(json!({
            "numDests": 3,
            "distMatrix": [
                [0.0, 1.0],
                [1.0, 0.0]
            ],
            "algorithm": "MST"
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ragged_matrix_is_bad_request() {
        let (status, _) = post_algo(json!({
            "numDests": 2,
            "distMatrix": [
                [0.0, 1.0],
                [1.0]
            ],
            "algorithm": "MST"
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_algorithm_is_rejected() {
        let (status, _) = post_algo(json!({
            "numDests": 2,
            "distMatrix": [
                [0.0, 1.0],
                [1.0, 0.0]
            ],
            "algorithm": "dijkstra"
        }))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
