mod common;

use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use common::{draft, engine, waypoints, Planar, Roads};
use vectura::api::{RouteAPI, StopAPI};
use vectura::config::{Closure, Config};
use vectura::engine::Engine;
use vectura::entities::{ActiveWindow, Coordinates, StopDraft, VelocityRecord};

#[tokio::test]
async fn create_route_prices_the_interpolated_path() {
    let matrix = Arc::new(Planar::default());
    let engine = engine(Roads::Midpoints, matrix.clone(), 2);

    let route = assert_ok!(engine.create_route(draft(waypoints())).await);

    let snapped = vec![
        Coordinates::new(0.0, 0.0),
        Coordinates::new(0.0, 1.0),
        Coordinates::new(0.0, 2.0),
        Coordinates::new(1.0, 2.0),
        Coordinates::new(2.0, 2.0),
    ];
    assert_eq!(route.coords, snapped);
    assert_eq!(*matrix.calls.lock().unwrap(), 3);
    assert_eq!(route.velocities.len(), 5);
    assert_eq!(
        route.velocities[3],
        VelocityRecord::new(snapped[3], snapped[4], 1000.0, 60.0)
    );

    let closing = &route.velocities[4];
    assert_eq!((closing.start, closing.end), (snapped[4], snapped[0]));
    assert!((closing.distance - 8f64.sqrt() * 1000.0).abs() < 1e-9);

    assert_eq!(route.name, "West Route");
    assert_eq!(route.created, route.updated);
}

#[tokio::test]
async fn unavailable_interpolation_falls_back_to_raw_points() {
    for roads in [Roads::Down, Roads::Empty] {
        let engine = engine(roads, Arc::new(Planar::default()), 1);

        let route = assert_ok!(engine.create_route(draft(waypoints())).await);

        assert_eq!(route.coords, waypoints());
        assert_eq!(route.velocities.len(), 3);
    }
}

#[tokio::test]
async fn failed_measurements_are_counted_on_the_route() {
    let matrix = Arc::new(Planar::failing_from(Coordinates::new(0.0, 2.0)));
    let engine = engine(Roads::Midpoints, matrix.clone(), 2);

    let route = assert_ok!(engine.create_route(draft(waypoints())).await);

    assert_eq!(route.unavailable_measurements, 1);
    assert_eq!(*matrix.calls.lock().unwrap(), 3);
    assert_eq!(route.velocities.len(), 5);
    for record in &route.velocities[2..4] {
        assert_eq!((record.distance, record.duration), (0.0, 0.0));
    }
    assert_eq!(route.velocities[0].distance, 1000.0);

    let healthy = common::engine(Roads::Midpoints, Arc::new(Planar::default()), 2);
    let healthy = assert_ok!(healthy.create_route(draft(waypoints())).await);
    assert_eq!(healthy.unavailable_measurements, 0);
}

#[tokio::test]
async fn route_without_points_is_rejected() {
    let matrix = Arc::new(Planar::default());
    let engine = engine(Roads::Midpoints, matrix.clone(), 2);

    let err = assert_err!(engine.create_route(draft(Vec::new())).await);

    assert!(err.is_invalid_input_error());
    assert_eq!(*matrix.calls.lock().unwrap(), 0);
    assert!(assert_ok!(engine.list_routes().await).is_empty());
}

#[tokio::test]
async fn routes_can_be_found_listed_and_deleted() {
    let engine = engine(Roads::Midpoints, Arc::new(Planar::default()), 2);

    let first = assert_ok!(engine.create_route(draft(waypoints())).await);
    let second = assert_ok!(engine.create_route(draft(waypoints())).await);

    assert_eq!(assert_ok!(engine.find_route(second.id).await), second);

    let ids: Vec<Uuid> = assert_ok!(engine.list_routes().await)
        .iter()
        .map(|route| route.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    assert_ok!(engine.delete_route(first.id).await);
    assert!(assert_err!(engine.find_route(first.id).await).is_not_found_error());
    assert!(assert_err!(engine.delete_route(first.id).await).is_not_found_error());
    assert_eq!(assert_ok!(engine.list_routes().await), vec![second]);
}

#[tokio::test]
async fn stops_live_independently_of_routes() {
    let engine = engine(Roads::Midpoints, Arc::new(Planar::default()), 2);
    let route_id = Uuid::new_v4();

    let union = assert_ok!(
        engine
            .create_stop(StopDraft {
                name: "Student Union".into(),
                description: "Shuttle stop in front of the Student Union".into(),
                location: Coordinates::new(42.730075, -73.676554),
                address: "".into(),
                window: ActiveWindow {
                    start_time: "07:00".into(),
                    end_time: "23:00".into(),
                },
                enabled: true,
                route_id,
            })
            .await
    );
    let elsewhere = assert_ok!(
        engine
            .create_stop(StopDraft {
                name: "Blitman".into(),
                description: "".into(),
                location: Coordinates::new(42.731, -73.686),
                address: "".into(),
                window: ActiveWindow::default(),
                enabled: false,
                route_id: Uuid::new_v4(),
            })
            .await
    );

    assert_eq!(assert_ok!(engine.find_stop(union.id).await), union);
    assert_eq!(assert_ok!(engine.list_stops().await).len(), 2);
    assert_eq!(
        assert_ok!(engine.list_route_stops(route_id).await),
        vec![union.clone()]
    );

    assert_ok!(engine.delete_stop(union.id).await);
    assert!(assert_err!(engine.find_stop(union.id).await).is_not_found_error());
    assert_eq!(assert_ok!(engine.list_stops().await), vec![elsewhere]);
}

#[tokio::test]
async fn route_serializes_with_the_tracking_field_names() {
    let engine = engine(Roads::Empty, Arc::new(Planar::default()), 1);
    let route = assert_ok!(engine.create_route(draft(waypoints())).await);

    let json = serde_json::to_value(&route).unwrap();

    assert_eq!(json["coords"][1], serde_json::json!({"lat": 0.0, "lng": 2.0}));
    assert_eq!(json["duration"][0]["origin"], serde_json::json!({"lat": 0.0, "lng": 0.0}));
    assert_eq!(json["duration"][0]["destination"], serde_json::json!({"lat": 0.0, "lng": 2.0}));
    assert!(json.get("startTime").is_some());
    assert!(json.get("created").is_some());
    assert_eq!(json["unavailableMeasurements"], 0);
}

#[test]
fn engine_rejects_invalid_configuration() {
    let mut config = Config::new("key");
    config.threshold = 0;
    assert!(Engine::from_config(&config).is_err());

    config.threshold = 3;
    config.closure = Closure::Open;
    let engine = assert_ok!(Engine::from_config(&config));
    assert_eq!(engine.estimator().threshold(), 3);
    assert_eq!(engine.estimator().closure(), Closure::Open);
}
