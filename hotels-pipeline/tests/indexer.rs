//! Integration tests for the location indexer and proximity queries against
//! an in-memory SQLite store.

mod common;

use common::stores;
use hotels_pipeline::errors::IndexerError;
use hotels_pipeline::indexer::{by_location, register_processors};
use hotels_pipeline::{Indexer, Queue, Worker, WorkerConfig};
use hotels_repository::{HotelRepository, LocationRepository, SqliteLocationRepository};
use hotels_shared::{HotelData, HotelPart, Job, Location, PartName, QueryRequest};
use serde_json::{json, Value};

const KLADNO: (f64, f64) = (50.1426281, 14.1131347);

fn hotel_at(lat: Value, lng: Value) -> HotelData {
    HotelData::empty("0xdummy").with_part(
        PartName::Description,
        json!({ "location": { "latitude": lat, "longitude": lng } }),
    )
}

async fn seed(locations: &SqliteLocationRepository, rows: &[(&str, f64, f64)]) {
    for (address, lat, lng) in rows {
        locations
            .upsert(&Location::new(*address, *lat, *lng))
            .await
            .unwrap();
    }
}

fn addresses(matches: &[hotels_repository::LocationMatch]) -> Vec<&str> {
    matches
        .iter()
        .map(|m| m.location.hotel_address.as_str())
        .collect()
}

#[tokio::test]
async fn test_index_hotel_creates_location() {
    let (_hotels, locations) = stores().await;
    let indexer = Indexer::new(locations.clone());

    indexer.index_hotel(&hotel_at(json!(40), json!(40))).await.unwrap();

    assert_eq!(
        locations.get("0xdummy").await.unwrap(),
        Some(Location::new("0xdummy", 40.0, 40.0))
    );
}

#[tokio::test]
async fn test_index_hotel_overwrites_location() {
    let (_hotels, locations) = stores().await;
    let indexer = Indexer::new(locations.clone());
    locations
        .upsert(&Location::new("0xdummy", 40.0, 40.0))
        .await
        .unwrap();

    indexer.index_hotel(&hotel_at(json!(80), json!(80))).await.unwrap();
    indexer.index_hotel(&hotel_at(json!(80), json!(80))).await.unwrap();

    let all = locations.search(&[], None, None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].location, Location::new("0xdummy", 80.0, 80.0));
}

#[tokio::test]
async fn test_index_hotel_without_location_creates_nothing() {
    let (_hotels, locations) = stores().await;
    let indexer = Indexer::new(locations.clone());

    let hotel = HotelData::empty("0xdummy").with_part(PartName::Description, json!({}));
    indexer.index_hotel(&hotel).await.unwrap();

    assert!(locations.search(&[], None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_index_hotel_removes_stale_location() {
    let (_hotels, locations) = stores().await;
    let indexer = Indexer::new(locations.clone());

    indexer.index_hotel(&hotel_at(json!(10), json!(10))).await.unwrap();
    assert!(locations.get("0xdummy").await.unwrap().is_some());

    indexer.index_hotel(&HotelData::empty("0xdummy")).await.unwrap();
    assert!(locations.get("0xdummy").await.unwrap().is_none());

    indexer
        .index_hotel(&hotel_at(json!("north"), json!(10)))
        .await
        .unwrap();
    assert!(locations.get("0xdummy").await.unwrap().is_none());
}

#[tokio::test]
async fn test_index_hotel_requires_address() {
    let (_hotels, locations) = stores().await;
    let indexer = Indexer::new(locations);

    let result = indexer.index_hotel(&HotelData::empty("")).await;
    assert!(matches!(result, Err(IndexerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_index_hotel_job_reads_the_permanent_store() {
    let (hotels, locations) = stores().await;
    hotels
        .upsert(&[HotelPart::new(
            "0xdummy",
            PartName::Description,
            json!({ "location": { "latitude": 50.0, "longitude": 14.0 } }),
        )])
        .await
        .unwrap();

    let (queue, _receiver) = Queue::new();
    let mut worker = Worker::new(queue, WorkerConfig::default());
    register_processors(&mut worker, hotels.clone(), Indexer::new(locations.clone())).unwrap();

    worker.dispatch(&Job::index_hotel("0xdummy")).await.unwrap();
    assert_eq!(
        locations.get("0xdummy").await.unwrap(),
        Some(Location::new("0xdummy", 50.0, 14.0))
    );

    hotels.delete("0xdummy").await.unwrap();
    worker.dispatch(&Job::index_hotel("0xdummy")).await.unwrap();
    assert!(locations.get("0xdummy").await.unwrap().is_none());
}

#[tokio::test]
async fn test_location_filter_selects_nearby_hotels() {
    let (_hotels, locations) = stores().await;
    seed(
        &locations,
        &[
            ("0xberoun", 49.9645147, 14.0650694),
            ("0xpraha", 50.0682006, 14.4180053),
            ("0xberlin", 52.5137886, 13.4202919),
        ],
    )
    .await;

    // Everything under 30 km from Kladno.
    let filter = by_location::location_filter(KLADNO.0, KLADNO.1, 30.0);
    let results = locations.search(&[filter], None, None).await.unwrap();
    assert_eq!(addresses(&results), vec!["0xberoun", "0xpraha"]);
}

#[tokio::test]
async fn test_distance_sorting_orders_by_proximity() {
    let (_hotels, locations) = stores().await;
    seed(
        &locations,
        &[
            ("0xpraha", 50.0682006, 14.4180053),
            ("0xvladivostok", 43.1125328, 131.9291211),
            ("0xparis", 48.8576236, 2.3375003),
            ("0xberlin", 52.5137886, 13.4202919),
            ("0xslany", 50.2317808, 14.0844553),
            ("0xlondon", 51.4973892, 0.1053164),
        ],
    )
    .await;

    let sorting = by_location::distance_sorting(KLADNO.0, KLADNO.1);
    let results = locations.search(&[], Some(&sorting), None).await.unwrap();
    assert_eq!(
        addresses(&results),
        vec![
            "0xslany",
            "0xpraha",
            "0xberlin",
            "0xparis",
            "0xlondon",
            "0xvladivostok",
        ]
    );
}

#[tokio::test]
async fn test_distance_score_approximates_kilometers() {
    let (_hotels, locations) = stores().await;
    seed(
        &locations,
        &[
            ("0xpraha", 50.0682006, 14.4180053),
            ("0xslany", 50.2317808, 14.0844553),
            ("0xlouny", 50.3536783, 13.8087147),
        ],
    )
    .await;

    let sorting = by_location::distance_sorting(KLADNO.0, KLADNO.1);
    let results = locations.search(&[], Some(&sorting), None).await.unwrap();

    // Distances measured on a map: Slaný, Praha, Louny.
    let expected = [10.14, 23.26, 31.93];
    assert_eq!(results.len(), expected.len());
    for (result, expected) in results.iter().zip(expected) {
        let score = result.score.unwrap();
        assert!(
            (score - expected).abs() < 0.2,
            "{} scored {score}, expected {expected}",
            result.location.hotel_address
        );
    }
}

#[tokio::test]
async fn test_search_compiles_query_requests() {
    let (_hotels, locations) = stores().await;
    seed(
        &locations,
        &[
            ("0xberoun", 49.9645147, 14.0650694),
            ("0xpraha", 50.0682006, 14.4180053),
            ("0xslany", 50.2317808, 14.0844553),
            ("0xberlin", 52.5137886, 13.4202919),
        ],
    )
    .await;
    let indexer = Indexer::new(locations);

    let query: QueryRequest = serde_json::from_value(json!({
        "filters": [
            {
                "type": "location",
                "condition": { "lat": KLADNO.0, "lng": KLADNO.1, "distance": 30 }
            },
            { "type": "dummy", "condition": { "dummy": "dummy" } },
        ],
        "sorting": { "type": "distance", "data": { "lat": KLADNO.0, "lng": KLADNO.1 } },
    }))
    .unwrap();
    let results = indexer.search(&query, Some(2)).await.unwrap();
    assert_eq!(addresses(&results), vec!["0xslany", "0xberoun"]);
    assert!(results.iter().all(|m| m.score.is_some()));

    let malformed: QueryRequest = serde_json::from_value(json!({
        "filters": [{ "type": "location", "condition": { "lat": 1 } }],
    }))
    .unwrap();
    assert!(matches!(
        indexer.search(&malformed, None).await,
        Err(IndexerError::Validation(_))
    ));
}
