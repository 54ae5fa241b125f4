mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{fleet_service, reference_store};
use rentxotic_fleet::config::rules::FleetRules;
use rentxotic_fleet::models::task::TaskUpdate;
use rentxotic_fleet::models::vehicle::{VehicleCondition, VehicleStatus, VehicleUpdate};
use rentxotic_fleet::utils::errors::AppError;

#[tokio::test]
async fn test_mark_ready_applies_rule() {
    let store = Arc::new(reference_store());
    let fleet = fleet_service(store.clone(), FleetRules::classic());

    fleet.mark_ready(3).await.unwrap();

    let rolls = store.vehicle(3);
    assert_eq!(rolls.status, VehicleStatus::Available);
    assert_eq!(rolls.fuel_level, 80);
    assert_eq!(rolls.condition, VehicleCondition::Excellent);
    assert!(rolls.issues.is_empty());
}

#[tokio::test]
async fn test_service_preset_keeps_wash_issue_on_ready() {
    let store = Arc::new(reference_store());
    let fleet = fleet_service(store.clone(), FleetRules::service());

    fleet.mark_ready(3).await.unwrap();
    assert_eq!(store.vehicle(3).issues, vec!["Needs Wash".to_string()]);

    fleet.mark_washed(3).await.unwrap();
    let rolls = store.vehicle(3);
    assert!(rolls.washed);
    assert!(rolls.last_wash.is_some());
    assert!(rolls.issues.is_empty());
}

#[tokio::test]
async fn test_refresh_all_fuel_stays_in_range() {
    let store = Arc::new(reference_store());
    let fleet = fleet_service(store.clone(), FleetRules::classic());

    let outcome = fleet.refresh_all_fuel().await.unwrap();
    assert!(outcome.is_complete());
    assert_eq!(outcome.updated.len(), 3);

    for (id, before) in [(1, 10), (2, 20), (3, 80)] {
        let fuel = store.vehicle(id).fuel_level;
        assert!((10..=100).contains(&fuel));
        assert!((fuel - before).abs() <= 10, "vehicle {} moved from {} to {}", id, before, fuel);
    }
}

#[tokio::test]
async fn test_generic_update_passes_completion_through() {
    let store = Arc::new(reference_store());
    let fleet = fleet_service(store.clone(), FleetRules::classic());

    let update = TaskUpdate {
        completed: Some(true),
        ..Default::default()
    };
    fleet.update_task(1, update).await.unwrap();

    let task = store.task(1);
    assert!(task.completed);
    assert!(task.completed_at.is_none());
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let store = Arc::new(reference_store());
    store.fail_updates_for(1);
    let fleet = fleet_service(store.clone(), FleetRules::classic());

    fleet.vehicles().await.unwrap();
    let result = fleet.mark_ready(1).await;
    assert!(matches!(result, Err(AppError::ExternalApi(_))));
    assert_eq!(fleet.cache_stats().await.invalidations, 0);
}

#[tokio::test]
async fn test_stale_snapshot_served_when_store_is_down() {
    let store = Arc::new(reference_store());
    let fleet = fleet_service(store.clone(), FleetRules::classic());

    let before = fleet.stats().await.unwrap();
    fleet.refresh().await;
    store.set_offline(true);

    let after = fleet.stats().await.unwrap();
    assert_eq!(before, after);

    let stats = fleet.cache_stats().await;
    assert_eq!(stats.stale_served, 2);
}

#[tokio::test]
async fn test_cold_cache_with_store_down_fails() {
    let store = Arc::new(reference_store());
    store.set_offline(true);
    let fleet = fleet_service(store, FleetRules::classic());

    assert!(matches!(fleet.alerts().await, Err(AppError::ExternalApi(_))));
}

#[tokio::test]
async fn test_delete_unknown_task_is_not_found() {
    let store = Arc::new(reference_store());
    let fleet = fleet_service(store, FleetRules::classic());

    assert!(matches!(fleet.delete_task(77).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_update_during_vehicle_read_is_not_lost() {
    let store = Arc::new(reference_store());
    let fleet = Arc::new(fleet_service(store.clone(), FleetRules::classic()));

    let (started, release) = store.gate_next_vehicle_read();
    let reader = {
        let fleet = fleet.clone();
        tokio::spawn(async move { fleet.vehicles().await })
    };
    started.await.unwrap();

    let update = VehicleUpdate {
        status: Some(VehicleStatus::Rented),
        ..Default::default()
    };
    fleet.update_vehicle(1, update).await.unwrap();
    release.send(()).unwrap();

    // El lector en vuelo devuelve su snapshot previo a la mutación
    let old = reader.await.unwrap().unwrap();
    assert_eq!(old[0].status, VehicleStatus::Available);

    let vehicles = fleet.vehicles().await.unwrap();
    assert_eq!(vehicles[0].status, VehicleStatus::Rented);
    assert_eq!(store.vehicle_reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_task_reassignment_checks_vehicle() {
    let store = Arc::new(reference_store());
    let fleet = fleet_service(store.clone(), FleetRules::classic());

    let update = TaskUpdate {
        vehicle_id: Some(999),
        ..Default::default()
    };
    assert!(matches!(fleet.update_task(1, update).await, Err(AppError::NotFound(_))));
    assert_eq!(store.task(1).vehicle_id, 1);

    let update = TaskUpdate {
        vehicle_id: Some(2),
        vehicle_name: Some("Lamborghini Huracán".to_string()),
        ..Default::default()
    };
    fleet.update_task(1, update).await.unwrap();

    let task = store.task(1);
    assert_eq!(task.vehicle_id, 2);
    assert_eq!(task.vehicle_name, "Lamborghini Huracán");
}
