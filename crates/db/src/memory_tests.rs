//! Tests for `MemoryStore`: it has to honour the same rules as the real
//! schema, otherwise workflow tests built on it prove nothing.

use chrono::NaiveDate;

use crate::memory::Tables;
use crate::models::{
    CarRow, ClosedRequestRow, CustomerRow, NewClosure, NewCustomer, NewMechanic,
    NewServiceRequest, OwnershipRow, ServiceRequestRow,
};
use crate::{DbError, MemoryStore, ShopStore};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn car(vin: &str, year: i32) -> CarRow {
    CarRow {
        vin: vin.into(),
        make: "Ford".into(),
        model: "Focus".into(),
        year,
    }
}

fn customer(id: i32, lname: &str) -> CustomerRow {
    CustomerRow {
        id,
        fname: format!("First{id}"),
        lname: lname.into(),
        phone: "555-0100".into(),
        address: "1 Main St".into(),
    }
}

fn request(rid: i32, customer_id: i32, vin: &str) -> ServiceRequestRow {
    ServiceRequestRow {
        rid,
        customer_id,
        car_vin: vin.into(),
        date: day(2024, 1, 1),
        odometer: 10_000,
        complain: "noise".into(),
    }
}

fn closure(wid: i32, rid: i32, bill: i32) -> ClosedRequestRow {
    ClosedRequestRow {
        wid,
        rid,
        mid: 1,
        date: day(2024, 1, 2),
        comment: "fixed".into(),
        bill,
    }
}

#[tokio::test]
async fn customer_ids_are_row_count_plus_one() {
    let store = MemoryStore::with_tables(
        Tables {
            customers: vec![customer(1, "Ng"), customer(2, "Ng")],
            ..Tables::default()
        },
        day(2024, 5, 1),
    );

    let id = store
        .add_customer(&NewCustomer {
            fname: "Ada".into(),
            lname: "Lovelace".into(),
            phone: "555".into(),
            address: "London".into(),
        })
        .await
        .unwrap();

    assert_eq!(id, 3);
    let row = store.customer(3).await.unwrap().expect("inserted row");
    assert_eq!(row.lname, "Lovelace");
}

#[tokio::test]
async fn mechanic_ids_start_at_one() {
    let store = MemoryStore::new(day(2024, 5, 1));
    let id = store
        .add_mechanic(&NewMechanic { fname: "Al".into(), lname: "Bo".into(), experience: 4 })
        .await
        .unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn duplicate_vin_is_a_constraint_violation() {
    let store = MemoryStore::new(day(2024, 5, 1));
    store.add_car(&car("VIN1", 2001)).await.unwrap();

    let err = store.add_car(&car("VIN1", 1999)).await.unwrap_err();
    assert!(matches!(err, DbError::Constraint(_)));
    assert_eq!(store.snapshot().cars.len(), 1);
    assert_eq!(store.car("VIN1").await.unwrap().unwrap().year, 2001);
}

#[tokio::test]
async fn new_car_request_failure_writes_nothing() {
    let store = MemoryStore::with_tables(
        Tables {
            cars: vec![car("TAKEN", 2010)],
            customers: vec![customer(1, "Ng")],
            ..Tables::default()
        },
        day(2024, 5, 1),
    );

    let req = NewServiceRequest {
        customer_id: 1,
        car_vin: "TAKEN".into(),
        odometer: 100,
        complaint: "rattle".into(),
    };
    let err = store.open_request_for_new_car(&car("TAKEN", 2020), &req).await.unwrap_err();
    assert!(matches!(err, DbError::Constraint(_)));

    let tables = store.snapshot();
    assert!(tables.owns.is_empty());
    assert!(tables.requests.is_empty());
}

#[tokio::test]
async fn new_car_request_links_car_and_dates_request_today() {
    let store = MemoryStore::with_tables(
        Tables { customers: vec![customer(1, "Ng")], ..Tables::default() },
        day(2024, 5, 1),
    );
    let req = NewServiceRequest {
        customer_id: 1,
        car_vin: "NEW1".into(),
        odometer: 42,
        complaint: "brakes".into(),
    };

    let ids = store.open_request_for_new_car(&car("NEW1", 2015), &req).await.unwrap();

    assert_eq!(ids.ownership_id, 1);
    assert_eq!(ids.rid, 1);
    let opened = store.service_request(1).await.unwrap().unwrap();
    assert_eq!(opened.date, day(2024, 5, 1));
    assert_eq!(store.owned_cars(1).await.unwrap()[0].vin, "NEW1");
}

#[tokio::test]
async fn owned_cars_follow_ownership_order_not_vin_order() {
    let store = MemoryStore::with_tables(
        Tables {
            customers: vec![customer(1, "Ng")],
            cars: vec![car("AAA", 2000), car("ZZZ", 2001)],
            owns: vec![
                OwnershipRow { ownership_id: 2, customer_id: 1, car_vin: "AAA".into() },
                OwnershipRow { ownership_id: 1, customer_id: 1, car_vin: "ZZZ".into() },
            ],
            ..Tables::default()
        },
        day(2024, 5, 1),
    );

    let listed = store.owned_cars(1).await.unwrap();
    let vins: Vec<(i64, &str)> = listed.iter().map(|c| (c.position, c.vin.as_str())).collect();
    assert_eq!(vins, vec![(1, "ZZZ"), (2, "AAA")]);
}

#[tokio::test]
async fn second_closure_for_a_request_is_rejected() {
    let store = MemoryStore::with_tables(
        Tables {
            customers: vec![customer(1, "Ng")],
            cars: vec![car("V", 2000)],
            requests: vec![request(1, 1, "V")],
            ..Tables::default()
        },
        day(2024, 5, 1),
    );
    store
        .add_mechanic(&NewMechanic { fname: "M".into(), lname: "K".into(), experience: 1 })
        .await
        .unwrap();
    let closing = NewClosure { rid: 1, mechanic_id: 1, comment: "ok".into(), bill: 80 };

    assert_eq!(store.close_request(&closing).await.unwrap(), 1);
    let err = store.close_request(&closing).await.unwrap_err();
    assert!(matches!(err, DbError::AlreadyClosed(1)));
}

#[tokio::test]
async fn future_dated_request_is_not_on_or_before_today() {
    let mut future = request(1, 1, "V");
    future.date = day(2030, 1, 1);
    let store = MemoryStore::with_tables(
        Tables { requests: vec![future], ..Tables::default() },
        day(2024, 5, 1),
    );

    assert!(!store.request_dated_on_or_before_today(1).await.unwrap());
    store.set_today(day(2030, 1, 1));
    assert!(store.request_dated_on_or_before_today(1).await.unwrap());
}

#[tokio::test]
async fn busy_cars_match_open_count_exactly() {
    // V3 has three open requests, V2 two, V1 three of which one is closed.
    let requests = vec![
        request(1, 1, "V3"),
        request(2, 1, "V3"),
        request(3, 1, "V3"),
        request(4, 1, "V2"),
        request(5, 1, "V2"),
        request(6, 1, "V1"),
        request(7, 1, "V1"),
        request(8, 1, "V1"),
    ];
    let store = MemoryStore::with_tables(
        Tables {
            customers: vec![customer(1, "Ng")],
            cars: vec![car("V1", 2000), car("V2", 2000), car("V3", 2000)],
            requests,
            closures: vec![closure(1, 8, 50)],
            ..Tables::default()
        },
        day(2024, 5, 1),
    );

    let rows = store.cars_with_open_requests(3, 5).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].vin, "V3");

    let rows = store.cars_with_open_requests(2, 5).await.unwrap();
    let vins: Vec<&str> = rows.iter().map(|r| r.vin.as_str()).collect();
    assert_eq!(vins, vec!["V1", "V2"]);

    assert_eq!(store.cars_with_open_requests(2, 1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn total_bill_is_summed_per_customer_and_descending() {
    let store = MemoryStore::with_tables(
        Tables {
            customers: vec![customer(1, "Low"), customer(2, "High"), customer(3, "None")],
            cars: vec![car("V", 2000)],
            requests: vec![request(1, 1, "V"), request(2, 2, "V"), request(3, 2, "V")],
            closures: vec![closure(1, 1, 300), closure(2, 2, 200), closure(3, 3, 250)],
            ..Tables::default()
        },
        day(2024, 5, 1),
    );

    let rows = store.customers_by_total_bill().await.unwrap();
    let totals: Vec<(&str, i64)> = rows.iter().map(|r| (r.lname.as_str(), r.total_bill)).collect();
    assert_eq!(totals, vec![("High", 450), ("Low", 300)]);
}
