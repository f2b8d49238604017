//! The `ShopStore` trait — everything the workflow layer may ask of the
//! database — and its Postgres implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::{
    DbError, DbPool,
    models::{
        BusyCarRow, CarRow, ClosedRequestRow, CustomerBillRow, CustomerRow, FleetOwnerRow,
        LowBillRow, MechanicRow, NewCarRequest, NewClosure, NewCustomer, NewMechanic,
        NewServiceRequest, OwnedCarRow, ServiceRequestRow, VintageCarRow,
    },
    repository::{cars, customers, mechanics, reports, requests},
};

/// Gateway contract used by the menu workflows.
///
/// Every write either fully commits or leaves the database untouched.
#[async_trait]
pub trait ShopStore: Send + Sync {
    // ------ Customers / mechanics ------

    /// Insert a customer and return its allocated id.
    async fn add_customer(&self, customer: &NewCustomer) -> Result<i32, DbError>;
    async fn customer(&self, id: i32) -> Result<Option<CustomerRow>, DbError>;
    async fn customers_by_last_name(&self, lname: &str) -> Result<Vec<CustomerRow>, DbError>;

    /// Insert a mechanic and return its allocated id.
    async fn add_mechanic(&self, mechanic: &NewMechanic) -> Result<i32, DbError>;
    async fn mechanic(&self, id: i32) -> Result<Option<MechanicRow>, DbError>;

    // ------ Cars ------

    async fn add_car(&self, car: &CarRow) -> Result<(), DbError>;
    async fn car(&self, vin: &str) -> Result<Option<CarRow>, DbError>;
    async fn owned_cars(&self, customer_id: i32) -> Result<Vec<OwnedCarRow>, DbError>;

    // ------ Service requests ------

    /// Open a request against a car already on file; returns the new rid.
    async fn open_request(&self, request: &NewServiceRequest) -> Result<i32, DbError>;

    /// Register `car`, link it to `request.customer_id`, and open `request`
    /// against it, atomically.
    async fn open_request_for_new_car(
        &self,
        car: &CarRow,
        request: &NewServiceRequest,
    ) -> Result<NewCarRequest, DbError>;

    async fn service_request(&self, rid: i32) -> Result<Option<ServiceRequestRow>, DbError>;

    /// `true` if the request exists and is not dated after today.
    async fn request_dated_on_or_before_today(&self, rid: i32) -> Result<bool, DbError>;

    async fn closure_for(&self, rid: i32) -> Result<Option<ClosedRequestRow>, DbError>;

    /// Close a request; returns the new closure id.
    async fn close_request(&self, closure: &NewClosure) -> Result<i32, DbError>;

    // ------ Reports ------

    async fn bills_below(&self, max_bill: i32) -> Result<Vec<LowBillRow>, DbError>;
    async fn customers_owning_more_than(&self, min_cars: i64) -> Result<Vec<FleetOwnerRow>, DbError>;
    async fn cars_built_before_under_mileage(
        &self,
        before_year: i32,
        max_odometer: i32,
    ) -> Result<Vec<VintageCarRow>, DbError>;
    async fn cars_with_open_requests(
        &self,
        open_requests: i64,
        limit: i64,
    ) -> Result<Vec<BusyCarRow>, DbError>;
    async fn customers_by_total_bill(&self) -> Result<Vec<CustomerBillRow>, DbError>;
}

/// [`ShopStore`] backed by the process-wide Postgres connection.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ShopStore for PgStore {
    #[instrument(skip(self, customer))]
    async fn add_customer(&self, customer: &NewCustomer) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;
        let row = customers::insert_customer(&mut tx, customer).await?;
        tx.commit().await?;
        debug!("inserted customer {}", row.id);
        Ok(row.id)
    }

    async fn customer(&self, id: i32) -> Result<Option<CustomerRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        customers::get_customer(&mut conn, id).await
    }

    async fn customers_by_last_name(&self, lname: &str) -> Result<Vec<CustomerRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        customers::find_by_last_name(&mut conn, lname).await
    }

    #[instrument(skip(self, mechanic))]
    async fn add_mechanic(&self, mechanic: &NewMechanic) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;
        let row = mechanics::insert_mechanic(&mut tx, mechanic).await?;
        tx.commit().await?;
        debug!("inserted mechanic {}", row.id);
        Ok(row.id)
    }

    async fn mechanic(&self, id: i32) -> Result<Option<MechanicRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        mechanics::get_mechanic(&mut conn, id).await
    }

    #[instrument(skip(self, car), fields(vin = %car.vin))]
    async fn add_car(&self, car: &CarRow) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        cars::insert_car(&mut conn, car).await
    }

    async fn car(&self, vin: &str) -> Result<Option<CarRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        cars::get_car(&mut conn, vin).await
    }

    async fn owned_cars(&self, customer_id: i32) -> Result<Vec<OwnedCarRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        cars::list_owned_cars(&mut conn, customer_id).await
    }

    #[instrument(skip(self, request), fields(customer_id = request.customer_id))]
    async fn open_request(&self, request: &NewServiceRequest) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;
        let row = requests::insert_service_request(&mut tx, request).await?;
        tx.commit().await?;
        Ok(row.rid)
    }

    #[instrument(skip(self, car, request), fields(vin = %car.vin, customer_id = request.customer_id))]
    async fn open_request_for_new_car(
        &self,
        car: &CarRow,
        request: &NewServiceRequest,
    ) -> Result<NewCarRequest, DbError> {
        // Dropping `tx` on any early return rolls back all three inserts.
        let mut tx = self.pool.begin().await?;
        cars::insert_car(&mut tx, car).await?;
        let ownership = cars::insert_ownership(&mut tx, request.customer_id, &car.vin).await?;
        let opened = requests::insert_service_request(&mut tx, request).await?;
        tx.commit().await?;

        Ok(NewCarRequest {
            ownership_id: ownership.ownership_id,
            rid: opened.rid,
        })
    }

    async fn service_request(&self, rid: i32) -> Result<Option<ServiceRequestRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        requests::get_service_request(&mut conn, rid).await
    }

    async fn request_dated_on_or_before_today(&self, rid: i32) -> Result<bool, DbError> {
        let mut conn = self.pool.acquire().await?;
        requests::is_dated_on_or_before_today(&mut conn, rid).await
    }

    async fn closure_for(&self, rid: i32) -> Result<Option<ClosedRequestRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        requests::get_closure_for_request(&mut conn, rid).await
    }

    #[instrument(skip(self, closure), fields(rid = closure.rid))]
    async fn close_request(&self, closure: &NewClosure) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;
        let row = requests::insert_closure(&mut tx, closure).await?;
        tx.commit().await?;
        Ok(row.wid)
    }

    async fn bills_below(&self, max_bill: i32) -> Result<Vec<LowBillRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        reports::bills_below(&mut conn, max_bill).await
    }

    async fn customers_owning_more_than(&self, min_cars: i64) -> Result<Vec<FleetOwnerRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        reports::customers_owning_more_than(&mut conn, min_cars).await
    }

    async fn cars_built_before_under_mileage(
        &self,
        before_year: i32,
        max_odometer: i32,
    ) -> Result<Vec<VintageCarRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        reports::cars_built_before_under_mileage(&mut conn, before_year, max_odometer).await
    }

    async fn cars_with_open_requests(
        &self,
        open_requests: i64,
        limit: i64,
    ) -> Result<Vec<BusyCarRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        reports::cars_with_open_requests(&mut conn, open_requests, limit).await
    }

    async fn customers_by_total_bill(&self) -> Result<Vec<CustomerBillRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        reports::customers_by_total_bill(&mut conn).await
    }
}
