//! `MemoryStore` — an in-process [`ShopStore`] used as a test double.
//!
//! It applies the same rules as the Postgres schema (count + 1 ids, unique
//! VINs, foreign keys, one closure per request) so workflow tests can run
//! without a database.  "Today" is fixed at construction and can be moved.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    DbError, ShopStore,
    models::{
        BusyCarRow, CarRow, ClosedRequestRow, CustomerBillRow, CustomerRow, FleetOwnerRow,
        LowBillRow, MechanicRow, NewCarRequest, NewClosure, NewCustomer, NewMechanic,
        NewServiceRequest, OwnedCarRow, OwnershipRow, ServiceRequestRow, VintageCarRow,
    },
};

/// Raw table contents, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    pub customers: Vec<CustomerRow>,
    pub mechanics: Vec<MechanicRow>,
    pub cars: Vec<CarRow>,
    pub owns: Vec<OwnershipRow>,
    pub requests: Vec<ServiceRequestRow>,
    pub closures: Vec<ClosedRequestRow>,
}

impl Tables {
    fn next_id(len: usize) -> i32 {
        len as i32 + 1
    }

    fn customer_exists(&self, id: i32) -> bool {
        self.customers.iter().any(|c| c.id == id)
    }

    fn car_exists(&self, vin: &str) -> bool {
        self.cars.iter().any(|c| c.vin == vin)
    }

    fn check_new_car(&self, car: &CarRow) -> Result<(), DbError> {
        if self.car_exists(&car.vin) {
            return Err(DbError::Constraint(format!(
                "duplicate key value violates unique constraint \"car_pkey\" (vin={})",
                car.vin
            )));
        }
        Ok(())
    }

    fn check_request(&self, request: &NewServiceRequest, car_pending: bool) -> Result<(), DbError> {
        if !self.customer_exists(request.customer_id) {
            return Err(fk_violation("service_request", "customer_id"));
        }
        if !car_pending && !self.car_exists(&request.car_vin) {
            return Err(fk_violation("service_request", "car_vin"));
        }
        Ok(())
    }

    fn push_request(&mut self, request: &NewServiceRequest, today: NaiveDate) -> i32 {
        let rid = Self::next_id(self.requests.len());
        self.requests.push(ServiceRequestRow {
            rid,
            customer_id: request.customer_id,
            car_vin: request.car_vin.clone(),
            date: today,
            odometer: request.odometer,
            complain: request.complaint.clone(),
        });
        rid
    }

    fn customer_name(&self, id: i32) -> Option<(&str, &str)> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| (c.fname.as_str(), c.lname.as_str()))
    }
}

fn fk_violation(table: &str, column: &str) -> DbError {
    DbError::Constraint(format!(
        "insert or update on table \"{table}\" violates foreign key constraint on \"{column}\""
    ))
}

#[derive(Debug)]
struct State {
    tables: Tables,
    today: NaiveDate,
}

/// A [`ShopStore`] holding its tables in memory.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// An empty store whose current date is `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_tables(Tables::default(), today)
    }

    /// A store pre-loaded with fixture rows.
    pub fn with_tables(tables: Tables, today: NaiveDate) -> Self {
        Self {
            state: Mutex::new(State { tables, today }),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.state.lock().unwrap().today = today;
    }

    /// Copy of the current table contents.
    pub fn snapshot(&self) -> Tables {
        self.state.lock().unwrap().tables.clone()
    }

    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut *state)
    }
}

#[async_trait]
impl ShopStore for MemoryStore {
    async fn add_customer(&self, customer: &NewCustomer) -> Result<i32, DbError> {
        self.with(|s| {
            let id = Tables::next_id(s.tables.customers.len());
            s.tables.customers.push(CustomerRow {
                id,
                fname: customer.fname.clone(),
                lname: customer.lname.clone(),
                phone: customer.phone.clone(),
                address: customer.address.clone(),
            });
            Ok(id)
        })
    }

    async fn customer(&self, id: i32) -> Result<Option<CustomerRow>, DbError> {
        self.with(|s| Ok(s.tables.customers.iter().find(|c| c.id == id).cloned()))
    }

    async fn customers_by_last_name(&self, lname: &str) -> Result<Vec<CustomerRow>, DbError> {
        self.with(|s| {
            Ok(s.tables
                .customers
                .iter()
                .filter(|c| c.lname == lname)
                .cloned()
                .collect())
        })
    }

    async fn add_mechanic(&self, mechanic: &NewMechanic) -> Result<i32, DbError> {
        self.with(|s| {
            let id = Tables::next_id(s.tables.mechanics.len());
            s.tables.mechanics.push(MechanicRow {
                id,
                fname: mechanic.fname.clone(),
                lname: mechanic.lname.clone(),
                experience: mechanic.experience,
            });
            Ok(id)
        })
    }

    async fn mechanic(&self, id: i32) -> Result<Option<MechanicRow>, DbError> {
        self.with(|s| Ok(s.tables.mechanics.iter().find(|m| m.id == id).cloned()))
    }

    async fn add_car(&self, car: &CarRow) -> Result<(), DbError> {
        self.with(|s| {
            s.tables.check_new_car(car)?;
            s.tables.cars.push(car.clone());
            Ok(())
        })
    }

    async fn car(&self, vin: &str) -> Result<Option<CarRow>, DbError> {
        self.with(|s| Ok(s.tables.cars.iter().find(|c| c.vin == vin).cloned()))
    }

    async fn owned_cars(&self, customer_id: i32) -> Result<Vec<OwnedCarRow>, DbError> {
        self.with(|s| {
            let mut owns: Vec<&OwnershipRow> = s
                .tables
                .owns
                .iter()
                .filter(|o| o.customer_id == customer_id)
                .collect();
            owns.sort_by_key(|o| o.ownership_id);

            Ok(owns
                .into_iter()
                .filter_map(|o| s.tables.cars.iter().find(|c| c.vin == o.car_vin))
                .enumerate()
                .map(|(i, car)| OwnedCarRow {
                    position: i as i64 + 1,
                    vin: car.vin.clone(),
                    make: car.make.clone(),
                    model: car.model.clone(),
                    year: car.year,
                })
                .collect())
        })
    }

    async fn open_request(&self, request: &NewServiceRequest) -> Result<i32, DbError> {
        self.with(|s| {
            s.tables.check_request(request, false)?;
            let today = s.today;
            Ok(s.tables.push_request(request, today))
        })
    }

    async fn open_request_for_new_car(
        &self,
        car: &CarRow,
        request: &NewServiceRequest,
    ) -> Result<NewCarRequest, DbError> {
        self.with(|s| {
            // Validate everything up front so a failure writes nothing.
            s.tables.check_new_car(car)?;
            if request.car_vin != car.vin {
                return Err(fk_violation("service_request", "car_vin"));
            }
            s.tables.check_request(request, true)?;

            s.tables.cars.push(car.clone());
            let ownership_id = Tables::next_id(s.tables.owns.len());
            s.tables.owns.push(OwnershipRow {
                ownership_id,
                customer_id: request.customer_id,
                car_vin: car.vin.clone(),
            });
            let today = s.today;
            let rid = s.tables.push_request(request, today);
            Ok(NewCarRequest { ownership_id, rid })
        })
    }

    async fn service_request(&self, rid: i32) -> Result<Option<ServiceRequestRow>, DbError> {
        self.with(|s| Ok(s.tables.requests.iter().find(|r| r.rid == rid).cloned()))
    }

    async fn request_dated_on_or_before_today(&self, rid: i32) -> Result<bool, DbError> {
        self.with(|s| {
            Ok(s.tables
                .requests
                .iter()
                .any(|r| r.rid == rid && r.date <= s.today))
        })
    }

    async fn closure_for(&self, rid: i32) -> Result<Option<ClosedRequestRow>, DbError> {
        self.with(|s| Ok(s.tables.closures.iter().find(|c| c.rid == rid).cloned()))
    }

    async fn close_request(&self, closure: &NewClosure) -> Result<i32, DbError> {
        self.with(|s| {
            if !s.tables.requests.iter().any(|r| r.rid == closure.rid) {
                return Err(fk_violation("closed_request", "rid"));
            }
            if !s.tables.mechanics.iter().any(|m| m.id == closure.mechanic_id) {
                return Err(fk_violation("closed_request", "mid"));
            }
            if s.tables.closures.iter().any(|c| c.rid == closure.rid) {
                return Err(DbError::AlreadyClosed(closure.rid));
            }
            let wid = Tables::next_id(s.tables.closures.len());
            s.tables.closures.push(ClosedRequestRow {
                wid,
                rid: closure.rid,
                mid: closure.mechanic_id,
                date: s.today,
                comment: closure.comment.clone(),
                bill: closure.bill,
            });
            Ok(wid)
        })
    }

    async fn bills_below(&self, max_bill: i32) -> Result<Vec<LowBillRow>, DbError> {
        self.with(|s| {
            let t = &s.tables;
            Ok(t.closures
                .iter()
                .filter(|c| c.bill < max_bill)
                .filter_map(|c| {
                    let request = t.requests.iter().find(|r| r.rid == c.rid)?;
                    let (fname, lname) = t.customer_name(request.customer_id)?;
                    Some(LowBillRow {
                        fname: fname.to_owned(),
                        lname: lname.to_owned(),
                        bill: c.bill,
                        date: request.date,
                        comment: c.comment.clone(),
                    })
                })
                .collect())
        })
    }

    async fn customers_owning_more_than(&self, min_cars: i64) -> Result<Vec<FleetOwnerRow>, DbError> {
        self.with(|s| {
            let t = &s.tables;
            let mut counts: HashMap<i32, i64> = HashMap::new();
            for o in &t.owns {
                *counts.entry(o.customer_id).or_insert(0) += 1;
            }
            Ok(t.customers
                .iter()
                .filter_map(|c| {
                    let n = counts.get(&c.id).copied()?;
                    (n > min_cars).then(|| FleetOwnerRow {
                        fname: c.fname.clone(),
                        lname: c.lname.clone(),
                        num_cars: n,
                    })
                })
                .collect())
        })
    }

    async fn cars_built_before_under_mileage(
        &self,
        before_year: i32,
        max_odometer: i32,
    ) -> Result<Vec<VintageCarRow>, DbError> {
        self.with(|s| {
            let t = &s.tables;
            Ok(t.requests
                .iter()
                .filter(|r| r.odometer < max_odometer)
                .filter_map(|r| {
                    let car = t.cars.iter().find(|c| c.vin == r.car_vin)?;
                    (car.year < before_year).then(|| VintageCarRow {
                        make: car.make.clone(),
                        model: car.model.clone(),
                        year: car.year,
                        odometer: r.odometer,
                    })
                })
                .collect())
        })
    }

    async fn cars_with_open_requests(
        &self,
        open_requests: i64,
        limit: i64,
    ) -> Result<Vec<BusyCarRow>, DbError> {
        self.with(|s| {
            let t = &s.tables;
            let mut counts: HashMap<&str, i64> = HashMap::new();
            for r in &t.requests {
                if !t.closures.iter().any(|c| c.rid == r.rid) {
                    *counts.entry(r.car_vin.as_str()).or_insert(0) += 1;
                }
            }
            let mut rows: Vec<BusyCarRow> = t
                .cars
                .iter()
                .filter_map(|car| {
                    let n = counts.get(car.vin.as_str()).copied()?;
                    (n == open_requests).then(|| BusyCarRow {
                        make: car.make.clone(),
                        model: car.model.clone(),
                        vin: car.vin.clone(),
                        open_requests: n,
                    })
                })
                .collect();
            rows.sort_by(|a, b| b.open_requests.cmp(&a.open_requests).then(a.vin.cmp(&b.vin)));
            rows.truncate(usize::try_from(limit).unwrap_or(0));
            Ok(rows)
        })
    }

    async fn customers_by_total_bill(&self) -> Result<Vec<CustomerBillRow>, DbError> {
        self.with(|s| {
            let t = &s.tables;
            let mut totals: HashMap<i32, i64> = HashMap::new();
            for c in &t.closures {
                if let Some(request) = t.requests.iter().find(|r| r.rid == c.rid) {
                    *totals.entry(request.customer_id).or_insert(0) += i64::from(c.bill);
                }
            }
            let mut rows: Vec<(i32, CustomerBillRow)> = t
                .customers
                .iter()
                .filter_map(|c| {
                    let total = totals.get(&c.id).copied()?;
                    Some((
                        c.id,
                        CustomerBillRow {
                            fname: c.fname.clone(),
                            lname: c.lname.clone(),
                            total_bill: total,
                        },
                    ))
                })
                .collect();
            rows.sort_by(|(a_id, a), (b_id, b)| b.total_bill.cmp(&a.total_bill).then(a_id.cmp(b_id)));
            Ok(rows.into_iter().map(|(_, row)| row).collect())
        })
    }
}
