//! InsertServiceRequest and CloseServiceRequest.

use console::Prompt;
use db::models::{NewClosure, NewServiceRequest};
use tracing::{debug, info, instrument};

use crate::{Session, ShopError};

/// Car selection meaning "register a new car" rather than a listed one.
pub const NEW_CAR_SELECTION: i32 = 0;

/// How an InsertServiceRequest run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A request was opened.
    Opened {
        rid: i32,
        customer_id: i32,
        car_vin: String,
        /// The car was registered as part of this request.
        new_car: bool,
    },
    /// Nobody had the last name; a customer was created instead.
    CustomerCreated(i32),
    /// Nobody had the last name and the user chose not to add one.
    Declined,
}

impl Session<'_> {
    /// Find the customer, pick or register their car, then open a request.
    ///
    /// Car registration, ownership and the request itself are written in a
    /// single transaction.
    #[instrument(skip(self))]
    pub async fn insert_service_request(&mut self) -> Result<RequestOutcome, ShopError> {
        let lname = self.console.ask("What is the customer's last name?: ")?;
        let matches = self.store.customers_by_last_name(lname.trim()).await?;
        self.print_rows(&matches)?;

        if matches.is_empty() {
            let add = self.console.confirm(
                "That last name does not belong to a current customer. Add a new customer? (y/n): ",
            )?;
            if !add {
                self.say("Maybe next time!")?;
                return Ok(RequestOutcome::Declined);
            }
            let id = self.add_customer().await?;
            return Ok(RequestOutcome::CustomerCreated(id));
        }

        let customer_id = self.console.ask_i32("Enter the customer's ID number: ")?;
        if !matches.iter().any(|c| c.id == customer_id) {
            return Err(ShopError::UnknownCustomer(customer_id));
        }

        let cars = self.store.owned_cars(customer_id).await?;
        self.print_rows(&cars)?;
        let selection = self.console.ask_i32(&format!(
            "Which car is being serviced? ({NEW_CAR_SELECTION} to register a new car): "
        ))?;

        if selection == NEW_CAR_SELECTION {
            let car = self.ask_car()?;
            let request = self.ask_request(customer_id, car.vin.clone())?;
            let ids = self.store.open_request_for_new_car(&car, &request).await?;
            debug!(ownership_id = ids.ownership_id, "car linked to customer");
            info!(rid = ids.rid, vin = %car.vin, "service request opened for new car");
            self.say(&format!("Car {} added for customer {customer_id}.", car.vin))?;
            self.say(&format!("Service request {} opened.", ids.rid))?;
            return Ok(RequestOutcome::Opened {
                rid: ids.rid,
                customer_id,
                car_vin: car.vin,
                new_car: true,
            });
        }

        let chosen = usize::try_from(selection)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| cars.get(i))
            .ok_or(ShopError::SelectionOutOfRange {
                selection,
                listed: cars.len(),
            })?;
        let car_vin = chosen.vin.clone();

        let request = self.ask_request(customer_id, car_vin.clone())?;
        let rid = self.store.open_request(&request).await?;
        info!(rid = rid, vin = %car_vin, "service request opened");
        self.say(&format!("Service request {rid} opened."))?;
        Ok(RequestOutcome::Opened {
            rid,
            customer_id,
            car_vin,
            new_car: false,
        })
    }

    fn ask_request(&mut self, customer_id: i32, car_vin: String) -> Result<NewServiceRequest, ShopError> {
        let odometer = self
            .console
            .ask_non_negative("Enter the car's current mileage: ")?;
        let complaint = self
            .console
            .ask("Describe the customer's complaint: ")?;
        Ok(NewServiceRequest {
            customer_id,
            car_vin,
            odometer,
            complaint,
        })
    }

    /// Close a service request and bill it.
    ///
    /// Checks, in order, that the mechanic exists, the request exists, the
    /// request is not dated in the future, and it is not already closed.
    /// The first failing check aborts before anything is written.
    #[instrument(skip(self))]
    pub async fn close_service_request(&mut self) -> Result<i32, ShopError> {
        let rid = self
            .console
            .ask_i32("Enter the service request ID: ")?;
        let mechanic_id = self.console.ask_i32("Enter the mechanic's ID number: ")?;
        let comment = self
            .console
            .ask("Enter any comments about this service request: ")?;
        let bill = self
            .console
            .ask_non_negative("Enter the total bill for this service request: ")?;

        if self.store.mechanic(mechanic_id).await?.is_none() {
            return Err(ShopError::UnknownMechanic(mechanic_id));
        }
        if self.store.service_request(rid).await?.is_none() {
            return Err(ShopError::UnknownServiceRequest(rid));
        }
        if !self.store.request_dated_on_or_before_today(rid).await? {
            return Err(ShopError::FutureDatedRequest(rid));
        }
        if self.store.closure_for(rid).await?.is_some() {
            return Err(ShopError::AlreadyClosed(rid));
        }

        let wid = self
            .store
            .close_request(&NewClosure {
                rid,
                mechanic_id,
                comment,
                bill,
            })
            .await?;
        info!(rid = rid, wid = wid, "service request closed");
        self.say(&format!("Service request {rid} closed (closure {wid})."))?;
        Ok(wid)
    }
}
