//! AddCar, plus the car-details prompt shared with InsertServiceRequest.

use console::Prompt;
use db::models::CarRow;
use tracing::{info, instrument};

use crate::{Session, ShopError};

impl Session<'_> {
    /// Prompt for a car and insert it.
    ///
    /// VIN uniqueness is left to the database; a duplicate comes back as a
    /// constraint error.
    #[instrument(skip(self))]
    pub async fn add_car(&mut self) -> Result<String, ShopError> {
        let car = self.ask_car()?;
        self.store.add_car(&car).await?;
        info!(vin = %car.vin, "car added");
        self.say(&format!("Car {} added.", car.vin))?;
        Ok(car.vin)
    }

    pub(crate) fn ask_car(&mut self) -> Result<CarRow, ShopError> {
        Ok(CarRow {
            vin: self.console.ask("Enter new car's VIN: ")?.trim().to_owned(),
            make: self.console.ask("Enter new car's make: ")?,
            model: self.console.ask("Enter new car's model: ")?,
            year: self.console.ask_i32("Enter new car's year: ")?,
        })
    }
}
