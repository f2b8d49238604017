//! The five listing reports. Each prints its rows as a tab-separated table
//! followed by a count line, and returns the count.

use console::Prompt;
use tracing::{debug, instrument};

use crate::{Session, ShopError};

impl Session<'_> {
    #[instrument(skip(self))]
    pub async fn list_customers_with_bill_less_than_100(&mut self) -> Result<usize, ShopError> {
        let limit = self.config.low_bill_limit;
        let rows = self.store.bills_below(limit).await?;
        let count = self.print_rows(&rows)?;
        self.say(&format!("Number of closed requests billed under ${limit}: {count}"))?;
        Ok(count)
    }

    #[instrument(skip(self))]
    pub async fn list_customers_with_more_than_20_cars(&mut self) -> Result<usize, ShopError> {
        let min_cars = self.config.fleet_min_cars;
        let rows = self.store.customers_owning_more_than(min_cars).await?;
        let count = self.print_rows(&rows)?;
        self.say(&format!("Number of customers with more than {min_cars} cars: {count}"))?;
        Ok(count)
    }

    #[instrument(skip(self))]
    pub async fn list_cars_before_1995_with_50000_miles(&mut self) -> Result<usize, ShopError> {
        let year = self.config.vintage_before_year;
        let odometer = self.config.vintage_max_odometer;
        let rows = self
            .store
            .cars_built_before_under_mileage(year, odometer)
            .await?;
        let count = self.print_rows(&rows)?;
        self.say(&format!(
            "Number of cars built before {year} with under {odometer} miles: {count}"
        ))?;
        Ok(count)
    }

    /// List up to `limit` cars with exactly `threshold` open requests.
    ///
    /// The match is an equality, not a minimum.
    #[instrument(skip(self))]
    pub async fn list_k_cars_with_the_most_services(&mut self) -> Result<usize, ShopError> {
        let threshold = self
            .console
            .ask_non_negative("How many open service requests should a listed car have?: ")?;
        let limit = self
            .console
            .ask_non_negative("How many cars should be listed?: ")?;
        debug!(threshold = threshold, limit = limit, "listing busy cars");

        let rows = self
            .store
            .cars_with_open_requests(i64::from(threshold), i64::from(limit))
            .await?;
        let count = self.print_rows(&rows)?;
        self.say(&format!("Number of cars that fit this criteria: {count}"))?;
        Ok(count)
    }

    #[instrument(skip(self))]
    pub async fn list_customers_in_descending_order_of_their_total_bill(
        &mut self,
    ) -> Result<usize, ShopError> {
        let rows = self.store.customers_by_total_bill().await?;
        let count = self.print_rows(&rows)?;
        self.say(&format!("Number of billed customers: {count}"))?;
        Ok(count)
    }
}
