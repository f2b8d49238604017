//! `Session` — the explicit context every workflow operation runs in.

use console::{Console, Prompt};
use db::ShopStore;

use crate::{
    table::{render, Tabular},
    MenuChoice, ShopConfig, ShopError,
};

/// One interactive session: a database gateway, a console, and the report
/// thresholds.  Operations run one at a time and share nothing else.
pub struct Session<'a> {
    pub(crate) store: &'a dyn ShopStore,
    pub(crate) console: &'a mut dyn Console,
    pub(crate) config: ShopConfig,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a dyn ShopStore, console: &'a mut dyn Console) -> Self {
        Self::with_config(store, console, ShopConfig::default())
    }

    pub fn with_config(
        store: &'a dyn ShopStore,
        console: &'a mut dyn Console,
        config: ShopConfig,
    ) -> Self {
        Self { store, console, config }
    }

    /// Run the operation behind a menu entry. `Exit` does nothing.
    pub async fn run(&mut self, choice: MenuChoice) -> Result<(), ShopError> {
        match choice {
            MenuChoice::AddCustomer => self.add_customer().await.map(|_| ()),
            MenuChoice::AddMechanic => self.add_mechanic().await.map(|_| ()),
            MenuChoice::AddCar => self.add_car().await.map(|_| ()),
            MenuChoice::InsertServiceRequest => self.insert_service_request().await.map(|_| ()),
            MenuChoice::CloseServiceRequest => self.close_service_request().await.map(|_| ()),
            MenuChoice::ListCustomersWithBillLessThan100 => {
                self.list_customers_with_bill_less_than_100().await.map(|_| ())
            }
            MenuChoice::ListCustomersWithMoreThan20Cars => {
                self.list_customers_with_more_than_20_cars().await.map(|_| ())
            }
            MenuChoice::ListCarsBefore1995With50000Miles => {
                self.list_cars_before_1995_with_50000_miles().await.map(|_| ())
            }
            MenuChoice::ListKCarsWithTheMostServices => {
                self.list_k_cars_with_the_most_services().await.map(|_| ())
            }
            MenuChoice::ListCustomersInDescendingOrderOfTheirTotalBill => self
                .list_customers_in_descending_order_of_their_total_bill()
                .await
                .map(|_| ()),
            MenuChoice::Exit => Ok(()),
        }
    }

    /// Print `rows` as a tab-separated table and return how many there were.
    pub(crate) fn print_rows<T: Tabular>(&mut self, rows: &[T]) -> Result<usize, ShopError> {
        self.console.write(&render(rows))?;
        Ok(rows.len())
    }

    pub(crate) fn say(&mut self, line: &str) -> Result<(), ShopError> {
        self.console.say(line)?;
        Ok(())
    }
}
