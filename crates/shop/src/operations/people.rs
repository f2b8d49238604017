//! AddCustomer and AddMechanic.

use console::Prompt;
use db::models::{NewCustomer, NewMechanic};
use tracing::{info, instrument};

use crate::{Session, ShopError};

impl Session<'_> {
    /// Prompt for a new customer's details and insert them.
    ///
    /// Returns the allocated id (row count + 1). No field is validated.
    #[instrument(skip(self))]
    pub async fn add_customer(&mut self) -> Result<i32, ShopError> {
        let customer = NewCustomer {
            fname: self.console.ask("Enter new customer's first name: ")?,
            lname: self.console.ask("Enter new customer's last name: ")?,
            phone: self.console.ask("Enter new customer's phone number: ")?,
            address: self.console.ask("Enter new customer's address: ")?,
        };

        let id = self.store.add_customer(&customer).await?;
        info!(id = id, "customer added");
        self.say(&format!("Customer {id} added."))?;
        Ok(id)
    }

    /// Prompt for a new mechanic's details and insert them.
    ///
    /// A non-numeric or negative years-of-experience answer aborts before
    /// anything is written.
    #[instrument(skip(self))]
    pub async fn add_mechanic(&mut self) -> Result<i32, ShopError> {
        let fname = self.console.ask("Enter new mechanic's first name: ")?;
        let lname = self.console.ask("Enter new mechanic's last name: ")?;
        let experience = self
            .console
            .ask_non_negative("Enter new mechanic's years of experience: ")?;

        let id = self
            .store
            .add_mechanic(&NewMechanic { fname, lname, experience })
            .await?;
        info!(id = id, "mechanic added");
        self.say(&format!("Mechanic {id} added."))?;
        Ok(id)
    }
}
