//! The main menu loop.
//!
//! Two states: `Running` and `Terminated`.  Each turn prints the menu,
//! blocks for a choice, and runs the chosen operation to completion.
//! Invalid choices are reported and re-prompted without running anything;
//! operation failures are reported and the loop carries on.  Choosing
//! `Exit`, or reaching end of input, terminates.

use console::{ConsoleError, Prompt};
use tracing::{info, warn};

use crate::Session;

/// One main-menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    AddCustomer,
    AddMechanic,
    AddCar,
    InsertServiceRequest,
    CloseServiceRequest,
    ListCustomersWithBillLessThan100,
    ListCustomersWithMoreThan20Cars,
    ListCarsBefore1995With50000Miles,
    ListKCarsWithTheMostServices,
    ListCustomersInDescendingOrderOfTheirTotalBill,
    Exit,
}

impl MenuChoice {
    /// Every entry in menu order.
    pub const ALL: [MenuChoice; 11] = [
        Self::AddCustomer,
        Self::AddMechanic,
        Self::AddCar,
        Self::InsertServiceRequest,
        Self::CloseServiceRequest,
        Self::ListCustomersWithBillLessThan100,
        Self::ListCustomersWithMoreThan20Cars,
        Self::ListCarsBefore1995With50000Miles,
        Self::ListKCarsWithTheMostServices,
        Self::ListCustomersInDescendingOrderOfTheirTotalBill,
        Self::Exit,
    ];

    /// The number the user types, 1 through 11.
    pub fn number(self) -> u8 {
        match self {
            Self::AddCustomer => 1,
            Self::AddMechanic => 2,
            Self::AddCar => 3,
            Self::InsertServiceRequest => 4,
            Self::CloseServiceRequest => 5,
            Self::ListCustomersWithBillLessThan100 => 6,
            Self::ListCustomersWithMoreThan20Cars => 7,
            Self::ListCarsBefore1995With50000Miles => 8,
            Self::ListKCarsWithTheMostServices => 9,
            Self::ListCustomersInDescendingOrderOfTheirTotalBill => 10,
            Self::Exit => 11,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddCustomer => "AddCustomer",
            Self::AddMechanic => "AddMechanic",
            Self::AddCar => "AddCar",
            Self::InsertServiceRequest => "InsertServiceRequest",
            Self::CloseServiceRequest => "CloseServiceRequest",
            Self::ListCustomersWithBillLessThan100 => "ListCustomersWithBillLessThan100",
            Self::ListCustomersWithMoreThan20Cars => "ListCustomersWithMoreThan20Cars",
            Self::ListCarsBefore1995With50000Miles => "ListCarsBefore1995With50000Miles",
            Self::ListKCarsWithTheMostServices => "ListKCarsWithTheMostServices",
            Self::ListCustomersInDescendingOrderOfTheirTotalBill => {
                "ListCustomersInDescendingOrderOfTheirTotalBill"
            }
            Self::Exit => "< EXIT",
        }
    }

    /// Parse a typed choice. Anything but a whole number 1–11 is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let n: u8 = input.trim().parse().ok()?;
        Self::ALL.into_iter().find(|c| c.number() == n)
    }
}

/// The loop's state after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Terminated,
}

/// What happened over the life of a menu loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MenuOutcome {
    /// Operations started (1–10 chosen).
    pub operations: usize,
    /// Of those, how many reported an error.
    pub failures: usize,
}

/// Render the main menu text.
pub fn menu_text() -> String {
    let mut text = String::from("MAIN MENU\n---------\n");
    for choice in MenuChoice::ALL {
        text.push_str(&format!("{}. {}\n", choice.number(), choice.label()));
    }
    text
}

/// Drive `session` until the user exits or input ends.
///
/// # Errors
/// Only console I/O failures end the loop with an error; operation
/// failures are printed and counted in [`MenuOutcome::failures`].
pub async fn run_menu(session: &mut Session<'_>) -> Result<MenuOutcome, ConsoleError> {
    let mut outcome = MenuOutcome::default();
    let mut state = MenuState::Running;
    while state == MenuState::Running {
        state = turn(session, &mut outcome).await?;
    }
    info!(
        operations = outcome.operations,
        failures = outcome.failures,
        "menu terminated"
    );
    Ok(outcome)
}

async fn turn(session: &mut Session<'_>, outcome: &mut MenuOutcome) -> Result<MenuState, ConsoleError> {
    session.console.write(&menu_text())?;

    let Some(choice) = read_choice(session)? else {
        return Ok(MenuState::Terminated);
    };
    if choice == MenuChoice::Exit {
        return Ok(MenuState::Terminated);
    }

    outcome.operations += 1;
    info!(choice = choice.label(), "running operation");
    if let Err(err) = session.run(choice).await {
        outcome.failures += 1;
        warn!(choice = choice.label(), error = %err, "operation failed");
        session.console.say(&format!("Error: {err}"))?;
    }
    Ok(MenuState::Running)
}

/// Block until a valid choice is typed. `None` means input ended.
fn read_choice(session: &mut Session<'_>) -> Result<Option<MenuChoice>, ConsoleError> {
    loop {
        let answer = match session.console.ask("Please make your choice: ") {
            Ok(answer) => Some(answer),
            Err(ConsoleError::Closed) => return Ok(None),
            // The unreadable line has been consumed; treat it as a bad choice.
            Err(ConsoleError::Io(err)) if err.kind() == std::io::ErrorKind::InvalidData => None,
            Err(err) => return Err(err),
        };
        match answer.as_deref().and_then(MenuChoice::parse) {
            Some(choice) => return Ok(Some(choice)),
            None => session.console.say("Your input is invalid!")?,
        }
    }
}
