//! Tab-separated rendering of query results.
//!
//! A header line is printed only when there is at least one row; every
//! line is the row's cells joined by tabs.

use db::models::{
    BusyCarRow, CustomerBillRow, CustomerRow, FleetOwnerRow, LowBillRow, OwnedCarRow,
    VintageCarRow,
};

/// A row type that can be printed as a table line.
pub trait Tabular {
    /// Column headers, in cell order.
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Render `rows` as a header line followed by one line per row.
pub fn render<T: Tabular>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let mut out = T::HEADERS.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&row.cells().join("\t"));
        out.push('\n');
    }
    out
}

impl Tabular for CustomerRow {
    const HEADERS: &'static [&'static str] = &["id", "fname", "lname", "phone", "address"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.fname.clone(),
            self.lname.clone(),
            self.phone.clone(),
            self.address.clone(),
        ]
    }
}

impl Tabular for OwnedCarRow {
    const HEADERS: &'static [&'static str] = &["#", "vin", "make", "model", "year"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.position.to_string(),
            self.vin.clone(),
            self.make.clone(),
            self.model.clone(),
            self.year.to_string(),
        ]
    }
}

impl Tabular for LowBillRow {
    const HEADERS: &'static [&'static str] = &["fname", "lname", "bill", "date", "comment"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.fname.clone(),
            self.lname.clone(),
            self.bill.to_string(),
            self.date.to_string(),
            self.comment.clone(),
        ]
    }
}

impl Tabular for FleetOwnerRow {
    const HEADERS: &'static [&'static str] = &["fname", "lname", "numcars"];

    fn cells(&self) -> Vec<String> {
        vec![self.fname.clone(), self.lname.clone(), self.num_cars.to_string()]
    }
}

impl Tabular for VintageCarRow {
    const HEADERS: &'static [&'static str] = &["make", "model", "year", "odometer"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.make.clone(),
            self.model.clone(),
            self.year.to_string(),
            self.odometer.to_string(),
        ]
    }
}

impl Tabular for BusyCarRow {
    const HEADERS: &'static [&'static str] = &["make", "model", "vin", "cnt"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.make.clone(),
            self.model.clone(),
            self.vin.clone(),
            self.open_requests.to_string(),
        ]
    }
}

impl Tabular for CustomerBillRow {
    const HEADERS: &'static [&'static str] = &["fname", "lname", "total_bill"];

    fn cells(&self) -> Vec<String> {
        vec![self.fname.clone(), self.lname.clone(), self.total_bill.to_string()]
    }
}
