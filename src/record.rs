use std::ops::RangeInclusive;

use model::{Cell, Table};
use serde::{Deserialize, Serialize};

/// Column names of a patient table, in order.
pub const COLUMNS: [&str; 6] = ["age", "sex", "bmi", "children", "smoker", "region"];

pub const AGE_RANGE: RangeInclusive<u8> = 18..=100;
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=50.0;
pub const CHILDREN_RANGE: RangeInclusive<u8> = 0..=10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Smoker {
    Yes,
    No,
}

impl Smoker {
    pub fn label(self) -> &'static str {
        match self {
            Smoker::Yes => "Yes",
            Smoker::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Northeast,
        Region::Northwest,
        Region::Southeast,
        Region::Southwest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::Northeast => "Northeast",
            Region::Northwest => "Northwest",
            Region::Southeast => "Southeast",
            Region::Southwest => "Southwest",
        }
    }
}

/// One insured individual as entered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub age: u8,
    pub sex: Sex,
    pub bmi: f64,
    pub children: u8,
    pub smoker: Smoker,
    pub region: Region,
}

impl PatientRecord {
    /// Builds the single row table the prediction routine consumes.
    pub fn to_table(&self) -> model::Result<Table> {
        let mut table = Table::new(COLUMNS);
        let row = vec![
            Cell::Int(i64::from(self.age)),
            Cell::from(self.sex.label()),
            Cell::Float(self.bmi),
            Cell::Int(i64::from(self.children)),
            Cell::from(self.smoker.label()),
            Cell::from(self.region.label()),
        ];

        table.push_row(row)?;
        Ok(table)
    }
}
