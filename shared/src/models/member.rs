//! Member Model
//!
//! A member is one row of the members sheet. Columns are positional:
//! `name | phone | date_of_birth | sex | height | weight`. There is no
//! header row and no id column; a member is identified by its row index.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of columns in a member row (`A` through `F`)
pub const MEMBER_COLUMNS: usize = 6;

/// A raw sheet row, one text value per cell
pub type Row = Vec<String>;

/// Member entity, as transported to and from the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub phone: String,
    /// ISO-8601 date text (e.g. `1990-05-01`)
    pub date_of_birth: String,
    pub sex: Sex,
    /// Numeric, kept as text so the sheet round-trips exactly
    pub height: String,
    /// Numeric, kept as text so the sheet round-trips exactly
    pub weight: String,
}

impl MemberRecord {
    /// Flatten into the six positional cells of a sheet row
    pub fn to_row(&self) -> Row {
        vec![
            self.name.clone(),
            self.phone.clone(),
            self.date_of_birth.clone(),
            self.sex.to_string(),
            self.height.clone(),
            self.weight.clone(),
        ]
    }

    /// Build a record from a sheet row.
    ///
    /// The Sheets API drops trailing empty cells, so short rows are padded
    /// with empty strings. Cells past column `F` are ignored.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            name: cell(0),
            phone: cell(1),
            date_of_birth: cell(2),
            sex: Sex::from(cell(3)),
            height: cell(4),
            weight: cell(5),
        }
    }

    /// Parsed date of birth, `None` if the cell is not an ISO-8601 date
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d").ok()
    }

    pub fn height_value(&self) -> Option<f64> {
        self.height.trim().parse().ok()
    }

    pub fn weight_value(&self) -> Option<f64> {
        self.weight.trim().parse().ok()
    }
}

/// Sex column. Anything other than the two canonical values is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    Other(String),
}

impl From<String> for Sex {
    fn from(value: String) -> Self {
        match value.as_str() {
            "male" => Sex::Male,
            "female" => Sex::Female,
            _ => Sex::Other(value),
        }
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.to_string()
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
            Sex::Other(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_from_row_keeps_positional_order() {
        let record = MemberRecord::from_row(&row(&[
            "Ana Ruiz",
            "+34 600 111 222",
            "1990-05-01",
            "female",
            "165",
            "58.5",
        ]));

        assert_eq!(record.name, "Ana Ruiz");
        assert_eq!(record.phone, "+34 600 111 222");
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.height_value(), Some(165.0));
        assert_eq!(record.weight_value(), Some(58.5));
        assert_eq!(
            record.date_of_birth(),
            NaiveDate::from_ymd_opt(1990, 5, 1)
        );
    }

    #[test]
    fn test_from_row_pads_short_rows() {
        let record = MemberRecord::from_row(&row(&["Luis", "600"]));
        assert_eq!(record.name, "Luis");
        assert_eq!(record.date_of_birth, "");
        assert_eq!(record.sex, Sex::Other(String::new()));
        assert_eq!(record.to_row().len(), MEMBER_COLUMNS);
    }

    #[test]
    fn test_from_row_ignores_extra_cells() {
        let record =
            MemberRecord::from_row(&row(&["A", "B", "2000-01-01", "male", "1", "2", "extra"]));
        assert_eq!(record.weight, "2");
        assert_eq!(record.to_row(), row(&["A", "B", "2000-01-01", "male", "1", "2"]));
    }

    #[test]
    fn test_typed_accessors_never_fail() {
        let record = MemberRecord::from_row(&row(&["X", "", "01/05/1990", "", "tall", ""]));
        assert_eq!(record.date_of_birth(), None);
        assert_eq!(record.height_value(), None);
        assert_eq!(record.weight_value(), None);
    }

    #[test]
    fn test_sex_free_text_round_trips() {
        let sex = Sex::from("non-binary".to_string());
        assert_eq!(sex, Sex::Other("non-binary".into()));
        assert_eq!(sex.to_string(), "non-binary");

        // Canonical values are lowercase only
        assert_eq!(Sex::from("Male".to_string()), Sex::Other("Male".into()));
    }

    #[test]
    fn test_serde_uses_text_form() {
        let record = MemberRecord::from_row(&row(&["A", "1", "2000-01-01", "male", "180", "80"]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sex"], "male");

        let parsed: MemberRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
