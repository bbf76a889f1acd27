//! Weighted grade averages for a two-bimester course.
//!
//! First bimester: list 20%, APS 40%, exam 40%.
//! Second bimester: two lists at 10% each, APS 20%, exam 60%.
//! The final grade is the mean of the two bimester averages.

use serde::{Deserialize, Serialize};

use crate::error::GradeError;

const MAX_GRADE: f64 = 10.0;

/// Marks for the first bimester, each on a 0-10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstBimester {
    pub list1: f64,
    pub aps1: f64,
    pub exam1: f64,
}

/// Marks for the second bimester, each on a 0-10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondBimester {
    pub list2: f64,
    pub list3: f64,
    pub aps2: f64,
    pub exam2: f64,
}

/// Computed averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub first: f64,
    pub second: f64,
    pub final_average: f64,
}

impl FirstBimester {
    pub fn average(&self) -> Result<f64, GradeError> {
        check("list1", self.list1)?;
        check("aps1", self.aps1)?;
        check("exam1", self.exam1)?;
        Ok(self.list1 * 0.2 + self.aps1 * 0.4 + self.exam1 * 0.4)
    }
}

impl SecondBimester {
    pub fn average(&self) -> Result<f64, GradeError> {
        check("list2", self.list2)?;
        check("list3", self.list3)?;
        check("aps2", self.aps2)?;
        check("exam2", self.exam2)?;
        Ok(self.list2 * 0.1 + self.list3 * 0.1 + self.aps2 * 0.2 + self.exam2 * 0.6)
    }
}

/// Both bimester averages and the final grade.
pub fn summarize(first: &FirstBimester, second: &SecondBimester) -> Result<GradeSummary, GradeError> {
    let first = first.average()?;
    let second = second.average()?;
    Ok(GradeSummary {
        first,
        second,
        final_average: (first + second) / 2.0,
    })
}

/// Read a mark typed by the user.
///
/// Only the leading number counts, so `"7abc"` reads as 7. A comma works as
/// the decimal point. Input without a leading number counts as 0.
pub fn parse_mark(input: &str) -> f64 {
    let text = input.trim_start().replace(',', ".");
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;
    for (i, c) in text.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    text[..end].trim_end_matches('.').parse().unwrap_or(0.0)
}

fn check(field: &'static str, value: f64) -> Result<(), GradeError> {
    if (0.0..=MAX_GRADE).contains(&value) {
        Ok(())
    } else {
        Err(GradeError::OutOfRange { field, value })
    }
}
