//! The `studynotes grades` command.

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};

use studynotes_core::grades::{parse_mark, summarize, FirstBimester, SecondBimester};

/// Marks on a 0-10 scale. A comma works as the decimal separator; missing
/// marks count as 0.
#[derive(Args)]
pub struct Marks {
    #[arg(long, default_value = "0")]
    list1: String,
    #[arg(long, default_value = "0")]
    aps1: String,
    #[arg(long, default_value = "0")]
    exam1: String,
    #[arg(long, default_value = "0")]
    list2: String,
    #[arg(long, default_value = "0")]
    list3: String,
    #[arg(long, default_value = "0")]
    aps2: String,
    #[arg(long, default_value = "0")]
    exam2: String,
}

pub fn execute(marks: Marks) -> Result<()> {
    let first = FirstBimester {
        list1: parse_mark(&marks.list1),
        aps1: parse_mark(&marks.aps1),
        exam1: parse_mark(&marks.exam1),
    };
    let second = SecondBimester {
        list2: parse_mark(&marks.list2),
        list3: parse_mark(&marks.list3),
        aps2: parse_mark(&marks.aps2),
        exam2: parse_mark(&marks.exam2),
    };
    let summary = summarize(&first, &second)?;

    let mut table = Table::new();
    table.set_header(vec!["", "Average"]);
    table.add_row(vec![Cell::new("1st bimester"), Cell::new(format!("{:.2}", summary.first))]);
    table.add_row(vec![Cell::new("2nd bimester"), Cell::new(format!("{:.2}", summary.second))]);
    table.add_row(vec![
        Cell::new("Final"),
        Cell::new(format!("{:.2}", summary.final_average)),
    ]);

    println!("{table}");
    Ok(())
}
