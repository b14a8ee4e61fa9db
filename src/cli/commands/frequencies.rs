use crate::config::Config;
use crate::errors::AppResult;
use crate::models::frequency::Frequency;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};

/// Print every frequency token with its interval and label.
pub fn handle(cfg: &Config) -> AppResult<()> {
    header("Available frequencies");

    let mut table = Table::new(
        vec![
            Column::left("TOKEN"),
            Column::right("DAYS"),
            Column::left("LABEL"),
        ],
        &cfg.separator_char,
    );

    for f in Frequency::all() {
        table.add_row(vec![
            f.token().to_string(),
            f.days().to_string(),
            f.label(),
        ]);
    }

    println!("{}", table.render());
    Ok(())
}
