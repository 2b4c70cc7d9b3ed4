// dpr/src/cli/list.rs
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use dpr_common::config::Config;
use dpr_common::error::Result;
use prettytable::{format, Cell, Row, Table};

use crate::input;

#[derive(Args, Debug)]
pub struct List {
    /// Repository file to list (defaults to $DPR_HOME/repository.json)
    #[arg(long, short, value_name = "FILE")]
    pub repository: Option<PathBuf>,
}

impl List {
    pub fn run(&self, config: &Config) -> Result<()> {
        let repository = input::load_repository(self.repository.as_deref(), config)?;
        if repository.is_empty() {
            println!("{}", "0 modules in repository".yellow());
            return Ok(());
        }

        let mut modules: Vec<_> = repository.repository().iter().collect();
        modules.sort_by(|a, b| a.id.cmp(&b.id));

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Name").style_spec("b"),
            Cell::new("Version").style_spec("b"),
            Cell::new("Exports").style_spec("b"),
            Cell::new("Requires").style_spec("b"),
        ]));
        for module in &modules {
            let exports = module
                .exports
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let requires = module
                .requires
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(Row::new(vec![
                Cell::new(module.name()).style_spec("Fb"),
                Cell::new(&module.version().to_string()),
                Cell::new(&exports),
                Cell::new(&requires),
            ]));
        }
        table.printstd();
        println!(
            "{}",
            format!("{} modules in repository", modules.len()).bold()
        );
        Ok(())
    }
}
