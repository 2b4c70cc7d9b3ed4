// dpr/src/output.rs
use std::io::Write;

use colored::Colorize;
use dpr_common::classification::{Classification, ClassifiedSet};
use dpr_common::descriptor::{DeploymentDescriptor, DescriptorWriter};
use dpr_common::error::{DprError, Result};
use dpr_common::model::ApplicationId;
use prettytable::{format, Cell, Row, Table};

/// Writes descriptors as JSON documents, one per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDescriptorWriter {
    pub compact: bool,
}

impl DescriptorWriter for JsonDescriptorWriter {
    fn write(&self, descriptor: &DeploymentDescriptor, out: &mut dyn Write) -> Result<()> {
        if self.compact {
            serde_json::to_writer(&mut *out, descriptor)?;
        } else {
            serde_json::to_writer_pretty(&mut *out, descriptor)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

fn role_cell(classification: Classification) -> Cell {
    let spec = match classification {
        Classification::Content => "Fg",
        Classification::Use => "Fc",
        Classification::Provision => "Fy",
    };
    Cell::new(&classification.to_string()).style_spec(spec)
}

pub fn print_classified(set: &ClassifiedSet) {
    println!(
        "{}{}",
        "==> ".bold().blue(),
        format!("Deployment for {}", set.application()).bold()
    );

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.add_row(Row::new(vec![
        Cell::new("Module").style_spec("b"),
        Cell::new("Version").style_spec("b"),
        Cell::new("Role").style_spec("b"),
    ]));
    for module in set.modules() {
        table.add_row(Row::new(vec![
            Cell::new(module.module.name()).style_spec("Fb"),
            Cell::new(&module.module.version().to_string()),
            role_cell(module.classification),
        ]));
    }
    table.printstd();

    if !set.imports().is_empty() {
        println!("{}", "Imports:".bold());
        for requirement in set.imports() {
            println!("  {requirement}");
        }
    }
    println!(
        "{}",
        format!(
            "{} content, {} use, {} provision ({} probe rounds)",
            set.content().len(),
            set.used().len(),
            set.provisioned().len(),
            set.rounds()
        )
        .bold()
    );
}

/// Prints one failed application to stderr, one line per underlying problem.
pub fn report_failure(application: &ApplicationId, err: &DprError) {
    eprintln!(
        "{}: Failed to resolve {}",
        "Error".red().bold(),
        application.to_string().bold()
    );
    if let DprError::IsolationConflict(failure) = err {
        eprintln!(
            "  Suspected circular dependencies in application {}",
            failure.application
        );
    }
    for message in err.messages() {
        eprintln!("  {message}");
    }
}
