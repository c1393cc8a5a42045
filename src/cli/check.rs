use colored::Colorize;
use comfy_table::{Cell, Table};
use tracing::info;

use crate::error::{DoormanError, Result};
use crate::models::{SignInRecord, SignUpRecord};
use crate::validation::{get_validation_errors, sign_in_schema, sign_up_schema, FieldErrorMap, ValidationFailure};

fn read_password(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

pub fn signin(email: &str, password: Option<String>) -> Result<()> {
    let record = SignInRecord::new(email, read_password(password)?);
    report("sign-in", sign_in_schema().validate(&record))
}

pub fn signup(name: &str, email: &str, password: Option<String>) -> Result<()> {
    let record = SignUpRecord::new(name, email, read_password(password)?);
    report("sign-up", sign_up_schema().validate(&record))
}

fn report(form: &str, outcome: std::result::Result<(), ValidationFailure>) -> Result<()> {
    match outcome {
        Ok(()) => {
            info!(form, "check passed");
            println!("{} {form} input is valid", "\u{2713}".green());
            Ok(())
        }
        Err(failure) => {
            let errors = get_validation_errors(&failure);
            info!(form, fields = errors.len(), "check failed");
            println!("{}", error_table(&errors));
            Err(DoormanError::InvalidForm(errors.len()))
        }
    }
}

fn error_table(errors: &FieldErrorMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Problem"]);
    for (field, message) in errors {
        table.add_row(vec![Cell::new(field), Cell::new(message.as_str().red())]);
    }
    table
}
