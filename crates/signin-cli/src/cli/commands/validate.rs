//! Validate command handler.

use anyhow::{Context, Result};
use signin_core::validation::Field;
use signin_form::update::on_field_change;
use signin_form::{FormState, FormView};

pub fn run(email: &str, password: &str, json: bool) -> Result<()> {
    let mut state = FormState::new();
    on_field_change(&mut state, Field::Email, email.to_string());
    on_field_change(&mut state, Field::Password, password.to_string());
    let view = FormView::new(&state);

    if json {
        let out = serde_json::to_string_pretty(&view).context("serialize form view")?;
        println!("{out}");
        return Ok(());
    }

    for field in Field::all() {
        let field_view = view.field(*field);
        match (field_view.error_code, &field_view.error_message) {
            (Some(code), Some(message)) => println!("{field}: {code} ({message})"),
            _ => println!("{field}: ok"),
        }
    }
    println!(
        "submit: {}",
        if view.submit_enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}
