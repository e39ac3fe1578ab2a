//! Login command handler.

use std::io::BufRead;

use anyhow::{Context, Result, bail};
use signin_core::auth::Submitter;
use signin_core::config::Config;
use signin_core::validation::Field;
use signin_form::{FormRuntime, FormView};

pub struct LoginOptions {
    pub email: String,
    pub password: String,
    pub show_password: bool,
    pub json: bool,
}

/// Reads the password from the first line of stdin.
pub fn read_password_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn run(config: &Config, options: LoginOptions) -> Result<()> {
    let submitter = Submitter::from_config(config).context("configure submitter")?;
    tracing::debug!(backend = ?config.submitter.backend, "login");

    let mut runtime = FormRuntime::new(submitter);
    runtime.on_field_change(Field::Email, options.email);
    runtime.on_field_change(Field::Password, options.password);
    if options.show_password {
        runtime.on_toggle_password_visibility();
    }

    if !runtime.submit_and_wait().await {
        print_view(&FormView::new(&runtime.state), options.json)?;
        let problems: Vec<String> = runtime
            .state
            .validation()
            .errors()
            .map(|(field, err)| err.message(field))
            .collect();
        bail!("Cannot submit: {}", problems.join("; "));
    }

    let view = FormView::new(&runtime.state);
    print_view(&view, options.json)?;

    if let Some(email) = runtime.session() {
        if !options.json {
            println!("Signed in as {email}");
        }
        return Ok(());
    }

    match view.banner {
        Some(banner) => bail!("{banner}"),
        None => bail!("Sign-in did not complete"),
    }
}

fn print_view(view: &FormView, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(view).context("serialize form view")?;
        println!("{out}");
    }
    Ok(())
}
