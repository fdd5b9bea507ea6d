//! Storefront CLI
//!
//! Loads a service catalog and a checkout script, fills the cart, walks the
//! checkout wizard and prints the receipts.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use jiff::Zoned;
use tracing::{error, info};

use storefront::{
    checkout::{StepProgress, StepStatus},
    fixtures::{Catalog, CheckoutScript},
    random::SmallRngSource,
    receipt::{write_cart_summary, write_order_confirmation},
    storefront::{CheckoutView, FaceAuth, Features, Storefront},
};

use crate::config::{CliConfig, SessionConfig};

mod config;
mod observability;

fn main() -> ExitCode {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // Help and version requests are reported through the same path.
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {err}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config.session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");

            ExitCode::FAILURE
        }
    }
}

fn run(session: &SessionConfig) -> Result<()> {
    let catalog = Catalog::from_path(&session.catalog)
        .with_context(|| format!("loading catalog {}", session.catalog.display()))?;

    let script = CheckoutScript::from_path(&session.checkout)
        .with_context(|| format!("loading checkout script {}", session.checkout.display()))?;

    let random = match session.seed {
        Some(seed) => SmallRngSource::seeded(seed),
        None => SmallRngSource::from_os_rng(),
    };

    let features = Features {
        face_auth: FaceAuth::from_flag(session.face_auth),
    };

    info!(
        services = catalog.services().count(),
        currency = catalog.currency().iso_alpha_code,
        face_auth = features.face_auth.is_enabled(),
        "storefront ready"
    );

    let mut store = Storefront::new(catalog.currency(), features, random);

    script.fill_cart(&catalog, store.cart_mut())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Cart")?;
    write_cart_summary(&mut out, store.cart())?;

    let flow = match store.begin_checkout() {
        CheckoutView::Wizard(flow) => flow,
        CheckoutView::EmptyCart => {
            writeln!(
                out,
                "Your cart is empty. Add a service before checking out."
            )?;

            return Ok(());
        }
    };

    let today = Zoned::now().date();

    let customer = script
        .customer
        .validate()
        .context("customer information")?;

    let schedule = script
        .service_details_form(today)?
        .validate(today)
        .context("service details")?;

    let payment = script.payment.validate().context("payment")?;

    write_progress(&mut out, &flow.progress())?;
    flow.submit_customer_info(customer)?;

    write_progress(&mut out, &flow.progress())?;
    flow.submit_service_details(schedule)?;

    write_progress(&mut out, &flow.progress())?;

    let order = store.submit_payment(payment)?.clone();

    if let Some(flow) = store.checkout() {
        write_progress(&mut out, &flow.progress())?;
    }

    write_order_confirmation(&mut out, &order)?;

    store.finish_checkout();

    Ok(())
}

fn write_progress(out: &mut impl Write, progress: &[StepProgress]) -> io::Result<()> {
    let steps: Vec<String> = progress
        .iter()
        .map(|entry| {
            let marker = match entry.status {
                StepStatus::Complete => "x",
                StepStatus::Current => ">",
                StepStatus::Upcoming => " ",
            };

            format!("[{marker}] {}", entry.step.label())
        })
        .collect();

    writeln!(out, "{}", steps.join("  "))
}
