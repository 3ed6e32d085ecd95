use crate::infra::build_desk;
use crate::render::{render_dashboard, render_notification};
use clap::Args;
use visitor_desk::config::AppConfig;
use visitor_desk::error::AppError;
use visitor_desk::workflows::visitors::{
    Decision, FilterCriteria, RegistrationInput, StatusFilter,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Start from an empty desk instead of the two reference visitors
    #[arg(long)]
    pub(crate) no_seed: bool,
    /// Print the final dashboard as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { no_seed, json } = args;
    let (mut desk, sink) = build_desk(&config.desk, !no_seed)?;
    let offset = desk.settings().display_offset;

    if !json {
        println!("Front desk demo");
        println!("- Environment: {:?}", config.environment);
    }

    let registration = desk.register(
        RegistrationInput::new("Jane Roe")
            .company("Acme")
            .phone("555-1")
            .purpose("deliver parts"),
    )?;
    if !json {
        println!(
            "- Reception registered {} ({})",
            registration.record.full_name, registration.record.id
        );
        render_notification(Some(&registration.notification), offset);
    }

    desk.decide(&registration.record.id, Decision::Approved)?;

    let seeded_pending: Vec<_> = desk
        .pending_queue()
        .into_iter()
        .map(|record| record.id.clone())
        .collect();
    for id in &seeded_pending {
        desk.decide(id, Decision::Rejected)?;
    }

    desk.set_filter_criteria(FilterCriteria::default().status(StatusFilter::Approved));
    let dashboard = desk.dashboard();

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!();
    render_dashboard(&dashboard, offset);

    let events = sink.events();
    if events.is_empty() {
        println!("\nExternal alerts: none dispatched");
    } else {
        println!("\nExternal alerts:");
        for event in events {
            println!("  - {} -> {}", event.visitor_id, event.message);
        }
    }

    Ok(())
}
