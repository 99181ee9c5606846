//! Then steps for notification fan-out BDD scenarios.

use super::world::FanOutWorld;
use rstest_bdd_macros::then;

#[then(r#""{name}" receives a "{kind}" notification mentioning "{text}""#)]
fn receives_notification(
    world: &FanOutWorld,
    name: String,
    kind: String,
    text: String,
) -> Result<(), eyre::Report> {
    let records = world.notifications_of(&name)?;
    let found = records
        .iter()
        .any(|record| record.kind().as_str() == kind && record.message().contains(&text));
    if !found {
        let messages: Vec<&str> = records.iter().map(|record| record.message()).collect();
        return Err(eyre::eyre!(
            "expected {name} to receive {kind} mentioning '{text}', found {messages:?}"
        ));
    }
    Ok(())
}

#[then(r#""{name}" has no "{kind}" notification"#)]
fn has_no_notification(world: &FanOutWorld, name: String, kind: String) -> Result<(), eyre::Report> {
    let records = world.notifications_of(&name)?;
    if records.iter().any(|record| record.kind().as_str() == kind) {
        return Err(eyre::eyre!("expected {name} to have no {kind} notification"));
    }
    Ok(())
}

#[then(r#"an email titled "{subject}" was sent to "{address}""#)]
fn email_sent(world: &FanOutWorld, subject: String, address: String) -> Result<(), eyre::Report> {
    let sent = world.outbox.sent()?;
    if !sent
        .iter()
        .any(|email| email.subject == subject && email.to == address)
    {
        return Err(eyre::eyre!(
            "expected an email '{subject}' to {address}, outbox holds {} messages",
            sent.len()
        ));
    }
    Ok(())
}

#[then("{count:usize} reminder was dispatched")]
fn reminders_dispatched(world: &FanOutWorld, count: usize) -> Result<(), eyre::Report> {
    let sent = world
        .reminders_sent
        .ok_or_else(|| eyre::eyre!("reminders were not dispatched in this scenario"))?;
    if sent != count {
        return Err(eyre::eyre!("expected {count} reminders, dispatched {sent}"));
    }
    Ok(())
}
