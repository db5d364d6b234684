//! Consecutive bot-message merging.

use std::borrow::Cow;

use murmur_core::{EventLog, Message};

/// Collapse every run of consecutive bot messages into one message.
///
/// The merged message is a copy of the run's last message with the texts of
/// the whole run joined by single spaces. All other entries, and bot
/// messages that stand alone, are borrowed unchanged.
pub fn merge_bot_messages(events: &[EventLog]) -> Vec<Cow<'_, EventLog>> {
    let mut merged: Vec<Cow<'_, EventLog>> = Vec::with_capacity(events.len());
    let mut run: Vec<&EventLog> = Vec::new();

    for event in events {
        if event.as_bot_message().is_some() {
            run.push(event);
            continue;
        }
        close_run(&mut merged, &mut run);
        merged.push(Cow::Borrowed(event));
    }
    close_run(&mut merged, &mut run);

    merged
}

fn close_run<'a>(merged: &mut Vec<Cow<'a, EventLog>>, run: &mut Vec<&'a EventLog>) {
    let messages: Vec<&Message> = run.iter().filter_map(|e| e.as_bot_message()).collect();

    match (run.as_slice(), messages.last()) {
        ([only], _) => merged.push(Cow::Borrowed(*only)),
        (_, Some(last)) => {
            let text = messages
                .iter()
                .map(|m| m.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            merged.push(Cow::Owned(EventLog::Message(Message {
                text,
                ..(*last).clone()
            })));
        }
        (_, None) => {}
    }

    run.clear();
}
