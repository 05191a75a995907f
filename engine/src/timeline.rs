// Dossier timeline: events, payments and the registration moment merged
// into one feed, most recent first.
use chrono::{DateTime, Utc};
use shared::models::{Actor, CampId, Event, EventContent, Message, Payment};

#[derive(Debug, Clone, PartialEq)]
pub enum PseudoEvent {
    Registered(DateTime<Utc>),
    Event(Event),
    Payment(Payment),
}

impl PseudoEvent {
    pub fn time(&self) -> DateTime<Utc> {
        match self {
            PseudoEvent::Registered(at) => *at,
            PseudoEvent::Event(event) => event.created,
            // payments only carry a day
            PseudoEvent::Payment(payment) => payment
                .date
                .naive()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }
}

/// Merges the three sources and sorts them by descending time.
/// Events rejected by `filter` are left out.
pub fn merge_events<F>(
    registered_at: DateTime<Utc>,
    events: &[Event],
    payments: &[Payment],
    filter: Option<F>,
) -> Vec<PseudoEvent>
where
    F: Fn(&Event) -> bool,
{
    let mut out = Vec::with_capacity(events.len() + payments.len() + 1);
    out.push(PseudoEvent::Registered(registered_at));
    out.extend(
        events
            .iter()
            .filter(|e| filter.as_ref().map_or(true, |keep| keep(*e)))
            .cloned()
            .map(PseudoEvent::Event),
    );
    out.extend(payments.iter().cloned().map(PseudoEvent::Payment));
    out.sort_by(|a, b| b.time().cmp(&a.time()));
    out
}

fn is_from_camp(message: &Message, camp: CampId) -> bool {
    message.origin == Actor::Director && message.origin_camp == Some(camp)
}

/// Filter for the directors' view of a dossier: messages written by the
/// directors of another camp are hidden, everything else is kept.
pub fn visible_to_camp(camp: CampId) -> impl Fn(&Event) -> bool {
    move |event| match &event.content {
        EventContent::Message(message) => message.origin != Actor::Director || is_from_camp(message, camp),
        _ => true,
    }
}

/// A message is new for a camp until one of its directors has read it.
/// Messages sent by the camp itself are never new.
pub fn is_message_new(message: &Message, camp: CampId) -> bool {
    !is_from_camp(message, camp) && !message.seen_by_camps.contains(&camp)
}

/// Number of messages in `events` that are new for `camp`.
pub fn new_messages_count(events: &[Event], camp: CampId) -> usize {
    events
        .iter()
        .filter(|e| matches!(&e.content, EventContent::Message(m) if is_message_new(m, camp)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::money::Amount;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn message(id: i64, created: &str, origin: Actor, origin_camp: Option<CampId>, seen_by: Vec<CampId>) -> Event {
        Event {
            id,
            dossier_id: 1,
            created: at(created),
            content: EventContent::Message(Message {
                text: format!("message {id}"),
                origin,
                origin_camp,
                seen_by_camps: seen_by,
            }),
        }
    }

    fn payment(id: i64, date: &str) -> Payment {
        Payment { id, amount: Amount::euros(1000), date: date.parse().unwrap(), ..Default::default() }
    }

    fn no_filter() -> Option<fn(&Event) -> bool> {
        None
    }

    #[test]
    fn test_merge_events_sorted_descending() {
        let events = vec![
            message(1, "2023-03-01T10:00:00Z", Actor::Family, None, vec![]),
            Event {
                id: 2,
                dossier_id: 1,
                created: at("2023-04-10T08:00:00Z"),
                content: EventContent::Validation { camp: None },
            },
        ];
        let payments = vec![payment(1, "2023-03-15"), payment(2, "2023-01-20")];
        let merged = merge_events(at("2023-02-01T12:00:00Z"), &events, &payments, no_filter());

        assert_eq!(merged.len(), events.len() + payments.len() + 1);
        assert!(merged.windows(2).all(|w| w[0].time() >= w[1].time()));
        assert!(matches!(merged[0], PseudoEvent::Event(Event { id: 2, .. })));
        assert!(matches!(merged[4], PseudoEvent::Payment(Payment { id: 2, .. })));
    }

    #[test]
    fn test_merge_events_empty_sources() {
        let merged = merge_events(at("2023-02-01T12:00:00Z"), &[], &[], no_filter());
        assert_eq!(merged, vec![PseudoEvent::Registered(at("2023-02-01T12:00:00Z"))]);
    }

    #[test]
    fn test_payment_time_is_midnight() {
        let event = PseudoEvent::Payment(payment(1, "2023-03-15"));
        assert_eq!(event.time(), at("2023-03-15T00:00:00Z"));
    }

    #[test]
    fn test_visible_to_camp_filter() {
        let events = vec![
            message(1, "2023-03-01T10:00:00Z", Actor::Family, None, vec![]),
            message(2, "2023-03-02T10:00:00Z", Actor::Director, Some(8), vec![]),
            message(3, "2023-03-03T10:00:00Z", Actor::Backoffice, None, vec![7]),
            message(4, "2023-03-04T10:00:00Z", Actor::Director, Some(7), vec![]),
        ];
        let merged = merge_events(at("2023-01-01T00:00:00Z"), &events, &[], Some(visible_to_camp(7)));
        let ids: Vec<i64> = merged
            .iter()
            .filter_map(|e| match e {
                PseudoEvent::Event(event) => Some(event.id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![4, 3, 1]);
    }

    #[test]
    fn test_new_messages_for_camp() {
        let events = vec![
            message(1, "2023-03-01T10:00:00Z", Actor::Family, None, vec![]),
            message(2, "2023-03-02T10:00:00Z", Actor::Family, None, vec![8, 7]),
            message(3, "2023-03-03T10:00:00Z", Actor::Backoffice, None, vec![8]),
            message(4, "2023-03-04T10:00:00Z", Actor::Director, Some(7), vec![]),
            Event {
                id: 5,
                dossier_id: 1,
                created: at("2023-03-05T10:00:00Z"),
                content: EventContent::Validation { camp: Some(7) },
            },
        ];
        let new_for_7: Vec<i64> = events
            .iter()
            .filter(|e| matches!(&e.content, EventContent::Message(m) if is_message_new(m, 7)))
            .map(|e| e.id)
            .collect();
        assert_eq!(new_for_7, vec![1, 3]);
        assert_eq!(new_messages_count(&events, 7), 2);
        // a director from camp 8 has not sent message 4
        assert_eq!(new_messages_count(&events, 8), 2);
    }
}
