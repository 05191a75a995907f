// registro command line entry point
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use engine::config::ClientSettings;
use engine::data::csv_parser::ParticipantCsvParser;
use engine::groups::{group_ranges, group_sizes, sorted_groups, AgeGroups};
use engine::store::{FileStore, KeyValueStore, MemoryStore, TokenCache};
use engine::stream::collect_ndjson;
use engine::timeline::{merge_events, new_messages_count, visible_to_camp, PseudoEvent};
use serde::de::DeserializeOwned;
use shared::format::format_time;
use shared::models::{AgeGroup, Event, EventContent, Payment};
use tokio::fs::File;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage:
  registro groups <groups.json> <participants.csv>
  registro timeline <events.ndjson> [--payments <payments.ndjson>] [--camp <camp-id>]
  registro token <settings.json> <app> [token]";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["groups", groups, participants] => run_groups(groups, participants),
        ["timeline", rest @ ..] => run_timeline(TimelineArgs::parse(rest)?).await,
        ["token", settings, app] => run_token(settings, app, None),
        ["token", settings, app, token] => run_token(settings, app, Some(*token)),
        _ => bail!("{USAGE}"),
    }
}

fn run_groups(groups_path: &str, participants_path: &str) -> Result<()> {
    let raw = std::fs::read_to_string(groups_path)
        .with_context(|| format!("cannot read groups file '{groups_path}'"))?;
    let list: Vec<AgeGroup> = serde_json::from_str(&raw).context("invalid groups file")?;
    let groups: AgeGroups = list.into_iter().map(|g| (g.id, g)).collect();

    let camp_id = groups.values().next().map_or(0, |g| g.camp_id);
    let participants = ParticipantCsvParser::load_participants_from_csv(participants_path, camp_id)
        .with_context(|| format!("cannot import participants from '{participants_path}'"))?;

    let ranges = group_ranges(&groups);
    let sizes = group_sizes(&groups, &participants);
    for group in sorted_groups(&groups) {
        println!(
            "{:<20} {:<45} {:>4}",
            group.name,
            ranges.get(&group.id).map(String::as_str).unwrap_or_default(),
            sizes.sizes.get(&group.id).copied().unwrap_or(0)
        );
    }
    if sizes.is_missing {
        warn!("Some enrolled participants match no group");
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct TimelineArgs {
    events: String,
    payments: Option<String>,
    camp: Option<i64>,
}

impl TimelineArgs {
    fn parse(args: &[&str]) -> Result<Self> {
        let (events, mut rest) = match args {
            [events, rest @ ..] if !events.starts_with("--") => (events.to_string(), rest),
            _ => bail!("{USAGE}"),
        };
        let mut out = TimelineArgs { events, ..Default::default() };
        while let [flag, value, tail @ ..] = rest {
            match *flag {
                "--payments" => out.payments = Some(value.to_string()),
                "--camp" => {
                    out.camp = Some(value.parse().with_context(|| format!("invalid camp id '{value}'"))?)
                }
                _ => bail!("unknown option '{flag}'\n{USAGE}"),
            }
            rest = tail;
        }
        if !rest.is_empty() {
            bail!("{USAGE}");
        }
        Ok(out)
    }
}

async fn read_all<T: DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let file = File::open(path).await.with_context(|| format!("cannot open '{path}'"))?;
    let (items, bad_lines) = collect_ndjson(BufReader::new(file)).await?;
    if bad_lines > 0 {
        warn!(path, bad_lines, "Some lines could not be decoded");
    }
    Ok(items)
}

async fn run_timeline(args: TimelineArgs) -> Result<()> {
    let events: Vec<Event> = read_all(&args.events).await?;
    let payments: Vec<Payment> = match &args.payments {
        Some(path) => read_all(path).await?,
        None => Vec::new(),
    };
    let events_path = &args.events;

    let registered_at = events
        .iter()
        .filter(|e| matches!(e.content, EventContent::Registration))
        .map(|e| e.created)
        .min()
        .or_else(|| events.iter().map(|e| e.created).min())
        .ok_or_else(|| anyhow!("no events in '{events_path}'"))?;
    let events: Vec<Event> = events
        .into_iter()
        .filter(|e| !matches!(e.content, EventContent::Registration))
        .collect();

    let feed = merge_events(registered_at, &events, &payments, args.camp.map(visible_to_camp));
    info!(count = feed.len(), "Timeline built at {}", Utc::now());
    if let Some(camp) = args.camp {
        info!(camp, new_messages = new_messages_count(&events, camp), "Unread messages");
    }
    for item in &feed {
        let what = match item {
            PseudoEvent::Registered(_) => "Inscription".to_string(),
            PseudoEvent::Event(event) => match &event.content {
                EventContent::Message(message) => format!("Message : {}", message.text),
                EventContent::Validation { .. } => "Inscription validée".to_string(),
                EventContent::Deleted => "Message supprimé".to_string(),
                EventContent::Registration => "Inscription".to_string(),
                EventContent::Other(kind) => kind.clone(),
            },
            PseudoEvent::Payment(payment) => format!("{} ({})", payment.description(), payment.signed_amount()),
        };
        println!("{}  {}", format_time(&item.time()), what);
    }
    Ok(())
}

fn run_token(settings_path: &str, app: &str, token: Option<&str>) -> Result<()> {
    let settings = ClientSettings::load(settings_path)?;
    match &settings.token_store_path {
        Some(path) => token_command(TokenCache::new(FileStore::open(path)?), app, token),
        None => token_command(TokenCache::new(MemoryStore::new()), app, token),
    }
}

fn token_command<S: KeyValueStore>(mut cache: TokenCache<S>, app: &str, token: Option<&str>) -> Result<()> {
    match token {
        Some("-") => cache.forget(app),
        Some(token) => cache.save(app, token)?,
        None => println!("{}", cache.load(app).unwrap_or_default()),
    }
    Ok(())
}
